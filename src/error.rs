/// Result type for widget operations
pub type Result<T> = std::result::Result<T, Error>;

/// Widget-specific error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dialog kind name could not be parsed. Nothing is enqueued when this
    /// is returned.
    #[error("unknown dialog kind '{0}' (expected alert, confirm or prompt)")]
    UnknownDialogKind(String),

    /// The dialog was dropped before an outcome was delivered, usually
    /// because the owning session went away while the request was queued.
    #[error("dialog was dropped before resolving")]
    SessionClosed,

    /// The session state was poisoned by a panic on another thread.
    #[error("session state poisoned by a panicked thread")]
    Poisoned,

    /// A host capability call failed.
    #[error("host operation failed: {0}")]
    Host(#[from] anyhow::Error),
}
