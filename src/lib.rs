//! Queue-driven modal dialogs and transient toast notifications.
//!
//! `hark` implements the presentation state machine behind alert / confirm /
//! prompt dialogs and toast-style log messages: what is currently shown, how
//! clicks and keys map onto outcomes, and when the next queued request takes
//! the display. Dialog requests are served strictly one at a time in
//! submission order; log messages bypass the queue entirely and expire on a
//! timer.
//!
//! The crate renders markup but never touches a real surface. A host
//! integration implements [`host::Host`] — mount markup, toggle classes,
//! wire native events, run timers — and feeds user activity back through the
//! [`Session`] entry points. [`host::mock::MockHost`] ships as a recording
//! implementation for tests.
//!
//! ```ignore
//! let host = MockHost::new();
//! let session = Session::new(host);
//!
//! let ticket = session.confirm("Delete the file?")?;
//! // ... the host reports the user's click ...
//! session.handle_click(Control::Ok)?;
//! assert!(ticket.outcome().await?.confirmed);
//!
//! session.success("File deleted");
//! ```

pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod host;
pub mod notify;
pub mod session;

pub use config::{Config, Labels, Templates};
pub use dialog::renderer::{classes, DialogFragment};
pub use dialog::{DialogKind, DialogOutcome, DialogTicket};
pub use error::{Error, Result};
pub use events::{Control, Key, SessionEvent, Wakeup};
pub use host::{EventName, EventTarget, Host};
pub use notify::LogEntry;
pub use session::{CategoryLogger, Session};
