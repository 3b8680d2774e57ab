//! Host capabilities the widget consumes.
//!
//! The core never touches a real surface. Everything environment-specific —
//! mounting markup, toggling presentation classes, wiring native events,
//! reading the prompt input, focus, timers — goes through the [`Host`] trait,
//! implemented once per environment. [`mock::MockHost`] is the recording
//! implementation used by this crate's own tests.

pub mod mock;

use crate::dialog::renderer::DialogFragment;
use crate::events::Wakeup;
use crate::notify::LogEntry;
use anyhow::Result;
use std::time::Duration;
use uuid::Uuid;

/// Event attachment points inside the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The OK control of the mounted dialog
    OkButton,
    /// The Cancel control of the mounted dialog
    CancelButton,
    /// The document-wide listener used for the keyboard contract
    Document,
}

/// Event names the widget binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Activation of a control
    Click,
    /// A key press reported by the document-wide listener
    Key,
}

/// The document-like surface, event binding, focus and timer capabilities
/// consumed by the widget.
///
/// Implementations translate these calls onto their native environment and
/// feed user activity back through the session's `handle_click`,
/// `handle_key` and `deliver` entry points.
pub trait Host: Send {
    /// Place the fragment's markup inside the dialog container, replacing
    /// whatever was mounted before. Control-level event bindings die with the
    /// replaced markup; only the document-wide listener survives a remount.
    fn mount_dialog(&mut self, fragment: &DialogFragment) -> Result<()>;

    /// Apply class strings to the dialog container and the overlay
    fn apply_dialog_classes(&mut self, container: &str, overlay: &str) -> Result<()>;

    /// Bind a native event. Returns `Ok(false)` when the target does not
    /// exist in the current markup; the widget skips such controls.
    fn attach(&mut self, target: EventTarget, event: EventName) -> Result<bool>;

    /// Remove a native event binding. Detaching something never attached is
    /// not an error.
    fn detach(&mut self, target: EventTarget, event: EventName) -> Result<()>;

    /// Drop focus from whatever page element currently holds it
    fn clear_focus(&mut self) -> Result<()>;

    /// Give focus to the mounted prompt input
    fn focus_input(&mut self) -> Result<()>;

    /// Current text of the mounted prompt input, or `None` when no input is
    /// present
    fn input_value(&self) -> Result<Option<String>>;

    /// Insert a log entry at the top of the log container
    fn insert_log(&mut self, entry: &LogEntry, markup: &str) -> Result<()>;

    /// Tag a log entry as shown so its enter animation runs
    fn reveal_log(&mut self, id: Uuid) -> Result<()>;

    /// Remove a log entry from the log container
    fn remove_log(&mut self, id: Uuid) -> Result<()>;

    /// Run a timer and hand the wakeup back to the session once `after` has
    /// passed. `Duration::ZERO` means the host's next tick.
    fn schedule(&mut self, wakeup: Wakeup, after: Duration) -> Result<()>;
}
