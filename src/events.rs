//! Session lifecycle events and host-delivered input primitives.

use crate::dialog::DialogKind;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Events emitted by the session as dialogs and log entries move through
/// their lifecycles. Delivery is best-effort over an unbounded channel; a
/// session without a sender installed emits nothing.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A dialog request entered the queue. `depth` is the queue length after
    /// the request was appended.
    DialogQueued {
        id: Uuid,
        kind: DialogKind,
        depth: usize,
    },

    /// The head of the queue became the visible dialog
    DialogOpened { id: Uuid, kind: DialogKind },

    /// The visible dialog resolved with the given confirmation
    DialogResolved {
        id: Uuid,
        kind: DialogKind,
        confirmed: bool,
    },

    /// The queue drained and the dialog chrome was hidden
    QueueIdle,

    /// A log entry was inserted
    LogPosted { id: Uuid, category: Option<String> },

    /// A log entry was removed by the eviction schedule
    LogExpired { id: Uuid },

    /// Custom host-defined events
    Custom(String, serde_json::Value),
}

/// Click targets a host integration can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The OK / confirm control
    Ok,
    /// The Cancel / dismiss control
    Cancel,
}

/// Keys the widget reacts to while a dialog is showing.
///
/// Hosts forward only these; anything else on the document-wide listener is
/// the host's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Confirm key; follows the OK path when an OK control is bound
    Enter,
    /// Cancel key; follows the Cancel path when a Cancel control is bound
    Escape,
}

/// Deferred work the widget asks the host to schedule.
///
/// The host runs its timer and hands the value back through
/// [`crate::session::Session::deliver`] once the requested lag has passed.
/// There is no cancellation: a scheduled wakeup always eventually fires, and
/// the widget ignores the ones that arrive stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// Focus the prompt input of the identified dialog. Requested with zero
    /// lag so the host delivers it on its next tick, after the markup is
    /// attached.
    FocusInput { dialog: Uuid },

    /// Tag the identified log entry as shown (enter animation)
    RevealLog { entry: Uuid },

    /// Remove the oldest log entry still visible, if any
    ExpireOldestLog,
}

/// Best-effort sender for session events
#[derive(Debug, Default)]
pub(crate) struct EventSink {
    sender: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl EventSink {
    pub(crate) fn set(&mut self, sender: mpsc::UnboundedSender<SessionEvent>) {
        self.sender = Some(sender);
    }

    /// Send an event if a sender is configured
    pub(crate) fn emit(&self, event: SessionEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}
