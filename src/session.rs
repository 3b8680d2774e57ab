//! The public widget surface.
//!
//! A [`Session`] owns one dialog controller, one notifier and one shared
//! config behind a mutex, so clones of it are cheap handles onto the same
//! widget. Host integrations feed user activity and timer wakeups in through
//! [`Session::handle_click`], [`Session::handle_key`] and
//! [`Session::deliver`].
//!
//! Resolved responders are invoked after the session lock is released, so a
//! dialog callback may call straight back into the session — the request is
//! queued behind the dialog that is resolving, never shown in its place.

use crate::config::{Config, Labels, Templates};
use crate::dialog::controller::DialogController;
use crate::dialog::{DialogKind, DialogOutcome, DialogTicket, PendingDialog, Responder};
use crate::error::{Error, Result};
use crate::events::{Control, EventSink, Key, SessionEvent, Wakeup};
use crate::host::Host;
use crate::notify::Notifier;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

struct Inner {
    controller: DialogController,
    notifier: Notifier,
    config: Config,
    host: Box<dyn Host>,
    events: EventSink,
}

/// One independent dialog-and-notification widget instance
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
}

impl Session {
    /// Create a session over the given host with default configuration
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, Config::default())
    }

    /// Create a session over the given host with explicit configuration
    pub fn with_config(host: impl Host + 'static, config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                controller: DialogController::default(),
                notifier: Notifier::default(),
                config,
                host: Box::new(host),
                events: EventSink::default(),
            })),
        }
    }

    /// Install a sender for lifecycle events
    pub fn set_event_sender(&self, sender: mpsc::UnboundedSender<SessionEvent>) -> Result<()> {
        self.lock()?.events.set(sender);
        Ok(())
    }

    // ---- dialogs ----------------------------------------------------------

    /// Queue an alert dialog
    pub fn alert(&self, message: impl Into<String>) -> Result<DialogTicket> {
        self.open(DialogKind::Alert, message)
    }

    /// Queue a confirm dialog
    pub fn confirm(&self, message: impl Into<String>) -> Result<DialogTicket> {
        self.open(DialogKind::Confirm, message)
    }

    /// Queue a prompt dialog
    pub fn prompt(&self, message: impl Into<String>) -> Result<DialogTicket> {
        self.open(DialogKind::Prompt, message)
    }

    /// Queue a dialog of the given kind and get an awaitable ticket for its
    /// outcome. Dropping the ticket discards the outcome.
    pub fn open(&self, kind: DialogKind, message: impl Into<String>) -> Result<DialogTicket> {
        let (tx, rx) = oneshot::channel();
        let id = self.submit(kind, message.into(), Responder::Channel(tx))?;
        Ok(DialogTicket::new(id, rx))
    }

    /// Queue an alert dialog with a callback
    pub fn alert_with(
        &self,
        message: impl Into<String>,
        callback: impl FnOnce(DialogOutcome) + Send + 'static,
    ) -> Result<()> {
        self.open_with(DialogKind::Alert, message, callback)
    }

    /// Queue a confirm dialog with a callback
    pub fn confirm_with(
        &self,
        message: impl Into<String>,
        callback: impl FnOnce(DialogOutcome) + Send + 'static,
    ) -> Result<()> {
        self.open_with(DialogKind::Confirm, message, callback)
    }

    /// Queue a prompt dialog with a callback
    pub fn prompt_with(
        &self,
        message: impl Into<String>,
        callback: impl FnOnce(DialogOutcome) + Send + 'static,
    ) -> Result<()> {
        self.open_with(DialogKind::Prompt, message, callback)
    }

    /// Queue a dialog of the given kind, resolving through a callback
    pub fn open_with(
        &self,
        kind: DialogKind,
        message: impl Into<String>,
        callback: impl FnOnce(DialogOutcome) + Send + 'static,
    ) -> Result<()> {
        self.submit(kind, message.into(), Responder::Callback(Box::new(callback)))?;
        Ok(())
    }

    fn submit(&self, kind: DialogKind, message: String, responder: Responder) -> Result<Uuid> {
        let item = PendingDialog::new(kind, message, responder);
        let id = item.id;

        let mut inner = self.lock()?;
        let Inner {
            controller,
            host,
            config,
            events,
            ..
        } = &mut *inner;
        controller.submit(item, host.as_mut(), config, events)?;
        Ok(id)
    }

    // ---- notifications ----------------------------------------------------

    /// Show a transient log message
    pub fn log(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, None)
    }

    /// Show a transient log message tagged "success"
    pub fn success(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, Some("success".to_string()))
    }

    /// Show a transient log message tagged "error"
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, Some("error".to_string()))
    }

    /// Show a transient log message with an explicit category
    pub fn notify(&self, message: impl Into<String>, category: Option<String>) -> Result<()> {
        let mut inner = self.lock()?;
        let Inner {
            notifier,
            host,
            config,
            events,
            ..
        } = &mut *inner;
        notifier.notify(message.into(), category, host.as_mut(), config, events)?;
        Ok(())
    }

    /// A logger bound to a custom category, for call sites that always tag
    /// the same way
    pub fn extend(&self, category: impl Into<String>) -> CategoryLogger {
        CategoryLogger {
            session: self.clone(),
            category: category.into(),
        }
    }

    // ---- host integration entry points ------------------------------------

    /// Report a control click
    pub fn handle_click(&self, control: Control) -> Result<()> {
        let resolved = {
            let mut inner = self.lock()?;
            let Inner {
                controller,
                host,
                config,
                events,
                ..
            } = &mut *inner;
            controller.handle_click(control, host.as_mut(), config, events)?
        };

        if let Some((responder, outcome)) = resolved {
            responder.deliver(outcome);
        }
        Ok(())
    }

    /// Report a key from the document-wide listener
    pub fn handle_key(&self, key: Key) -> Result<()> {
        let resolved = {
            let mut inner = self.lock()?;
            let Inner {
                controller,
                host,
                config,
                events,
                ..
            } = &mut *inner;
            controller.handle_key(key, host.as_mut(), config, events)?
        };

        if let Some((responder, outcome)) = resolved {
            responder.deliver(outcome);
        }
        Ok(())
    }

    /// Hand a scheduled wakeup back to the widget
    pub fn deliver(&self, wakeup: Wakeup) -> Result<()> {
        let mut inner = self.lock()?;
        let Inner {
            controller,
            notifier,
            host,
            events,
            ..
        } = &mut *inner;
        match wakeup {
            Wakeup::FocusInput { dialog } => controller.handle_focus_wakeup(dialog, host.as_mut()),
            Wakeup::RevealLog { entry } => notifier.handle_reveal(entry, host.as_mut()),
            Wakeup::ExpireOldestLog => notifier.handle_expire(host.as_mut(), events),
        }
    }

    /// Whether a dialog is currently displayed
    pub fn is_open(&self) -> Result<bool> {
        Ok(self.lock()?.controller.is_open())
    }

    // ---- configuration -----------------------------------------------------

    /// Current button labels
    pub fn labels(&self) -> Result<Labels> {
        Ok(self.lock()?.config.labels.clone())
    }

    /// Replace the button labels. Dialogs already displayed keep the labels
    /// they rendered with; queued dialogs pick up the new ones.
    pub fn set_labels(&self, labels: Labels) -> Result<()> {
        self.lock()?.config.labels = labels;
        Ok(())
    }

    /// Current log auto-dismiss delay
    pub fn delay(&self) -> Result<Duration> {
        Ok(self.lock()?.config.delay)
    }

    /// Replace the log auto-dismiss delay
    pub fn set_delay(&self, delay: Duration) -> Result<()> {
        self.lock()?.config.delay = delay;
        Ok(())
    }

    /// Current reveal lag for log entries
    pub fn reveal_delay(&self) -> Result<Duration> {
        Ok(self.lock()?.config.reveal_delay)
    }

    /// Replace the reveal lag for log entries
    pub fn set_reveal_delay(&self, delay: Duration) -> Result<()> {
        self.lock()?.config.reveal_delay = delay;
        Ok(())
    }

    /// Replace the markup templates
    pub fn set_templates(&self, templates: Templates) -> Result<()> {
        self.lock()?.config.templates = templates;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| Error::Poisoned)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

/// A notifier handle bound to one category
#[derive(Debug, Clone)]
pub struct CategoryLogger {
    session: Session,
    category: String,
}

impl CategoryLogger {
    /// The category every message from this handle is tagged with
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Show a transient log message tagged with the bound category
    pub fn log(&self, message: impl Into<String>) -> Result<()> {
        self.session.notify(message, Some(self.category.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn session() -> (Session, crate::host::mock::MockHandle) {
        let host = MockHost::new();
        let handle = host.handle();
        (Session::new(host), handle)
    }

    #[test]
    fn test_callback_may_reenter_the_session() {
        let (session, handle) = session();
        let reentered = Arc::new(AtomicBool::new(false));

        let inner_session = session.clone();
        let flag = reentered.clone();
        session
            .alert_with("outer", move |_| {
                inner_session.alert_with("inner", |_| {}).unwrap();
                flag.store(true, Ordering::SeqCst);
            })
            .unwrap();

        session.handle_click(Control::Ok).unwrap();

        assert!(reentered.load(Ordering::SeqCst));
        assert!(handle.last_markup().contains("inner"));
    }

    #[test]
    fn test_extend_binds_category() {
        let (session, handle) = session();

        let warner = session.extend("warning");
        assert_eq!(warner.category(), "warning");
        warner.log("careful").unwrap();

        let logs = handle.logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].markup.contains("hark-log-warning"));
    }

    #[test]
    fn test_clones_share_one_widget() {
        let (session, handle) = session();
        let clone = session.clone();

        let _ticket = session.alert("from first handle").unwrap();
        let _other = clone.alert("queued behind").unwrap();

        assert_eq!(handle.mount_count(), 1);
        assert!(handle.last_markup().contains("from first handle"));
    }
}
