//! The dialog presentation state machine.
//!
//! The controller is responsible for:
//! - activating the head of the queue and marking the session open
//! - mapping clicks and keys onto the OK / Cancel outcome paths
//! - running common teardown exactly once per shown dialog
//! - activating the next queued request or going idle
//!
//! It is synchronous and single-owner; the session serializes access and
//! invokes resolved responders after releasing its lock, so a callback may
//! re-enter the public API freely.

use super::bindings::BindingSet;
use super::queue::DialogQueue;
use super::renderer;
use super::{DialogKind, DialogOutcome, PendingDialog, Responder};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{Control, EventSink, Key, SessionEvent, Wakeup};
use crate::host::{EventName, EventTarget, Host};
use std::time::Duration;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// A resolution handed back to the session, which invokes the responder with
/// the outcome after releasing its lock
pub(crate) type Resolved = (Responder, DialogOutcome);

/// Queue-driven dialog state machine: Idle when no request is displayed,
/// Showing otherwise
#[derive(Debug, Default)]
pub(crate) struct DialogController {
    queue: DialogQueue,
    bindings: BindingSet,
    open: bool,
}

impl DialogController {
    /// Whether a dialog is currently displayed
    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    /// Append a request; if nothing is showing, display it immediately.
    /// A request made while a dialog is open never replaces the visible one.
    pub(crate) fn submit(
        &mut self,
        item: PendingDialog,
        host: &mut dyn Host,
        config: &Config,
        events: &EventSink,
    ) -> Result<()> {
        let (id, kind) = (item.id, item.kind);
        let depth = self.queue.enqueue(item);
        debug!(%id, %kind, depth, "dialog queued");
        events.emit(SessionEvent::DialogQueued { id, kind, depth });

        if !self.open {
            self.activate(host, config, events)?;
        }
        Ok(())
    }

    /// A control click reported by the host
    pub(crate) fn handle_click(
        &mut self,
        control: Control,
        host: &mut dyn Host,
        config: &Config,
        events: &EventSink,
    ) -> Result<Option<Resolved>> {
        if !self.open {
            trace!(?control, "click while idle; ignoring");
            return Ok(None);
        }

        match control {
            Control::Ok if self.bindings.is_attached(EventTarget::OkButton, EventName::Click) => {
                self.resolve(true, host, config, events)
            }
            Control::Cancel
                if self
                    .bindings
                    .is_attached(EventTarget::CancelButton, EventName::Click) =>
            {
                self.resolve(false, host, config, events)
            }
            _ => {
                trace!(?control, "click on unbound control; ignoring");
                Ok(None)
            }
        }
    }

    /// A key reported by the host's document-wide listener. Enter follows the
    /// OK path when an OK control is bound; Escape follows the Cancel path
    /// when a Cancel control is bound.
    pub(crate) fn handle_key(
        &mut self,
        key: Key,
        host: &mut dyn Host,
        config: &Config,
        events: &EventSink,
    ) -> Result<Option<Resolved>> {
        if !self.open || !self.bindings.is_attached(EventTarget::Document, EventName::Key) {
            trace!(?key, "key while idle; ignoring");
            return Ok(None);
        }

        match key {
            Key::Enter if self.bindings.is_attached(EventTarget::OkButton, EventName::Click) => {
                self.resolve(true, host, config, events)
            }
            Key::Escape
                if self
                    .bindings
                    .is_attached(EventTarget::CancelButton, EventName::Click) =>
            {
                self.resolve(false, host, config, events)
            }
            _ => {
                trace!(?key, "key has no bound path for this dialog; ignoring");
                Ok(None)
            }
        }
    }

    /// Deferred focus delivery for a prompt. Stale wakeups — the prompt
    /// already resolved, or another dialog took its place — are dropped.
    pub(crate) fn handle_focus_wakeup(&mut self, dialog: Uuid, host: &mut dyn Host) -> Result<()> {
        let current = self.queue.active().map(|item| (item.id, item.kind));
        match current {
            Some((id, kind)) if self.open && id == dialog && kind.has_input() => {
                host.focus_input().map_err(Error::Host)
            }
            _ => {
                trace!(%dialog, "stale focus wakeup; ignoring");
                Ok(())
            }
        }
    }

    /// Display the head of the queue: render with the current config, mount,
    /// show the chrome, wire events, and ask for deferred input focus on
    /// prompts.
    fn activate(&mut self, host: &mut dyn Host, config: &Config, events: &EventSink) -> Result<()> {
        let (id, kind, fragment) = {
            let Some(item) = self.queue.active() else {
                warn!("activation requested on an empty queue");
                return Ok(());
            };
            (
                item.id,
                item.kind,
                renderer::render(item.kind, &item.message, config),
            )
        };

        self.open = true;
        host.mount_dialog(&fragment).map_err(Error::Host)?;

        let (container, overlay) = renderer::visible_classes(kind);
        host.apply_dialog_classes(&container, &overlay)
            .map_err(Error::Host)?;

        self.bindings.bind_dialog(host, kind)?;

        if kind.has_input() {
            host.schedule(Wakeup::FocusInput { dialog: id }, Duration::ZERO)
                .map_err(Error::Host)?;
        }

        debug!(%id, %kind, "dialog opened");
        events.emit(SessionEvent::DialogOpened { id, kind });
        Ok(())
    }

    /// Resolve the visible dialog. Reads the prompt input first (the element
    /// disappears during teardown), then tears down, then activates the next
    /// request or hides the chrome. The responder is returned to the caller
    /// rather than invoked here.
    fn resolve(
        &mut self,
        confirmed: bool,
        host: &mut dyn Host,
        config: &Config,
        events: &EventSink,
    ) -> Result<Option<Resolved>> {
        let Some((id, kind)) = self.queue.active().map(|item| (item.id, item.kind)) else {
            warn!("resolution requested with nothing displayed");
            return Ok(None);
        };

        let value = if kind.has_input() && confirmed {
            host.input_value().map_err(Error::Host)?
        } else {
            None
        };

        self.bindings.teardown(host)?;

        let Some(mut item) = self.queue.dequeue_active() else {
            return Ok(None);
        };
        let responder = item.responder.take();

        debug!(%id, %kind, confirmed, "dialog resolved");
        events.emit(SessionEvent::DialogResolved {
            id,
            kind,
            confirmed,
        });

        if self.queue.is_empty() {
            self.open = false;
            let (container, overlay) = renderer::hidden_classes();
            host.apply_dialog_classes(&container, &overlay)
                .map_err(Error::Host)?;
            debug!("dialog queue idle");
            events.emit(SessionEvent::QueueIdle);
        } else {
            self.activate(host, config, events)?;
        }

        let outcome = DialogOutcome { confirmed, value };
        Ok(responder.map(|responder| (responder, outcome)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use tokio::sync::oneshot;

    fn ticket_request(kind: DialogKind, message: &str) -> (PendingDialog, oneshot::Receiver<DialogOutcome>) {
        let (tx, rx) = oneshot::channel();
        (
            PendingDialog::new(kind, message.to_string(), Responder::Channel(tx)),
            rx,
        )
    }

    #[test]
    fn test_first_submission_activates_immediately() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut controller = DialogController::default();
        let config = Config::default();
        let events = EventSink::default();

        let (item, _rx) = ticket_request(DialogKind::Alert, "hello");
        controller.submit(item, &mut host, &config, &events).unwrap();

        assert!(controller.is_open());
        assert_eq!(handle.mount_count(), 1);
        assert_eq!(handle.container_class(), "hark hark-show hark-alert");
    }

    #[test]
    fn test_second_submission_waits_in_queue() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut controller = DialogController::default();
        let config = Config::default();
        let events = EventSink::default();

        let (first, _rx1) = ticket_request(DialogKind::Alert, "first");
        let (second, _rx2) = ticket_request(DialogKind::Alert, "second");
        controller.submit(first, &mut host, &config, &events).unwrap();
        controller.submit(second, &mut host, &config, &events).unwrap();

        assert_eq!(handle.mount_count(), 1);
        assert!(handle.last_markup().contains("first"));
    }

    #[test]
    fn test_escape_is_dead_on_alert() {
        let mut host = MockHost::new();
        let mut controller = DialogController::default();
        let config = Config::default();
        let events = EventSink::default();

        let (item, _rx) = ticket_request(DialogKind::Alert, "hello");
        controller.submit(item, &mut host, &config, &events).unwrap();

        let resolved = controller
            .handle_key(Key::Escape, &mut host, &config, &events)
            .unwrap();
        assert!(resolved.is_none());
        assert!(controller.is_open());
    }

    #[test]
    fn test_stale_focus_wakeup_is_dropped() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut controller = DialogController::default();
        let config = Config::default();
        let events = EventSink::default();

        let (item, _rx) = ticket_request(DialogKind::Prompt, "name?");
        let prompt_id = item.id;
        controller.submit(item, &mut host, &config, &events).unwrap();

        controller
            .handle_click(Control::Ok, &mut host, &config, &events)
            .unwrap();
        controller.handle_focus_wakeup(prompt_id, &mut host).unwrap();

        assert_eq!(handle.input_focus_count(), 0);
    }
}
