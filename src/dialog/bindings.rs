//! Event binding bookkeeping for the visible dialog.
//!
//! The binder owns which (target, event) pairs are currently wired through
//! the host, making attach and detach idempotent regardless of how the host's
//! native binding API behaves. Controls the host cannot find are skipped;
//! their paths simply stay dead for that dialog.

use super::DialogKind;
use crate::error::Result;
use crate::host::{EventName, EventTarget, Host};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Live (target, event) pairs for the dialog currently displayed
#[derive(Debug, Default)]
pub(crate) struct BindingSet {
    live: HashSet<(EventTarget, EventName)>,
}

impl BindingSet {
    /// Wire up a freshly mounted dialog: control clicks, then the
    /// document-wide key listener. Page focus is cleared before the key
    /// listener lands so a focused link or button cannot swallow Enter.
    pub(crate) fn bind_dialog(&mut self, host: &mut dyn Host, kind: DialogKind) -> Result<()> {
        self.attach(host, EventTarget::OkButton, EventName::Click)?;
        if kind.has_cancel() {
            self.attach(host, EventTarget::CancelButton, EventName::Click)?;
        }

        host.clear_focus().map_err(crate::error::Error::Host)?;
        self.attach(host, EventTarget::Document, EventName::Key)?;
        Ok(())
    }

    /// Common teardown when an interaction resolves: the key listener is
    /// detached through the host, control bindings are simply forgotten —
    /// their elements go away with the mounted markup.
    pub(crate) fn teardown(&mut self, host: &mut dyn Host) -> Result<()> {
        if self.live.remove(&(EventTarget::Document, EventName::Key)) {
            host.detach(EventTarget::Document, EventName::Key)
                .map_err(crate::error::Error::Host)?;
        }
        self.live.clear();
        Ok(())
    }

    /// Whether a pair is currently wired
    pub(crate) fn is_attached(&self, target: EventTarget, event: EventName) -> bool {
        self.live.contains(&(target, event))
    }

    fn attach(&mut self, host: &mut dyn Host, target: EventTarget, event: EventName) -> Result<()> {
        if self.live.contains(&(target, event)) {
            debug!(?target, ?event, "binding already attached; skipping");
            return Ok(());
        }

        match host.attach(target, event) {
            Ok(true) => {
                self.live.insert((target, event));
                Ok(())
            }
            Ok(false) => {
                warn!(?target, ?event, "host reported target missing; skipping");
                Ok(())
            }
            Err(e) => Err(crate::error::Error::Host(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;

    #[test]
    fn test_bind_dialog_wires_controls_and_key_listener() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut bindings = BindingSet::default();

        bindings.bind_dialog(&mut host, DialogKind::Confirm).unwrap();

        assert!(bindings.is_attached(EventTarget::OkButton, EventName::Click));
        assert!(bindings.is_attached(EventTarget::CancelButton, EventName::Click));
        assert!(bindings.is_attached(EventTarget::Document, EventName::Key));
        assert_eq!(handle.focus_cleared_count(), 1);
    }

    #[test]
    fn test_alert_gets_no_cancel_binding() {
        let mut host = MockHost::new();
        let mut bindings = BindingSet::default();

        bindings.bind_dialog(&mut host, DialogKind::Alert).unwrap();

        assert!(bindings.is_attached(EventTarget::OkButton, EventName::Click));
        assert!(!bindings.is_attached(EventTarget::CancelButton, EventName::Click));
    }

    #[test]
    fn test_double_attach_is_guarded() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut bindings = BindingSet::default();

        bindings.bind_dialog(&mut host, DialogKind::Alert).unwrap();
        bindings.bind_dialog(&mut host, DialogKind::Alert).unwrap();

        assert_eq!(handle.attach_count(EventTarget::OkButton, EventName::Click), 1);
        assert_eq!(handle.attach_count(EventTarget::Document, EventName::Key), 1);
    }

    #[test]
    fn test_missing_control_is_skipped() {
        let mut host = MockHost::new();
        let handle = host.handle();
        handle.set_missing(EventTarget::CancelButton);
        let mut bindings = BindingSet::default();

        bindings.bind_dialog(&mut host, DialogKind::Confirm).unwrap();

        assert!(bindings.is_attached(EventTarget::OkButton, EventName::Click));
        assert!(!bindings.is_attached(EventTarget::CancelButton, EventName::Click));
    }

    #[test]
    fn test_teardown_detaches_key_listener_once() {
        let mut host = MockHost::new();
        let handle = host.handle();
        let mut bindings = BindingSet::default();

        bindings.bind_dialog(&mut host, DialogKind::Confirm).unwrap();
        bindings.teardown(&mut host).unwrap();
        bindings.teardown(&mut host).unwrap();

        assert_eq!(handle.detach_count(EventTarget::Document, EventName::Key), 1);
        assert!(!bindings.is_attached(EventTarget::OkButton, EventName::Click));
    }
}
