//! End-to-end dialog behavior driven through the recording mock host.

use hark::host::mock::{MockHandle, MockHost};
use hark::{
    Control, DialogKind, DialogOutcome, Error, EventName, EventTarget, Key, Labels, Session,
    SessionEvent, Wakeup,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn session() -> (Session, MockHandle) {
    let host = MockHost::new();
    let handle = host.handle();
    (Session::new(host), handle)
}

#[test]
fn test_dialogs_present_in_submission_order() {
    let (session, handle) = session();

    let _first = session.alert("first").unwrap();
    let _second = session.confirm("second").unwrap();
    let _third = session.prompt("third").unwrap();

    assert_eq!(handle.mount_count(), 1);
    assert!(handle.last_markup().contains("first"));

    session.handle_click(Control::Ok).unwrap();
    assert_eq!(handle.mount_count(), 2);
    assert!(handle.last_markup().contains("second"));

    session.handle_click(Control::Ok).unwrap();
    assert_eq!(handle.mount_count(), 3);
    assert!(handle.last_markup().contains("third"));

    session.handle_click(Control::Ok).unwrap();
    assert!(!session.is_open().unwrap());
}

#[tokio::test]
async fn test_alert_ok_click_confirms_without_value() {
    let (session, _handle) = session();

    let ticket = session.alert("hi").unwrap();
    session.handle_click(Control::Ok).unwrap();

    let outcome = ticket.outcome().await.unwrap();
    assert_eq!(outcome, DialogOutcome { confirmed: true, value: None });
}

#[tokio::test]
async fn test_alert_enter_key_confirms() {
    let (session, _handle) = session();

    let ticket = session.alert("hi").unwrap();
    session.handle_key(Key::Enter).unwrap();

    assert!(ticket.outcome().await.unwrap().confirmed);
}

#[tokio::test]
async fn test_confirm_cancel_click_declines() {
    let (session, _handle) = session();

    let ticket = session.confirm("sure?").unwrap();
    session.handle_click(Control::Cancel).unwrap();

    let outcome = ticket.outcome().await.unwrap();
    assert!(!outcome.confirmed);
    assert!(outcome.value.is_none());
}

#[tokio::test]
async fn test_confirm_escape_key_declines() {
    let (session, _handle) = session();

    let ticket = session.confirm("sure?").unwrap();
    session.handle_key(Key::Escape).unwrap();

    assert!(!ticket.outcome().await.unwrap().confirmed);
}

#[tokio::test]
async fn test_prompt_returns_input_text() {
    let (session, handle) = session();

    let ticket = session.prompt("name?").unwrap();
    handle.set_input_value("Ada");
    session.handle_click(Control::Ok).unwrap();

    let outcome = ticket.outcome().await.unwrap();
    assert!(outcome.confirmed);
    assert_eq!(outcome.value.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_prompt_cancel_carries_no_value() {
    let (session, handle) = session();

    let ticket = session.prompt("name?").unwrap();
    handle.set_input_value("typed anyway");
    session.handle_key(Key::Escape).unwrap();

    let outcome = ticket.outcome().await.unwrap();
    assert!(!outcome.confirmed);
    assert!(outcome.value.is_none());
}

#[test]
fn test_escape_does_nothing_on_alert() {
    let (session, handle) = session();

    let _ticket = session.alert("no cancel path").unwrap();
    session.handle_key(Key::Escape).unwrap();

    assert!(session.is_open().unwrap());
    assert_eq!(handle.container_class(), "hark hark-show hark-alert");
}

#[test]
fn test_idle_teardown_hides_chrome_and_key_listener() {
    let (session, handle) = session();

    let _ticket = session.confirm("only one").unwrap();
    assert!(handle.is_bound(EventTarget::Document, EventName::Key));

    session.handle_click(Control::Ok).unwrap();

    assert!(!session.is_open().unwrap());
    assert_eq!(handle.container_class(), "hark hark-hide hark-hidden");
    assert_eq!(handle.overlay_class(), "hark-overlay hark-hidden");
    assert!(!handle.is_bound(EventTarget::Document, EventName::Key));
    assert_eq!(handle.detach_count(EventTarget::Document, EventName::Key), 1);
}

#[test]
fn test_request_while_open_never_replaces_visible_dialog() {
    let (session, handle) = session();

    let _shown = session.alert("shown").unwrap();
    let _queued = session.confirm("waiting").unwrap();
    let _also_queued = session.prompt("also waiting").unwrap();

    assert_eq!(handle.mount_count(), 1);
    assert!(handle.last_markup().contains("shown"));
}

#[test]
fn test_label_override_applies_at_display_time() {
    let (session, handle) = session();

    let _first = session.confirm("first").unwrap();
    let _second = session.confirm("second").unwrap();

    session
        .set_labels(Labels {
            ok: "Aye".to_string(),
            cancel: "Nay".to_string(),
        })
        .unwrap();

    // The dialog rendered before the override keeps its original labels.
    assert!(handle.last_markup().contains(">OK<"));
    assert!(!handle.last_markup().contains(">Aye<"));

    session.handle_click(Control::Ok).unwrap();

    // The queued dialog renders with the overridden labels.
    assert!(handle.last_markup().contains(">Aye<"));
    assert!(handle.last_markup().contains(">Nay<"));
}

#[test]
fn test_unknown_kind_fails_before_anything_is_queued() {
    let (session, handle) = session();

    let err = "popup".parse::<DialogKind>().unwrap_err();
    assert!(matches!(err, Error::UnknownDialogKind(name) if name == "popup"));

    // Nothing reached the session, so nothing was mounted.
    drop(session);
    assert_eq!(handle.mount_count(), 0);
}

#[test]
fn test_prompt_focus_is_deferred_to_a_wakeup() {
    let (session, handle) = session();

    let ticket = session.prompt("name?").unwrap();

    let scheduled = handle.drain_scheduled();
    assert_eq!(
        scheduled,
        vec![(Wakeup::FocusInput { dialog: ticket.id() }, Duration::ZERO)]
    );
    assert_eq!(handle.input_focus_count(), 0);

    session.deliver(Wakeup::FocusInput { dialog: ticket.id() }).unwrap();
    assert_eq!(handle.input_focus_count(), 1);
}

#[test]
fn test_resolution_is_delivered_exactly_once() {
    let (session, _handle) = session();
    let deliveries = Arc::new(AtomicUsize::new(0));

    let counter = deliveries.clone();
    session
        .alert_with("once", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    session.handle_click(Control::Ok).unwrap();
    session.handle_click(Control::Ok).unwrap();
    session.handle_key(Key::Enter).unwrap();

    assert_eq!(deliveries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lifecycle_events_arrive_in_order() {
    let (session, _handle) = session();
    let (tx, mut rx) = mpsc::unbounded_channel();
    session.set_event_sender(tx).unwrap();

    let ticket = session.alert("hello").unwrap();
    session.handle_click(Control::Ok).unwrap();

    match rx.try_recv().unwrap() {
        SessionEvent::DialogQueued { id, kind, depth } => {
            assert_eq!(id, ticket.id());
            assert_eq!(kind, DialogKind::Alert);
            assert_eq!(depth, 1);
        }
        other => panic!("expected DialogQueued, got {other:?}"),
    }
    assert!(matches!(rx.try_recv().unwrap(), SessionEvent::DialogOpened { .. }));
    assert!(matches!(
        rx.try_recv().unwrap(),
        SessionEvent::DialogResolved { confirmed: true, .. }
    ));
    assert!(matches!(rx.try_recv().unwrap(), SessionEvent::QueueIdle));
}

#[test]
fn test_missing_ok_control_leaves_enter_dead() {
    let host = MockHost::new();
    let handle = host.handle();
    handle.set_missing(EventTarget::OkButton);
    let session = Session::new(host);

    let _ticket = session.alert("unclosable by keyboard").unwrap();
    session.handle_key(Key::Enter).unwrap();

    // The OK path was never bound, so the dialog stays up.
    assert!(session.is_open().unwrap());
}
