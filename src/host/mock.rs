//! Recording host for tests.
//!
//! `MockHost` implements every capability against plain in-memory state and
//! records what the widget asked for. Tests keep a [`MockHandle`] — a shared
//! view of the same state — to inspect mounted markup, class toggles,
//! bindings, logs and scheduled wakeups, and to stage the prompt input value
//! or mark controls missing.

use super::{EventName, EventTarget, Host};
use crate::dialog::renderer::DialogFragment;
use crate::events::Wakeup;
use crate::notify::LogEntry;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// A log entry as the mock surface holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockLog {
    /// Entry id
    pub id: Uuid,
    /// Markup the widget rendered for it
    pub markup: String,
    /// Whether the reveal tag landed
    pub revealed: bool,
}

#[derive(Debug, Default)]
struct MockState {
    mounted: Vec<String>,
    container_class: String,
    overlay_class: String,
    bound: HashSet<(EventTarget, EventName)>,
    attaches: Vec<(EventTarget, EventName)>,
    detaches: Vec<(EventTarget, EventName)>,
    missing: HashSet<EventTarget>,
    focus_cleared: usize,
    input_focused: usize,
    input_value: Option<String>,
    logs: Vec<MockLog>,
    removed_logs: Vec<Uuid>,
    scheduled: Vec<(Wakeup, Duration)>,
}

/// In-memory host implementation
#[derive(Debug, Default)]
pub struct MockHost {
    state: Arc<Mutex<MockState>>,
}

/// Shared inspection and staging view of a [`MockHost`]
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto this host's recorded state. Take it before handing the
    /// host to a session.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock host state poisoned")
    }
}

impl Host for MockHost {
    fn mount_dialog(&mut self, fragment: &DialogFragment) -> Result<()> {
        let mut state = self.state();
        state.mounted.push(fragment.markup.clone());
        // Replacing the markup destroys the previous controls; the
        // document-wide listener is not part of the fragment.
        state
            .bound
            .retain(|(target, _)| *target == EventTarget::Document);
        Ok(())
    }

    fn apply_dialog_classes(&mut self, container: &str, overlay: &str) -> Result<()> {
        let mut state = self.state();
        state.container_class = container.to_string();
        state.overlay_class = overlay.to_string();
        Ok(())
    }

    fn attach(&mut self, target: EventTarget, event: EventName) -> Result<bool> {
        let mut state = self.state();
        if state.missing.contains(&target) {
            return Ok(false);
        }
        state.attaches.push((target, event));
        state.bound.insert((target, event));
        Ok(true)
    }

    fn detach(&mut self, target: EventTarget, event: EventName) -> Result<()> {
        let mut state = self.state();
        state.detaches.push((target, event));
        state.bound.remove(&(target, event));
        Ok(())
    }

    fn clear_focus(&mut self) -> Result<()> {
        self.state().focus_cleared += 1;
        Ok(())
    }

    fn focus_input(&mut self) -> Result<()> {
        self.state().input_focused += 1;
        Ok(())
    }

    fn input_value(&self) -> Result<Option<String>> {
        Ok(self.state().input_value.clone())
    }

    fn insert_log(&mut self, entry: &LogEntry, markup: &str) -> Result<()> {
        self.state().logs.insert(
            0,
            MockLog {
                id: entry.id,
                markup: markup.to_string(),
                revealed: false,
            },
        );
        Ok(())
    }

    fn reveal_log(&mut self, id: Uuid) -> Result<()> {
        let mut state = self.state();
        if let Some(log) = state.logs.iter_mut().find(|log| log.id == id) {
            log.revealed = true;
        }
        Ok(())
    }

    fn remove_log(&mut self, id: Uuid) -> Result<()> {
        let mut state = self.state();
        state.logs.retain(|log| log.id != id);
        state.removed_logs.push(id);
        Ok(())
    }

    fn schedule(&mut self, wakeup: Wakeup, after: Duration) -> Result<()> {
        self.state().scheduled.push((wakeup, after));
        Ok(())
    }
}

impl MockHandle {
    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock host state poisoned")
    }

    /// How many times a fragment was mounted
    pub fn mount_count(&self) -> usize {
        self.state().mounted.len()
    }

    /// The markup of the most recently mounted fragment
    pub fn last_markup(&self) -> String {
        self.state().mounted.last().cloned().unwrap_or_default()
    }

    /// Current class string of the dialog container
    pub fn container_class(&self) -> String {
        self.state().container_class.clone()
    }

    /// Current class string of the overlay
    pub fn overlay_class(&self) -> String {
        self.state().overlay_class.clone()
    }

    /// Whether a binding is live on the mock surface
    pub fn is_bound(&self, target: EventTarget, event: EventName) -> bool {
        self.state().bound.contains(&(target, event))
    }

    /// How many attach calls reached the host for this pair
    pub fn attach_count(&self, target: EventTarget, event: EventName) -> usize {
        self.state()
            .attaches
            .iter()
            .filter(|pair| **pair == (target, event))
            .count()
    }

    /// How many detach calls reached the host for this pair
    pub fn detach_count(&self, target: EventTarget, event: EventName) -> usize {
        self.state()
            .detaches
            .iter()
            .filter(|pair| **pair == (target, event))
            .count()
    }

    /// How many times page focus was cleared
    pub fn focus_cleared_count(&self) -> usize {
        self.state().focus_cleared
    }

    /// How many times the prompt input was focused
    pub fn input_focus_count(&self) -> usize {
        self.state().input_focused
    }

    /// Stage the text the prompt input reports
    pub fn set_input_value(&self, value: &str) {
        self.state().input_value = Some(value.to_string());
    }

    /// Make a target unfindable so attach reports it missing
    pub fn set_missing(&self, target: EventTarget) {
        self.state().missing.insert(target);
    }

    /// Visible log entries, newest first
    pub fn logs(&self) -> Vec<MockLog> {
        self.state().logs.clone()
    }

    /// Ids removed from the log container, in removal order
    pub fn removed_logs(&self) -> Vec<Uuid> {
        self.state().removed_logs.clone()
    }

    /// Every wakeup the widget scheduled, in request order
    pub fn scheduled(&self) -> Vec<(Wakeup, Duration)> {
        self.state().scheduled.clone()
    }

    /// Drain the scheduled wakeups, e.g. to replay them into the session
    pub fn drain_scheduled(&self) -> Vec<(Wakeup, Duration)> {
        std::mem::take(&mut self.state().scheduled)
    }
}
