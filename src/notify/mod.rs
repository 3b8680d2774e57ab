//! Transient log notifications.
//!
//! Independent of the dialog queue: a notify call inserts its entry
//! immediately, newest first, and schedules two wakeups through the host —
//! one to tag the entry shown once it is attached (enter animation), one to
//! remove a log entry after the configured delay.
//!
//! Eviction mirrors the scheduling: every notify call books exactly one
//! removal, and each removal takes the oldest entry still visible at the time
//! it fires. The visible set is therefore bounded by call rate against the
//! delay, not by a count cap, and the last entry of a burst can sit past its
//! nominal delay until another call books the next removal.

use crate::config::Config;
use crate::dialog::renderer;
use crate::error::{Error, Result};
use crate::events::{EventSink, SessionEvent};
use crate::host::Host;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::{debug, trace};
use uuid::Uuid;

/// One transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Stable id the host uses to reveal and remove the entry
    pub id: Uuid,

    /// Message markup, inserted as-is
    pub message: String,

    /// Optional category tag ("success", "error", ...) reflected in the
    /// entry's class list
    pub category: Option<String>,

    /// When the entry was posted
    pub posted_at: DateTime<Utc>,
}

impl LogEntry {
    pub(crate) fn new(message: String, category: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            category,
            posted_at: Utc::now(),
        }
    }
}

/// Mirror of the visible log entries, newest at the front
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    visible: VecDeque<LogEntry>,
}

impl Notifier {
    /// Insert a new entry and book its reveal and one removal
    pub(crate) fn notify(
        &mut self,
        message: String,
        category: Option<String>,
        host: &mut dyn Host,
        config: &Config,
        events: &EventSink,
    ) -> Result<Uuid> {
        let entry = LogEntry::new(message, category);
        let markup = renderer::render_log(&entry, config);

        host.insert_log(&entry, &markup).map_err(Error::Host)?;
        host.schedule(
            crate::events::Wakeup::RevealLog { entry: entry.id },
            config.reveal_delay,
        )
        .map_err(Error::Host)?;
        host.schedule(crate::events::Wakeup::ExpireOldestLog, config.delay)
            .map_err(Error::Host)?;

        debug!(id = %entry.id, category = ?entry.category, "log entry posted");
        events.emit(SessionEvent::LogPosted {
            id: entry.id,
            category: entry.category.clone(),
        });

        let id = entry.id;
        self.visible.push_front(entry);
        Ok(id)
    }

    /// Reveal wakeup: tag the entry shown if it is still up
    pub(crate) fn handle_reveal(&mut self, id: Uuid, host: &mut dyn Host) -> Result<()> {
        if self.visible.iter().any(|entry| entry.id == id) {
            host.reveal_log(id).map_err(Error::Host)
        } else {
            trace!(%id, "reveal wakeup for a removed entry; ignoring");
            Ok(())
        }
    }

    /// Expire wakeup: remove the oldest entry still visible, if any
    pub(crate) fn handle_expire(&mut self, host: &mut dyn Host, events: &EventSink) -> Result<()> {
        let Some(oldest) = self.visible.pop_back() else {
            trace!("expire wakeup with no visible entries; ignoring");
            return Ok(());
        };

        host.remove_log(oldest.id).map_err(Error::Host)?;
        debug!(id = %oldest.id, "log entry expired");
        events.emit(SessionEvent::LogExpired { id: oldest.id });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn visible_count(&self) -> usize {
        self.visible.len()
    }
}
