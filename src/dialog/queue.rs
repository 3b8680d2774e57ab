//! FIFO queue of pending dialog requests.
//!
//! The head of the queue is the item whose markup is (or is about to be)
//! displayed; everything behind it waits its turn. There is no priority and
//! no cancellation of queued-but-not-yet-shown items.

use super::PendingDialog;
use std::collections::VecDeque;

/// Ordered set of dialog requests, oldest first
#[derive(Debug, Default)]
pub(crate) struct DialogQueue {
    items: VecDeque<PendingDialog>,
}

impl DialogQueue {
    /// Append a request to the tail. Returns the queue length afterwards.
    pub(crate) fn enqueue(&mut self, item: PendingDialog) -> usize {
        self.items.push_back(item);
        self.items.len()
    }

    /// The request currently owed the display, if any
    pub(crate) fn active(&self) -> Option<&PendingDialog> {
        self.items.front()
    }

    /// Remove and return the head. The caller is responsible for activating
    /// the new head afterwards.
    pub(crate) fn dequeue_active(&mut self) -> Option<PendingDialog> {
        self.items.pop_front()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
