//! Delayed background processing of items.
//!
//! Triggering a processing run schedules a detached tokio task that sleeps
//! for a fixed delay and then flips the item's `processed` flag. The
//! triggering request never waits for it. A task whose item was deleted
//! before the delay elapsed completes silently.

use std::time::Duration;

use strum::Display;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::metrics;
use crate::store::ItemStore;

/// Lifecycle of one processing task. Tasks only ever move forward; there is
/// no cancellation and no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TaskState {
    /// Spawned, waiting out the delay.
    Scheduled,
    /// Delay elapsed, looking up the item.
    Running,
    /// Finished, whether or not the item was still present.
    Completed,
}

/// Schedules delayed processing tasks against the item store.
#[derive(Debug, Clone)]
pub struct Processor {
    items: ItemStore,
    delay: Duration,
}

impl Processor {
    /// Create a processor with a fixed delay.
    pub fn new(items: ItemStore, delay: Duration) -> Self {
        Self { items, delay }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawn a detached task that marks `id` processed after the delay.
    ///
    /// Returns the task's handle so callers that care about shutdown
    /// semantics can await or drop it; dropping the handle leaves the task
    /// running to completion. Overlapping tasks for the same id are
    /// independent and idempotent.
    pub fn schedule(&self, id: u64) -> JoinHandle<()> {
        let items = self.items.clone();
        let delay = self.delay;

        metrics::inc_processing_scheduled();
        debug!(id, state = %TaskState::Scheduled, "processing task spawned");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(id, state = %TaskState::Running, "processing item");

            if items.mark_processed(id) {
                metrics::inc_processing_completed();
                info!(id, state = %TaskState::Completed, "item processed");
            } else {
                // Item vanished while we slept. Not an error.
                metrics::inc_processing_skipped();
                debug!(
                    id,
                    state = %TaskState::Completed,
                    "item deleted before processing"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewItem;

    fn widget() -> NewItem {
        NewItem {
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
        }
    }

    #[tokio::test]
    async fn schedule_marks_item_after_delay() {
        let store = ItemStore::new();
        let item = store.insert(widget());
        let processor = Processor::new(store.clone(), Duration::from_millis(10));

        let handle = processor.schedule(item.id);
        assert!(store.get(item.id).unwrap().processed.is_none());

        handle.await.unwrap();
        assert_eq!(store.get(item.id).unwrap().processed, Some(true));
    }

    #[tokio::test]
    async fn schedule_tolerates_deleted_item() {
        let store = ItemStore::new();
        let item = store.insert(widget());
        let processor = Processor::new(store.clone(), Duration::from_millis(10));

        let handle = processor.schedule(item.id);
        store.remove(item.id).unwrap();

        // The task must complete without panicking.
        handle.await.unwrap();
        assert!(store.get(item.id).is_none());
    }

    #[tokio::test]
    async fn overlapping_schedules_are_idempotent() {
        let store = ItemStore::new();
        let item = store.insert(widget());
        let processor = Processor::new(store.clone(), Duration::from_millis(10));

        let first = processor.schedule(item.id);
        let second = processor.schedule(item.id);
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(store.get(item.id).unwrap().processed, Some(true));
    }

    #[test]
    fn task_state_display_is_lowercase() {
        assert_eq!(TaskState::Scheduled.to_string(), "scheduled");
        assert_eq!(TaskState::Running.to_string(), "running");
        assert_eq!(TaskState::Completed.to_string(), "completed");
    }
}
