//! Bounded render queue.
//!
//! Diagram renders go through a [`RenderQueue`] so a document with many
//! diagrams never has more than `capacity` of them running at once. Slots are
//! handed out in submission order (the semaphore is fair); completion order is
//! whatever the tasks take.

use crate::error::{ExportError, Result};
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub const DEFAULT_CONCURRENCY: usize = 2;

static SHARED: Lazy<RenderQueue> = Lazy::new(|| RenderQueue::new(DEFAULT_CONCURRENCY));

#[derive(Debug, Clone)]
pub struct RenderQueue {
    slots: Arc<Semaphore>,
    capacity: usize,
}

impl RenderQueue {
    /// A queue with `capacity` slots. Zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RenderQueue {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// The process-wide queue with the default capacity.
    pub fn shared() -> Self {
        SHARED.clone()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.slots.available_permits()
    }

    /// Wait for a slot, then run `task` to completion while holding it.
    pub async fn submit<F, T>(&self, task: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        let _slot = self
            .slots
            .acquire()
            .await
            .map_err(|_| ExportError::Diagram("render queue is closed".to_string()))?;
        Ok(task.await)
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::shared()
    }
}
