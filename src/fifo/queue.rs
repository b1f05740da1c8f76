//! Pending batch queue

use super::MeasurementBatch;

/// Capacity of the sample queue in batches
///
/// `poll` only drains while the queue is empty, so at most one batch is
/// ever pending.
pub const SAMPLE_QUEUE_DEPTH: usize = 1;

/// Insertion-ordered queue of batches awaiting the caller
#[derive(Debug, Default)]
pub struct SampleQueue {
    batches: heapless::Deque<MeasurementBatch, SAMPLE_QUEUE_DEPTH>,
}

impl SampleQueue {
    /// Create an empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self {
            batches: heapless::Deque::new(),
        }
    }

    /// Append a batch; the batch is dropped if the queue is full
    pub(crate) fn push(&mut self, batch: MeasurementBatch) -> Result<(), ()> {
        self.batches.push_back(batch).map_err(|_| ())
    }

    /// Remove the oldest batch
    pub fn pop(&mut self) -> Option<MeasurementBatch> {
        self.batches.pop_front()
    }

    /// Number of queued batches
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether no batch is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
