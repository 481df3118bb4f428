use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation stamp handed out when a submission starts its remote fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubmissionTicket {
    generation: u64,
}

impl SubmissionTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Monotonic generation counter; only the most recent ticket may publish results.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    generation: AtomicU64,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SubmissionTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        SubmissionTicket { generation }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.current_generation() == ticket.generation
    }

    /// Passes `value` through only while `ticket` is still the latest submission.
    pub fn settle<T>(&self, ticket: SubmissionTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
