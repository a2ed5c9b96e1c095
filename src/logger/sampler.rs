//! Per-window log sampling.
//!
//! # Responsibilities
//! - Count entries per (level, message) bucket within a fixed window
//! - Let the first `initial` entries through, then every `thereafter`-th
//!
//! # Design Decisions
//! - Fixed array of atomic counters; colliding messages share a bucket
//! - Lock-free so sampling never contends with the writer lock

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::Level;

use crate::config::schema::SamplingConfig;
use crate::logger::level::severity;

const LEVELS: usize = 5;
const COUNTERS_PER_LEVEL: usize = 4096;

#[derive(Debug)]
struct Counter {
    /// Window end, in nanoseconds since the sampler's epoch.
    reset_at: AtomicU64,
    count: AtomicU64,
}

impl Counter {
    fn new() -> Self {
        Self {
            reset_at: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    fn inc_check_reset(&self, now: u64, tick: u64) -> u64 {
        let reset_at = self.reset_at.load(Ordering::Acquire);
        if reset_at > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        self.count.store(1, Ordering::Release);
        let new_reset = now + tick;
        if self
            .reset_at
            .compare_exchange(reset_at, new_reset, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Another caller reset the window first; count against it.
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }
        1
    }
}

/// Sampling state shared by every clone of a logger.
#[derive(Debug)]
pub struct Sampler {
    epoch: Instant,
    tick: Duration,
    initial: u64,
    thereafter: u64,
    counters: Vec<Counter>,
}

impl Sampler {
    pub fn new(tick: Duration, config: SamplingConfig) -> Self {
        Self {
            epoch: Instant::now(),
            tick,
            initial: config.initial,
            thereafter: config.thereafter,
            counters: (0..LEVELS * COUNTERS_PER_LEVEL).map(|_| Counter::new()).collect(),
        }
    }

    /// Whether an entry with this level and message should be written now.
    pub fn check(&self, level: &Level, message: &str) -> bool {
        self.check_at(level, message, self.epoch.elapsed())
    }

    pub(crate) fn check_at(&self, level: &Level, message: &str, since_epoch: Duration) -> bool {
        let now = u64::try_from(since_epoch.as_nanos()).unwrap_or(u64::MAX);
        let tick = u64::try_from(self.tick.as_nanos()).unwrap_or(u64::MAX);

        let counter = &self.counters[self.slot(level, message)];
        let n = counter.inc_check_reset(now, tick);

        if n <= self.initial {
            return true;
        }
        self.thereafter > 0 && (n - self.initial) % self.thereafter == 0
    }

    fn slot(&self, level: &Level, message: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        let bucket = (hasher.finish() % COUNTERS_PER_LEVEL as u64) as usize;
        usize::from(severity(level)) * COUNTERS_PER_LEVEL + bucket
    }
}
