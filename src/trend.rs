//! Bounded sample history for health and score trends.
//!
//! Owned by whichever simulation component wants trend data. Capacity and
//! sampling interval are explicit constructor arguments and timestamps are
//! passed in by the caller, so there is no ambient global buffer and no
//! hidden clock.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

/// A single recorded observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSample {
    pub at: DateTime<Utc>,
    pub value: f64,
}

/// Fixed-capacity ring of time-stamped samples with interval throttling.
#[derive(Debug, Clone)]
pub struct TrendBuffer {
    samples: VecDeque<TrendSample>,
    capacity: usize,
    min_interval: TimeDelta,
}

impl TrendBuffer {
    /// A zero `min_interval` disables throttling; a zero capacity is bumped
    /// to one.
    pub fn new(capacity: usize, min_interval: TimeDelta) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            min_interval,
        }
    }

    /// Record a sample, evicting the oldest once at capacity. Returns false
    /// when the sample is dropped: closer than `min_interval` to the previous
    /// sample, or older than it.
    pub fn record(&mut self, at: DateTime<Utc>, value: f64) -> bool {
        if let Some(last) = self.samples.back() {
            if at - last.at < self.min_interval || at < last.at {
                return false;
            }
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(TrendSample { at, value });
        true
    }

    pub fn latest(&self) -> Option<TrendSample> {
        self.samples.back().copied()
    }

    /// Mean of the retained values.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|sample| sample.value).sum();
        Some(sum / self.samples.len() as f64)
    }

    /// Newest value minus oldest retained value.
    pub fn delta(&self) -> Option<f64> {
        match (self.samples.front(), self.samples.back()) {
            (Some(oldest), Some(newest)) => Some(newest.value - oldest.value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }
}
