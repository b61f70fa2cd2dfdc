//! Recency tracking: a decaying "recently changed" marker per bullet.
//!
//! Written on every bullet text change, swept by a periodic tick. Purely a display
//! affordance: the only guarantee is that marks never outlive the TTL.

use std::collections::HashMap;

use serde::Serialize;
use tokio::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);
pub const DEFAULT_TICK: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct RecencyTracker {
    ttl: Duration,
    marks: HashMap<String, Instant>,
}

/// Renderer-facing emphasis for a recently changed bullet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecencyMark {
    pub bullet_id: String,
    pub intensity: f64, // 1.0 at change, 0.0 at TTL
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl RecencyTracker {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            marks: HashMap::new(),
        }
    }

    /// Records a change to `bullet_id`. Last write wins.
    pub fn mark(&mut self, bullet_id: &str, now: Instant) {
        self.marks.insert(bullet_id.to_string(), now);
    }

    #[cfg(test)]
    pub fn is_marked(&self, bullet_id: &str) -> bool {
        self.marks.contains_key(bullet_id)
    }

    /// Evicts marks whose age has reached the TTL. Returns how many were evicted.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.marks.len();
        self.marks
            .retain(|_, changed_at| now.saturating_duration_since(*changed_at) < ttl);
        before - self.marks.len()
    }

    /// Linear decay from 1.0 at the change to 0.0 at the TTL; 0.0 when unmarked.
    pub fn intensity(&self, bullet_id: &str, now: Instant) -> f64 {
        let Some(changed_at) = self.marks.get(bullet_id) else {
            return 0.0;
        };
        if self.ttl.is_zero() {
            return 0.0;
        }
        let age = now.saturating_duration_since(*changed_at);
        (1.0 - age.as_secs_f64() / self.ttl.as_secs_f64()).max(0.0)
    }

    /// Current marks with a positive intensity, sorted by bullet id.
    pub fn marks(&self, now: Instant) -> Vec<RecencyMark> {
        let mut marks: Vec<RecencyMark> = self
            .marks
            .keys()
            .map(|id| RecencyMark {
                bullet_id: id.clone(),
                intensity: self.intensity(id, now),
            })
            .filter(|m| m.intensity > 0.0)
            .collect();
        marks.sort_by(|a, b| a.bullet_id.cmp(&b.bullet_id));
        marks
    }
}
