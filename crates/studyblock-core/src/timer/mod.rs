mod engine;
mod ticker;

pub use engine::TimerEngine;
pub use ticker::StudyTimer;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_SUBJECT;

/// Current segment of the study/reward cycle.
///
/// `Idle` is both the initial state and the state after a reset; the
/// Study/Reward alternation is unbounded until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Study,
    Reward,
}

/// Study minutes must fall in this range; out-of-range values are rejected.
pub const STUDY_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=120;
/// Reward minutes must fall in this range; out-of-range values are rejected.
pub const REWARD_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Timer configuration. Frozen (setters no-op) once a cycle has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub study_minutes: u32,
    pub reward_minutes: u32,
    pub subject: String,
    pub use_single_subject: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            reward_minutes: 5,
            subject: DEFAULT_SUBJECT.to_string(),
            use_single_subject: false,
        }
    }
}
