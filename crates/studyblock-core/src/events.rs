use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::StudySessionRecord;
use crate::timer::TimerPhase;

/// Every committed state change in the system produces an Event.
/// The CLI renders them; notification/sound collaborators subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: TimerPhase,
        remaining_seconds: u32,
        cycle_count: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: TimerPhase,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: TimerPhase,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A configuration field changed while the timer was editable.
    SettingsChanged {
        study_minutes: u32,
        reward_minutes: u32,
        subject: String,
        use_single_subject: bool,
        at: DateTime<Utc>,
    },
    /// A Study or Reward countdown reached zero. Never emitted for Idle.
    /// `session` is set when the completed phase was Study.
    PhaseCompleted {
        completed: TimerPhase,
        session: Option<StudySessionRecord>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        remaining_seconds: u32,
        display_minutes: u32,
        display_seconds: u32,
        is_running: bool,
        cycle_count: u32,
        total_study_seconds: u64,
        study_minutes: u32,
        reward_minutes: u32,
        subject: String,
        use_single_subject: bool,
        can_edit_settings: bool,
        at: DateTime<Utc>,
    },
}
