//! Timer engine implementation.
//!
//! The timer engine is a logical-second state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per second (see [`super::StudyTimer`] for the driven loop).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Study <-> Reward
//!   ^______|________|   (reset)
//! ```
//!
//! Completing a Study countdown produces a [`StudySessionRecord`] on the
//! emitted event; completing a Reward countdown starts the next cycle.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{TimerConfig, TimerPhase, REWARD_MINUTES_RANGE, STUDY_MINUTES_RANGE};
use crate::events::Event;
use crate::history::{StudySessionRecord, DEFAULT_SUBJECT};

/// Core timer state machine.
///
/// Owns the configuration and all runtime counters. Invalid input is
/// rejected before mutation, so no operation can fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: TimerPhase,
    remaining_seconds: u32,
    is_running: bool,
    /// Study blocks started this run.
    cycle_count: u32,
    /// Study seconds accumulated across all blocks this run.
    total_study_seconds: u64,
    /// Study seconds credited to the block in progress. Set to the nominal
    /// full block length when the block completes, even if the block was
    /// paused along the way.
    #[serde(default)]
    block_study_seconds: u64,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
            is_running: false,
            cycle_count: 0,
            total_study_seconds: 0,
            block_study_seconds: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn total_study_seconds(&self) -> u64 {
        self.total_study_seconds
    }

    pub fn display_minutes(&self) -> u32 {
        self.remaining_seconds / 60
    }

    pub fn display_seconds(&self) -> u32 {
        self.remaining_seconds % 60
    }

    /// Settings are editable only before a cycle starts (or after reset).
    pub fn can_edit_settings(&self) -> bool {
        self.phase == TimerPhase::Idle && !self.is_running
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            display_minutes: self.display_minutes(),
            display_seconds: self.display_seconds(),
            is_running: self.is_running,
            cycle_count: self.cycle_count,
            total_study_seconds: self.total_study_seconds,
            study_minutes: self.config.study_minutes,
            reward_minutes: self.config.reward_minutes,
            subject: self.config.subject.clone(),
            use_single_subject: self.config.use_single_subject,
            can_edit_settings: self.can_edit_settings(),
            at: Utc::now(),
        }
    }

    // ── Configuration setters ────────────────────────────────────────
    //
    // Each setter silently ignores the call unless settings are editable,
    // and minute setters also ignore out-of-range values. Returns the
    // SettingsChanged event when a value actually changed.

    pub fn set_study_minutes(&mut self, minutes: u32) -> Option<Event> {
        if !STUDY_MINUTES_RANGE.contains(&minutes)
            || !self.can_edit_settings()
            || self.config.study_minutes == minutes
        {
            return None;
        }
        self.config.study_minutes = minutes;
        Some(self.settings_changed())
    }

    pub fn set_reward_minutes(&mut self, minutes: u32) -> Option<Event> {
        if !REWARD_MINUTES_RANGE.contains(&minutes)
            || !self.can_edit_settings()
            || self.config.reward_minutes == minutes
        {
            return None;
        }
        self.config.reward_minutes = minutes;
        Some(self.settings_changed())
    }

    /// Set the subject label. Whitespace is trimmed; a blank result is
    /// coerced to `"General"`.
    pub fn set_subject(&mut self, subject: &str) -> Option<Event> {
        if !self.can_edit_settings() {
            return None;
        }
        let trimmed = subject.trim();
        let next = if trimmed.is_empty() {
            DEFAULT_SUBJECT
        } else {
            trimmed
        };
        if self.config.subject == next {
            return None;
        }
        self.config.subject = next.to_string();
        Some(self.settings_changed())
    }

    /// Enabling single-subject mode forces the subject back to `"General"`.
    pub fn set_use_single_subject(&mut self, use_single: bool) -> Option<Event> {
        if !self.can_edit_settings() || self.config.use_single_subject == use_single {
            return None;
        }
        self.config.use_single_subject = use_single;
        if use_single {
            self.config.subject = DEFAULT_SUBJECT.to_string();
        }
        Some(self.settings_changed())
    }

    fn settings_changed(&self) -> Event {
        Event::SettingsChanged {
            study_minutes: self.config.study_minutes,
            reward_minutes: self.config.reward_minutes,
            subject: self.config.subject.clone(),
            use_single_subject: self.config.use_single_subject,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// From Idle: begin a fresh Study block. Otherwise: resume the paused
    /// countdown without touching phase or remaining time.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        if self.phase == TimerPhase::Idle {
            self.block_study_seconds = 0;
            self.phase = TimerPhase::Study;
            self.remaining_seconds = self.config.study_minutes * 60;
            self.is_running = true;
            self.cycle_count += 1;
            Some(Event::TimerStarted {
                phase: self.phase,
                remaining_seconds: self.remaining_seconds,
                cycle_count: self.cycle_count,
                at: Utc::now(),
            })
        } else {
            self.is_running = true;
            Some(Event::TimerResumed {
                phase: self.phase,
                remaining_seconds: self.remaining_seconds,
                at: Utc::now(),
            })
        }
    }

    /// Halt the countdown in place. Idempotent.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Back to Idle with fresh counters, preserving the configuration.
    /// Idempotent; safe from any phase.
    pub fn reset(&mut self) -> Event {
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = 0;
        self.is_running = false;
        self.cycle_count = 0;
        self.total_study_seconds = 0;
        self.block_study_seconds = 0;
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance one logical second. Returns `Some(Event::PhaseCompleted)`
    /// when the countdown reaches zero and the phase switches; the zero is
    /// never committed as remaining time.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running || self.phase == TimerPhase::Idle {
            return None;
        }
        let next = self.remaining_seconds.saturating_sub(1);
        if next > 0 {
            self.remaining_seconds = next;
            if self.phase == TimerPhase::Study {
                self.total_study_seconds += 1;
            }
            return None;
        }
        self.switch_phase()
    }

    fn switch_phase(&mut self) -> Option<Event> {
        let completed = self.phase;
        let session = match completed {
            TimerPhase::Study => {
                // Credit the nominal full block, continuing the per-tick
                // accounting for the final second.
                self.block_study_seconds = u64::from(self.config.study_minutes) * 60;
                self.total_study_seconds += 1;
                self.phase = TimerPhase::Reward;
                self.remaining_seconds = self.config.reward_minutes * 60;
                Some(StudySessionRecord::new(
                    &self.config.subject,
                    self.config.study_minutes,
                    self.config.reward_minutes,
                    self.block_study_seconds,
                ))
            }
            TimerPhase::Reward => {
                self.phase = TimerPhase::Study;
                self.remaining_seconds = self.config.study_minutes * 60;
                self.cycle_count += 1;
                None
            }
            TimerPhase::Idle => return None,
        };
        Some(Event::PhaseCompleted {
            completed,
            session,
            at: Utc::now(),
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
