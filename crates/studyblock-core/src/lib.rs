//! # Studyblock Core Library
//!
//! Core business logic for Studyblock, a personal study/reward interval
//! timer: configure a study duration and a reward duration, start a
//! countdown, and the timer alternates between Study and Reward phases,
//! notifying listeners and logging completed study blocks to history.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a logical-second state machine; [`StudyTimer`] drives
//!   it with a cancellable once-per-second tokio task and fans committed
//!   transitions out to subscribers
//! - **History**: append-only study-session records behind the
//!   [`HistoryStore`] trait, persisted as JSON in the SQLite kv store
//! - **Storage**: SQLite kv database and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`StudyTimer`]: driven timer with tick loop and event fan-out
//! - [`HistoryStore`] / [`KvHistoryStore`]: session history
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod history;
pub mod storage;
pub mod timer;
pub mod tips;

pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use history::{HistoryStore, KvHistoryStore, StudySessionRecord, DEFAULT_SUBJECT};
pub use storage::{Config, Database};
pub use timer::{StudyTimer, TimerConfig, TimerEngine, TimerPhase};
