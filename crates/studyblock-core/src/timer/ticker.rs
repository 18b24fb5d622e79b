//! Driven timer: owns the engine, the tick loop, and event fan-out.
//!
//! All transitions serialize through one mutex. The tick loop is a tokio
//! task bound to a generation number; pause/reset bump the generation, so a
//! stale loop can never mutate state past its cancellation point. At most
//! one loop is live per timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{TimerConfig, TimerEngine};
use crate::events::Event;
use crate::history::HistoryStore;

type Listener = Box<dyn Fn(&Event) + Send + Sync>;

/// A study/reward timer driven by a once-per-second tokio task.
///
/// Commands must be issued from within a tokio runtime (`start` spawns the
/// tick loop). Completed study blocks are handed to the history store from
/// the loop task after the state transition commits; persistence failures
/// never reach the timer.
pub struct StudyTimer {
    engine: Arc<Mutex<TimerEngine>>,
    history: Arc<dyn HistoryStore>,
    listeners: Arc<Mutex<Vec<Listener>>>,
    generation: Arc<AtomicU64>,
}

impl StudyTimer {
    pub fn new(config: TimerConfig, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(config))),
            history,
            listeners: Arc::new(Mutex::new(Vec::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a listener invoked synchronously for every committed
    /// transition, in order.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(Box::new(listener));
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from Idle, or resume a paused countdown. Any prior tick loop
    /// is cancelled and replaced before the new one begins.
    pub fn start(&self) -> Option<Event> {
        let event = self.lock_engine().start();
        if let Some(event) = &event {
            self.dispatch(event);
        }
        if self.lock_engine().is_running() {
            self.spawn_ticker();
        }
        event
    }

    /// Halt the countdown in place. Idempotent.
    pub fn pause(&self) -> Option<Event> {
        self.cancel_ticker();
        let event = self.lock_engine().pause();
        if let Some(event) = &event {
            self.dispatch(event);
        }
        event
    }

    /// Back to Idle, preserving configuration.
    pub fn reset(&self) -> Event {
        self.cancel_ticker();
        let event = self.lock_engine().reset();
        self.dispatch(&event);
        event
    }

    pub fn set_study_minutes(&self, minutes: u32) -> bool {
        self.apply(|engine| engine.set_study_minutes(minutes))
    }

    pub fn set_reward_minutes(&self, minutes: u32) -> bool {
        self.apply(|engine| engine.set_reward_minutes(minutes))
    }

    pub fn set_subject(&self, subject: &str) -> bool {
        self.apply(|engine| engine.set_subject(subject))
    }

    pub fn set_use_single_subject(&self, use_single: bool) -> bool {
        self.apply(|engine| engine.set_use_single_subject(use_single))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Event {
        self.lock_engine().snapshot()
    }

    pub fn config(&self) -> TimerConfig {
        self.lock_engine().config().clone()
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Distinct subjects from recorded sessions, `"General"` first.
    pub fn subject_suggestions(&self) -> Vec<String> {
        self.history.subject_suggestions()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock_engine(&self) -> std::sync::MutexGuard<'_, TimerEngine> {
        self.engine.lock().expect("engine lock poisoned")
    }

    fn apply<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut TimerEngine) -> Option<Event>,
    {
        let event = f(&mut self.lock_engine());
        if let Some(event) = &event {
            self.dispatch(event);
        }
        event.is_some()
    }

    fn dispatch(&self, event: &Event) {
        for listener in self
            .listeners
            .lock()
            .expect("listener lock poisoned")
            .iter()
        {
            listener(event);
        }
    }

    fn cancel_ticker(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn spawn_ticker(&self) {
        let my_gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let engine = Arc::clone(&self.engine);
        let history = Arc::clone(&self.history);
        let listeners = Arc::clone(&self.listeners);
        let generation = Arc::clone(&self.generation);

        tokio::spawn(async move {
            loop {
                // Stop before sleeping if cancelled or paused.
                if generation.load(Ordering::SeqCst) != my_gen {
                    return;
                }
                if !engine.lock().expect("engine lock poisoned").is_running() {
                    return;
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
                if generation.load(Ordering::SeqCst) != my_gen {
                    return;
                }
                let event = {
                    let mut engine = engine.lock().expect("engine lock poisoned");
                    if !engine.is_running() {
                        return;
                    }
                    engine.tick()
                };
                let Some(event) = event else { continue };
                for listener in listeners.lock().expect("listener lock poisoned").iter() {
                    listener(&event);
                }
                // Persist after the transition committed; never blocks it.
                if let Event::PhaseCompleted {
                    session: Some(record),
                    ..
                } = &event
                {
                    history.add_session(record.clone());
                }
            }
        });
    }
}

impl Drop for StudyTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
