//! Terminal notification delivery for phase completions.

use studyblock_core::storage::NotificationsConfig;
use studyblock_core::TimerPhase;

/// Notification copy for a completed phase. `None` for `Idle`, which
/// never completes.
pub fn phase_message(phase: TimerPhase) -> Option<(&'static str, &'static str)> {
    match phase {
        TimerPhase::Study => Some(("Study Time Complete!", "Time for your reward break!")),
        TimerPhase::Reward => Some(("Reward Time Complete!", "Ready to start studying again?")),
        TimerPhase::Idle => None,
    }
}

/// Terminal line for a completed phase, or `None` when there is nothing
/// to announce (notifications disabled, or no copy for the phase).
pub fn render(phase: TimerPhase, config: &NotificationsConfig) -> Option<String> {
    if !config.enabled {
        return None;
    }
    let (title, message) = phase_message(phase)?;
    let bell = if config.bell { "\u{7}" } else { "" };
    Some(format!("{bell}{title} {message}"))
}

/// Announce a completed phase on the terminal. Stateless; safe to call
/// from any listener.
pub fn phase_completed(phase: TimerPhase, config: &NotificationsConfig) {
    if let Some(line) = render(phase, config) {
        println!("\n{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, bell: bool) -> NotificationsConfig {
        NotificationsConfig { enabled, bell }
    }

    #[test]
    fn study_and_reward_have_distinct_copy() {
        let (title, message) = phase_message(TimerPhase::Study).unwrap();
        assert_eq!(title, "Study Time Complete!");
        assert_eq!(message, "Time for your reward break!");

        let (title, message) = phase_message(TimerPhase::Reward).unwrap();
        assert_eq!(title, "Reward Time Complete!");
        assert_eq!(message, "Ready to start studying again?");
    }

    #[test]
    fn idle_has_no_message() {
        assert!(phase_message(TimerPhase::Idle).is_none());
        assert!(render(TimerPhase::Idle, &config(true, true)).is_none());
    }

    #[test]
    fn disabled_config_renders_nothing() {
        assert!(render(TimerPhase::Study, &config(false, true)).is_none());
    }

    #[test]
    fn bell_setting_controls_bel_prefix() {
        let with_bell = render(TimerPhase::Study, &config(true, true)).unwrap();
        assert!(with_bell.starts_with('\u{7}'));

        let without = render(TimerPhase::Study, &config(true, false)).unwrap();
        assert!(!without.contains('\u{7}'));
    }
}
