use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use studyblock_core::storage::Database;
use studyblock_core::{Config, Event, HistoryStore, KvHistoryStore, StudyTimer, TimerConfig, TimerPhase};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a study/reward session in the foreground (Ctrl-C to stop)
    Run {
        /// Study minutes (1-120); out-of-range values are ignored
        #[arg(long)]
        study: Option<u32>,
        /// Reward minutes (1-60); out-of-range values are ignored
        #[arg(long)]
        reward: Option<u32>,
        /// Subject label for recorded sessions
        #[arg(long)]
        subject: Option<String>,
        /// Use a single "General" subject for everything
        #[arg(long)]
        single_subject: bool,
    },
    /// Print timer defaults and history totals as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            study,
            reward,
            subject,
            single_subject,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_session(study, reward, subject, single_subject))
        }
        TimerAction::Status => status(),
    }
}

async fn run_session(
    study: Option<u32>,
    reward: Option<u32>,
    subject: Option<String>,
    single_subject: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store: Arc<dyn HistoryStore> = Arc::new(KvHistoryStore::new(Database::open()?));
    let timer = StudyTimer::new(TimerConfig::default(), store);

    // Config defaults first, then flag overrides. Everything goes through
    // the setters so invalid values are rejected and the prior value stands.
    timer.set_study_minutes(config.timer.study_minutes);
    timer.set_reward_minutes(config.timer.reward_minutes);
    timer.set_subject(&config.timer.subject);
    timer.set_use_single_subject(config.timer.use_single_subject);
    if let Some(minutes) = study {
        timer.set_study_minutes(minutes);
    }
    if let Some(minutes) = reward {
        timer.set_reward_minutes(minutes);
    }
    if let Some(subject) = &subject {
        timer.set_subject(subject);
    }
    if single_subject {
        timer.set_use_single_subject(true);
    }

    let notifications = config.notifications.clone();
    timer.subscribe(move |event| {
        if let Event::PhaseCompleted { completed, .. } = event {
            crate::notify::phase_completed(*completed, &notifications);
        }
    });

    let session = timer.config();
    println!(
        "Studying {} for {} min, rewarding with {} min. Ctrl-C to stop.",
        session.subject, session.study_minutes, session.reward_minutes
    );
    timer.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                print_status_line(&timer.snapshot());
            }
        }
    }

    timer.pause();
    if let Event::StateSnapshot {
        cycle_count,
        total_study_seconds,
        ..
    } = timer.snapshot()
    {
        println!(
            "\nStopped. {} cycle(s) started, {} min {} s studied.",
            cycle_count,
            total_study_seconds / 60,
            total_study_seconds % 60
        );
    }
    Ok(())
}

fn print_status_line(snapshot: &Event) {
    if let Event::StateSnapshot {
        phase,
        display_minutes,
        display_seconds,
        cycle_count,
        ..
    } = snapshot
    {
        let label = match phase {
            TimerPhase::Idle => "idle",
            TimerPhase::Study => "study",
            TimerPhase::Reward => "reward",
        };
        print!("\r{label:>6}  {display_minutes:02}:{display_seconds:02}  cycle {cycle_count} ");
        std::io::stdout().flush().ok();
    }
}

fn status() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = KvHistoryStore::new(Database::open()?);
    let sessions = store.sessions();
    let total_study_seconds: u64 = sessions.iter().map(|r| r.total_study_seconds).sum();
    let status = serde_json::json!({
        "timer": config.timer,
        "notifications": config.notifications,
        "recorded_sessions": sessions.len(),
        "total_study_seconds": total_study_seconds,
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
