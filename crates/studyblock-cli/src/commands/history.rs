use chrono::{TimeZone, Utc};
use clap::Subcommand;
use studyblock_core::storage::Database;
use studyblock_core::{HistoryStore, KvHistoryStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded study sessions, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all recorded sessions
    Clear,
    /// List distinct subjects seen in history
    Subjects,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvHistoryStore::new(Database::open()?);

    match action {
        HistoryAction::List { json } => {
            let sessions = store.sessions();
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("no sessions recorded");
            } else {
                for record in &sessions {
                    let completed = Utc
                        .timestamp_millis_opt(record.completed_at)
                        .single()
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    println!(
                        "{completed}  {:<16} {:>3} min study / {:>2} min reward  ({} s)",
                        record.subject,
                        record.study_minutes,
                        record.reward_minutes,
                        record.total_study_seconds
                    );
                }
            }
        }
        HistoryAction::Clear => {
            store.clear();
            println!("history cleared");
        }
        HistoryAction::Subjects => {
            for subject in store.subject_suggestions() {
                println!("{subject}");
            }
        }
    }
    Ok(())
}
