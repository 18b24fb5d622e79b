//! Completed study-session history.
//!
//! Records are append-only. The production store keeps the whole list as one
//! JSON array under a single key in the SQLite kv store and reloads it on
//! startup, newest first. A corrupt payload falls back to an empty list --
//! history is never allowed to take the timer down.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::storage::Database;

/// Default/catch-all subject label.
pub const DEFAULT_SUBJECT: &str = "General";

const SESSIONS_KEY: &str = "history_sessions";

/// One completed study block. Immutable after creation.
///
/// Field names follow the persisted wire format (`studyMinutes`, ...),
/// so stored history round-trips byte-compatibly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionRecord {
    /// Epoch milliseconds at creation time.
    pub id: i64,
    pub subject: String,
    pub study_minutes: u32,
    pub reward_minutes: u32,
    /// Seconds actually credited to this block (nominal full block length).
    pub total_study_seconds: u64,
    /// Epoch milliseconds.
    pub completed_at: i64,
}

impl StudySessionRecord {
    /// Build a record for a block that just completed, stamped with the
    /// current wall clock.
    pub fn new(
        subject: &str,
        study_minutes: u32,
        reward_minutes: u32,
        total_study_seconds: u64,
    ) -> Self {
        let now = now_ms();
        Self {
            id: now,
            subject: subject.to_string(),
            study_minutes,
            reward_minutes,
            total_study_seconds,
            completed_at: now,
        }
    }
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Abstract store of completed study sessions.
///
/// Persistence failures stay inside the store (logged, swallowed); the
/// timer never waits on or reacts to them.
pub trait HistoryStore: Send + Sync {
    /// Append a record and persist the updated list. No deduplication.
    fn add_session(&self, record: StudySessionRecord);

    /// Drop all records, in memory and on disk.
    fn clear(&self);

    /// Snapshot of the current list, newest first.
    fn sessions(&self) -> Vec<StudySessionRecord>;

    /// Distinct subjects across all records, with `"General"` always
    /// present and first.
    fn subject_suggestions(&self) -> Vec<String> {
        let mut out = vec![DEFAULT_SUBJECT.to_string()];
        for record in self.sessions() {
            if !out.contains(&record.subject) {
                out.push(record.subject.clone());
            }
        }
        out
    }
}

/// SQLite-kv-backed history store.
pub struct KvHistoryStore {
    db: Mutex<Database>,
    sessions: Mutex<Vec<StudySessionRecord>>,
}

impl KvHistoryStore {
    /// Wrap a database, loading any persisted history.
    ///
    /// Records that fail to deserialize are discarded wholesale (fail-open);
    /// parsed records are sorted by completion time, newest first.
    pub fn new(db: Database) -> Self {
        let mut sessions = match db.kv_get(SESSIONS_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Vec<StudySessionRecord>>(&json)
                .unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("history: failed to read sessions: {e}");
                Vec::new()
            }
        };
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Self {
            db: Mutex::new(db),
            sessions: Mutex::new(sessions),
        }
    }

    fn persist(&self, list: &[StudySessionRecord]) {
        let json = match serde_json::to_string(list) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("history: failed to serialize sessions: {e}");
                return;
            }
        };
        let db = self.db.lock().expect("history db lock poisoned");
        if let Err(e) = db.kv_set(SESSIONS_KEY, &json) {
            eprintln!("history: failed to persist sessions: {e}");
        }
    }
}

impl HistoryStore for KvHistoryStore {
    fn add_session(&self, record: StudySessionRecord) {
        // Persist while still holding the list lock so concurrent writers
        // cannot interleave mutate/persist and land a stale snapshot on disk.
        let mut sessions = self.sessions.lock().expect("history lock poisoned");
        sessions.insert(0, record);
        self.persist(&sessions);
    }

    fn clear(&self) {
        let mut sessions = self.sessions.lock().expect("history lock poisoned");
        sessions.clear();
        self.persist(&sessions);
    }

    fn sessions(&self) -> Vec<StudySessionRecord> {
        self.sessions.lock().expect("history lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, completed_at: i64) -> StudySessionRecord {
        StudySessionRecord {
            id: completed_at,
            subject: subject.to_string(),
            study_minutes: 25,
            reward_minutes: 5,
            total_study_seconds: 25 * 60,
            completed_at,
        }
    }

    #[test]
    fn add_and_reload_sorts_newest_first() {
        let db = Database::open_memory().unwrap();
        let store = KvHistoryStore::new(db);
        store.add_session(record("Math", 100));
        store.add_session(record("History", 300));
        store.add_session(record("Math", 200));

        // In-memory list is newest-insert-first; reload re-sorts by time.
        let json = {
            let db = store.db.lock().unwrap();
            db.kv_get(SESSIONS_KEY).unwrap().unwrap()
        };
        let db2 = Database::open_memory().unwrap();
        db2.kv_set(SESSIONS_KEY, &json).unwrap();
        let reloaded = KvHistoryStore::new(db2);
        let times: Vec<i64> = reloaded.sessions().iter().map(|r| r.completed_at).collect();
        assert_eq!(times, vec![300, 200, 100]);
    }

    #[test]
    fn history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studyblock.db");
        {
            let store = KvHistoryStore::new(Database::open_at(&path).unwrap());
            store.add_session(record("Math", 100));
            store.add_session(record("Physics", 200));
        }
        let store = KvHistoryStore::new(Database::open_at(&path).unwrap());
        let sessions = store.sessions();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].subject, "Physics");
        assert_eq!(sessions[1].subject, "Math");
    }

    #[test]
    fn corrupt_payload_falls_back_to_empty() {
        let db = Database::open_memory().unwrap();
        db.kv_set(SESSIONS_KEY, "not json at all{{{").unwrap();
        let store = KvHistoryStore::new(db);
        assert!(store.sessions().is_empty());
    }

    #[test]
    fn clear_empties_memory_and_disk() {
        let db = Database::open_memory().unwrap();
        let store = KvHistoryStore::new(db);
        store.add_session(record("Math", 1));
        store.clear();
        assert!(store.sessions().is_empty());
        let db = store.db.lock().unwrap();
        assert_eq!(db.kv_get(SESSIONS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn subject_suggestions_dedup_with_general_first() {
        let db = Database::open_memory().unwrap();
        let store = KvHistoryStore::new(db);
        store.add_session(record("Math", 1));
        store.add_session(record("General", 2));
        store.add_session(record("Physics", 3));
        store.add_session(record("Math", 4));
        let suggestions = store.subject_suggestions();
        assert_eq!(suggestions[0], DEFAULT_SUBJECT);
        assert_eq!(
            suggestions,
            vec!["General", "Math", "Physics"]
        );
    }

    #[test]
    fn persisted_list_matches_memory_under_concurrent_writers() {
        use std::sync::Arc;

        let store = Arc::new(KvHistoryStore::new(Database::open_memory().unwrap()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.add_session(record("Math", t * 1000 + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let persisted: Vec<StudySessionRecord> = {
            let db = store.db.lock().unwrap();
            serde_json::from_str(&db.kv_get(SESSIONS_KEY).unwrap().unwrap()).unwrap()
        };
        assert_eq!(persisted.len(), 100);
        assert_eq!(persisted, store.sessions());
    }

    #[test]
    fn record_round_trips_through_json() {
        let original = vec![record("Chemistry", 42)];
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("studyMinutes"));
        assert!(json.contains("completedAt"));
        let parsed: Vec<StudySessionRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
