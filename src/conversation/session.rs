//! Per-conversation form state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tokio::sync::RwLock;

use super::DraftRecord;
use crate::record::{is_four_digit_code, is_valid_date};

/// Identifies one user's dialogue in one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub chat_id: i64,
    pub user_id: u64,
}

impl SessionKey {
    #[must_use]
    pub const fn new(chat_id: i64, user_id: u64) -> Self {
        Self { chat_id, user_id }
    }
}

/// Which field the form is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingDate,
    AwaitingPeriod,
    AwaitingResult,
}

/// A form in progress. Each state carries the fields accepted so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    AwaitingDate,
    AwaitingPeriod { date: String },
    AwaitingResult { date: String, period: String },
}

/// The field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Period,
    Result,
}

/// Outcome of feeding one message to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Input accepted; the form moved to the next state.
    Advanced(Session),
    /// Input rejected; the form stays where it was.
    Rejected(Field),
    /// Final field accepted; the session is over.
    Completed(DraftRecord),
}

impl Session {
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::AwaitingDate => Stage::AwaitingDate,
            Self::AwaitingPeriod { .. } => Stage::AwaitingPeriod,
            Self::AwaitingResult { .. } => Stage::AwaitingResult,
        }
    }

    /// Validates `input` against the awaited field.
    #[must_use]
    pub fn accept(&self, input: &str) -> Step {
        let input = input.trim();
        match self {
            Self::AwaitingDate if is_valid_date(input) => Step::Advanced(Self::AwaitingPeriod {
                date: input.to_owned(),
            }),
            Self::AwaitingDate => Step::Rejected(Field::Date),
            Self::AwaitingPeriod { date } if is_four_digit_code(input) => {
                Step::Advanced(Self::AwaitingResult {
                    date: date.clone(),
                    period: input.to_owned(),
                })
            }
            Self::AwaitingPeriod { .. } => Step::Rejected(Field::Period),
            Self::AwaitingResult { date, period } if is_four_digit_code(input) => {
                Step::Completed(DraftRecord {
                    date: date.clone(),
                    period: period.clone(),
                    result: input.to_owned(),
                })
            }
            Self::AwaitingResult { .. } => Step::Rejected(Field::Result),
        }
    }
}

/// Sessions keyed by conversation, owned by the conversation engine.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionKey, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a form for `key`. An open form is kept as is and `false` is returned.
    pub async fn start(&self, key: SessionKey) -> bool {
        match self.sessions.write().await.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Session::AwaitingDate);
                true
            }
        }
    }

    /// Drops the form for `key`, returning it if one existed.
    pub async fn clear(&self, key: SessionKey) -> Option<Session> {
        self.sessions.write().await.remove(&key)
    }

    /// Current state of the form for `key`.
    pub async fn get(&self, key: SessionKey) -> Option<Session> {
        self.sessions.read().await.get(&key).cloned()
    }

    /// Feeds `input` to the form for `key` and applies the transition.
    ///
    /// Returns `None` when there is no active form. A completed form is
    /// removed before this returns.
    pub async fn apply(&self, key: SessionKey, input: &str) -> Option<Step> {
        let mut sessions = self.sessions.write().await;
        let step = sessions.get(&key)?.accept(input);

        match &step {
            Step::Advanced(next) => {
                sessions.insert(key, next.clone());
            }
            Step::Completed(_) => {
                sessions.remove(&key);
            }
            Step::Rejected(_) => {}
        }
        Some(step)
    }

    /// Number of forms in progress.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: SessionKey = SessionKey::new(1, 10);
    const BOB: SessionKey = SessionKey::new(2, 20);

    #[test]
    fn test_accept_walks_forward() {
        let Step::Advanced(session) = Session::AwaitingDate.accept(" 01/12/2025 ") else {
            panic!("expected advance");
        };
        assert_eq!(session.stage(), Stage::AwaitingPeriod);

        let Step::Advanced(session) = session.accept("1111") else {
            panic!("expected advance");
        };
        assert_eq!(
            session,
            Session::AwaitingResult {
                date: "01/12/2025".to_owned(),
                period: "1111".to_owned()
            }
        );

        assert_eq!(
            session.accept("1234"),
            Step::Completed(DraftRecord {
                date: "01/12/2025".to_owned(),
                period: "1111".to_owned(),
                result: "1234".to_owned(),
            })
        );
    }

    #[test]
    fn test_accept_rejects_per_field() {
        assert_eq!(Session::AwaitingDate.accept("31/02/2025"), Step::Rejected(Field::Date));
        let period = Session::AwaitingPeriod {
            date: "01/12/2025".to_owned(),
        };
        assert_eq!(period.accept("abcd"), Step::Rejected(Field::Period));
        let result = Session::AwaitingResult {
            date: "01/12/2025".to_owned(),
            period: "1111".to_owned(),
        };
        assert_eq!(result.accept("123"), Step::Rejected(Field::Result));
    }

    #[tokio::test]
    async fn test_apply_without_session() {
        let store = SessionStore::new();
        assert!(store.apply(ALICE, "01/12/2025").await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejection_keeps_state() {
        let store = SessionStore::new();
        store.start(ALICE).await;

        let step = store.apply(ALICE, "not a date").await;
        assert_eq!(step, Some(Step::Rejected(Field::Date)));
        assert_eq!(store.get(ALICE).await, Some(Session::AwaitingDate));

        store.apply(ALICE, "01/12/2025").await;
        assert_eq!(
            store.get(ALICE).await.map(|s| s.stage()),
            Some(Stage::AwaitingPeriod)
        );
    }

    #[tokio::test]
    async fn test_completion_removes_session() {
        let store = SessionStore::new();
        store.start(ALICE).await;
        store.apply(ALICE, "01/12/2025").await;
        store.apply(ALICE, "1111").await;

        let step = store.apply(ALICE, "1234").await;
        assert!(matches!(step, Some(Step::Completed(_))));
        assert!(store.get(ALICE).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.start(ALICE).await;
        store.start(BOB).await;

        store.apply(ALICE, "01/12/2025").await;
        store.apply(ALICE, "1111").await;
        store.apply(BOB, "02/12/2025").await;

        assert_eq!(
            store.get(ALICE).await,
            Some(Session::AwaitingResult {
                date: "01/12/2025".to_owned(),
                period: "1111".to_owned()
            })
        );
        assert_eq!(
            store.get(BOB).await,
            Some(Session::AwaitingPeriod {
                date: "02/12/2025".to_owned()
            })
        );
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_start_keeps_open_form() {
        let store = SessionStore::new();
        assert!(store.start(ALICE).await);
        store.apply(ALICE, "01/12/2025").await;

        assert!(!store.start(ALICE).await);
        assert_eq!(
            store.get(ALICE).await,
            Some(Session::AwaitingPeriod {
                date: "01/12/2025".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn test_start_after_clear() {
        let store = SessionStore::new();
        store.start(ALICE).await;
        store.clear(ALICE).await;
        assert!(store.start(ALICE).await);
    }

    #[tokio::test]
    async fn test_same_user_different_chats() {
        let store = SessionStore::new();
        let group = SessionKey::new(-100, ALICE.user_id);
        store.start(ALICE).await;

        assert!(store.get(group).await.is_none());
        assert!(store.apply(group, "01/12/2025").await.is_none());
    }
}
