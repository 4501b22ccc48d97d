//! Data-input conversation.
//!
//! A three-step form (date → period → result) per chat user, with a
//! stateless comma-separated fallback for messages that arrive while no
//! form is open. Both paths end in the same single append.

mod direct;
mod engine;
mod session;

use crate::record::Record;

pub use direct::{DirectInput, DirectInputError, classify_direct_input};
pub use engine::ConversationEngine;
pub use session::{Field, Session, SessionKey, SessionStore, Stage, Step};

/// Validated fields waiting for a timestamp and a submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecord {
    pub date: String,
    pub period: String,
    pub result: String,
}

impl DraftRecord {
    /// Stamps the draft with the current time and the submitter.
    #[must_use]
    pub fn into_record(self, submitter: String) -> Record {
        Record::now(&self.date, &self.period, &self.result, submitter)
    }
}
