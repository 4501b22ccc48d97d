//! Conversation engine for the data-input bot.

use std::sync::Arc;

use teloxide::utils::html;
use tracing::{debug, error, info};

use super::{
    DirectInput, DirectInputError, DraftRecord, Field, Session, SessionKey, SessionStore, Stage,
    Step, classify_direct_input,
};
use crate::commands::{chunk_message, input as replies};
use crate::record::{UserIdentity, resolve_display_identity};
use crate::sheets::{RecordSheet, read_records};

/// Drives input sessions and writes finished records to the sheet.
pub struct ConversationEngine {
    sessions: SessionStore,
    sheet: Arc<dyn RecordSheet>,
}

impl ConversationEngine {
    #[must_use]
    pub fn new(sheet: Arc<dyn RecordSheet>) -> Self {
        Self {
            sessions: SessionStore::new(),
            sheet,
        }
    }

    /// `/input`: opens a form. Ignored while one is already open.
    pub async fn start_input(&self, key: SessionKey) -> Option<String> {
        if !self.sessions.start(key).await {
            debug!("Input session already open for {:?}", key);
            return None;
        }
        debug!("Started input session for {:?}", key);
        Some(replies::DATE_PROMPT.to_owned())
    }

    /// `/cancel`: drops the open form. Ignored when there is none.
    pub async fn cancel(&self, key: SessionKey) -> Option<String> {
        self.sessions.clear(key).await?;
        debug!("Cancelled input session for {:?}", key);
        Some(replies::CANCELLED.to_owned())
    }

    /// Handles a non-command text message.
    ///
    /// An open form takes the message first; otherwise it is tried as
    /// direct input. Returns `None` when the message gets no reply.
    pub async fn handle_text(
        &self,
        key: SessionKey,
        user: &UserIdentity,
        text: &str,
    ) -> Option<String> {
        let Some(step) = self.sessions.apply(key, text).await else {
            return self.handle_direct_input(user, text).await;
        };

        let reply = match step {
            Step::Advanced(next) => match next {
                Session::AwaitingPeriod { date } => replies::period_prompt(&date),
                Session::AwaitingResult { period, .. } => replies::result_prompt(&period),
                Session::AwaitingDate => replies::DATE_PROMPT.to_owned(),
            },
            Step::Rejected(Field::Date) => replies::INVALID_DATE.to_owned(),
            Step::Rejected(Field::Period) => replies::INVALID_PERIOD.to_owned(),
            Step::Rejected(Field::Result) => replies::INVALID_RESULT.to_owned(),
            Step::Completed(draft) => self.save(draft, user).await,
        };
        Some(reply)
    }

    async fn handle_direct_input(&self, user: &UserIdentity, text: &str) -> Option<String> {
        match classify_direct_input(text) {
            DirectInput::NotApplicable => None,
            DirectInput::FormatError(DirectInputError::Date) => {
                Some(replies::DIRECT_INVALID_DATE.to_owned())
            }
            DirectInput::FormatError(DirectInputError::Digits) => {
                Some(replies::DIRECT_INVALID_DIGITS.to_owned())
            }
            DirectInput::Valid(draft) => Some(self.save(draft, user).await),
        }
    }

    /// Appends the finished record; one append attempt, no retry.
    async fn save(&self, draft: DraftRecord, user: &UserIdentity) -> String {
        let record = draft.into_record(resolve_display_identity(user));

        match self.sheet.append_row(&record.to_row()).await {
            Ok(()) => {
                info!(
                    "Saved record {} / {} / {} from {}",
                    record.date, record.period, record.result, record.submitter
                );
                replies::saved(&record)
            }
            Err(e) => {
                error!("Error saving to spreadsheet: {}", e);
                replies::SAVE_FAILED.to_owned()
            }
        }
    }

    /// `/showdata`: the caller's own records, split into sendable chunks.
    pub async fn show_data(&self, user: &UserIdentity) -> Vec<String> {
        let records = match read_records(self.sheet.as_ref()).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error showing data: {}", e);
                return vec![replies::LOAD_FAILED.to_owned()];
            }
        };

        if records.is_empty() {
            return vec![replies::NO_DATA.to_owned()];
        }

        let identity = resolve_display_identity(user);
        let entries: Vec<String> = records
            .iter()
            .filter(|r| r.user == identity)
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "<b>{}. {}</b>\n   Periode: {}\n   Result: {}\n   Waktu: {}\n\n",
                    i + 1,
                    html::escape(&r.date),
                    html::escape(&r.period),
                    html::escape(&r.result),
                    html::escape(&r.timestamp),
                )
            })
            .collect();

        if entries.is_empty() {
            return vec![replies::NO_USER_DATA.to_owned()];
        }

        chunk_message("📋 <b>Data yang sudah Anda input:</b>\n\n", &entries)
    }

    /// Current stage of the form for `key`, if one is open.
    pub async fn stage(&self, key: SessionKey) -> Option<Stage> {
        self.sessions.get(key).await.as_ref().map(Session::stage)
    }
}

impl std::fmt::Debug for ConversationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationEngine")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
