//! Command handling module.
//!
//! Command enums for both bots and the texts they reply with. Replies are
//! HTML; anything user-supplied is escaped before it is embedded.

pub mod analysis;
pub mod input;

pub use analysis::AnalysisCommand;
pub use input::InputCommand;

/// Telegram rejects messages longer than 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Joins entries into messages of at most [`MAX_MESSAGE_CHARS`] characters.
///
/// Entries are never split unless a single entry is itself too long.
#[must_use]
pub fn chunk_message(header: &str, entries: &[String]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = header.to_owned();

    for entry in entries {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + entry.chars().count() > MAX_MESSAGE_CHARS {
            chunks.push(std::mem::take(&mut current));
        }

        if entry.chars().count() > MAX_MESSAGE_CHARS {
            let chars: Vec<char> = entry.chars().collect();
            for piece in chars.chunks(MAX_MESSAGE_CHARS) {
                chunks.push(piece.iter().collect());
            }
        } else {
            current.push_str(entry);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
