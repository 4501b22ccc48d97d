//! Telegram transport for both bots.
//!
//! Thin teloxide wiring: handlers translate messages into engine calls and
//! send whatever text the engines return. Updates from one chat are handled
//! in order; different chats run concurrently.

mod analysis_bot;
mod input_bot;

use teloxide::prelude::*;
use teloxide::types::{ParseMode, User};

use crate::conversation::SessionKey;
use crate::record::UserIdentity;

pub use analysis_bot::run_analysis_bot;
pub use input_bot::run_input_bot;

/// Converts a Telegram user into the identity stored with records.
#[must_use]
pub fn identity_of(user: &User) -> UserIdentity {
    UserIdentity {
        id: user.id.0,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}

/// Session key for a user in a chat.
#[must_use]
pub fn session_key(chat_id: ChatId, user: &User) -> SessionKey {
    SessionKey::new(chat_id.0, user.id.0)
}

/// Sends `text` as an HTML message.
async fn send_html(bot: &Bot, chat_id: ChatId, text: String) -> ResponseResult<()> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use teloxide::types::UserId;

    use super::*;
    use crate::record::resolve_display_identity;

    fn telegram_user(username: Option<&str>, first: &str, last: Option<&str>) -> User {
        User {
            id: UserId(99),
            is_bot: false,
            first_name: first.to_owned(),
            last_name: last.map(str::to_owned),
            username: username.map(str::to_owned),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn test_identity_of_with_handle() {
        let identity = identity_of(&telegram_user(Some("budi"), "Budi", None));
        assert_eq!(identity.id, 99);
        assert_eq!(resolve_display_identity(&identity), "budi");
    }

    #[test]
    fn test_identity_of_without_handle() {
        let identity = identity_of(&telegram_user(None, "Budi", Some("Santoso")));
        assert_eq!(resolve_display_identity(&identity), "Budi Santoso");
    }

    #[test]
    fn test_session_key() {
        let key = session_key(ChatId(-100), &telegram_user(None, "Budi", None));
        assert_eq!(key, SessionKey::new(-100, 99));
    }
}
