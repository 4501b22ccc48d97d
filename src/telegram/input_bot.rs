//! Dispatcher for the data-input bot.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, info};

use super::{identity_of, send_html, session_key};
use crate::commands::{InputCommand, input};
use crate::conversation::ConversationEngine;

/// Runs the data-input bot until Ctrl+C.
///
/// Commands are matched first; any other text goes to the conversation
/// engine, which routes it to an open form or to direct input.
pub async fn run_input_bot(bot: Bot, engine: Arc<ConversationEngine>) {
    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<InputCommand>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_text));

    info!("Input bot dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in data-input bot handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: InputCommand,
    engine: Arc<ConversationEngine>,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let key = session_key(msg.chat.id, user);
    debug!("Command {:?} from {:?}", cmd, key);

    let replies = match cmd {
        InputCommand::Start => vec![input::welcome(&user.first_name)],
        InputCommand::Help => vec![input::HELP.to_owned()],
        InputCommand::Input => engine.start_input(key).await.into_iter().collect(),
        InputCommand::Cancel => engine.cancel(key).await.into_iter().collect(),
        InputCommand::Showdata => engine.show_data(&identity_of(user)).await,
    };

    for text in replies {
        send_html(&bot, msg.chat.id, text).await?;
    }
    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    engine: Arc<ConversationEngine>,
) -> ResponseResult<()> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };

    // Unknown commands never reach the form or direct input
    if text.starts_with('/') {
        return Ok(());
    }

    let key = session_key(msg.chat.id, user);
    if let Some(reply) = engine.handle_text(key, &identity_of(user), text).await {
        send_html(&bot, msg.chat.id, reply).await?;
    }
    Ok(())
}
