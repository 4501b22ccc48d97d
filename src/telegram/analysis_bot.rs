//! Dispatcher for the analysis bot.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, info};

use super::send_html;
use crate::analysis::AnalysisEngine;
use crate::commands::{AnalysisCommand, analysis};

/// Runs the analysis bot until Ctrl+C. Only commands are answered.
pub async fn run_analysis_bot(bot: Bot, engine: Arc<AnalysisEngine>) {
    let handler = Update::filter_message()
        .filter_command::<AnalysisCommand>()
        .endpoint(handle_command);

    info!("Analysis bot dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in analysis bot handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: AnalysisCommand,
    engine: Arc<AnalysisEngine>,
) -> ResponseResult<()> {
    debug!("Command {:?} in chat {}", cmd, msg.chat.id);

    let reply = match cmd {
        AnalysisCommand::Start => {
            let name = msg.from.as_ref().map_or("", |u| u.first_name.as_str());
            analysis::welcome(name)
        }
        AnalysisCommand::Help => analysis::HELP.to_owned(),
        AnalysisCommand::Metode => analysis::METHODS.to_owned(),
        AnalysisCommand::Analisis => engine.analyze().await,
        AnalysisCommand::Prediksi => engine.predict().await,
    };

    send_html(&bot, msg.chat.id, reply).await
}
