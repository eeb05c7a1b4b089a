use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::main_menu;
use crate::bot::AppContext;
use crate::utils::logging::{log_command_error, log_command_success};

/// Registers the invoking chat as the reminder recipient.
pub async fn handle_owner(bot: &Bot, chat_id: ChatId, ctx: &Arc<AppContext>) -> ResponseResult<()> {
    match ctx.owner.save(chat_id.0) {
        Ok(()) => {
            log_command_success("owner", chat_id.0, None);
            bot.send_message(
                chat_id,
                "✅ Owner saved. Expiry reminders will be sent to this chat.",
            )
            .reply_markup(main_menu())
            .await?;
        }
        Err(e) => {
            log_command_error("owner", chat_id.0, &e.to_string());
            bot.send_message(chat_id, "❌ Could not save the owner. Try again.")
                .reply_markup(main_menu())
                .await?;
        }
    }
    Ok(())
}
