use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::{main_menu, ADD_PREFIX, CANCEL_CALLBACK};
use crate::bot::AppContext;
use crate::domain::session::{Flow, SessionLookup};
use crate::domain::wizard::{step, Step, WizardEvent};
use crate::utils::datetime::now_local;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    tracing::info!("Callback received: '{}'", data);
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(msg) = q.message else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    if data == CANCEL_CALLBACK {
        ctx.sessions.clear(chat_id.0).await;
        // The inline message may already be gone; cancelling still works.
        let _ = bot
            .edit_message_text(chat_id, msg.id, "❌ Cancelled.")
            .await;
        return Ok(());
    }

    let Some(key) = data.strip_prefix(&format!("{ADD_PREFIX}:")) else {
        tracing::warn!("Unrecognized callback data: '{}'", data);
        return Ok(());
    };

    match ctx.sessions.take(chat_id.0, now_local()).await {
        SessionLookup::Active(Flow::AddAccount(state)) => {
            match step(state, WizardEvent::PickProduct(key.to_string())) {
                Step::Stay { state, reply } | Step::Advance { state, reply } => {
                    ctx.sessions
                        .put(chat_id.0, Flow::AddAccount(state), now_local())
                        .await;
                    bot.edit_message_text(chat_id, msg.id, reply).await?;
                }
                // Product selection never completes or cancels the run.
                Step::Commit(_) | Step::Cancelled => {}
            }
        }
        SessionLookup::Active(other) => {
            // A stale product button pressed during another flow; leave
            // that flow untouched.
            ctx.sessions.put(chat_id.0, other, now_local()).await;
        }
        SessionLookup::Idle | SessionLookup::Expired => {
            bot.send_message(chat_id, "⏳ That menu has expired. Start again.")
                .reply_markup(main_menu())
                .await?;
        }
    }

    Ok(())
}
