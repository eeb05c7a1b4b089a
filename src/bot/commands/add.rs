use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::{main_menu, product_picker};
use crate::bot::AppContext;
use crate::domain::account::NewAccount;
use crate::domain::session::Flow;
use crate::domain::wizard::{step, Step, WizardEvent, WizardState};
use crate::store::rows::{encode_row, require_columns};
use crate::utils::datetime::{format_datetime, now_local};
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};

/// Starts the add wizard: registers a fresh session and shows the
/// product picker.
pub async fn entry(bot: &Bot, chat_id: ChatId, ctx: &Arc<AppContext>) -> ResponseResult<()> {
    log_command_start("add", chat_id.0, None);
    ctx.sessions
        .begin(chat_id.0, Flow::AddAccount(WizardState::SelectProduct), now_local())
        .await;
    bot.send_message(chat_id, "Pick a product to add an account for:")
        .reply_markup(product_picker())
        .await?;
    Ok(())
}

/// Feeds one text message into an in-flight wizard and acts on the
/// transition. The session is only stored back while the run continues.
pub async fn drive_text(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &Arc<AppContext>,
    state: WizardState,
    text: &str,
) -> ResponseResult<()> {
    match step(state, WizardEvent::Text(text.to_string())) {
        Step::Stay { state, reply } => {
            log_validation_error(state.field_name(), text, &reply, chat_id.0);
            ctx.sessions
                .put(chat_id.0, Flow::AddAccount(state), now_local())
                .await;
            bot.send_message(chat_id, reply).await?;
        }
        Step::Advance { state, reply } => {
            ctx.sessions
                .put(chat_id.0, Flow::AddAccount(state), now_local())
                .await;
            bot.send_message(chat_id, reply).await?;
        }
        Step::Commit(new_account) => commit(bot, chat_id, ctx, new_account).await?,
        Step::Cancelled => {
            bot.send_message(chat_id, "❌ Cancelled.")
                .reply_markup(main_menu())
                .await?;
        }
    }
    Ok(())
}

/// The terminal wizard step: validates the target tab's header, appends
/// the record and confirms. A store failure is reported and the run is
/// discarded rather than retried: a broken header will not fix itself
/// mid-session.
async fn commit(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &Arc<AppContext>,
    new_account: NewAccount,
) -> ResponseResult<()> {
    let product = new_account.product;
    let record = new_account.into_record(now_local());

    let result = async {
        let grid = ctx.store.read_table(product.sheet_tab()).await?;
        let header = grid.first().cloned().unwrap_or_default();
        require_columns(&header)?;
        ctx.store
            .append_row(product.sheet_tab(), encode_row(&header, &record))
            .await
    }
    .await;

    match result {
        Ok(()) => {
            log_command_success("add", chat_id.0, Some(&record.email));
            bot.send_message(
                chat_id,
                format!(
                    "✅ Account saved!\nProduct: {}\nEmail: {}\nDuration: {} days\nExpires: {}\nPhone: {}",
                    product.title(),
                    record.email,
                    record.duration_days,
                    format_datetime(record.expire_at),
                    record.phone,
                ),
            )
            .reply_markup(main_menu())
            .await?;
        }
        Err(e) => {
            log_command_error("add", chat_id.0, &e.to_string());
            bot.send_message(chat_id, format!("❌ Could not save the account: {e}"))
                .reply_markup(main_menu())
                .await?;
        }
    }
    Ok(())
}
