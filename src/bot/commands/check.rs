use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::main_menu;
use crate::bot::AppContext;
use crate::catalog::Product;
use crate::domain::session::Flow;
use crate::store::rows::decode_table;
use crate::utils::datetime::{format_datetime, human_remaining, now_local};
use crate::utils::logging::{log_command_start, log_store_error};
use crate::utils::validation::{mask_phone, normalize_email, validate_email};

/// Starts the one-step check flow.
pub async fn entry(bot: &Bot, chat_id: ChatId, ctx: &Arc<AppContext>) -> ResponseResult<()> {
    log_command_start("check", chat_id.0, None);
    ctx.sessions
        .begin(chat_id.0, Flow::CheckEmail, now_local())
        .await;
    bot.send_message(
        chat_id,
        "Enter the email to look up (e.g. user@gmail.com)\n/cancel to abort",
    )
    .await?;
    Ok(())
}

/// Searches the submitted email across every product table. A table that
/// fails to read is reported in a footer and never aborts the scan.
pub async fn run(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &Arc<AppContext>,
    input: &str,
) -> ResponseResult<()> {
    if let Err(e) = validate_email(input) {
        // Invalid input keeps the flow alive, same as a wizard re-prompt.
        ctx.sessions
            .put(chat_id.0, Flow::CheckEmail, now_local())
            .await;
        bot.send_message(chat_id, format!("❌ {e}. Try again:\n/cancel to abort"))
            .await?;
        return Ok(());
    }

    let needle = normalize_email(input);
    let now = now_local();
    let mut lines = vec![format!("🔎 RESULTS FOR: {}\n", input.trim())];
    let mut found = false;
    let mut failed_tabs = Vec::new();

    for product in Product::ALL {
        let grid = match ctx.store.read_table(product.sheet_tab()).await {
            Ok(grid) => grid,
            Err(e) => {
                log_store_error("read_table", product.sheet_tab(), &e.to_string());
                failed_tabs.push(product.title());
                continue;
            }
        };

        for (_, decoded) in decode_table(&grid).rows {
            let Ok(record) = decoded else { continue };
            if normalize_email(&record.email) != needle {
                continue;
            }
            found = true;
            lines.push(format!(
                "{} {}\nExpires: {} ({})\nStatus: {}\nPhone: {}\n",
                product.icon(),
                product.title(),
                format_datetime(record.expire_at),
                human_remaining(record.expire_at - now),
                record.status.as_cell(),
                mask_phone(&record.phone),
            ));
        }
    }

    if !found {
        lines.push("❌ Not found in any product.".to_string());
    }
    if !failed_tabs.is_empty() {
        lines.push(format!(
            "\n⚠️ Some tabs could not be read: {}",
            failed_tabs.join(", ")
        ));
    }

    bot.send_message(chat_id, lines.join("\n"))
        .reply_markup(main_menu())
        .await?;
    Ok(())
}
