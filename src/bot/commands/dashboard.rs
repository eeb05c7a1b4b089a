use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::main_menu;
use crate::bot::AppContext;
use crate::catalog::Product;
use crate::domain::lifecycle::summarize_table;
use crate::store::rows::decode_table;
use crate::utils::datetime::now_local;
use crate::utils::logging::{log_command_start, log_store_error};

/// Per-product account counts: active, expired, and the near-expiry
/// buckets the reminder ladder watches.
pub async fn handle_list(bot: &Bot, chat_id: ChatId, ctx: &Arc<AppContext>) -> ResponseResult<()> {
    log_command_start("list", chat_id.0, None);
    let now = now_local();
    let mut lines = vec!["📊 DASHBOARD\n".to_string()];

    for product in Product::ALL {
        let grid = match ctx.store.read_table(product.sheet_tab()).await {
            Ok(grid) => grid,
            Err(e) => {
                log_store_error("read_table", product.sheet_tab(), &e.to_string());
                lines.push(format!(
                    "{} {}\n⚠️ tab unavailable\n",
                    product.icon(),
                    product.title()
                ));
                continue;
            }
        };

        // Malformed rows are simply absent from the counts.
        let records: Vec<_> = decode_table(&grid)
            .rows
            .into_iter()
            .filter_map(|(_, decoded)| decoded.ok())
            .collect();
        let summary = summarize_table(&records, now);

        lines.push(format!(
            "{} {}\nActive: {} | Expired: {}\n≤14d: {} | ≤7d: {} | ≤3d: {} | Today: {}\n",
            product.icon(),
            product.title(),
            summary.active,
            summary.expired,
            summary.within_14d,
            summary.within_7d,
            summary.within_3d,
            summary.due_today,
        ));
    }

    bot.send_message(chat_id, lines.join("\n"))
        .reply_markup(main_menu())
        .await?;
    Ok(())
}
