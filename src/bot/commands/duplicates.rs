use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::keyboards::main_menu;
use crate::bot::AppContext;
use crate::catalog::Product;
use crate::domain::lifecycle::find_duplicate_emails;
use crate::store::rows::column_index;
use crate::utils::logging::{log_command_start, log_command_success, log_store_error};

/// Deletes every later duplicate of an email within each product table.
/// Duplicate detection works on the raw email column, so rows with
/// otherwise malformed data still count.
pub async fn handle_dupes(bot: &Bot, chat_id: ChatId, ctx: &Arc<AppContext>) -> ResponseResult<()> {
    log_command_start("dupes", chat_id.0, None);
    let mut total_deleted = 0usize;
    let mut per_product = Vec::new();
    let mut failed_tabs = Vec::new();

    for product in Product::ALL {
        let tab = product.sheet_tab();
        let grid = match ctx.store.read_table(tab).await {
            Ok(grid) => grid,
            Err(e) => {
                log_store_error("read_table", tab, &e.to_string());
                failed_tabs.push(product.title());
                continue;
            }
        };

        let Some((header, data)) = grid.split_first() else {
            continue;
        };
        let Some(email_col) = column_index(header, "email") else {
            continue;
        };

        let emails: Vec<&str> = data
            .iter()
            .map(|row| row.get(email_col - 1).map_or("", |cell| cell.as_str()))
            .collect();

        // Data index i sits on sheet row i + 2 (row 1 is the header).
        // Deletions run bottom-up so earlier row numbers stay valid.
        let mut rows: Vec<usize> = find_duplicate_emails(&emails)
            .into_iter()
            .map(|idx| idx + 2)
            .collect();
        rows.sort_unstable_by(|a, b| b.cmp(a));

        let mut deleted = 0usize;
        for row in rows {
            match ctx.store.delete_row(tab, row).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    log_store_error("delete_row", tab, &e.to_string());
                    failed_tabs.push(product.title());
                    break;
                }
            }
        }

        if deleted > 0 {
            per_product.push(format!("{}: {}", product.title(), deleted));
            total_deleted += deleted;
        }
    }

    let mut text = if total_deleted == 0 {
        "✅ No duplicate emails found.".to_string()
    } else {
        format!(
            "🗑 Duplicates removed:\n{}\n\nTotal: {total_deleted}",
            per_product.join("\n")
        )
    };
    if !failed_tabs.is_empty() {
        text.push_str(&format!(
            "\n\n⚠️ Some tabs had errors: {}",
            failed_tabs.join(", ")
        ));
    }

    log_command_success("dupes", chat_id.0, Some(&total_deleted.to_string()));
    bot.send_message(chat_id, text).reply_markup(main_menu()).await?;
    Ok(())
}
