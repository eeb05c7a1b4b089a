use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::commands::{add, check, dashboard, duplicates, owner_cmd, Command};
use crate::bot::keyboards::{
    main_menu, MENU_ADD, MENU_CHECK, MENU_DUPES, MENU_HELP, MENU_LIST, MENU_OWNER,
};
use crate::bot::AppContext;
use crate::domain::session::{Flow, SessionLookup};
use crate::utils::datetime::now_local;

const HELP_TEXT: &str = "ℹ️ Help\n\
    - ➕ Add Account: product → email → duration (days) → phone\n\
    - 🔎 Check Email: find an email across all products\n\
    - 📋 Overview: per-product account summary\n\
    - 🗑 Remove Duplicates: clean up duplicate emails\n\
    - ⚙️ Set Owner: receive expiry reminders in this chat\n\n\
    /cancel aborts any in-progress step.\n\n\
    Quick commands: /add, /check, /list, /dupes, /owner";

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    match cmd {
        Command::Start => {
            bot.send_message(chat_id, "🤍 Account Manager Bot")
                .reply_markup(main_menu())
                .await?;
        }
        Command::Help => {
            bot.send_message(chat_id, HELP_TEXT)
                .reply_markup(main_menu())
                .await?;
        }
        Command::Add => add::entry(&bot, chat_id, &ctx).await?,
        Command::Check => check::entry(&bot, chat_id, &ctx).await?,
        Command::List => dashboard::handle_list(&bot, chat_id, &ctx).await?,
        Command::Dupes => duplicates::handle_dupes(&bot, chat_id, &ctx).await?,
        Command::Owner => owner_cmd::handle_owner(&bot, chat_id, &ctx).await?,
        Command::Cancel => {
            ctx.sessions.clear(chat_id.0).await;
            bot.send_message(chat_id, "❌ Cancelled.")
                .reply_markup(main_menu())
                .await?;
        }
    }
    Ok(())
}

/// Collapses repeated whitespace so menu-button text survives client
/// quirks around the leading icon.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_menu(text: &str, button: &str) -> bool {
    // Tolerate clients that strip or mangle the icon: match on the
    // trailing words as the original menu did.
    let label = button
        .split_once(' ')
        .map_or(button, |(_, rest)| rest);
    text == button || text.ends_with(label)
}

pub async fn text_handler(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match ctx.sessions.take(chat_id.0, now_local()).await {
        SessionLookup::Active(Flow::AddAccount(state)) => {
            return add::drive_text(&bot, chat_id, &ctx, state, text).await;
        }
        SessionLookup::Active(Flow::CheckEmail) => {
            return check::run(&bot, chat_id, &ctx, text).await;
        }
        SessionLookup::Expired => {
            bot.send_message(chat_id, "⏳ Timed out. Start again from the menu.")
                .reply_markup(main_menu())
                .await?;
            return Ok(());
        }
        SessionLookup::Idle => {}
    }

    let text = normalize(text);
    if is_menu(&text, MENU_ADD) {
        add::entry(&bot, chat_id, &ctx).await?;
    } else if is_menu(&text, MENU_LIST) {
        dashboard::handle_list(&bot, chat_id, &ctx).await?;
    } else if is_menu(&text, MENU_CHECK) {
        check::entry(&bot, chat_id, &ctx).await?;
    } else if is_menu(&text, MENU_DUPES) {
        duplicates::handle_dupes(&bot, chat_id, &ctx).await?;
    } else if is_menu(&text, MENU_OWNER) {
        owner_cmd::handle_owner(&bot, chat_id, &ctx).await?;
    } else if is_menu(&text, MENU_HELP) {
        bot.send_message(chat_id, HELP_TEXT)
            .reply_markup(main_menu())
            .await?;
    }
    // Anything else outside a session is ignored.

    Ok(())
}
