use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::catalog::Product;

pub const MENU_ADD: &str = "➕ Add Account";
pub const MENU_LIST: &str = "📋 Overview";
pub const MENU_CHECK: &str = "🔎 Check Email";
pub const MENU_DUPES: &str = "🗑 Remove Duplicates";
pub const MENU_OWNER: &str = "⚙️ Set Owner";
pub const MENU_HELP: &str = "ℹ️ Help";

/// Callback data for the cancel button on inline keyboards.
pub const CANCEL_CALLBACK: &str = "CANCEL";
/// Callback prefix for product selection in the add wizard.
pub const ADD_PREFIX: &str = "ADD";

/// The persistent operator menu.
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new([
        [KeyboardButton::new(MENU_ADD), KeyboardButton::new(MENU_LIST)],
        [
            KeyboardButton::new(MENU_CHECK),
            KeyboardButton::new(MENU_DUPES),
        ],
        [
            KeyboardButton::new(MENU_OWNER),
            KeyboardButton::new(MENU_HELP),
        ],
    ])
    .resize_keyboard(true)
}

/// Inline product picker for the add wizard: two products per row plus a
/// trailing cancel row.
pub fn product_picker() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut row = Vec::new();

    for product in Product::ALL {
        row.push(InlineKeyboardButton::callback(
            format!("{} {}", product.icon(), product.title()),
            format!("{ADD_PREFIX}:{}", product.key()),
        ));
        if row.len() == 2 {
            rows.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows.push(vec![InlineKeyboardButton::callback(
        "❌ Cancel",
        CANCEL_CALLBACK,
    )]);

    InlineKeyboardMarkup::new(rows)
}
