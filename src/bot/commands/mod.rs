/// The add-account wizard driver
pub mod add;
/// Email lookup across every product table
pub mod check;
/// Per-product dashboard counts
pub mod dashboard;
/// Duplicate email cleanup
pub mod duplicates;
/// Reminder recipient registration
pub mod owner_cmd;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Account manager commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Add a new account")]
    Add,
    #[command(description = "Look up an email across all products")]
    Check,
    #[command(description = "Show the per-product dashboard")]
    List,
    #[command(description = "Delete duplicate emails in every product table")]
    Dupes,
    #[command(description = "Receive expiry reminders in this chat")]
    Owner,
    #[command(description = "Cancel the current operation")]
    Cancel,
}
