//! # Account Manager Bot
//!
//! A Telegram bot for a small resale business managing subscription-style
//! app accounts (Turnitin, Canva, DeepL, ...). All persistent state lives
//! in one Google Sheets spreadsheet, one worksheet tab per product.
//!
//! ## Features
//! - Add accounts through a multi-step chat wizard
//! - Look up an email across every product table
//! - Per-product dashboard of active and near-expiry accounts
//! - Duplicate email cleanup
//! - Hourly expiry reminders to a registered owner chat

/// Bot dispatch, command handlers and keyboards
pub mod bot;
/// The static product catalog
pub mod catalog;
/// Configuration management and environment variables
pub mod config;
/// Pure account lifecycle, wizard and session logic
pub mod domain;
/// The reminder recipient registry
pub mod owner;
/// Background services: reminder scheduler and health endpoints
pub mod services;
/// The spreadsheet store adapter
pub mod store;
/// Utility functions for datetime, validation, and logging
pub mod utils;
