#![allow(clippy::unwrap_used)]

use account_manager_bot::config::Config;
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

fn set_required_vars() {
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("SPREADSHEET_ID", "sheet-id-abc");
    env::set_var("GSHEET_CREDS_JSON", "{\"client_email\":\"x\"}");
}

fn clear_all_vars() {
    for var in [
        "TELEGRAM_BOT_TOKEN",
        "SPREADSHEET_ID",
        "GSHEET_CREDS_JSON",
        "OWNER_FILE",
        "HTTP_PORT",
        "MONTHLY_MIN_DAYS",
        "WIZARD_TIMEOUT_SECS",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::set_var("OWNER_FILE", "/data/owner.txt");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("MONTHLY_MIN_DAYS", "30");
    env::set_var("WIZARD_TIMEOUT_SECS", "120");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.spreadsheet_id, "sheet-id-abc");
    assert_eq!(config.owner_file, "/data/owner.txt");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.monthly_min_days, 30);
    assert_eq!(config.wizard_timeout_secs, 120);

    clear_all_vars();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.owner_file, "/tmp/owner_chat_id.txt");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.monthly_min_days, 28);
    assert_eq!(config.wizard_timeout_secs, 300);

    clear_all_vars();
}

#[test]
fn test_config_missing_required_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TELEGRAM_BOT_TOKEN must be set"));

    env::set_var("TELEGRAM_BOT_TOKEN", "token");
    let result = Config::from_env();
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("SPREADSHEET_ID must be set"));

    env::set_var("SPREADSHEET_ID", "sheet-id");
    let result = Config::from_env();
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("GSHEET_CREDS_JSON must be set"));

    clear_all_vars();
}

#[test]
fn test_config_rejects_blank_required_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    env::set_var("TELEGRAM_BOT_TOKEN", "   ");
    env::set_var("SPREADSHEET_ID", "sheet-id");
    env::set_var("GSHEET_CREDS_JSON", "{}");

    assert!(Config::from_env().is_err());

    clear_all_vars();
}

#[test]
fn test_config_invalid_numbers() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(Config::from_env().is_err());

    env::set_var("HTTP_PORT", "3000");
    env::set_var("MONTHLY_MIN_DAYS", "four weeks");
    assert!(Config::from_env().is_err());

    clear_all_vars();
}
