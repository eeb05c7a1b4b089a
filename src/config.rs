use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Spreadsheet id from the sheet URL (the REST API addresses sheets
    /// by id, not by title).
    pub spreadsheet_id: String,
    /// Content of the service-account key JSON.
    pub gsheet_creds_json: String,
    pub owner_file: String,
    pub http_port: u16,
    /// Minimum duration in days for an account to use the day-threshold
    /// ladder; anything shorter gets the single 1-hour reminder.
    pub monthly_min_days: u32,
    /// Idle seconds before an in-progress wizard counts as cancelled.
    pub wizard_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;
        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let spreadsheet_id =
            env::var("SPREADSHEET_ID").map_err(|_| anyhow!("SPREADSHEET_ID must be set"))?;
        if spreadsheet_id.trim().is_empty() {
            return Err(anyhow!("SPREADSHEET_ID must be set"));
        }

        let gsheet_creds_json =
            env::var("GSHEET_CREDS_JSON").map_err(|_| anyhow!("GSHEET_CREDS_JSON must be set"))?;
        if gsheet_creds_json.trim().is_empty() {
            return Err(anyhow!("GSHEET_CREDS_JSON must be set"));
        }

        let owner_file = env::var("OWNER_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "/tmp/owner_chat_id.txt".to_string());

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let monthly_min_days = env::var("MONTHLY_MIN_DAYS")
            .unwrap_or_else(|_| "28".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid MONTHLY_MIN_DAYS"))?;

        let wizard_timeout_secs = env::var("WIZARD_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid WIZARD_TIMEOUT_SECS"))?;

        Ok(Config {
            telegram_bot_token: token,
            spreadsheet_id,
            gsheet_creds_json,
            owner_file,
            http_port,
            monthly_min_days,
            wizard_timeout_secs,
        })
    }
}
