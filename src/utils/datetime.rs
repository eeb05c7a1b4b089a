use anyhow::{anyhow, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Canonical timestamp format written to the sheet.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Legacy date-only format still found in some older product tabs.
const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Current wall-clock time as stored in the sheet (zone-less local).
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parses a sheet timestamp. Accepts the canonical `YYYY-MM-DD HH:MM:SS`
/// form and the legacy date-only `YYYY-MM-DD` form (midnight assumed).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, LEGACY_DATE_FORMAT) {
        return date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("Invalid datetime '{s}'"));
    }

    Err(anyhow!("Invalid datetime '{s}'"))
}

/// Remaining time in rough human terms, e.g. "2 days 4 hours".
pub fn human_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds();
    if secs <= 0 {
        return "expired".to_string();
    }

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{days} days {hours} hours")
    } else if hours > 0 {
        format!("{hours} hours {minutes} minutes")
    } else {
        format!("{minutes} minutes")
    }
}
