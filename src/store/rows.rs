//! Decoding and encoding between `AccountRecord` and raw sheet rows.
//! Cells are addressed by header name, never by fixed position, so the
//! operator may reorder or add columns in the sheet without breaking the
//! bot.

use chrono::Duration;

use crate::domain::account::{AccountRecord, AccountStatus, ReminderFlags, Threshold};
use crate::store::{RecordError, StoreError};
use crate::utils::datetime::{format_datetime, parse_datetime};

/// Columns every product tab must carry before the bot writes to it.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "created_datetime",
    "email",
    "duration_days",
    "expire_datetime",
    "status",
    "customer_phone",
    "rem14_sent",
    "rem7_sent",
    "rem3_sent",
    "rem1d_sent",
    "rem1h_sent",
];

/// 1-based column index of `name` in the header row.
pub fn column_index(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .map(|idx| idx + 1)
}

/// Validates that a header row carries the full required column set.
/// Fails loudly with every missing name so the operator can fix the
/// sheet in one go.
pub fn require_columns(header: &[String]) -> Result<(), StoreError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| column_index(header, name).is_none())
        .map(|name| (*name).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::MissingColumns(missing))
    }
}

fn cell<'a>(header: &[String], row: &'a [String], name: &str) -> &'a str {
    match column_index(header, name) {
        Some(idx) if idx <= row.len() => row[idx - 1].trim(),
        _ => "",
    }
}

/// Truthy spellings accepted in a reminder-flag cell.
fn flag_set(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "sent" | "done"
    )
}

/// Decodes one data row against the tab's header. Rows may be shorter
/// than the header (trailing empty cells are not materialized by the
/// API). An unparseable expiry is fatal for the row; an unparseable
/// creation time falls back to `expire_at - duration_days` since only
/// the expiry drives the lifecycle.
pub fn decode_row(header: &[String], row: &[String]) -> Result<AccountRecord, RecordError> {
    let expire_raw = cell(header, row, "expire_datetime");
    let expire_at = parse_datetime(expire_raw).map_err(|_| RecordError::BadTimestamp {
        field: "expire_datetime",
        value: expire_raw.to_string(),
    })?;

    let duration_days: u32 = cell(header, row, "duration_days").parse().unwrap_or(0);

    let created_at = parse_datetime(cell(header, row, "created_datetime"))
        .unwrap_or_else(|_| expire_at - Duration::days(i64::from(duration_days)));

    Ok(AccountRecord {
        email: cell(header, row, "email").to_string(),
        phone: cell(header, row, "customer_phone").to_string(),
        created_at,
        duration_days,
        expire_at,
        status: AccountStatus::from_cell(cell(header, row, "status")),
        flags: ReminderFlags {
            days14: flag_set(cell(header, row, Threshold::Days14.flag_column())),
            days7: flag_set(cell(header, row, Threshold::Days7.flag_column())),
            days3: flag_set(cell(header, row, Threshold::Days3.flag_column())),
            days1: flag_set(cell(header, row, Threshold::Days1.flag_column())),
            hour1: flag_set(cell(header, row, Threshold::Hour1.flag_column())),
        },
    })
}

fn flag_cell(set: bool) -> String {
    if set {
        "TRUE".to_string()
    } else {
        String::new()
    }
}

/// Lays a record out in the sheet's own header order. Columns the bot
/// does not know get empty cells.
pub fn encode_row(header: &[String], record: &AccountRecord) -> Vec<String> {
    header
        .iter()
        .map(|name| match name.trim() {
            "created_datetime" => format_datetime(record.created_at),
            "email" => record.email.clone(),
            "duration_days" => record.duration_days.to_string(),
            "expire_datetime" => format_datetime(record.expire_at),
            "status" => record.status.as_cell().to_string(),
            "customer_phone" => record.phone.clone(),
            "rem14_sent" => flag_cell(record.flags.days14),
            "rem7_sent" => flag_cell(record.flags.days7),
            "rem3_sent" => flag_cell(record.flags.days3),
            "rem1d_sent" => flag_cell(record.flags.days1),
            "rem1h_sent" => flag_cell(record.flags.hour1),
            _ => String::new(),
        })
        .collect()
}

/// One tab's grid split into header and decoded data rows, each paired
/// with its 1-based sheet row number. Decode failures stay in the list
/// so callers can log and skip them without losing row numbering.
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<(usize, Result<AccountRecord, RecordError>)>,
}

/// Splits a raw grid as returned by `AccountStore::read_table`. An empty
/// grid decodes to an empty view with no header.
pub fn decode_table(grid: &[Vec<String>]) -> TableView {
    let Some((header, data)) = grid.split_first() else {
        return TableView {
            header: Vec::new(),
            rows: Vec::new(),
        };
    };

    let rows = data
        .iter()
        .enumerate()
        .map(|(i, row)| (i + 2, decode_row(header, row)))
        .collect();

    TableView {
        header: header.clone(),
        rows,
    }
}
