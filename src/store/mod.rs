//! The account store: a remote spreadsheet, one worksheet tab per
//! product, row 1 reserved for column headers. All row and column
//! indices on this boundary are 1-based to match the sheet UI.

/// Header-order encoding and decoding of account rows
pub mod rows;
/// Google Sheets REST adapter
pub mod sheets;

use async_trait::async_trait;
use thiserror::Error;

/// Errors crossing the store boundary. Per-table variants let a scan
/// over several tables skip the broken one and keep going.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("store authentication failed: {0}")]
    Auth(String),

    #[error("worksheet tab '{0}' not found")]
    TabNotFound(String),

    #[error("sheet is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One malformed row. Never fatal to a table scan: the row is skipped
/// and the rest of the batch continues.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bad {field} value '{value}'")]
    BadTimestamp { field: &'static str, value: String },
}

/// Tabular account storage. Implementations must bound every call
/// (timeouts delegated to the underlying client) and surface failures as
/// `StoreError` values.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// The whole grid of a tab, header row included, rows in sheet order.
    async fn read_table(&self, tab: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Appends one row after the last non-empty row.
    async fn append_row(&self, tab: &str, cells: Vec<String>) -> Result<(), StoreError>;

    /// Overwrites a single cell (1-based row and column).
    async fn update_cell(
        &self,
        tab: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes a row entirely (1-based), shifting later rows up.
    async fn delete_row(&self, tab: &str, row: usize) -> Result<(), StoreError>;
}
