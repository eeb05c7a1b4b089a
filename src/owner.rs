//! The owner registry: the single chat that receives reminder
//! notifications. Backed by a small text file holding one chat id; the
//! trait seam lets deployments that need durability swap in a
//! store-backed implementation.

use std::path::PathBuf;

/// Persistence for the notification recipient.
pub trait OwnerRegistry: Send + Sync {
    /// The registered chat id, or `None` when no owner is configured.
    /// A missing or unreadable backing file is not an error.
    fn load(&self) -> Option<i64>;

    /// Registers a chat as the reminder recipient.
    fn save(&self, chat_id: i64) -> anyhow::Result<()>;
}

/// File-backed registry. Not durable across redeploys when the file
/// lives on ephemeral storage, which the reference deployment accepts.
pub struct FileOwnerRegistry {
    path: PathBuf,
}

impl FileOwnerRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OwnerRegistry for FileOwnerRegistry {
    fn load(&self) -> Option<i64> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.trim().parse().ok())
    }

    fn save(&self, chat_id: i64) -> anyhow::Result<()> {
        std::fs::write(&self.path, chat_id.to_string())?;
        Ok(())
    }
}
