//! The hourly reminder pass: scan every product table, classify each
//! account, flip newly crossed reminder flags and expired statuses, and
//! notify the owner. Failures are isolated per row and per table; a
//! broken tab never blocks the rest of the pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use teloxide::{prelude::*, Bot};
use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::bot::AppContext;
use crate::catalog::Product;
use crate::domain::lifecycle::plan_reminder_pass;
use crate::store::rows::{column_index, decode_table};
use crate::utils::datetime::now_local;
use crate::utils::logging::{log_store_error, log_system_event};

/// Pass runs at the top of every hour.
const PASS_CRON: &str = "0 0 * * * *";
/// First pass shortly after startup.
const FIRST_PASS_DELAY: Duration = Duration::from_secs(10);

/// Outcome of the most recent reminder pass, surfaced by the health
/// endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassSummary {
    pub finished_at: NaiveDateTime,
    pub owner_configured: bool,
    pub tables_scanned: usize,
    pub tables_failed: usize,
    pub rows_skipped: usize,
    pub cells_updated: usize,
    pub notifications_sent: usize,
}

pub type SharedPassSummary = Arc<RwLock<Option<PassSummary>>>;

pub struct ReminderService {
    bot: Bot,
    ctx: Arc<AppContext>,
    scheduler: JobScheduler,
    pass_lock: Arc<Mutex<()>>,
    last_pass: SharedPassSummary,
}

impl ReminderService {
    pub async fn new(
        bot: Bot,
        ctx: Arc<AppContext>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            bot,
            ctx,
            scheduler,
            pass_lock: Arc::new(Mutex::new(())),
            last_pass: Arc::new(RwLock::new(None)),
        })
    }

    /// Handle for the health endpoint.
    pub fn last_pass(&self) -> SharedPassSummary {
        self.last_pass.clone()
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bot = self.bot.clone();
        let ctx = self.ctx.clone();
        let pass_lock = self.pass_lock.clone();
        let last_pass = self.last_pass.clone();

        let hourly_job = Job::new_async(PASS_CRON, move |_uuid, _l| {
            let bot = bot.clone();
            let ctx = ctx.clone();
            let pass_lock = pass_lock.clone();
            let last_pass = last_pass.clone();
            Box::pin(async move {
                run_reminder_pass(bot, ctx, pass_lock, last_pass).await;
            })
        })?;

        self.scheduler.add(hourly_job).await?;
        self.scheduler.start().await?;

        // One early pass so a restart does not wait out the full hour.
        let bot = self.bot.clone();
        let ctx = self.ctx.clone();
        let pass_lock = self.pass_lock.clone();
        let last_pass = self.last_pass.clone();
        tokio::spawn(async move {
            tokio::time::sleep(FIRST_PASS_DELAY).await;
            run_reminder_pass(bot, ctx, pass_lock, last_pass).await;
        });

        tracing::info!("Reminder service started - hourly checks plus a startup pass");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

async fn run_reminder_pass(
    bot: Bot,
    ctx: Arc<AppContext>,
    pass_lock: Arc<Mutex<()>>,
    last_pass: SharedPassSummary,
) {
    // Passes never overlap: if the previous one is still running when the
    // next trigger fires, the new trigger is dropped.
    let Ok(_guard) = pass_lock.try_lock() else {
        tracing::warn!("Previous reminder pass still running; skipping this trigger");
        return;
    };

    let now = now_local();
    let owner = ctx.owner.load();
    let mut summary = PassSummary {
        finished_at: now,
        owner_configured: owner.is_some(),
        tables_scanned: 0,
        tables_failed: 0,
        rows_skipped: 0,
        cells_updated: 0,
        notifications_sent: 0,
    };

    if let Some(owner_id) = owner {
        for product in Product::ALL {
            scan_product(
                &bot,
                &ctx,
                product,
                owner_id,
                now,
                &mut summary,
            )
            .await;
        }
        log_system_event(
            "reminder pass finished",
            Some(&format!(
                "tables {} (failed {}), skipped rows {}, cells {}, notifications {}",
                summary.tables_scanned,
                summary.tables_failed,
                summary.rows_skipped,
                summary.cells_updated,
                summary.notifications_sent,
            )),
        );
    } else {
        // Nobody to notify: the pass reads and writes nothing.
        tracing::debug!("No owner registered; reminder pass is a no-op");
    }

    let swept = ctx.sessions.sweep_expired(now).await;
    if swept > 0 {
        tracing::info!("Swept {} timed-out operator session(s)", swept);
    }

    summary.finished_at = now_local();
    *last_pass.write().await = Some(summary);
}

async fn scan_product(
    bot: &Bot,
    ctx: &Arc<AppContext>,
    product: Product,
    owner_id: i64,
    now: NaiveDateTime,
    summary: &mut PassSummary,
) {
    let tab = product.sheet_tab();
    let grid = match ctx.store.read_table(tab).await {
        Ok(grid) => grid,
        Err(e) => {
            log_store_error("read_table", tab, &e.to_string());
            summary.tables_failed += 1;
            return;
        }
    };

    let view = decode_table(&grid);
    let mut rows = Vec::new();
    for (row, decoded) in view.rows {
        match decoded {
            Ok(record) => rows.push((row, record)),
            Err(e) => {
                tracing::warn!("Skipping {tab} row {row}: {e}");
                summary.rows_skipped += 1;
            }
        }
    }

    let plan = plan_reminder_pass(&rows, now, ctx.monthly_min_days);

    // Flags flip before the notification goes out, mirroring the dedup
    // contract: a threshold fires at most once per expiry period even if
    // the send itself fails.
    for update in &plan.updates {
        let Some(column) = column_index(&view.header, update.column) else {
            tracing::warn!("Tab {tab} has no '{}' column; cannot record update", update.column);
            continue;
        };
        match ctx.store.update_cell(tab, update.row, column, update.value).await {
            Ok(()) => summary.cells_updated += 1,
            Err(e) => log_store_error("update_cell", tab, &e.to_string()),
        }
    }

    if !plan.lines.is_empty() {
        let text = format!(
            "🔔 {} {}\n{}",
            product.icon(),
            product.title(),
            plan.lines.join("\n")
        );
        match bot.send_message(ChatId(owner_id), text).await {
            Ok(_) => summary.notifications_sent += plan.lines.len(),
            Err(e) => tracing::error!("Failed to notify owner {}: {}", owner_id, e),
        }
    }

    summary.tables_scanned += 1;
}
