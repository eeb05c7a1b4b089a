//! Pure account lifecycle logic: expiry classification, reminder-threshold
//! evaluation, extension, duplicate detection, and pass planning. No I/O
//! happens here; the reminder service and command handlers apply the
//! results against the store.

use chrono::{Duration, NaiveDateTime};

use crate::domain::account::{AccountRecord, AccountStatus, Threshold};
use crate::utils::validation::{mask_phone, normalize_email};

/// Outcome of evaluating one record at one instant. Carries no side
/// effects: evaluating the same record at the same time twice, without
/// applying the flag updates in between, yields the same due set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Status derived from `expire_at` against `now`.
    pub status: AccountStatus,
    /// True when the stored status still says active but the account has
    /// expired, i.e. the status cell needs rewriting.
    pub newly_expired: bool,
    /// Thresholds crossed and not yet flagged, ladder order. Several can
    /// be due at once after a long evaluation gap.
    pub due: Vec<Threshold>,
}

/// Classifies one record against `now`.
///
/// Accounts of `monthly_min_days` or longer use the day ladder
/// (14/7/3/1 days remaining, `<=` at the boundary); shorter accounts use
/// the single 1-hour threshold. Once expired, reminder flags are left
/// alone entirely.
pub fn classify(record: &AccountRecord, now: NaiveDateTime, monthly_min_days: u32) -> Classification {
    let remaining = record.expire_at - now;

    if remaining <= Duration::zero() {
        return Classification {
            status: AccountStatus::Expired,
            newly_expired: record.status != AccountStatus::Expired,
            due: Vec::new(),
        };
    }

    let mut due = Vec::new();
    let remaining_secs = remaining.num_seconds();

    if record.duration_days >= monthly_min_days {
        let days_left = remaining_secs as f64 / 86_400.0;
        for threshold in Threshold::DAY_LADDER {
            if days_left <= threshold.days() as f64 && !record.flags.is_set(threshold) {
                due.push(threshold);
            }
        }
    } else {
        let hours_left = remaining_secs as f64 / 3_600.0;
        if hours_left <= 1.0 && !record.flags.is_set(Threshold::Hour1) {
            due.push(Threshold::Hour1);
        }
    }

    Classification {
        status: AccountStatus::Active,
        newly_expired: false,
        due,
    }
}

/// Pushes `expire_at` forward by `additional_days`, reactivates the
/// account and clears every reminder flag, opening a fresh expiry period.
pub fn extend(record: &mut AccountRecord, additional_days: u32) {
    record.expire_at += Duration::days(i64::from(additional_days));
    record.status = AccountStatus::Active;
    record.flags.clear();
}

/// Indices (ascending) of every email whose normalized form already
/// appeared earlier in the scan. The first occurrence is kept; empty
/// emails are ignored. Callers removing rows from a positional store
/// must apply these in descending row order.
pub fn find_duplicate_emails<S: AsRef<str>>(emails: &[S]) -> Vec<usize> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();

    for (idx, email) in emails.iter().enumerate() {
        let email = normalize_email(email.as_ref());
        if email.is_empty() {
            continue;
        }
        if !seen.insert(email) {
            duplicates.push(idx);
        }
    }

    duplicates
}

/// `find_duplicate_emails` over whole records, table order.
pub fn find_duplicates(records: &[AccountRecord]) -> Vec<usize> {
    let emails: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();
    find_duplicate_emails(&emails)
}

/// A single-cell mutation planned against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// 1-based sheet row (row 1 is the header).
    pub row: usize,
    pub column: &'static str,
    pub value: &'static str,
}

/// Everything one reminder pass wants to do to one product table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassPlan {
    pub updates: Vec<CellUpdate>,
    /// Notification lines, one per newly due threshold.
    pub lines: Vec<String>,
}

/// Plans one reminder pass over a table's decoded rows. `rows` pairs each
/// record with its 1-based sheet row number; undecodable rows are skipped
/// before this point and never abort the table.
pub fn plan_reminder_pass(
    rows: &[(usize, AccountRecord)],
    now: NaiveDateTime,
    monthly_min_days: u32,
) -> PassPlan {
    let mut plan = PassPlan::default();

    for (row, record) in rows {
        let classification = classify(record, now, monthly_min_days);

        if classification.newly_expired {
            plan.updates.push(CellUpdate {
                row: *row,
                column: "status",
                value: AccountStatus::Expired.as_cell(),
            });
            continue;
        }

        for threshold in classification.due {
            plan.lines.push(format!(
                "{} | {} | {}",
                record.email,
                threshold.label(),
                mask_phone(&record.phone)
            ));
            plan.updates.push(CellUpdate {
                row: *row,
                column: threshold.flag_column(),
                value: "TRUE",
            });
        }
    }

    plan
}

/// Per-product dashboard counters over one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub active: usize,
    pub expired: usize,
    pub within_14d: usize,
    pub within_7d: usize,
    pub within_3d: usize,
    pub due_today: usize,
}

/// Tallies one table for the dashboard. Bucket membership is cumulative:
/// a row 2 days from expiry counts under 14, 7 and 3 days.
pub fn summarize_table(records: &[AccountRecord], now: NaiveDateTime) -> TableSummary {
    let mut summary = TableSummary::default();

    for record in records {
        let remaining = record.expire_at - now;
        if remaining <= Duration::zero() {
            summary.expired += 1;
            continue;
        }

        summary.active += 1;
        let days_left = remaining.num_seconds() as f64 / 86_400.0;
        if days_left <= 14.0 {
            summary.within_14d += 1;
        }
        if days_left <= 7.0 {
            summary.within_7d += 1;
        }
        if days_left <= 3.0 {
            summary.within_3d += 1;
        }
        if days_left <= 0.01 {
            summary.due_today += 1;
        }
    }

    summary
}
