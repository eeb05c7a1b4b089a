use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Derived account state. Never authoritative: always re-derivable from
/// `expire_at` and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Expired,
}

impl AccountStatus {
    /// Cell value written to the status column.
    pub fn as_cell(self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Expired => "EXPIRED",
        }
    }

    pub fn from_cell(cell: &str) -> AccountStatus {
        if cell.trim().eq_ignore_ascii_case("EXPIRED") {
            AccountStatus::Expired
        } else {
            AccountStatus::Active
        }
    }
}

/// A remaining-time boundary that triggers exactly one reminder per
/// expiry period. The day thresholds apply to monthly-or-longer
/// accounts, the hour threshold to everything shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    Days14,
    Days7,
    Days3,
    Days1,
    Hour1,
}

impl Threshold {
    /// Day thresholds for monthly accounts, largest first so one pass
    /// reports crossings in ladder order.
    pub const DAY_LADDER: [Threshold; 4] = [
        Threshold::Days14,
        Threshold::Days7,
        Threshold::Days3,
        Threshold::Days1,
    ];

    /// Remaining days at which the threshold fires (hour threshold: 0).
    pub fn days(self) -> i64 {
        match self {
            Threshold::Days14 => 14,
            Threshold::Days7 => 7,
            Threshold::Days3 => 3,
            Threshold::Days1 => 1,
            Threshold::Hour1 => 0,
        }
    }

    /// Sheet column holding the sent flag for this threshold.
    pub fn flag_column(self) -> &'static str {
        match self {
            Threshold::Days14 => "rem14_sent",
            Threshold::Days7 => "rem7_sent",
            Threshold::Days3 => "rem3_sent",
            Threshold::Days1 => "rem1d_sent",
            Threshold::Hour1 => "rem1h_sent",
        }
    }

    /// Short label used in notification lines.
    pub fn label(self) -> &'static str {
        match self {
            Threshold::Days14 => "14 days left",
            Threshold::Days7 => "7 days left",
            Threshold::Days3 => "3 days left",
            Threshold::Days1 => "1 day left",
            Threshold::Hour1 => "1 hour left",
        }
    }
}

/// One "already sent" flag per threshold. Cleared as a whole whenever the
/// expiry is extended; a set flag is never set again within one expiry
/// period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderFlags {
    pub days14: bool,
    pub days7: bool,
    pub days3: bool,
    pub days1: bool,
    pub hour1: bool,
}

impl ReminderFlags {
    pub fn is_set(&self, threshold: Threshold) -> bool {
        match threshold {
            Threshold::Days14 => self.days14,
            Threshold::Days7 => self.days7,
            Threshold::Days3 => self.days3,
            Threshold::Days1 => self.days1,
            Threshold::Hour1 => self.hour1,
        }
    }

    pub fn set(&mut self, threshold: Threshold) {
        match threshold {
            Threshold::Days14 => self.days14 = true,
            Threshold::Days7 => self.days7 = true,
            Threshold::Days3 => self.days3 = true,
            Threshold::Days1 => self.days1 = true,
            Threshold::Hour1 => self.hour1 = true,
        }
    }

    pub fn clear(&mut self) {
        *self = ReminderFlags::default();
    }

    /// True when any flag is set.
    pub fn any(&self) -> bool {
        self.days14 || self.days7 || self.days3 || self.days1 || self.hour1
    }
}

/// One account row. Email is the case-insensitive identity key within a
/// product tab; phone is stored digits-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub email: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
    pub duration_days: u32,
    pub expire_at: NaiveDateTime,
    pub status: AccountStatus,
    pub flags: ReminderFlags,
}

/// Everything the creation wizard collects before the commit step.
/// Creation and expiry times are only computed at commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub product: Product,
    pub email: String,
    pub duration_days: u32,
    pub phone: String,
}

impl NewAccount {
    /// Finalizes the wizard data into a fresh record: active, no reminder
    /// flags, expiry at `now + duration_days`.
    pub fn into_record(self, now: NaiveDateTime) -> AccountRecord {
        AccountRecord {
            email: self.email,
            phone: self.phone,
            created_at: now,
            duration_days: self.duration_days,
            expire_at: now + Duration::days(i64::from(self.duration_days)),
            status: AccountStatus::Active,
            flags: ReminderFlags::default(),
        }
    }
}
