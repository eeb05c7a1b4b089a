#![allow(clippy::unwrap_used)]

use account_manager_bot::domain::account::{AccountRecord, AccountStatus, ReminderFlags};
use account_manager_bot::domain::lifecycle::{plan_reminder_pass, CellUpdate};
use chrono::{Duration, NaiveDateTime};

const MONTHLY_MIN_DAYS: u32 = 28;

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn record(email: &str, duration_days: u32, expire_at: NaiveDateTime) -> AccountRecord {
    AccountRecord {
        email: email.to_string(),
        phone: "08123456789".to_string(),
        created_at: expire_at - Duration::days(i64::from(duration_days)),
        duration_days,
        expire_at,
        status: AccountStatus::Active,
        flags: ReminderFlags::default(),
    }
}

#[test]
fn test_plan_flags_and_lines_for_due_thresholds() {
    let now = dt("2024-01-24 00:00:00");
    let mut rec = record("user@mail.com", 30, dt("2024-01-31 00:00:00"));
    rec.flags.days14 = true; // already sent in an earlier pass

    let plan = plan_reminder_pass(&[(2, rec)], now, MONTHLY_MIN_DAYS);

    assert_eq!(
        plan.updates,
        vec![CellUpdate {
            row: 2,
            column: "rem7_sent",
            value: "TRUE",
        }]
    );
    assert_eq!(plan.lines, vec!["user@mail.com | 7 days left | 0812****6789"]);
}

#[test]
fn test_plan_marks_newly_expired_and_touches_nothing_else() {
    let now = dt("2024-02-01 00:00:00");
    let rec = record("user@mail.com", 30, dt("2024-01-31 00:00:00"));

    let plan = plan_reminder_pass(&[(5, rec)], now, MONTHLY_MIN_DAYS);

    assert_eq!(
        plan.updates,
        vec![CellUpdate {
            row: 5,
            column: "status",
            value: "EXPIRED",
        }]
    );
    assert!(plan.lines.is_empty());
}

#[test]
fn test_plan_skips_rows_already_marked_expired() {
    let now = dt("2024-02-01 00:00:00");
    let mut rec = record("user@mail.com", 30, dt("2024-01-31 00:00:00"));
    rec.status = AccountStatus::Expired;

    let plan = plan_reminder_pass(&[(2, rec)], now, MONTHLY_MIN_DAYS);
    assert!(plan.updates.is_empty());
    assert!(plan.lines.is_empty());
}

#[test]
fn test_plan_handles_mixed_table() {
    let now = dt("2024-01-30 23:30:00");
    let rows = vec![
        // 30 minutes out, short duration: hour reminder.
        (2, record("short@mail.com", 7, dt("2024-01-31 00:00:00"))),
        // Long out: nothing.
        (3, record("calm@mail.com", 30, dt("2024-03-15 00:00:00"))),
        // Expired, still marked active: status rewrite.
        (4, record("gone@mail.com", 30, dt("2024-01-30 00:00:00"))),
    ];

    let plan = plan_reminder_pass(&rows, now, MONTHLY_MIN_DAYS);

    assert_eq!(
        plan.updates,
        vec![
            CellUpdate { row: 2, column: "rem1h_sent", value: "TRUE" },
            CellUpdate { row: 4, column: "status", value: "EXPIRED" },
        ]
    );
    assert_eq!(plan.lines, vec!["short@mail.com | 1 hour left | 0812****6789"]);
}

#[test]
fn test_plan_can_fire_several_thresholds_for_one_row() {
    // First pass ever, 12 hours before expiry of a monthly account:
    // every day threshold fires at once.
    let now = dt("2024-01-30 12:00:00");
    let rec = record("late@mail.com", 30, dt("2024-01-31 00:00:00"));

    let plan = plan_reminder_pass(&[(2, rec)], now, MONTHLY_MIN_DAYS);

    let columns: Vec<&str> = plan.updates.iter().map(|u| u.column).collect();
    assert_eq!(columns, vec!["rem14_sent", "rem7_sent", "rem3_sent", "rem1d_sent"]);
    assert_eq!(plan.lines.len(), 4);
}

#[test]
fn test_plan_masks_hand_edited_non_ascii_phone() {
    // A phone cell typed with fullwidth digits decodes verbatim; the
    // notification line must still mask it instead of panicking.
    let now = dt("2024-01-24 00:00:00");
    let mut rec = record("user@mail.com", 30, dt("2024-01-31 00:00:00"));
    rec.phone = "０８１２３４５６".to_string();

    let plan = plan_reminder_pass(&[(2, rec)], now, MONTHLY_MIN_DAYS);

    assert_eq!(
        plan.lines,
        vec![
            "user@mail.com | 14 days left | ０８１２****３４５６",
            "user@mail.com | 7 days left | ０８１２****３４５６",
        ]
    );
}

#[test]
fn test_plan_is_empty_for_empty_table() {
    let plan = plan_reminder_pass(&[], dt("2024-01-01 00:00:00"), MONTHLY_MIN_DAYS);
    assert!(plan.updates.is_empty());
    assert!(plan.lines.is_empty());
}
