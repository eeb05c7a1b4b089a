#![allow(clippy::unwrap_used)]

use account_manager_bot::domain::account::{
    AccountRecord, AccountStatus, ReminderFlags, Threshold,
};
use account_manager_bot::domain::lifecycle::{
    classify, extend, find_duplicate_emails, find_duplicates, summarize_table,
};
use chrono::{Duration, NaiveDateTime};

const MONTHLY_MIN_DAYS: u32 = 28;

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn record(duration_days: u32, expire_at: NaiveDateTime) -> AccountRecord {
    AccountRecord {
        email: "user@mail.com".to_string(),
        phone: "08123456789".to_string(),
        created_at: expire_at - Duration::days(i64::from(duration_days)),
        duration_days,
        expire_at,
        status: AccountStatus::Active,
        flags: ReminderFlags::default(),
    }
}

#[test]
fn test_monthly_ladder_crosses_multiple_thresholds_in_one_pass() {
    // First evaluation after a long gap: 2.5 days remaining crosses the
    // 14, 7 and 3 day thresholds at once, but not 1 day.
    let rec = record(30, dt("2024-01-31 00:00:00"));
    let now = dt("2024-01-28 12:00:00");

    let c = classify(&rec, now, MONTHLY_MIN_DAYS);
    assert_eq!(c.status, AccountStatus::Active);
    assert!(!c.newly_expired);
    assert_eq!(c.due, vec![Threshold::Days14, Threshold::Days7, Threshold::Days3]);
}

#[test]
fn test_set_flags_are_not_due_again() {
    let mut rec = record(30, dt("2024-01-31 00:00:00"));
    rec.flags.days14 = true;
    let now = dt("2024-01-24 00:00:00"); // exactly 7 days remaining

    let c = classify(&rec, now, MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Days7]);
}

#[test]
fn test_boundary_is_inclusive() {
    let rec = record(30, dt("2024-01-31 00:00:00"));

    // Exactly 14.000 days remaining: due.
    let c = classify(&rec, dt("2024-01-17 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Days14]);

    // One minute above 14 days: not yet.
    let c = classify(&rec, dt("2024-01-16 23:59:00"), MONTHLY_MIN_DAYS);
    assert!(c.due.is_empty());
}

#[test]
fn test_short_duration_uses_hour_threshold() {
    let rec = record(7, dt("2024-01-08 12:00:00"));

    // 30 minutes remaining: the hour threshold fires.
    let c = classify(&rec, dt("2024-01-08 11:30:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Hour1]);

    // 2 hours remaining: nothing yet, and no day thresholds either.
    let c = classify(&rec, dt("2024-01-08 10:00:00"), MONTHLY_MIN_DAYS);
    assert!(c.due.is_empty());
}

#[test]
fn test_hour_threshold_fires_once_per_period() {
    let mut rec = record(7, dt("2024-01-08 12:00:00"));
    rec.flags.hour1 = true;

    let c = classify(&rec, dt("2024-01-08 11:45:00"), MONTHLY_MIN_DAYS);
    assert!(c.due.is_empty());

    // An extension opens a new period and re-arms the threshold.
    extend(&mut rec, 1);
    assert!(!rec.flags.hour1);
}

#[test]
fn test_monthly_boundary_duration() {
    // 28 days is monthly; 27 is not.
    let rec = record(28, dt("2024-02-01 00:00:00"));
    let c = classify(&rec, dt("2024-01-31 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Days14, Threshold::Days7, Threshold::Days3, Threshold::Days1]);

    let rec = record(27, dt("2024-02-01 00:00:00"));
    let c = classify(&rec, dt("2024-01-31 00:00:00"), MONTHLY_MIN_DAYS);
    assert!(c.due.is_empty()); // short ladder, more than an hour left
}

#[test]
fn test_expiry_transition() {
    let rec = record(30, dt("2024-01-31 00:00:00"));

    let c = classify(&rec, dt("2024-01-31 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.status, AccountStatus::Expired);
    assert!(c.newly_expired);
    assert!(c.due.is_empty());

    // Already marked expired: nothing further to do.
    let mut expired = rec.clone();
    expired.status = AccountStatus::Expired;
    let c = classify(&expired, dt("2024-02-05 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.status, AccountStatus::Expired);
    assert!(!c.newly_expired);
}

#[test]
fn test_flags_untouched_after_expiry() {
    // Expired with no flags ever sent: still nothing is due.
    let rec = record(30, dt("2024-01-31 00:00:00"));
    let c = classify(&rec, dt("2024-03-01 00:00:00"), MONTHLY_MIN_DAYS);
    assert!(c.due.is_empty());
}

#[test]
fn test_classify_is_idempotent_without_side_effects() {
    let rec = record(30, dt("2024-01-31 00:00:00"));
    let now = dt("2024-01-24 00:00:00");

    let first = classify(&rec, now, MONTHLY_MIN_DAYS);
    let second = classify(&rec, now, MONTHLY_MIN_DAYS);
    assert_eq!(first, second);
}

#[test]
fn test_extend_resets_flags_and_status() {
    let mut rec = record(30, dt("2024-01-31 00:00:00"));
    rec.status = AccountStatus::Expired;
    rec.flags = ReminderFlags {
        days14: true,
        days7: true,
        days3: true,
        days1: true,
        hour1: true,
    };

    extend(&mut rec, 15);

    assert_eq!(rec.expire_at, dt("2024-02-15 00:00:00"));
    assert_eq!(rec.status, AccountStatus::Active);
    assert!(!rec.flags.any());
    // Creation time is never rewritten.
    assert_eq!(rec.created_at, dt("2024-01-01 00:00:00"));
}

#[test]
fn test_find_duplicates_keeps_first_occurrence() {
    let mut records = Vec::new();
    for email in ["a@mail.com", "a@mail.com", "b@mail.com", "a@mail.com"] {
        let mut rec = record(30, dt("2024-01-31 00:00:00"));
        rec.email = email.to_string();
        records.push(rec);
    }

    assert_eq!(find_duplicates(&records), vec![1, 3]);
}

#[test]
fn test_find_duplicates_is_case_insensitive_and_skips_empty() {
    let emails = ["A@Mail.com", "", "a@mail.COM ", "", "b@mail.com"];
    assert_eq!(find_duplicate_emails(&emails), vec![2]);
}

#[test]
fn test_end_to_end_thirty_day_timeline() {
    // Created 2024-01-01, 30 days: expires 2024-01-31.
    let mut rec = record(30, dt("2024-01-31 00:00:00"));
    assert_eq!(rec.created_at, dt("2024-01-01 00:00:00"));

    // 14 days remaining: the 14-day threshold is due.
    let c = classify(&rec, dt("2024-01-17 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Days14]);
    for t in c.due {
        rec.flags.set(t);
    }

    // 7 days remaining: 14-day already sent, only 7-day fires.
    let c = classify(&rec, dt("2024-01-24 00:00:00"), MONTHLY_MIN_DAYS);
    assert_eq!(c.due, vec![Threshold::Days7]);
}

#[test]
fn test_summarize_table_buckets_are_cumulative() {
    let now = dt("2024-01-01 00:00:00");
    let records = vec![
        record(30, dt("2024-01-03 00:00:00")), // 2 days out: 14/7/3
        record(30, dt("2024-01-11 00:00:00")), // 10 days out: 14 only
        record(30, dt("2024-02-15 00:00:00")), // far out
        record(30, dt("2023-12-30 00:00:00")), // expired
    ];

    let s = summarize_table(&records, now);
    assert_eq!(s.active, 3);
    assert_eq!(s.expired, 1);
    assert_eq!(s.within_14d, 2);
    assert_eq!(s.within_7d, 1);
    assert_eq!(s.within_3d, 1);
    assert_eq!(s.due_today, 0);
}
