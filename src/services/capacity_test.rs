use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::config::{BranchCapacity, ResourceCategory, WeeklyWindow};
use crate::services::capacity::{
    apply_bulk_change, can_book_trial, confirmed_count_on, BulkCapacityChange,
};

fn branch(branch_id: &str, accepting: bool, max_per_day: u32) -> BranchCapacity {
    BranchCapacity {
        branch_id: branch_id.to_string(),
        name: format!("Branch {}", branch_id),
        accepting_trials: accepting,
        max_trials_per_day: max_per_day,
        weekly_windows: vec![WeeklyWindow {
            day_of_week: 0,
            start_time: NaiveTime::parse_from_str("08:00", "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str("18:00", "%H:%M").unwrap(),
            enabled: true,
        }],
    }
}

fn trial_booking(branch_id: &str, day: u32, start_h: u32, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        category: ResourceCategory::Trial,
        resource_id: branch_id.to_string(),
        start_at: Utc.with_ymd_and_hms(2025, 9, day, start_h, 0, 0).unwrap(),
        end_at: Utc
            .with_ymd_and_hms(2025, 9, day, start_h + 4, 0, 0)
            .unwrap(),
        candidate_id: "candidate-1".to_string(),
        status,
        created_at: Utc.with_ymd_and_hms(2025, 8, 25, 12, 0, 0).unwrap(),
        cancelled_at: None,
    }
}

fn sept(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
}

#[test]
fn test_confirmed_count_ignores_cancelled_and_other_days() {
    let bookings = vec![
        trial_booking("branch-1", 1, 8, BookingStatus::Confirmed),
        trial_booking("branch-1", 1, 13, BookingStatus::Cancelled),
        trial_booking("branch-1", 2, 8, BookingStatus::Confirmed),
        trial_booking("branch-2", 1, 8, BookingStatus::Confirmed),
    ];

    assert_eq!(confirmed_count_on(&bookings, "branch-1", sept(1)), 1);
    assert_eq!(confirmed_count_on(&bookings, "branch-1", sept(2)), 1);
    assert_eq!(confirmed_count_on(&bookings, "branch-2", sept(2)), 0);
}

#[test]
fn test_can_book_trial_respects_cap_and_toggle() {
    let open = branch("branch-1", true, 2);
    let closed = branch("branch-2", false, 2);

    let bookings = vec![
        trial_booking("branch-1", 1, 8, BookingStatus::Confirmed),
        trial_booking("branch-1", 1, 13, BookingStatus::Confirmed),
    ];

    // Full on the 1st, open on the 2nd
    assert!(!can_book_trial(&open, sept(1), &bookings));
    assert!(can_book_trial(&open, sept(2), &bookings));

    // Not accepting trials at all
    assert!(!can_book_trial(&closed, sept(1), &[]));
}

#[test]
fn test_bulk_change_applies_named_fields_only() {
    let mut branches = vec![branch("branch-1", false, 1), branch("branch-2", true, 5)];

    let change = BulkCapacityChange {
        accepting_trials: Some(true),
        max_trials_per_day: None,
    };
    let ids = vec!["branch-1".to_string(), "branch-2".to_string()];
    let outcome = apply_bulk_change(&mut branches, &ids, &change);

    assert_eq!(outcome.updated, 2);
    assert!(outcome.unknown_branch_ids.is_empty());
    assert!(branches[0].accepting_trials);
    // Untouched field keeps its per-branch value
    assert_eq!(branches[0].max_trials_per_day, 1);
    assert_eq!(branches[1].max_trials_per_day, 5);
}

#[test]
fn test_bulk_change_is_idempotent() {
    let mut branches = vec![branch("branch-1", false, 1), branch("branch-2", true, 5)];
    let change = BulkCapacityChange {
        accepting_trials: Some(true),
        max_trials_per_day: Some(3),
    };
    let ids = vec!["branch-1".to_string(), "branch-2".to_string()];

    apply_bulk_change(&mut branches, &ids, &change);
    let after_once = branches.clone();
    apply_bulk_change(&mut branches, &ids, &change);

    // No double counting, no additive capacity
    assert_eq!(branches, after_once);
    assert_eq!(branches[0].max_trials_per_day, 3);
    assert_eq!(branches[1].max_trials_per_day, 3);
}

#[test]
fn test_bulk_change_reports_unknown_branches() {
    let mut branches = vec![branch("branch-1", true, 2)];
    let change = BulkCapacityChange {
        accepting_trials: Some(false),
        max_trials_per_day: None,
    };
    let ids = vec!["branch-1".to_string(), "branch-9".to_string()];

    let outcome = apply_bulk_change(&mut branches, &ids, &change);

    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.unknown_branch_ids, vec!["branch-9".to_string()]);
    // The known branch was still applied
    assert!(!branches[0].accepting_trials);
}
