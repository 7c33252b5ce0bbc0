use chrono::NaiveDate;
use tracing::info;

use crate::models::booking::Booking;
use crate::models::config::BranchCapacity;

/// Count of confirmed bookings for a resource starting on a calendar date.
pub fn confirmed_count_on(bookings: &[Booking], resource_id: &str, date: NaiveDate) -> usize {
    bookings
        .iter()
        .filter(|booking| {
            booking.is_confirmed()
                && booking.resource_id == resource_id
                && booking.start_date() == date
        })
        .count()
}

/// Whether a branch can still take a trial on the given date.
pub fn can_book_trial(branch: &BranchCapacity, date: NaiveDate, confirmed: &[Booking]) -> bool {
    branch.accepting_trials
        && confirmed_count_on(confirmed, &branch.branch_id, date) < branch.max_trials_per_day as usize
}

/// Field-level change applied to a set of branches. Absent fields are left
/// untouched on every branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkCapacityChange {
    pub accepting_trials: Option<bool>,
    pub max_trials_per_day: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub updated: usize,
    pub unknown_branch_ids: Vec<String>,
}

/// Apply a bulk capacity change to the named branches.
///
/// Each write is an independent field assignment, so applying the same
/// change twice leaves every branch in the same end state. Unknown ids are
/// reported back; known ids are still applied.
pub fn apply_bulk_change(
    branches: &mut [BranchCapacity],
    branch_ids: &[String],
    change: &BulkCapacityChange,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();

    for branch_id in branch_ids {
        match branches
            .iter_mut()
            .find(|branch| &branch.branch_id == branch_id)
        {
            Some(branch) => {
                if let Some(accepting) = change.accepting_trials {
                    branch.accepting_trials = accepting;
                }
                if let Some(max) = change.max_trials_per_day {
                    branch.max_trials_per_day = max;
                }
                outcome.updated += 1;
            }
            None => outcome.unknown_branch_ids.push(branch_id.clone()),
        }
    }

    info!(
        "Applied bulk capacity change to {} branches ({} unknown)",
        outcome.updated,
        outcome.unknown_branch_ids.len()
    );

    outcome
}
