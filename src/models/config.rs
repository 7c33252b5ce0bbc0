use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Trial shifts always run four hours; the duration is not configurable.
pub const TRIAL_SLOT_MINUTES: i64 = 240;

/// Upper bound on advance and link-expiry horizons (ten years). Keeps all
/// policy arithmetic far away from `chrono`'s datetime range.
pub const MAX_ADVANCE_DAYS: i64 = 3650;

// The two kinds of bookable resources the engine schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Interview,
    Trial,
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceCategory::Interview => write!(f, "interview"),
            ResourceCategory::Trial => write!(f, "trial"),
        }
    }
}

/// One recurring availability window on a weekday.
///
/// `day_of_week` follows chrono's Monday-first numbering: 0 = Monday
/// through 6 = Sunday. At most one window per (resource, weekday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub enabled: bool,
}

/// An independently bookable interview pool (interviewer/room pair).
///
/// Multiple active pools with overlapping windows each enumerate their own
/// offers, which is what yields parallel interview capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub id: String,
    pub name: String,
    pub weekly_windows: Vec<WeeklyWindow>,
    pub active: bool,
}

/// Per-branch trial-shift configuration: weekly trial windows plus a
/// counted per-day cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCapacity {
    pub branch_id: String,
    pub name: String,
    pub accepting_trials: bool,
    pub max_trials_per_day: u32,
    pub weekly_windows: Vec<WeeklyWindow>,
}

/// Numeric booking policy for one resource category.
///
/// Signed integers on purpose: the settings UI may hand us negative values
/// and validation has to be able to name them instead of silently clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    pub slot_duration_minutes: i64,
    pub buffer_minutes: i64,
    pub max_advance_days: i64,
    pub min_notice_hours: i64,
    pub link_expiry_days: i64,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            slot_duration_minutes: 60,
            buffer_minutes: 0,
            max_advance_days: 30,
            min_notice_hours: 24,
            link_expiry_days: 7,
        }
    }
}

/// The full scheduling configuration document.
///
/// Written by the settings UI, read-only to the engine. A save replaces the
/// whole document after validation; the engine never edits it piecemeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interview_pools: Vec<ResourcePool>,
    pub branches: Vec<BranchCapacity>,
    pub interview_blocked_dates: BTreeSet<NaiveDate>,
    pub trial_blocked_dates: BTreeSet<NaiveDate>,
    pub interview_policy: BookingPolicy,
    pub trial_policy: BookingPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interview_pools: Vec::new(),
            branches: Vec::new(),
            interview_blocked_dates: BTreeSet::new(),
            trial_blocked_dates: BTreeSet::new(),
            interview_policy: BookingPolicy::default(),
            trial_policy: BookingPolicy {
                slot_duration_minutes: TRIAL_SLOT_MINUTES,
                buffer_minutes: 0,
                max_advance_days: 30,
                min_notice_hours: 48,
                link_expiry_days: 7,
            },
        }
    }
}

/// Borrowed view of one resource as the slot generator consumes it:
/// identity, weekly windows, and an optional per-day booking cap.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchedule<'a> {
    pub id: &'a str,
    pub windows: &'a [WeeklyWindow],
    pub max_per_day: Option<u32>,
}

impl ScheduleConfig {
    pub fn policy(&self, category: ResourceCategory) -> &BookingPolicy {
        match category {
            ResourceCategory::Interview => &self.interview_policy,
            ResourceCategory::Trial => &self.trial_policy,
        }
    }

    pub fn blocked_dates(&self, category: ResourceCategory) -> &BTreeSet<NaiveDate> {
        match category {
            ResourceCategory::Interview => &self.interview_blocked_dates,
            ResourceCategory::Trial => &self.trial_blocked_dates,
        }
    }

    /// Effective slot length for a category. Trials ignore the configured
    /// duration and always use the fixed four-hour length.
    pub fn slot_minutes(&self, category: ResourceCategory) -> i64 {
        match category {
            ResourceCategory::Interview => self.interview_policy.slot_duration_minutes,
            ResourceCategory::Trial => TRIAL_SLOT_MINUTES,
        }
    }

    /// All currently active resources of a category, as generator views.
    pub fn resources(&self, category: ResourceCategory) -> Vec<ResourceSchedule<'_>> {
        match category {
            ResourceCategory::Interview => self
                .interview_pools
                .iter()
                .filter(|pool| pool.active)
                .map(|pool| ResourceSchedule {
                    id: &pool.id,
                    windows: &pool.weekly_windows,
                    max_per_day: None,
                })
                .collect(),
            ResourceCategory::Trial => self
                .branches
                .iter()
                .filter(|branch| branch.accepting_trials)
                .map(|branch| ResourceSchedule {
                    id: &branch.branch_id,
                    windows: &branch.weekly_windows,
                    max_per_day: Some(branch.max_trials_per_day),
                })
                .collect(),
        }
    }

    /// Look up a single active resource by id.
    pub fn resource_schedule(
        &self,
        category: ResourceCategory,
        resource_id: &str,
    ) -> Option<ResourceSchedule<'_>> {
        self.resources(category)
            .into_iter()
            .find(|resource| resource.id == resource_id)
    }

    pub fn branch(&self, branch_id: &str) -> Option<&BranchCapacity> {
        self.branches
            .iter()
            .find(|branch| branch.branch_id == branch_id)
    }
}

/// The enabled window covering a calendar date's weekday, if any.
pub fn window_for(windows: &[WeeklyWindow], date: NaiveDate) -> Option<&WeeklyWindow> {
    let weekday = date.weekday().num_days_from_monday() as u8;
    windows
        .iter()
        .find(|window| window.enabled && window.day_of_week == weekday)
}
