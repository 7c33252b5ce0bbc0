use crate::errors::ConfigError;
use crate::models::config::{
    BookingPolicy, ResourceCategory, ScheduleConfig, WeeklyWindow, MAX_ADVANCE_DAYS,
    TRIAL_SLOT_MINUTES,
};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Validate a full configuration document before it is accepted.
///
/// Runs at save time so generation and booking can assume a valid config.
/// The first problem found is returned; nothing is silently corrected.
pub fn validate_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    validate_policy(&config.interview_policy)?;
    validate_policy(&config.trial_policy)?;

    if config.trial_policy.slot_duration_minutes != TRIAL_SLOT_MINUTES {
        return Err(ConfigError::TrialDurationNotFixed(
            config.trial_policy.slot_duration_minutes,
        ));
    }

    if !config.interview_pools.iter().any(|pool| pool.active) {
        return Err(ConfigError::NoActiveResources(ResourceCategory::Interview));
    }
    if !config.branches.iter().any(|branch| branch.accepting_trials) {
        return Err(ConfigError::NoActiveResources(ResourceCategory::Trial));
    }

    for pool in &config.interview_pools {
        validate_windows(&pool.id, &pool.weekly_windows)?;
    }
    for branch in &config.branches {
        if branch.max_trials_per_day == 0 {
            return Err(ConfigError::ZeroBranchCapacity(branch.branch_id.clone()));
        }
        validate_windows(&branch.branch_id, &branch.weekly_windows)?;
    }

    Ok(())
}

/// Validate the numeric policy for one category.
///
/// Every field is bounded to a sane range, which is also what keeps the
/// later datetime arithmetic in generation and booking out of overflow
/// territory: an out-of-range value is a typed rejection here, never a
/// fault during a request.
pub fn validate_policy(policy: &BookingPolicy) -> Result<(), ConfigError> {
    if policy.slot_duration_minutes <= 0 {
        return Err(ConfigError::NonPositiveSlotDuration(
            policy.slot_duration_minutes,
        ));
    }
    if policy.slot_duration_minutes > MINUTES_PER_DAY {
        return Err(ConfigError::SlotDurationTooLong(
            policy.slot_duration_minutes,
        ));
    }
    if policy.buffer_minutes < 0 {
        return Err(ConfigError::NegativeBuffer(policy.buffer_minutes));
    }
    if policy.buffer_minutes > MINUTES_PER_DAY {
        return Err(ConfigError::BufferTooLong(policy.buffer_minutes));
    }
    if policy.max_advance_days <= 0 || policy.max_advance_days > MAX_ADVANCE_DAYS {
        return Err(ConfigError::AdvanceOutOfRange(policy.max_advance_days));
    }
    if policy.min_notice_hours < 0 {
        return Err(ConfigError::NegativeNotice(policy.min_notice_hours));
    }
    // Safe to multiply: max_advance_days is bounded above
    if policy.min_notice_hours > policy.max_advance_days * 24 {
        return Err(ConfigError::NoticeExceedsAdvance {
            notice_hours: policy.min_notice_hours,
            advance_days: policy.max_advance_days,
        });
    }
    if policy.link_expiry_days <= 0 {
        return Err(ConfigError::NonPositiveLinkExpiry(policy.link_expiry_days));
    }
    if policy.link_expiry_days > MAX_ADVANCE_DAYS {
        return Err(ConfigError::LinkExpiryTooLong(policy.link_expiry_days));
    }
    Ok(())
}

// One window per weekday, start before end when enabled
fn validate_windows(resource: &str, windows: &[WeeklyWindow]) -> Result<(), ConfigError> {
    let mut seen = [false; 7];
    for window in windows {
        if window.day_of_week > 6 {
            return Err(ConfigError::InvalidWeekday {
                resource: resource.to_string(),
                day: window.day_of_week,
            });
        }
        if seen[window.day_of_week as usize] {
            return Err(ConfigError::DuplicateWindow {
                resource: resource.to_string(),
                day: window.day_of_week,
            });
        }
        seen[window.day_of_week as usize] = true;

        if window.enabled && window.start_time >= window.end_time {
            return Err(ConfigError::InvalidWindow {
                resource: resource.to_string(),
                day: window.day_of_week,
            });
        }
    }
    Ok(())
}
