use thiserror::Error;

use crate::models::config::{ResourceCategory, MAX_ADVANCE_DAYS, TRIAL_SLOT_MINUTES};

/// Rejections raised when the settings UI saves configuration. Fatal to the
/// save operation; the previous configuration stays in force.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("slot duration must be positive, got {0} minutes")]
    NonPositiveSlotDuration(i64),

    #[error("slot duration must fit within one day, got {0} minutes")]
    SlotDurationTooLong(i64),

    #[error("buffer minutes must not be negative, got {0}")]
    NegativeBuffer(i64),

    #[error("buffer must fit within one day, got {0} minutes")]
    BufferTooLong(i64),

    #[error("minimum notice must not be negative, got {0} hours")]
    NegativeNotice(i64),

    #[error("maximum advance must be between 1 and {MAX_ADVANCE_DAYS} days, got {0}")]
    AdvanceOutOfRange(i64),

    #[error("trial slot duration is fixed at {TRIAL_SLOT_MINUTES} minutes, got {0}")]
    TrialDurationNotFixed(i64),

    #[error("minimum notice of {notice_hours}h exceeds maximum advance of {advance_days} days")]
    NoticeExceedsAdvance {
        notice_hours: i64,
        advance_days: i64,
    },

    #[error("booking link expiry must be at least one day, got {0}")]
    NonPositiveLinkExpiry(i64),

    #[error("booking link expiry must be at most {MAX_ADVANCE_DAYS} days, got {0}")]
    LinkExpiryTooLong(i64),

    #[error("no active {0} resources configured")]
    NoActiveResources(ResourceCategory),

    #[error("branch {0} must allow at least one trial per day")]
    ZeroBranchCapacity(String),

    #[error("a bulk capacity change must allow at least one trial per day")]
    ZeroBulkCapacity,

    #[error("window for {resource} on weekday {day} must start before it ends")]
    InvalidWindow { resource: String, day: u8 },

    #[error("more than one window for {resource} on weekday {day}")]
    DuplicateWindow { resource: String, day: u8 },

    #[error("weekday index {day} for {resource} is out of range 0-6")]
    InvalidWeekday { resource: String, day: u8 },
}

/// Outcomes of a failed booking attempt. All recoverable: the caller should
/// re-request fresh offers and retry. The engine itself never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("the offer no longer satisfies the booking policy")]
    PolicyViolation,

    #[error("the slot was taken by another booking")]
    SlotTaken,

    #[error("the branch has reached its trial capacity for that day")]
    CapacityExceeded,

    #[error("no active booking with that id")]
    UnknownBooking,
}

impl BookingError {
    /// Stable wire identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::PolicyViolation => "policy_violation",
            BookingError::SlotTaken => "slot_taken",
            BookingError::CapacityExceeded => "capacity_exceeded",
            BookingError::UnknownBooking => "unknown_booking",
        }
    }
}
