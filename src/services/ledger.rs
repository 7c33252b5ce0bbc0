use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::BookingError;
use crate::models::booking::{Booking, BookingStatus, SlotOffer};
use crate::models::config::{window_for, ResourceCategory, ScheduleConfig};
use crate::services::capacity::confirmed_count_on;
use crate::services::slots::has_conflict;

/// The booking store and its transaction boundary.
///
/// All mutation goes through methods that hold the ledger mutex for the
/// whole re-validate-then-insert sequence, which is what serializes two
/// concurrent attempts on the same resource and interval: at most one sees
/// the slot free. Reads for offer generation take a snapshot under the same
/// lock and never block each other afterwards.
pub struct BookingLedger {
    bookings: Mutex<Vec<Booking>>,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of confirmed bookings for one category.
    pub fn confirmed_for(&self, category: ResourceCategory) -> Vec<Booking> {
        let bookings = self.bookings.lock().unwrap_or_else(|e| e.into_inner());
        bookings
            .iter()
            .filter(|booking| booking.category == category && booking.is_confirmed())
            .cloned()
            .collect()
    }

    /// Atomically convert an offer into a confirmed booking.
    ///
    /// Everything the generator promised is re-checked against the current
    /// configuration and booking set under the lock, because offers can go
    /// stale between generation and booking: the policy window and the
    /// weekly windows may have moved (`PolicyViolation`), another candidate
    /// may have taken the interval (`SlotTaken`), or the branch may have
    /// filled its day (`CapacityExceeded`).
    pub fn try_book(
        &self,
        config: &ScheduleConfig,
        category: ResourceCategory,
        offer: &SlotOffer,
        candidate_id: &str,
        link_issued_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let mut bookings = self.bookings.lock().unwrap_or_else(|e| e.into_inner());

        self.check_policy(config, category, offer, link_issued_at, now)?;

        if has_conflict(&bookings, &offer.resource_id, offer.start_at, offer.end_at) {
            warn!(
                "Booking race lost for {} at {}: slot already taken",
                offer.resource_id, offer.start_at
            );
            return Err(BookingError::SlotTaken);
        }

        if category == ResourceCategory::Trial {
            let branch = config
                .branch(&offer.resource_id)
                .ok_or(BookingError::PolicyViolation)?;
            let date = offer.start_at.date_naive();
            if confirmed_count_on(&bookings, &branch.branch_id, date)
                >= branch.max_trials_per_day as usize
            {
                warn!(
                    "Branch {} already at {} trials on {}",
                    branch.branch_id, branch.max_trials_per_day, date
                );
                return Err(BookingError::CapacityExceeded);
            }
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            category,
            resource_id: offer.resource_id.clone(),
            start_at: offer.start_at,
            end_at: offer.end_at,
            candidate_id: candidate_id.to_string(),
            status: BookingStatus::Confirmed,
            created_at: now,
            cancelled_at: None,
        };

        info!(
            "Confirmed {} booking {} for candidate {} on {} at {}",
            category, booking.id, candidate_id, booking.resource_id, booking.start_at
        );

        bookings.push(booking.clone());
        Ok(booking)
    }

    /// Cancel an active booking, releasing its interval for new offers.
    pub fn cancel(&self, booking_id: Uuid, now: DateTime<Utc>) -> Result<Booking, BookingError> {
        let mut bookings = self.bookings.lock().unwrap_or_else(|e| e.into_inner());

        let booking = bookings
            .iter_mut()
            .find(|booking| booking.id == booking_id && booking.status != BookingStatus::Cancelled)
            .ok_or(BookingError::UnknownBooking)?;

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(now);

        info!(
            "Cancelled booking {} for {} at {}",
            booking.id, booking.resource_id, booking.start_at
        );

        Ok(booking.clone())
    }

    // Notice/advance window, link expiry, offer shape, and current weekly
    // windows. Any failure is a PolicyViolation: the caller should fetch
    // fresh offers.
    fn check_policy(
        &self,
        config: &ScheduleConfig,
        category: ResourceCategory,
        offer: &SlotOffer,
        link_issued_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(), BookingError> {
        let policy = config.policy(category);

        if offer.start_at < now + Duration::hours(policy.min_notice_hours)
            || offer.start_at > now + Duration::days(policy.max_advance_days)
        {
            return Err(BookingError::PolicyViolation);
        }

        if let Some(issued_at) = link_issued_at {
            if now > issued_at + Duration::days(policy.link_expiry_days) {
                return Err(BookingError::PolicyViolation);
            }
        }

        if offer.end_at - offer.start_at != Duration::minutes(config.slot_minutes(category)) {
            return Err(BookingError::PolicyViolation);
        }

        // The offer must still sit inside an enabled window of an active
        // resource, on a date that is not blocked.
        let date = offer.start_at.date_naive();
        if config.blocked_dates(category).contains(&date) {
            return Err(BookingError::PolicyViolation);
        }
        let resource = config
            .resource_schedule(category, &offer.resource_id)
            .ok_or(BookingError::PolicyViolation)?;
        let window = window_for(resource.windows, date).ok_or(BookingError::PolicyViolation)?;
        let window_open = date.and_time(window.start_time).and_utc();
        let window_close = date.and_time(window.end_time).and_utc();
        if offer.start_at < window_open || offer.end_at > window_close {
            return Err(BookingError::PolicyViolation);
        }

        Ok(())
    }
}
