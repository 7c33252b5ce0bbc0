use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use crate::models::booking::{Booking, SlotOffer};
use crate::models::config::{window_for, ResourceSchedule};
use crate::services::capacity::confirmed_count_on;

/// Resolved per-category numbers the generator steps with. Assumed valid;
/// configuration is rejected at save time, not here.
#[derive(Debug, Clone, Copy)]
pub struct SlotPolicy {
    pub slot_minutes: i64,
    pub buffer_minutes: i64,
    pub min_notice_hours: i64,
    pub max_advance_days: i64,
}

/// Expand weekly windows into concrete, conflict-free slot offers.
///
/// Pure and deterministic: the only clock it sees is the `now` argument, and
/// identical inputs always produce the identical ordered list. The requested
/// date range is clamped to the policy window; an empty clamped range yields
/// an empty list, not an error.
pub fn generate_offers(
    resources: &[ResourceSchedule<'_>],
    blocked: &BTreeSet<NaiveDate>,
    policy: &SlotPolicy,
    range_start: NaiveDate,
    range_end: NaiveDate,
    now: DateTime<Utc>,
    confirmed: &[Booking],
) -> Vec<SlotOffer> {
    let earliest = now + Duration::hours(policy.min_notice_hours);
    let latest = now + Duration::days(policy.max_advance_days);

    let first_day = range_start.max(earliest.date_naive());
    let last_day = range_end.min(latest.date_naive());

    debug!(
        "Generating offers for {} resources, {} to {} (clamped from {} to {})",
        resources.len(),
        first_day,
        last_day,
        range_start,
        range_end
    );

    let mut offers = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        if !blocked.contains(&day) {
            for resource in resources {
                if let Some(cap) = resource.max_per_day {
                    if confirmed_count_on(confirmed, resource.id, day) >= cap as usize {
                        debug!("Resource {} saturated on {}, skipping", resource.id, day);
                        continue;
                    }
                }
                if let Some(window) = window_for(resource.windows, day) {
                    enumerate_window(
                        resource.id,
                        day,
                        window.start_time,
                        window.end_time,
                        policy,
                        earliest,
                        latest,
                        confirmed,
                        &mut offers,
                    );
                }
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    // Ascending by start, resource id as the stable tie-break across
    // parallel pools sharing a wall-clock time.
    offers.sort_by(|a, b| {
        a.start_at
            .cmp(&b.start_at)
            .then_with(|| a.resource_id.cmp(&b.resource_id))
    });

    offers
}

/// Step through one day's window.
///
/// When a buffer is configured and the window is shorter than one full
/// step (slot plus buffer), the window contributes nothing at all, even
/// when a bare slot would fit; this is the "not enough time" case and it
/// is not an error. With no buffer, a window exactly one slot long still
/// yields its single exact-fit offer.
#[allow(clippy::too_many_arguments)]
fn enumerate_window(
    resource_id: &str,
    day: NaiveDate,
    window_start: chrono::NaiveTime,
    window_end: chrono::NaiveTime,
    policy: &SlotPolicy,
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
    confirmed: &[Booking],
    offers: &mut Vec<SlotOffer>,
) {
    let slot_len = Duration::minutes(policy.slot_minutes);
    let step = Duration::minutes(policy.slot_minutes + policy.buffer_minutes);

    let window_close = day.and_time(window_end).and_utc();
    let mut start = day.and_time(window_start).and_utc();

    if policy.buffer_minutes > 0 && step >= window_close - start {
        return;
    }

    while start + slot_len <= window_close {
        let end = start + slot_len;
        let in_policy_window = start >= earliest && start <= latest;
        if in_policy_window && !has_conflict(confirmed, resource_id, start, end) {
            offers.push(SlotOffer {
                resource_id: resource_id.to_string(),
                start_at: start,
                end_at: end,
            });
        }
        start += step;
    }
}

/// True when any confirmed booking for the resource overlaps [start, end).
pub fn has_conflict(
    confirmed: &[Booking],
    resource_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    confirmed.iter().any(|booking| {
        booking.is_confirmed()
            && booking.resource_id == resource_id
            && booking.overlaps(start, end)
    })
}
