use axum::{
    extract::{Json as ExtractJson, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::{Arc, RwLock};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{BookingError, ConfigError};
use crate::models::api::{
    AvailabilityParams, BookRequest, BulkCapacityRequest, BulkCapacityResponse, ErrorBody,
};
use crate::models::booking::{Booking, SlotOffer};
use crate::models::config::ScheduleConfig;
use crate::services::capacity::{apply_bulk_change, BulkCapacityChange};
use crate::services::ledger::BookingLedger;
use crate::services::policy::validate_config;
use crate::services::slots::{generate_offers, SlotPolicy};

// AppState struct containing shared resources
pub struct AppState {
    pub config: RwLock<ScheduleConfig>,
    pub ledger: BookingLedger,
}

impl AppState {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config: RwLock::new(config),
            ledger: BookingLedger::new(),
        }
    }
}

// Engine errors mapped onto HTTP statuses with a machine-readable body
pub enum ApiError {
    Booking(BookingError),
    Config(ConfigError),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Booking(err) => {
                let status = match err {
                    BookingError::PolicyViolation => StatusCode::UNPROCESSABLE_ENTITY,
                    BookingError::SlotTaken | BookingError::CapacityExceeded => {
                        StatusCode::CONFLICT
                    }
                    BookingError::UnknownBooking => StatusCode::NOT_FOUND,
                };
                (status, err.kind(), err.to_string())
            }
            ApiError::Config(err) => (StatusCode::BAD_REQUEST, "invalid_config", err.to_string()),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

// Availability endpoint: expand the current rules into bookable offers
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Vec<SlotOffer>>, ApiError> {
    info!(
        "Received availability request for {} from {} to {}",
        params.category, params.from, params.to
    );

    let now = Utc::now();
    let confirmed = state.ledger.confirmed_for(params.category);
    let config = state.config.read().unwrap_or_else(|e| e.into_inner());

    let policy = config.policy(params.category);
    let slot_policy = SlotPolicy {
        slot_minutes: config.slot_minutes(params.category),
        buffer_minutes: policy.buffer_minutes,
        min_notice_hours: policy.min_notice_hours,
        max_advance_days: policy.max_advance_days,
    };

    let offers = generate_offers(
        &config.resources(params.category),
        config.blocked_dates(params.category),
        &slot_policy,
        params.from,
        params.to,
        now,
        &confirmed,
    );

    info!(
        "Returning {} offers for {} request",
        offers.len(),
        params.category
    );
    Ok(Json(offers))
}

// Booking endpoint: atomic check-and-reserve of a chosen offer
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<BookRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    info!(
        "Received booking request for candidate {} on {} at {}",
        request.candidate_id, request.offer.resource_id, request.offer.start_at
    );

    let now = Utc::now();
    let config = state.config.read().unwrap_or_else(|e| e.into_inner());

    let booking = state.ledger.try_book(
        &config,
        request.category,
        &request.offer,
        &request.candidate_id,
        request.link_issued_at,
        now,
    )?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// Cancellation endpoint: release the slot for new offers
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    info!("Received cancellation request for booking {}", booking_id);

    let booking = state.ledger.cancel(booking_id, Utc::now())?;
    Ok(Json(booking))
}

// Current configuration as the settings UI sees it
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ScheduleConfig> {
    let config = state.config.read().unwrap_or_else(|e| e.into_inner());
    Json(config.clone())
}

// Full-document configuration save; rejected saves leave the previous
// configuration in force
pub async fn put_config(
    State(state): State<Arc<AppState>>,
    ExtractJson(new_config): ExtractJson<ScheduleConfig>,
) -> Result<StatusCode, ApiError> {
    if let Err(err) = validate_config(&new_config) {
        error!("Rejected configuration save: {}", err);
        return Err(err.into());
    }

    let mut config = state.config.write().unwrap_or_else(|e| e.into_inner());
    *config = new_config;
    info!("Configuration saved");
    Ok(StatusCode::NO_CONTENT)
}

// Bulk branch-capacity apply: independent, idempotent field writes
pub async fn bulk_update_branches(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<BulkCapacityRequest>,
) -> Result<Json<BulkCapacityResponse>, ApiError> {
    info!(
        "Received bulk capacity change for {} branches",
        request.branch_ids.len()
    );

    if request.max_trials_per_day == Some(0) {
        return Err(ConfigError::ZeroBulkCapacity.into());
    }

    let change = BulkCapacityChange {
        accepting_trials: request.accepting_trials,
        max_trials_per_day: request.max_trials_per_day,
    };

    let mut config = state.config.write().unwrap_or_else(|e| e.into_inner());
    let outcome = apply_bulk_change(&mut config.branches, &request.branch_ids, &change);

    Ok(Json(BulkCapacityResponse {
        updated: outcome.updated,
        unknown_branch_ids: outcome.unknown_branch_ids,
    }))
}
