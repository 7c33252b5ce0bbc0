use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{
    bulk_update_branches, cancel_booking, create_booking, get_availability, get_config,
    put_config, AppState,
};
use crate::handlers::health::health_check;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/availability", get(get_availability))
        .route("/bookings", post(create_booking))
        .route("/bookings/:booking_id/cancel", post(cancel_booking))
        .route("/config", get(get_config).put(put_config))
        .route("/branches/bulk", post(bulk_update_branches))
        .with_state(app_state)
}
