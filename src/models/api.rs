use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::booking::SlotOffer;
use crate::models::config::ResourceCategory;

// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub category: ResourceCategory,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

// Body for the booking endpoint
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub category: ResourceCategory,
    pub offer: SlotOffer,
    pub candidate_id: String,
    /// When the booking link was issued, if the caller tracks it. Used to
    /// enforce `link_expiry_days` at booking time.
    #[serde(default)]
    pub link_issued_at: Option<DateTime<Utc>>,
}

// Body for the bulk branch-capacity endpoint
#[derive(Debug, Deserialize)]
pub struct BulkCapacityRequest {
    pub branch_ids: Vec<String>,
    #[serde(default)]
    pub accepting_trials: Option<bool>,
    #[serde(default)]
    pub max_trials_per_day: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BulkCapacityResponse {
    pub updated: usize,
    pub unknown_branch_ids: Vec<String>,
}

// Machine-readable error payload returned for all engine errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}
