//! Recruitment Scheduling Service
//!
//! The availability and booking engine behind a recruitment system's
//! scheduling: it turns declarative availability rules (weekly windows,
//! parallel interview pools, blocked dates, buffer/duration policy,
//! notice and advance windows) into concrete, conflict-free bookable
//! slots, and converts a chosen offer into a confirmed booking inside a
//! single serialized transaction.
//!
//! # Modules
//!
//! - `models`: configuration documents, offers, and bookings
//! - `services`: the slot generator, capacity model, policy validation,
//!   and the booking ledger
//! - `handlers` / `routes`: the HTTP surface consumed by the booking and
//!   settings UIs

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export the main types for ease of use
pub use errors::{BookingError, ConfigError};
pub use handlers::api::AppState;
pub use models::booking::{Booking, BookingStatus, SlotOffer};
pub use models::config::{
    BookingPolicy, BranchCapacity, ResourceCategory, ResourcePool, ScheduleConfig, WeeklyWindow,
};
pub use routes::create_router;
pub use services::ledger::BookingLedger;
