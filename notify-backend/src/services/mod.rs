//! Feature services: F7 traceability, F8 intelligence, F9 preferences.
//!
//! Services own the business rules and talk to storage only through
//! [`RecordStore`](crate::db::RecordStore).

pub mod intelligence;
pub mod preferences;
pub mod traceability;

pub use intelligence::IntelligenceService;
pub use preferences::PreferencesService;
pub use traceability::TraceabilityService;

use chrono::{Local, NaiveDateTime};

/// Current server-local time
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// ISO-8601 with microseconds, e.g. `2026-10-19T14:03:11.123456`
pub fn iso_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
