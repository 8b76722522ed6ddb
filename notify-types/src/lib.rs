//! Shared wire types for the notification intelligence service and its clients.
//!
//! Three feature sets share this crate:
//! - F7 traceability: notifications tied to a business entity
//! - F8 intelligence: date/time phrase detections in free text
//! - F9 preferences: per-user notification settings

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Message returned by the liveness endpoint
pub const ROOT_MESSAGE: &str = "Unified Notification Intelligence API is running (F7, F8, F9)";

/// Status string carried by successful write/fetch responses
pub const STATUS_SUCCESS: &str = "success";

// =====================================================
// F7: Traceability
// =====================================================

/// Business object kinds a notification can reference.
///
/// Serialized as the exact literal (`"Candidate"`, `"Case"`, ...). Parsing is
/// case-sensitive, so `"case"` is not a valid entity type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    EnumIter,
    Display,
)]
pub enum EntityType {
    Candidate,
    Requirement,
    Vendor,
    Lead,
    Case,
}

impl EntityType {
    /// The literal used on the wire and in annotated messages
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Body of `POST /f7/notifications`.
///
/// `entity_type` stays a plain string here so an unknown value reaches the
/// handler and can be rejected with a 400 instead of a body error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    pub entity_type: String,
    pub entity_id: i64,
    pub message: String,
}

/// A stored notification record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub message: String,
    /// Server-local ISO-8601 creation time
    pub timestamp: String,
}

// =====================================================
// F8: Intelligence
// =====================================================

/// Suggestions offered whenever at least one phrase was detected
pub const DETECTION_SUGGESTIONS: [&str; 3] = ["Add to calendar", "Set a reminder", "Ignore"];

pub const DETECTED_MESSAGE: &str = "Detected meeting/deadline phrases.";
pub const NOT_DETECTED_MESSAGE: &str = "No time-related expressions found.";

/// Body of `POST /f8/detect`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// One temporal phrase and the timestamp it was resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseDetection {
    pub detected_phrase: String,
    /// Formatted as `YYYY-MM-DD HH:MM:SS`
    pub interpreted_as: String,
}

/// A persisted batch of detections for one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub original_text: String,
    pub detections: Vec<PhraseDetection>,
    pub timestamp: String,
}

/// Response of `POST /f8/detect`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub assistive: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub detections: Vec<PhraseDetection>,
}

impl DetectResponse {
    pub fn assistive(detections: Vec<PhraseDetection>) -> Self {
        Self {
            assistive: true,
            message: DETECTED_MESSAGE.to_string(),
            suggestions: Some(DETECTION_SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
            detections,
        }
    }

    pub fn not_assistive() -> Self {
        Self {
            assistive: false,
            message: NOT_DETECTED_MESSAGE.to_string(),
            suggestions: None,
            detections: Vec::new(),
        }
    }
}

// =====================================================
// F9: Preferences
// =====================================================

pub const DEFAULT_QUIET_HOURS_START: &str = "22:00";
pub const DEFAULT_QUIET_HOURS_END: &str = "07:00";

/// Body of `POST /f9/settings`.
///
/// Every field except `user_id` is optional; missing or null fields take the
/// defaults, never the previously stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettingsRequest {
    pub user_id: String,
    #[serde(default)]
    pub muted_notifications: Option<Vec<String>>,
    #[serde(default)]
    pub quiet_hours_start: Option<String>,
    #[serde(default)]
    pub quiet_hours_end: Option<String>,
    #[serde(default)]
    pub digest_mode: Option<bool>,
}

/// A stored per-user settings record (one per `user_id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    pub muted_notifications: Vec<String>,
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    pub digest_mode: bool,
    pub updated_at: String,
}

impl UserSettings {
    /// Build a full record from a request, filling unset fields with defaults
    pub fn from_request(request: UserSettingsRequest, updated_at: String) -> Self {
        Self {
            user_id: request.user_id,
            muted_notifications: request.muted_notifications.unwrap_or_default(),
            quiet_hours_start: request
                .quiet_hours_start
                .unwrap_or_else(|| DEFAULT_QUIET_HOURS_START.to_string()),
            quiet_hours_end: request
                .quiet_hours_end
                .unwrap_or_else(|| DEFAULT_QUIET_HOURS_END.to_string()),
            digest_mode: request.digest_mode.unwrap_or(false),
            updated_at,
        }
    }
}

// =====================================================
// Response envelopes
// =====================================================

/// `{count, data}` envelope used by the list endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// `{status, message?, data}` envelope used by writes and single fetches
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: None,
            data,
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data,
        }
    }
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
