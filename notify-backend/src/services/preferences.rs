//! F9 preferences: one settings record per user

use chrono::NaiveDateTime;
use notify_types::{UserSettings, UserSettingsRequest};
use std::sync::Arc;

use super::{iso_timestamp, local_now};
use crate::db::{RecordStore, Table, UpsertOutcome, load_typed, to_record};
use crate::error::AppError;

const USER_ID_KEY: &str = "user_id";

/// Result of a settings upsert
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSettings {
    pub settings: UserSettings,
    pub outcome: UpsertOutcome,
}

impl SavedSettings {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            UpsertOutcome::Inserted => "Settings created successfully",
            UpsertOutcome::Updated => "Settings updated successfully",
        }
    }
}

pub struct PreferencesService {
    store: Arc<dyn RecordStore>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn upsert(&self, request: UserSettingsRequest) -> Result<SavedSettings, AppError> {
        self.upsert_at(request, local_now())
    }

    /// Replace the user's whole record. Fields the request leaves out fall
    /// back to defaults, not to what was stored before.
    pub fn upsert_at(
        &self,
        request: UserSettingsRequest,
        now: NaiveDateTime,
    ) -> Result<SavedSettings, AppError> {
        let settings = UserSettings::from_request(request, iso_timestamp(now));
        let outcome = self
            .store
            .upsert_by_key(Table::UserSettings, USER_ID_KEY, to_record(&settings)?)?;

        log::info!(
            "[F9] {} settings for user {}",
            match outcome {
                UpsertOutcome::Inserted => "Created",
                UpsertOutcome::Updated => "Replaced",
            },
            settings.user_id
        );

        Ok(SavedSettings { settings, outcome })
    }

    /// Fetch a user's settings; `SettingsNotFound` if none are stored
    pub fn get(&self, user_id: &str) -> Result<UserSettings, AppError> {
        load_typed::<UserSettings>(self.store.as_ref(), Table::UserSettings)?
            .into_iter()
            .find(|settings| settings.user_id == user_id)
            .ok_or(AppError::SettingsNotFound)
    }
}
