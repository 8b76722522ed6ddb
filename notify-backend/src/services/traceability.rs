//! F7 traceability: notifications tied to a business entity

use chrono::NaiveDateTime;
use notify_types::{CreateNotificationRequest, EntityType, Notification};
use std::sync::Arc;

use super::{iso_timestamp, local_now};
use crate::db::{RecordStore, Table, load_typed, to_record};
use crate::error::AppError;

/// Make sure a message names the entity it's about.
///
/// If the entity type literal doesn't appear in the message (case-sensitive),
/// append `" on {entity_type} {entity_id}"`.
pub fn annotate_message(message: &str, entity_type: EntityType, entity_id: i64) -> String {
    if message.contains(entity_type.as_str()) {
        message.to_string()
    } else {
        format!("{} on {} {}", message, entity_type, entity_id)
    }
}

pub struct TraceabilityService {
    store: Arc<dyn RecordStore>,
}

impl TraceabilityService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validate, annotate and append a notification; returns the stored record
    pub fn create(&self, request: CreateNotificationRequest) -> Result<Notification, AppError> {
        self.create_at(request, local_now())
    }

    pub fn create_at(
        &self,
        request: CreateNotificationRequest,
        now: NaiveDateTime,
    ) -> Result<Notification, AppError> {
        let entity_type: EntityType = request.entity_type.parse().map_err(|_| {
            log::warn!("[F7] Rejected unknown entity type '{}'", request.entity_type);
            AppError::InvalidEntityType
        })?;

        let notification = Notification {
            entity_type,
            entity_id: request.entity_id,
            message: annotate_message(&request.message, entity_type, request.entity_id),
            timestamp: iso_timestamp(now),
        };

        self.store.append(Table::Notifications, to_record(&notification)?)?;
        log::info!("[F7] Logged notification for {} {}", entity_type, request.entity_id);

        Ok(notification)
    }

    /// Full notification history in insertion order
    pub fn list(&self) -> Result<Vec<Notification>, AppError> {
        Ok(load_typed(self.store.as_ref(), Table::Notifications)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use strum::IntoEnumIterator;

    fn request(entity_type: &str, entity_id: i64, message: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            entity_type: entity_type.to_string(),
            entity_id,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_annotate_message() {
        assert_eq!(
            annotate_message("New email received", EntityType::Case, 123),
            "New email received on Case 123"
        );
        assert_eq!(
            annotate_message("Case 123 escalated", EntityType::Case, 123),
            "Case 123 escalated"
        );
        // Substring match only; the id isn't checked
        assert_eq!(
            annotate_message("Vendor invoice", EntityType::Vendor, 9),
            "Vendor invoice"
        );
        // Case-sensitive
        assert_eq!(
            annotate_message("new lead assigned", EntityType::Lead, 5),
            "new lead assigned on Lead 5"
        );
    }

    #[test]
    fn test_message_always_mentions_entity_type() {
        let service = TraceabilityService::new(Arc::new(MemoryStore::new()));
        for entity_type in EntityType::iter() {
            let stored = service
                .create(request(entity_type.as_str(), 1, "Status changed"))
                .unwrap();
            assert!(stored.message.contains(entity_type.as_str()));
            assert_eq!(stored.entity_type, entity_type);
        }
        assert_eq!(service.list().unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_entity_type_rejected_and_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let service = TraceabilityService::new(store.clone());

        for bad in ["Customer", "case", "", "Case "] {
            let err = service.create(request(bad, 1, "hello")).unwrap_err();
            assert!(matches!(err, AppError::InvalidEntityType));
        }
        assert_eq!(store.len(Table::Notifications), 0);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let service = TraceabilityService::new(Arc::new(MemoryStore::new()));
        let first = service.create(request("Lead", 7, "Lead created")).unwrap();
        let second = service.create(request("Lead", 7, "Lead created")).unwrap();
        let third = service.create(request("Candidate", 8, "Interview booked")).unwrap();

        let history = service.list().unwrap();
        assert_eq!(history, vec![first, second, third]);
    }
}
