//! F8 intelligence: detect meeting/deadline phrases in free text

use chrono::NaiveDateTime;
use notify_types::{DetectResponse, DetectionRecord, PhraseDetection};
use std::sync::Arc;

use super::{iso_timestamp, local_now};
use crate::db::{RecordStore, Table, load_typed, to_record};
use crate::error::AppError;
use crate::intelligence::{DateResolver, PhraseInterpreter, Resolution};

/// Format used for `interpreted_as`
const INTERPRETED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct IntelligenceService {
    store: Arc<dyn RecordStore>,
    interpreter: Arc<dyn PhraseInterpreter>,
    resolver: Arc<dyn DateResolver>,
}

impl IntelligenceService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        interpreter: Arc<dyn PhraseInterpreter>,
        resolver: Arc<dyn DateResolver>,
    ) -> Self {
        Self {
            store,
            interpreter,
            resolver,
        }
    }

    /// Run detection against the current local time
    pub fn detect(&self, text: &str) -> Result<DetectResponse, AppError> {
        self.detect_at(text, local_now())
    }

    /// Keep DATE/TIME spans that resolve, persist them as one record, and
    /// suggest follow-ups. Nothing is stored when no span resolves.
    pub fn detect_at(&self, text: &str, now: NaiveDateTime) -> Result<DetectResponse, AppError> {
        let detections: Vec<PhraseDetection> = self
            .interpreter
            .entities(text)?
            .into_iter()
            .filter(|span| span.label.is_temporal())
            .filter_map(|span| match self.resolver.resolve(&span.text, now) {
                Resolution::Parsed { timestamp } => Some(PhraseDetection {
                    detected_phrase: span.text,
                    interpreted_as: timestamp.format(INTERPRETED_FORMAT).to_string(),
                }),
                Resolution::Unparsed => {
                    log::debug!(
                        "[F8] Dropped unresolvable phrase '{}' at {}..{}",
                        span.text,
                        span.start,
                        span.end
                    );
                    None
                }
            })
            .collect();

        if detections.is_empty() {
            return Ok(DetectResponse::not_assistive());
        }

        let record = DetectionRecord {
            original_text: text.to_string(),
            detections: detections.clone(),
            timestamp: iso_timestamp(now),
        };
        self.store.append(Table::Detections, to_record(&record)?)?;
        log::info!("[F8] Stored {} detection(s)", detections.len());

        Ok(DetectResponse::assistive(detections))
    }

    /// All stored detection records
    pub fn list(&self) -> Result<Vec<DetectionRecord>, AppError> {
        Ok(load_typed(self.store.as_ref(), Table::Detections)?)
    }
}
