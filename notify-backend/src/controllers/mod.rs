//! HTTP controllers, one module per feature set

pub mod detections;
pub mod health;
pub mod notifications;
pub mod settings;

use actix_web::error::JsonPayloadError;
use actix_web::web;

use crate::error::AppError;

/// Largest JSON body accepted by any endpoint
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON extractor config: oversized bodies become 413s, anything else
/// malformed or incomplete becomes a 422
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| body_error(err).into())
}

fn body_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            AppError::PayloadTooLarge(err.to_string())
        }
        other => AppError::InvalidBody(other.to_string()),
    }
}

/// Register every route and the shared extractor config
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(health::config)
        .configure(notifications::config)
        .configure(detections::config)
        .configure(settings::config);
}
