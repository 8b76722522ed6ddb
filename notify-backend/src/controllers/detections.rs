//! F8 intelligence endpoints

use actix_web::{HttpResponse, web};
use notify_types::{DetectRequest, ListResponse};

use crate::AppState;
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/f8/detect").route(web::post().to(detect)));
    cfg.service(web::resource("/f8/detections").route(web::get().to(list_detections)));
}

/// Detect meeting/deadline phrases in free text
async fn detect(
    state: web::Data<AppState>,
    body: web::Json<DetectRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.intelligence.detect(&body.text)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn list_detections(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let records = state.intelligence.list()?;
    Ok(HttpResponse::Ok().json(ListResponse::new(records)))
}

#[cfg(test)]
mod tests {
    use crate::AppState;
    use crate::config::{Config, StoreBackend, defaults};
    use crate::controllers;
    use crate::db::{MemoryStore, Table};
    use crate::error::InterpretError;
    use crate::intelligence::{EntitySpan, PhraseInterpreter, RelativeDateResolver};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_detect_tomorrow_at_3pm() {
        let store = Arc::new(MemoryStore::new());
        let state = web::Data::new(AppState::in_memory(store.clone()));
        let app = test::init_service(App::new().app_data(state).configure(controllers::configure))
            .await;

        let req = test::TestRequest::post()
            .uri("/f8/detect")
            .set_json(json!({"text": "Let's meet tomorrow at 3pm to discuss updates"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["assistive"], true);
        assert_eq!(body["suggestions"], json!(["Add to calendar", "Set a reminder", "Ignore"]));
        let detections = body["detections"].as_array().unwrap();
        assert!(!detections.is_empty());
        assert!(detections.iter().all(|d| d["interpreted_as"].is_string()));
        assert_eq!(store.len(Table::Detections), 1);

        let req = test::TestRequest::get().uri("/f8/detections").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 1);
        assert_eq!(
            body["data"][0]["original_text"],
            "Let's meet tomorrow at 3pm to discuss updates"
        );
    }

    #[actix_web::test]
    async fn test_detect_nothing_temporal() {
        let store = Arc::new(MemoryStore::new());
        let state = web::Data::new(AppState::in_memory(store.clone()));
        let app = test::init_service(App::new().app_data(state).configure(controllers::configure))
            .await;

        let req = test::TestRequest::post()
            .uri("/f8/detect")
            .set_json(json!({"text": "Thanks for the update"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["assistive"], false);
        assert_eq!(body["message"], "No time-related expressions found.");
        assert!(body.get("suggestions").is_none());
        assert_eq!(body["detections"], json!([]));
        assert_eq!(store.len(Table::Detections), 0);
    }

    struct BrokenInterpreter;

    impl PhraseInterpreter for BrokenInterpreter {
        fn entities(&self, _text: &str) -> Result<Vec<EntitySpan>, InterpretError> {
            Err(InterpretError::Failed("model crashed".into()))
        }
    }

    #[actix_web::test]
    async fn test_interpreter_failure_is_500() {
        let config = Config {
            port: defaults::PORT,
            bind_host: defaults::BIND_HOST.to_string(),
            data_dir: std::env::temp_dir(),
            store_backend: StoreBackend::Memory,
        };
        let state = web::Data::new(AppState::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(BrokenInterpreter),
            Arc::new(RelativeDateResolver),
        ));
        let app = test::init_service(App::new().app_data(state).configure(controllers::configure))
            .await;

        let req = test::TestRequest::post()
            .uri("/f8/detect")
            .set_json(json!({"text": "tomorrow"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
