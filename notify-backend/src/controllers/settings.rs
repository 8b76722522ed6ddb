//! F9 preferences endpoints

use actix_web::{HttpResponse, web};
use notify_types::{DataResponse, UserSettingsRequest};

use crate::AppState;
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/f9/settings").route(web::post().to(upsert_settings)));
    cfg.service(web::resource("/f9/settings/{user_id}").route(web::get().to(get_settings)));
}

/// Create or fully replace a user's settings
async fn upsert_settings(
    state: web::Data<AppState>,
    body: web::Json<UserSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let saved = state.preferences.upsert(body.into_inner())?;
    let message = saved.message();
    Ok(HttpResponse::Ok().json(DataResponse::success_with_message(message, saved.settings)))
}

async fn get_settings(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let settings = state.preferences.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(DataResponse::success(settings)))
}

#[cfg(test)]
mod tests {
    use crate::AppState;
    use crate::controllers;
    use crate::db::MemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_upsert_fetch_and_reset() {
        let state = web::Data::new(AppState::in_memory(Arc::new(MemoryStore::new())));
        let app = test::init_service(App::new().app_data(state).configure(controllers::configure))
            .await;

        let req = test::TestRequest::post()
            .uri("/f9/settings")
            .set_json(json!({
                "user_id": "user123",
                "muted_notifications": ["marketing", "system_alerts"],
                "quiet_hours_start": "23:00",
                "quiet_hours_end": "06:00",
                "digest_mode": true
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Settings created successfully");
        assert_eq!(body["data"]["digest_mode"], true);

        let req = test::TestRequest::get().uri("/f9/settings/user123").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["muted_notifications"], json!(["marketing", "system_alerts"]));
        assert_eq!(body["data"]["quiet_hours_start"], "23:00");
        assert_eq!(body["data"]["quiet_hours_end"], "06:00");
        assert!(body.get("message").is_none());

        // Only user_id: every other field goes back to its default
        let req = test::TestRequest::post()
            .uri("/f9/settings")
            .set_json(json!({"user_id": "user123"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Settings updated successfully");

        let req = test::TestRequest::get().uri("/f9/settings/user123").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["muted_notifications"], json!([]));
        assert_eq!(body["data"]["quiet_hours_start"], "22:00");
        assert_eq!(body["data"]["quiet_hours_end"], "07:00");
        assert_eq!(body["data"]["digest_mode"], false);
    }

    #[actix_web::test]
    async fn test_unknown_user_is_404() {
        let state = web::Data::new(AppState::in_memory(Arc::new(MemoryStore::new())));
        let app = test::init_service(App::new().app_data(state).configure(controllers::configure))
            .await;

        let req = test::TestRequest::get().uri("/f9/settings/nobody").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "User settings not found");
    }
}
