//! F7 traceability endpoints

use actix_web::{HttpResponse, web};
use notify_types::{CreateNotificationRequest, DataResponse, ListResponse};

use crate::AppState;
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/f7/notifications")
            .route(web::post().to(create_notification))
            .route(web::get().to(list_notifications)),
    );
}

/// Log a notification against an entity
async fn create_notification(
    state: web::Data<AppState>,
    body: web::Json<CreateNotificationRequest>,
) -> Result<HttpResponse, AppError> {
    let notification = state.traceability.create(body.into_inner())?;
    Ok(HttpResponse::Ok().json(DataResponse::success(notification)))
}

/// Full notification history, unfiltered
async fn list_notifications(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let notifications = state.traceability.list()?;
    Ok(HttpResponse::Ok().json(ListResponse::new(notifications)))
}
