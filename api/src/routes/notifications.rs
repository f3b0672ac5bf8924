//! In-app notification feed

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use pv_core::services::otp::{NotificationSink, OtpStore};
use pv_shared::phone::format_phone_number;
use pv_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::NotificationQuery;
use crate::handlers::ApiError;

/// Handler for GET /api/v1/notifications
///
/// Lists the unexpired notifications raised for `?phone=`. The filter is
/// required; a missing or malformed phone is rejected with 400.
pub async fn list_notifications<S, N>(
    state: web::Data<AppState<S, N>>,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse, ApiError>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    query.validate()?;

    let phone = format_phone_number(&query.phone, &state.default_country_code);
    let notifications = state.notification_center.active_for(&phone);

    Ok(HttpResponse::Ok().json(ApiResponse::success(notifications)))
}

/// Handler for DELETE /api/v1/notifications/{id}
pub async fn dismiss_notification<S, N>(
    state: web::Data<AppState<S, N>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    let id = path.into_inner();
    if state.notification_center.remove(id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound(format!("Notification {} not found", id)))
    }
}
