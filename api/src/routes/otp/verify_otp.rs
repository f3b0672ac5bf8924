use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::services::otp::{NotificationSink, OtpStore};
use pv_shared::phone::{format_phone_number, mask_phone_number};
use pv_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/otp/verify
///
/// Always answers 200 for well-formed requests; `verified` is `false` for a
/// wrong, expired, already used or never issued code.
///
/// # Request Body
///
/// ```json
/// { "phone": "9999999999", "code": "482913" }
/// ```
pub async fn verify_otp<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    request.validate()?;

    let phone = format_phone_number(&request.phone, &state.default_country_code);
    let verified = state.otp_service.verify_otp(&phone, &request.code).await;

    tracing::info!(
        phone = %mask_phone_number(&phone),
        verified,
        "Processed verify_otp request"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerifyOtpResponse { verified })))
}
