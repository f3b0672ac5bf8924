use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::services::otp::{NotificationSink, OtpStore};
use pv_shared::phone::{format_phone_number, mask_phone_number};
use pv_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/otp/send
///
/// Issues a code for the phone number and delivers it through the configured
/// notification channels.
///
/// # Request Body
///
/// ```json
/// { "phone": "9999999999" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "message": "OTP sent successfully", "expires_in": 300 },
///     "timestamp": "2026-10-18T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400: invalid or empty phone number
/// - 500: the code could not be stored
/// - 502: the code was stored but delivery failed (`data.entry_retained`)
pub async fn send_otp<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    request.validate()?;

    let phone = format_phone_number(&request.phone, &state.default_country_code);
    tracing::info!(phone = %mask_phone_number(&phone), "Processing send_otp request");

    let result = state.otp_service.send_otp(&phone).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        expires_in: result.expires_in_seconds(),
    })))
}
