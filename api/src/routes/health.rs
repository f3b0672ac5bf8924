use actix_web::HttpResponse;

use pv_shared::types::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "payment-voucher-otp",
        env!("CARGO_PKG_VERSION"),
    ))
}
