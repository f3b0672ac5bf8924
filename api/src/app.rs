//! Application state and factory
//!
//! Builds the actix-web application around an [`OtpService`] and the in-app
//! [`NotificationCenter`].

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use pv_core::services::otp::{NotificationSink, OtpService, OtpStore};
use pv_infra::notification::NotificationCenter;
use pv_infra::InfrastructureServices;
use pv_shared::config::notification::CHANNEL_IN_APP;
use pv_shared::config::AppConfig;
use pv_shared::types::ApiResponse;

use crate::middleware::create_cors;
use crate::routes::health::health_check;
use crate::routes::notifications::{dismiss_notification, list_notifications};
use crate::routes::otp::{send_otp, verify_otp};

/// Application state that holds shared services
pub struct AppState<S, N>
where
    S: OtpStore + ?Sized,
    N: NotificationSink + ?Sized,
{
    pub otp_service: Arc<OtpService<S, N>>,
    pub notification_center: Arc<NotificationCenter>,
    /// Country calling code assumed for phone numbers without one
    pub default_country_code: String,
}

impl AppState<dyn OtpStore, dyn NotificationSink> {
    /// State backed by the services built from configuration
    pub fn from_services(services: &InfrastructureServices, config: &AppConfig) -> Self {
        Self {
            otp_service: services.otp_service.clone(),
            notification_center: services.notification_center.clone(),
            default_country_code: config.sms.default_country_code.clone(),
        }
    }
}

/// Register the API routes
///
/// The notification feed is only mounted when `in_app_feed` is set, i.e. when
/// the in-app channel is one of the configured delivery channels.
pub fn configure<S, N>(in_app_feed: bool) -> impl FnOnce(&mut web::ServiceConfig)
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    move |cfg| {
        let mut api = web::scope("/api/v1").service(
            web::scope("/otp")
                .route("/send", web::post().to(send_otp::<S, N>))
                .route("/verify", web::post().to(verify_otp::<S, N>)),
        );
        if in_app_feed {
            api = api.service(
                web::scope("/notifications")
                    .route("", web::get().to(list_notifications::<S, N>))
                    .route("/{id}", web::delete().to(dismiss_notification::<S, N>)),
            );
        }

        cfg.route("/health", web::get().to(health_check)).service(api);
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S, N>(
    app_state: web::Data<AppState<S, N>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("INVALID_JSON", message)),
            )
            .into()
        }))
        .wrap(create_cors(config.environment, &config.server))
        .wrap(TracingLogger::default())
        .configure(configure::<S, N>(
            config.notification.has_channel(CHANNEL_IN_APP),
        ))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
