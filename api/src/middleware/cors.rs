//! CORS middleware configuration for the approval web client.
//!
//! Development allows any origin so the UI dev server and API tools can
//! reach the API. Other environments only accept the origins listed in
//! `server.cors_allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use pv_shared::config::{Environment, ServerConfig};

/// Max age for preflight cache, in seconds
const PREFLIGHT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for `environment`.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_restricted_cors(&server.allowed_origins())
    }
}

fn create_development_cors() -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(PREFLIGHT_MAX_AGE)
}

fn create_restricted_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE);

    if origins.is_empty() {
        tracing::warn!("No CORS origins configured, cross-origin requests will be rejected");
    }

    for origin in origins {
        tracing::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &ServerConfig::default()))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn test_production_only_allows_configured_origins() {
        let server = ServerConfig {
            cors_allowed_origins: "https://approvals.example.com".to_string(),
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &server))
                .route("/", web::get().to(ok)),
        )
        .await;

        let allowed = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://approvals.example.com"))
            .to_request();
        let resp = test::call_service(&app, allowed).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://approvals.example.com"
        );

        let other = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::try_call_service(&app, other).await;
        // actix-cors rejects disallowed origins before the handler runs
        assert!(resp.map(|r| r.status() != StatusCode::OK).unwrap_or(true));
    }
}
