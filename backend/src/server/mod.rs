//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use recipe_backend::Trace;
#[cfg(debug_assertions)]
use recipe_backend::doc::ApiDoc;
use recipe_backend::domain::ports::PasswordHasher;
use recipe_backend::inbound::http::health::{HealthState, live, ready};
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::inbound::http::users::user_scope;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(user_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the bind address and optional pool.
/// - `hasher`: password hasher shared by every identity service.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    hasher: Arc<dyn PasswordHasher>,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config, hasher);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use recipe_backend::domain::ports::FixturePasswordHasher;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn deps() -> AppDependencies {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("valid address"));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config, Arc::new(FixturePasswordHasher)),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn registered_user_can_fetch_own_profile() {
        let app = actix_test::init_service(build_app(deps())).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/user/create")
            .set_json(json!({"email": "cook@example.com", "password": "pass123", "name": "Cook"}))
            .to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let login = actix_test::TestRequest::post()
            .uri("/api/user/token")
            .set_json(json!({"email": "cook@example.com", "password": "pass123"}))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, login).await;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .expect("token in body")
            .to_owned();

        let me = actix_test::TestRequest::get()
            .uri("/api/user/me")
            .insert_header(("Authorization", format!("Token {token}")))
            .to_request();
        let profile: Value = actix_test::call_and_read_body_json(&app, me).await;
        assert_eq!(profile, json!({"name": "Cook", "email": "cook@example.com"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_probe_is_mounted() {
        let app = actix_test::init_service(build_app(deps())).await;
        let request = actix_test::TestRequest::get()
            .uri("/health/live")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
