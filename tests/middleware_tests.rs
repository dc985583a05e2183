//! Middleware tests
//!
//! Trailing slash handling (redirect / ignore / strict) and error logging.

use actix_web::http::StatusCode;
use actix_web::http::header::{HOST, LOCATION};
use actix_web::test::{self, TestRequest};
use actix_web::middleware::from_fn;
use actix_web::{App, HttpResponse, error, web};
use tracing_test::traced_test;

use pingd::api::constants::REQUEST_ID_HEADER;
use pingd::api::middleware::{ErrorLogger, assign_request_id};
use pingd::config::{RunEnvironment, StaticConfig};
use pingd::runtime::lifetime::startup::{AppState, prepare_server_startup};
use pingd::runtime::modes::build_app;
use pingd::runtime::modes::server::handler_error_logging;

fn state_with(config: &StaticConfig) -> AppState {
    prepare_server_startup(config)
        .expect("startup should succeed")
        .state
}

fn config_with_slash_mode(redirect: bool, ignore: bool) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.routes.redirect_trailing_slash = redirect;
    config.routes.ignore_trailing_slash = ignore;
    config
}

// =============================================================================
// Trailing slash redirect (default)
// =============================================================================

#[actix_web::test]
async fn test_trailing_slash_redirects_to_path_without_slash() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::get().uri("/foo/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/foo");
}

#[actix_web::test]
async fn test_redirect_uses_host_header() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::get()
        .uri("/ping/")
        .insert_header((HOST, "example.com:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "http://example.com:3000/ping"
    );
}

#[actix_web::test]
async fn test_redirect_preserves_query_string() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::get().uri("/search/?q=rust&page=2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/search?q=rust&page=2"
    );
}

#[actix_web::test]
async fn test_root_is_not_redirected() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_ne!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(resp.headers().get(LOCATION).is_none());
}

#[actix_web::test]
async fn test_redirect_never_leaves_the_host() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::get().uri("//evil.example/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/evil.example");
    assert!(!location.starts_with("//"));

    // 带 Host 时同样指向本站
    let req = TestRequest::get()
        .uri("///evil.example/")
        .insert_header((HOST, "localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "http://localhost:3000/evil.example"
    );
}

#[actix_web::test]
async fn test_redirect_applies_to_every_method() {
    let app = test::init_service(build_app(state_with(&StaticConfig::default()))).await;

    let req = TestRequest::post().uri("/ping/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
}

#[actix_web::test]
async fn test_redirects_are_counted() {
    let state = state_with(&StaticConfig::default());
    let metrics = state.metrics.clone();
    let app = test::init_service(build_app(state)).await;

    for uri in ["/a/", "/b/", "/ping"] {
        let _ = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    }

    assert_eq!(metrics.redirects_total.with_label_values(&["301"]).get(), 2.0);
    assert_eq!(
        metrics
            .http_requests_total
            .with_label_values(&["GET", "unmatched", "301"])
            .get(),
        2.0
    );
}

// =============================================================================
// Ignore / strict modes
// =============================================================================

#[actix_web::test]
async fn test_ignore_mode_serves_path_with_slash() {
    let app = test::init_service(build_app(state_with(&config_with_slash_mode(false, true)))).await;

    let req = TestRequest::get().uri("/ping/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        r#"{"success":true,"data":"pong"}"#
    );
}

#[actix_web::test]
async fn test_strict_mode_does_not_match_slash_variant() {
    let app = test::init_service(build_app(state_with(&config_with_slash_mode(false, false)))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/ping/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Error logging
// =============================================================================

async fn failing_handler() -> Result<HttpResponse, actix_web::Error> {
    Err(error::ErrorBadRequest("boom"))
}

#[actix_web::test]
async fn test_error_logger_does_not_change_response() {
    let app = test::init_service(
        App::new()
            .wrap(ErrorLogger)
            .route("/boom", web::get().to(failing_handler))
            .route("/ok", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/boom").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(std::str::from_utf8(&body).unwrap(), "boom");

    let resp = test::call_service(&app, TestRequest::get().uri("/ok").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_production_app_still_serves_ping() {
    let mut config = StaticConfig::default();
    config.environment = RunEnvironment::Production;
    let state = state_with(&config);
    assert!(!state.log_handler_errors);

    let app = test::init_service(build_app(state)).await;
    let resp = test::call_service(&app, TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

/// Same wiring as `build_app`, plus a route that always fails
fn app_with_failing_route(
    state: &AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .wrap(handler_error_logging(state))
        .wrap(from_fn(assign_request_id))
        .route("/boom", web::get().to(failing_handler))
}

#[actix_web::test]
#[traced_test]
async fn test_handler_errors_are_logged_outside_production() {
    let state = state_with(&StaticConfig::default());
    assert!(state.log_handler_errors);
    let app = test::init_service(app_with_failing_route(&state)).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/boom").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let request_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    assert!(logs_contain("Handler error on GET /boom"));
    assert!(logs_contain("boom"));
    assert!(logs_contain(&request_id));
}

#[actix_web::test]
#[traced_test]
async fn test_handler_errors_are_not_logged_in_production() {
    let mut config = StaticConfig::default();
    config.environment = RunEnvironment::Production;
    let state = state_with(&config);
    let app = test::init_service(app_with_failing_route(&state)).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/boom").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(!logs_contain("Handler error"));
}
