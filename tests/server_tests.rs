//! Server-level behaviour: panics in handlers and bind failures

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, middleware::from_fn, web};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing_test::traced_test;

use pingd::api::middleware::assign_request_id;
use pingd::api::services::PingService;
use pingd::config::StaticConfig;
use pingd::errors::PingdError;
use pingd::runtime::modes::run_server;
use pingd::system::panic_handler::{RunMode, install_panic_hook};

async fn exploding_handler() -> HttpResponse {
    panic!("handler exploded");
}

/// Minimal HTTP/1.1 GET; returns the raw response (empty if the connection was dropped)
async fn raw_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = match TcpStream::connect(addr).await {
        Ok(stream) => stream,
        Err(_) => return String::new(),
    };
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    if stream.write_all(request.as_bytes()).await.is_err() {
        return String::new();
    }

    let mut buf = Vec::new();
    let _ = stream.read_to_end(&mut buf).await;
    String::from_utf8_lossy(&buf).into_owned()
}

// =============================================================================
// Panics
// =============================================================================

#[test]
#[traced_test]
fn test_panic_hook_logs_and_returns() {
    install_panic_hook(RunMode::Server);

    let result = std::panic::catch_unwind(|| {
        panic!("worker exploded");
    });

    assert!(result.is_err());
    assert!(logs_contain("Uncaught panic: worker exploded"));
}

#[actix_web::test]
async fn test_server_keeps_serving_after_handler_panic() {
    install_panic_hook(RunMode::Server);

    let server = HttpServer::new(|| {
        App::new()
            .wrap(from_fn(assign_request_id))
            .route("/explode", web::get().to(exploding_handler))
            .route("/ping", web::get().to(PingService::ping))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let response = raw_get(addr, "/explode").await;
    assert!(!response.starts_with("HTTP/1.1 200"));

    // worker 可能正在重启，稍等重试
    let mut pong = String::new();
    for _ in 0..40 {
        pong = raw_get(addr, "/ping").await;
        if pong.starts_with("HTTP/1.1 200") {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert!(pong.starts_with("HTTP/1.1 200"), "got: {:?}", pong);
    assert!(pong.ends_with(r#"{"success":true,"data":"pong"}"#));

    handle.stop(false).await;
}

// =============================================================================
// Bind failures
// =============================================================================

#[actix_web::test]
async fn test_bind_failure_is_server_bind_error() {
    let occupied = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut config = StaticConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;
    config.server.workers = 1;
    config.metrics.system_refresh_interval_secs = 0;

    let err = run_server(Arc::new(config))
        .await
        .expect_err("port is already taken");

    let pingd_err = err
        .downcast_ref::<PingdError>()
        .expect("bind failures are typed");
    assert!(matches!(pingd_err, PingdError::ServerBind(_)));
    assert_eq!(pingd_err.code(), "E003");
    assert!(pingd_err.message().contains(&port.to_string()));

    drop(occupied);
}
