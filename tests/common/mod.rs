//! Shared fixtures for the composition integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_json::Value;

use app_composer::{
    handler_fn, middleware_fn, HandlerFn, MiddlewareExports, MiddlewareFn, Module, Registry,
    SubRouter,
};

pub const TRACE_HEADER: HeaderName = HeaderName::from_static("x-trace");

/// Middleware that appends its name to the `x-trace` request header, so
/// execution order is observable at the terminal handler.
pub fn tag(name: &'static str) -> MiddlewareFn {
    middleware_fn(move |mut req, next| async move {
        let existing = req
            .headers()
            .get(TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let value = if existing.is_empty() {
            name.to_string()
        } else {
            format!("{existing},{name}")
        };
        req.headers_mut()
            .insert(TRACE_HEADER, HeaderValue::from_str(&value).unwrap());
        next.run(req).await
    })
}

/// Terminal handler echoing the accumulated `x-trace` header.
pub fn echo_trace() -> HandlerFn {
    handler_fn(|req| async move {
        req.headers()
            .get(TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned()
            .into_response()
    })
}

async fn trace_route(req: Request) -> String {
    req.headers()
        .get(TRACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned()
}

/// A middleware module whose default export records the argument it was
/// invoked with, for asserting the arg-collapsing rule.
pub fn recording_module() -> (Module, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let module = Module::middleware(MiddlewareExports::new().default_export(move |arg| {
        sink.lock().unwrap().push(arg);
        Ok(tag("logger"))
    }));
    (module, seen)
}

/// Registry with the builtins plus the fixtures manifests reference:
/// an `assets` middleware module with a `static` named export and an `api`
/// router module serving `/ping` and `/trace`.
pub fn test_registry() -> Registry {
    let mut registry = Registry::with_builtins();

    registry.register(
        "assets",
        Module::middleware(
            MiddlewareExports::new().export("static", |_args| Ok(tag("assets.static"))),
        ),
    );

    registry.register("api", Module::router(api_router));

    registry
}

pub fn api_router() -> SubRouter {
    SubRouter::new()
        .route("/ping", axum::routing::get(|| async { "pong" }))
        .route("/trace", axum::routing::get(trace_route))
}

/// Drive a GET request through a finalized router.
pub async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
    use tower::ServiceExt;

    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
