//! Request deadline middleware.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use crate::engine::{middleware_fn, MiddlewareFn};
use crate::error::BoxError;
use crate::resolve::{MiddlewareExports, Module};

/// Middleware that bounds the rest of the chain with a deadline. Requests
/// exceeding it receive 408 Request Timeout.
pub fn timeout(limit: Duration) -> MiddlewareFn {
    middleware_fn(move |req, next| async move {
        match tokio::time::timeout(limit, next.run(req)).await {
            Ok(response) => response,
            Err(_) => StatusCode::REQUEST_TIMEOUT.into_response(),
        }
    })
}

/// Registry module: `{ "module": "timeout", "args": [30000] }` with the
/// limit in milliseconds.
pub fn module() -> Module {
    Module::middleware(
        MiddlewareExports::new()
            .default_export(|arg| Ok(timeout(Duration::from_millis(parse_millis(arg)?)))),
    )
}

fn parse_millis(arg: Value) -> Result<u64, BoxError> {
    arg.as_u64()
        .ok_or_else(|| format!("timeout: expected a milliseconds argument, got {arg}").into())
}
