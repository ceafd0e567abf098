//! Request logging middleware.
//!
//! Logs method, path, status and latency for every request via `tracing`.

use std::time::Instant;

use serde_json::Value;

use crate::engine::{middleware_fn, MiddlewareFn};
use crate::error::BoxError;
use crate::resolve::{MiddlewareExports, Module};

/// Middleware that logs one event per request. `verbose` drops the event
/// level from info to debug.
pub fn trace(verbose: bool) -> MiddlewareFn {
    middleware_fn(move |req, next| async move {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let start = Instant::now();

        let response = next.run(req).await;

        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;
        if verbose {
            tracing::debug!(method = %method, path = %path, status, latency_ms, "request");
        } else {
            tracing::info!(method = %method, path = %path, status, latency_ms, "request");
        }
        response
    })
}

/// Registry module: `{ "module": "trace" }` logs at info;
/// `{ "module": "trace", "args": ["debug"] }` logs at debug.
pub fn module() -> Module {
    Module::middleware(MiddlewareExports::new().default_export(|arg| Ok(trace(parse_verbose(arg)?))))
}

fn parse_verbose(arg: Value) -> Result<bool, BoxError> {
    match arg {
        Value::Null => Ok(false),
        Value::String(level) => match level.as_str() {
            "info" => Ok(false),
            "debug" => Ok(true),
            other => Err(format!("trace: unsupported level `{other}`").into()),
        },
        other => Err(format!("trace: expected a level string, got {other}").into()),
    }
}
