//! Request ID middleware.
//!
//! Ensures every request carries an `x-request-id` header for correlation;
//! an existing ID from the caller is preserved.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use crate::engine::{middleware_fn, MiddlewareFn};
use crate::resolve::{MiddlewareExports, Module};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Middleware that tags requests with a UUID v4 request ID.
pub fn request_id() -> MiddlewareFn {
    middleware_fn(|mut req, next| async move {
        if !req.headers().contains_key(REQUEST_ID_HEADER) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
        }
        next.run(req).await
    })
}

/// Registry module: `{ "module": "request-id" }`. Takes no arguments.
pub fn module() -> Module {
    Module::middleware(MiddlewareExports::new().default_export(|_arg| Ok(request_id())))
}
