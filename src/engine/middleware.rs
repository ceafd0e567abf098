//! Middleware and handler callable types.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Boxed future returned by middleware and handler callables.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A request-processing unit: receives the request and a continuation.
pub type MiddlewareFn = Arc<dyn Fn(Request, Next) -> BoxFuture<Response> + Send + Sync>;

/// A terminal route handler: receives the request, produces the response.
pub type HandlerFn = Arc<dyn Fn(Request) -> BoxFuture<Response> + Send + Sync>;

/// Wrap an async closure into a [`MiddlewareFn`].
pub fn middleware_fn<F, Fut>(f: F) -> MiddlewareFn
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req, next| Box::pin(f(req, next)))
}

/// Wrap an async closure into a [`HandlerFn`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req| Box::pin(f(req)))
}

/// A named middleware unit as it sits in a registration chain.
///
/// The name records where the unit came from (`module.export`, module
/// identifier, or `custom`) so chain order stays observable.
#[derive(Clone)]
pub struct Middleware {
    name: String,
    pub(crate) func: MiddlewareFn,
}

impl Middleware {
    pub fn new(name: impl Into<String>, func: MiddlewareFn) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").field("name", &self.name).finish()
    }
}

/// Anything exposing a `use` capability: an application or a mountable router.
pub trait MiddlewareTarget {
    fn use_middleware(&mut self, middleware: Middleware);
}
