//! The built application object.

use std::collections::HashMap;
use std::mem;

use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::routing::MethodFilter;
use axum::Router;
use serde_json::{Map, Value};

use super::middleware::{HandlerFn, Middleware, MiddlewareFn, MiddlewareTarget};
use super::router::SubRouter;

/// Setting name for the templates directory.
pub const SETTING_VIEWS: &str = "views";

/// Setting name for the view-engine selector.
pub const SETTING_VIEW_ENGINE: &str = "view engine";

/// A composed application: locals, named settings, an ordered middleware
/// chain, routes and sub-router mounts, backed by an axum router.
///
/// The object accumulates registrations in call order and is finalized with
/// [`Application::into_router`]. Until then the chain and mount records are
/// introspectable.
#[derive(Debug, Default)]
pub struct Application {
    locals: Map<String, Value>,
    settings: HashMap<String, String>,
    chain: Vec<Middleware>,
    routes: Vec<String>,
    mounts: Vec<Option<String>>,
    router: Router,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge entries into the locals map. Later keys overwrite
    /// earlier ones with identical names.
    pub fn merge_locals(&mut self, entries: &Map<String, Value>) {
        for (key, value) in entries {
            self.locals.insert(key.clone(), value.clone());
        }
    }

    pub fn locals(&self) -> &Map<String, Value> {
        &self.locals
    }

    pub fn local(&self, key: &str) -> Option<&Value> {
        self.locals.get(key)
    }

    /// Store a named setting (`views`, `view engine`).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(name.into(), value.into());
    }

    pub fn setting(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(String::as_str)
    }

    /// Names of the registered middleware chain, in registration order.
    pub fn middleware_names(&self) -> Vec<&str> {
        self.chain.iter().map(Middleware::name).collect()
    }

    /// Register a route: guards run in order before the terminal handler.
    pub fn route(&mut self, method: MethodFilter, path: &str, guards: Vec<MiddlewareFn>, handler: HandlerFn) {
        let mut method_router = axum::routing::on(method, move |req: Request| {
            let handler = handler.clone();
            async move { handler(req).await }
        });
        // Applied in reverse so the first guard is outermost and runs first.
        for guard in guards.into_iter().rev() {
            method_router = method_router.layer(from_fn(move |req: Request, next: Next| {
                let guard = guard.clone();
                async move { guard(req, next).await }
            }));
        }
        self.router = mem::take(&mut self.router).route(path, method_router);
        self.routes.push(path.to_string());
    }

    /// Registered route paths, in registration order.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Mount a sub-router at a path prefix. Mounting at `/` is the same as
    /// mounting unprefixed; the underlying router cannot nest at the root.
    pub fn mount_at(&mut self, path: &str, router: SubRouter) {
        if path == "/" {
            return self.mount(router);
        }
        self.router = mem::take(&mut self.router).nest(path, router.into_router());
        self.mounts.push(Some(path.to_string()));
    }

    /// Mount a sub-router unprefixed.
    pub fn mount(&mut self, router: SubRouter) {
        self.router = mem::take(&mut self.router).merge(router.into_router());
        self.mounts.push(None);
    }

    /// Mount paths in registration order; `None` marks an unprefixed mount.
    pub fn mounts(&self) -> &[Option<String>] {
        &self.mounts
    }

    /// Finalize into an axum router. The middleware chain is applied in
    /// reverse registration order so the first-registered unit is outermost
    /// and observes the request first.
    pub fn into_router(self) -> Router {
        let mut router = self.router;
        for middleware in self.chain.into_iter().rev() {
            let func = middleware.func.clone();
            router = router.layer(from_fn(move |req: Request, next: Next| {
                let func = func.clone();
                async move { func(req, next).await }
            }));
        }
        router
    }
}

impl MiddlewareTarget for Application {
    fn use_middleware(&mut self, middleware: Middleware) {
        self.chain.push(middleware);
    }
}
