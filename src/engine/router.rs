//! Mountable sub-routers.

use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::routing::MethodRouter;
use axum::Router;

use super::middleware::{Middleware, MiddlewareTarget};

/// An independently composable routing unit. Carries its own middleware
/// chain and can be mounted on an [`Application`](super::Application) at a
/// path prefix or unprefixed.
#[derive(Default)]
pub struct SubRouter {
    chain: Vec<Middleware>,
    routes: Vec<String>,
    router: Router,
}

impl SubRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Builder-style so router modules can be written inline.
    pub fn route(mut self, path: &str, method_router: MethodRouter) -> Self {
        self.router = self.router.route(path, method_router);
        self.routes.push(path.to_string());
        self
    }

    /// Registered route paths, in registration order.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Names of the registered middleware chain, in registration order.
    pub fn middleware_names(&self) -> Vec<&str> {
        self.chain.iter().map(Middleware::name).collect()
    }

    /// Finalize into an axum router, chain outermost-first. Called at mount
    /// time, after any entry-scoped middleware has been registered.
    pub(crate) fn into_router(self) -> Router {
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

impl MiddlewareTarget for SubRouter {
    fn use_middleware(&mut self, middleware: Middleware) {
        self.chain.push(middleware);
    }
}
