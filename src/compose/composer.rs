//! The composer: validated manifest in, wired application out.

use std::collections::HashSet;

use axum::routing::MethodFilter;

use super::paths::resolve_relative;
use super::registrar::register_middleware;
use crate::engine::{Application, SETTING_VIEWS, SETTING_VIEW_ENGINE};
use crate::error::ComposeError;
use crate::manifest::schema::{ApplicationConfig, ComposeOptions, Manifest, RouteEntry};
use crate::manifest::validation::{validate, ValidationError};
use crate::resolve::{ModuleResolver, Registry};

/// Builds applications from manifests, resolving referenced modules through
/// the supplied resolver.
pub struct Composer<R = Registry> {
    resolver: R,
}

impl<R: ModuleResolver> Composer<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Compose an application. Validation happens before any application
    /// state exists; on failure no partial application escapes.
    pub fn compose(&self, manifest: &Manifest, options: &ComposeOptions) -> Result<Application, ComposeError> {
        validate(manifest, options)?;
        self.assemble(manifest, options)
    }

    /// Assembly without re-validation; the public entry points validate
    /// first.
    pub(crate) fn assemble(&self, manifest: &Manifest, options: &ComposeOptions) -> Result<Application, ComposeError> {
        let app_config = manifest
            .application
            .as_ref()
            .ok_or(ValidationError::MissingApplication)?;
        let relative_to = options.relative_to.as_deref();

        let mut app = self.parse_application(app_config, relative_to)?;
        self.attach_routers(app_config, &mut app, relative_to)?;

        tracing::debug!(
            middleware = app.middleware_names().len(),
            routes = app.routes().len(),
            mounts = app.mounts().len(),
            "application composed"
        );
        Ok(app)
    }

    /// Settings phase: middleware chain, locals, views, direct routes.
    fn parse_application(
        &self,
        config: &ApplicationConfig,
        relative_to: Option<&str>,
    ) -> Result<Application, ComposeError> {
        let mut app = Application::new();

        if !config.middleware.is_empty() {
            register_middleware(&mut app, &config.middleware, &self.resolver)?;
        }

        if !config.locals.is_empty() {
            app.merge_locals(&config.locals);
        }

        if let Some(views) = &config.views {
            if let Some(path) = views.path.as_deref() {
                app.set(SETTING_VIEWS, resolve_relative(relative_to, path));
            }
            if let Some(engine) = views.engine.as_deref() {
                app.set(SETTING_VIEW_ENGINE, engine);
            }
        }

        let mut seen = HashSet::new();
        for route in &config.routes {
            self.register_route(&mut app, route, &mut seen)?;
        }

        Ok(app)
    }

    fn register_route(
        &self,
        app: &mut Application,
        route: &RouteEntry,
        seen: &mut HashSet<(String, String)>,
    ) -> Result<(), ComposeError> {
        let method = route.method.as_deref().ok_or_else(|| ValidationError::Field {
            path: "application.routes".to_string(),
            reason: "method is required".to_string(),
        })?;
        let path = route.path.as_deref().ok_or_else(|| ValidationError::Field {
            path: "application.routes".to_string(),
            reason: "path is required".to_string(),
        })?;
        let handler = route.handler.as_ref().ok_or_else(|| ValidationError::Field {
            path: "application.routes".to_string(),
            reason: "a terminal handler is required".to_string(),
        })?;

        // The engine rejects method-level overlap with a panic; catch it as
        // a validation error. Distinct methods may share a path.
        let verb = method.to_ascii_uppercase();
        if !seen.insert((verb.clone(), path.to_string())) {
            return Err(ValidationError::Field {
                path: "application.routes".to_string(),
                reason: format!("duplicate route `{verb} {path}`"),
            }
            .into());
        }

        app.route(method_filter(method)?, path, route.guards.clone(), handler.clone());
        Ok(())
    }

    /// Router phase: resolve, register scoped middleware, mount in declared
    /// order. Two routers mounted at the same prefix both receive traffic in
    /// registration order; only routers exposing the same concrete path
    /// collide, and that is caught here rather than panicking in the engine.
    fn attach_routers(
        &self,
        config: &ApplicationConfig,
        app: &mut Application,
        relative_to: Option<&str>,
    ) -> Result<(), ComposeError> {
        let mut occupied: HashSet<String> = app.routes().iter().cloned().collect();

        for entry in &config.routers {
            let identifier = resolve_relative(relative_to, &entry.router);
            let module = self.resolver.resolve(&identifier)?;
            let mut router = module.router_factory(&identifier)?();

            if !entry.middleware.is_empty() {
                register_middleware(&mut router, &entry.middleware, &self.resolver)?;
            }

            let prefix = entry.options.as_ref().and_then(|o| o.path.as_deref());
            for inner in router.routes() {
                let full = match prefix.filter(|p| *p != "/") {
                    Some(p) => format!("{}{inner}", p.trim_end_matches('/')),
                    None => inner.clone(),
                };
                if !occupied.insert(full.clone()) {
                    return Err(ValidationError::Field {
                        path: "application.routers".to_string(),
                        reason: format!("route `{full}` is already registered"),
                    }
                    .into());
                }
            }

            match prefix {
                Some(path) => {
                    tracing::debug!(router = %identifier, path = %path, "mounted router");
                    app.mount_at(path, router);
                }
                None => {
                    tracing::debug!(router = %identifier, "mounted router unprefixed");
                    app.mount(router);
                }
            }
        }
        Ok(())
    }
}

fn method_filter(method: &str) -> Result<MethodFilter, ValidationError> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(MethodFilter::GET),
        "POST" => Ok(MethodFilter::POST),
        "PUT" => Ok(MethodFilter::PUT),
        "DELETE" => Ok(MethodFilter::DELETE),
        "PATCH" => Ok(MethodFilter::PATCH),
        "HEAD" => Ok(MethodFilter::HEAD),
        "OPTIONS" => Ok(MethodFilter::OPTIONS),
        "TRACE" => Ok(MethodFilter::TRACE),
        other => Err(ValidationError::Field {
            path: "application.routes".to_string(),
            reason: format!("unsupported HTTP method `{other}`"),
        }),
    }
}
