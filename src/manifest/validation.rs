//! Manifest and options validation.
//!
//! # Responsibilities
//! - Enforce schema conformance before any application state exists
//! - Report the first detected nonconformance with a descriptive field path
//!
//! # Design Decisions
//! - Options are checked before the manifest, matching call-time order
//! - Present string fields must be non-empty
//! - Mount and route paths must begin with `/`; the engine panics on other
//!   shapes, so the check lives here
//! - Middleware entries matching no recognized shape pass validation; they
//!   are skipped at registration, not rejected

use thiserror::Error;

use super::schema::{ComposeOptions, Manifest, MiddlewareEntry, RouteEntry, RouterEntry};

/// HTTP methods accepted in route entries.
pub(crate) const SUPPORTED_METHODS: [&str; 8] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE",
];

/// Manifest or options failed schema conformance.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("manifest is missing the required `application` section")]
    MissingApplication,

    #[error("malformed manifest document: {0}")]
    Document(String),

    #[error("invalid options: {0}")]
    Options(String),

    #[error("invalid manifest field `{path}`: {reason}")]
    Field { path: String, reason: String },
}

/// Check a manifest and options against the schema. Synchronous; returns the
/// first detected nonconformance.
pub fn validate(manifest: &Manifest, options: &ComposeOptions) -> Result<(), ValidationError> {
    validate_options(options)?;

    let app = manifest
        .application
        .as_ref()
        .ok_or(ValidationError::MissingApplication)?;

    if let Some(views) = &app.views {
        non_empty("application.views.engine", views.engine.as_deref())?;
        non_empty("application.views.path", views.path.as_deref())?;
    }

    validate_middleware("application.middleware", &app.middleware)?;

    for (index, route) in app.routes.iter().enumerate() {
        validate_route(index, route)?;
    }

    for (index, entry) in app.routers.iter().enumerate() {
        validate_router(index, entry)?;
    }

    Ok(())
}

pub(crate) fn validate_options(options: &ComposeOptions) -> Result<(), ValidationError> {
    if let Some(base) = options.relative_to.as_deref() {
        if base.is_empty() {
            return Err(ValidationError::Options(
                "`relativeTo` must be a non-empty string".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_middleware(prefix: &str, entries: &[MiddlewareEntry]) -> Result<(), ValidationError> {
    for (index, entry) in entries.iter().enumerate() {
        non_empty(&format!("{prefix}[{index}].module"), entry.module.as_deref())?;
        non_empty(
            &format!("{prefix}[{index}].useFunction"),
            entry.use_function.as_deref(),
        )?;
    }
    Ok(())
}

fn validate_route(index: usize, route: &RouteEntry) -> Result<(), ValidationError> {
    let method = route.method.as_deref().ok_or_else(|| ValidationError::Field {
        path: format!("application.routes[{index}].method"),
        reason: "method is required".to_string(),
    })?;
    if !SUPPORTED_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
        return Err(ValidationError::Field {
            path: format!("application.routes[{index}].method"),
            reason: format!("unsupported HTTP method `{method}`"),
        });
    }

    let path = route.path.as_deref().ok_or_else(|| ValidationError::Field {
        path: format!("application.routes[{index}].path"),
        reason: "path is required".to_string(),
    })?;
    if !path.starts_with('/') {
        return Err(ValidationError::Field {
            path: format!("application.routes[{index}].path"),
            reason: "path must begin with `/`".to_string(),
        });
    }

    if route.handler.is_none() {
        return Err(ValidationError::Field {
            path: format!("application.routes[{index}].handler"),
            reason: "a terminal handler is required".to_string(),
        });
    }

    Ok(())
}

fn validate_router(index: usize, entry: &RouterEntry) -> Result<(), ValidationError> {
    if entry.router.is_empty() {
        return Err(ValidationError::Field {
            path: format!("application.routers[{index}].router"),
            reason: "router module identifier is required".to_string(),
        });
    }

    if let Some(options) = &entry.options {
        if let Some(path) = options.path.as_deref() {
            if !path.starts_with('/') {
                return Err(ValidationError::Field {
                    path: format!("application.routers[{index}].options.path"),
                    reason: "mount path must begin with `/`".to_string(),
                });
            }
        }
    }

    validate_middleware(&format!("application.routers[{index}].middleware"), &entry.middleware)
}

fn non_empty(path: &str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some("") => Err(ValidationError::Field {
            path: path.to_string(),
            reason: "must be a non-empty string".to_string(),
        }),
        _ => Ok(()),
    }
}
