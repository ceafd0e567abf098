//! Middleware registrar.
//!
//! Dispatches manifest middleware entries onto anything exposing a `use`
//! capability: the application or a mountable router.

use serde_json::Value;

use crate::engine::{Middleware, MiddlewareTarget};
use crate::error::ComposeError;
use crate::manifest::schema::{MiddlewareEntry, MiddlewareShape};
use crate::resolve::ModuleResolver;

/// Register entries on the target in declared order.
///
/// The module-only shape collapses its args asymmetrically before invoking
/// the default export: more than one element passes the full sequence as a
/// single array value, exactly one passes that element unwrapped, none
/// passes null. Consuming manifests depend on this boundary.
pub fn register_middleware(
    target: &mut dyn MiddlewareTarget,
    entries: &[MiddlewareEntry],
    resolver: &dyn ModuleResolver,
) -> Result<(), ComposeError> {
    for (index, entry) in entries.iter().enumerate() {
        match entry.shape() {
            MiddlewareShape::Factory { module, function, args } => {
                let resolved = resolver.resolve(module)?;
                let factory = resolved.named_factory(module, function)?;
                let name = format!("{module}.{function}");
                let func = factory(args).map_err(|source| ComposeError::Factory {
                    name: name.clone(),
                    source,
                })?;
                tracing::debug!(module = %module, export = %function, "registered middleware");
                target.use_middleware(Middleware::new(name, func));
            }
            MiddlewareShape::Constructor { module, args } => {
                let resolved = resolver.resolve(module)?;
                let factory = resolved.default_factory(module)?;
                let argument = collapse_args(args);
                let func = factory(argument).map_err(|source| ComposeError::Factory {
                    name: module.to_string(),
                    source,
                })?;
                tracing::debug!(module = %module, "registered middleware");
                target.use_middleware(Middleware::new(module, func));
            }
            MiddlewareShape::Custom(custom) => {
                tracing::debug!("registered custom middleware");
                target.use_middleware(Middleware::new("custom", custom.clone()));
            }
            MiddlewareShape::Unrecognized => {
                tracing::debug!(index, "middleware entry matches no recognized shape, skipping");
            }
        }
    }
    Ok(())
}

fn collapse_args(args: Option<&[Value]>) -> Value {
    match args {
        Some(args) if args.len() > 1 => Value::Array(args.to_vec()),
        Some([single]) => single.clone(),
        _ => Value::Null,
    }
}
