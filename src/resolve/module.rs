//! Module export shapes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::ModuleResolutionError;
use crate::engine::{MiddlewareFn, SubRouter};
use crate::error::BoxError;

/// A named middleware factory: invoked with the entry's args spread as
/// positional arguments.
pub type NamedFactory = Arc<dyn Fn(&[Value]) -> Result<MiddlewareFn, BoxError> + Send + Sync>;

/// The default middleware factory: invoked with a single argument, which is
/// the entry's full args sequence when it holds more than one element, the
/// sole element unwrapped when it holds exactly one, `Value::Null` otherwise.
pub type DefaultFactory = Arc<dyn Fn(Value) -> Result<MiddlewareFn, BoxError> + Send + Sync>;

/// Produces a fresh mountable router per resolution.
pub type RouterFactory = Arc<dyn Fn() -> SubRouter + Send + Sync>;

/// The exports of a resolved module: either a set of middleware factories or
/// a router factory.
#[derive(Clone)]
pub enum Module {
    Middleware(MiddlewareExports),
    Router(RouterFactory),
}

/// Middleware factories exported by a module: an optional default export and
/// zero or more named exports.
#[derive(Clone, Default)]
pub struct MiddlewareExports {
    default: Option<DefaultFactory>,
    named: HashMap<String, NamedFactory>,
}

impl MiddlewareExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_export<F>(mut self, factory: F) -> Self
    where
        F: Fn(Value) -> Result<MiddlewareFn, BoxError> + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(factory));
        self
    }

    pub fn export<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&[Value]) -> Result<MiddlewareFn, BoxError> + Send + Sync + 'static,
    {
        self.named.insert(name.into(), Arc::new(factory));
        self
    }
}

impl Module {
    /// A middleware module with the given exports.
    pub fn middleware(exports: MiddlewareExports) -> Self {
        Module::Middleware(exports)
    }

    /// A router module backed by the given factory.
    pub fn router<F>(factory: F) -> Self
    where
        F: Fn() -> SubRouter + Send + Sync + 'static,
    {
        Module::Router(Arc::new(factory))
    }

    pub fn named_factory(
        &self,
        identifier: &str,
        export: &str,
    ) -> Result<&NamedFactory, ModuleResolutionError> {
        match self {
            Module::Middleware(exports) => {
                exports
                    .named
                    .get(export)
                    .ok_or_else(|| ModuleResolutionError::MissingExport {
                        module: identifier.to_string(),
                        export: export.to_string(),
                    })
            }
            Module::Router(_) => Err(ModuleResolutionError::NotMiddleware {
                module: identifier.to_string(),
            }),
        }
    }

    pub fn default_factory(&self, identifier: &str) -> Result<&DefaultFactory, ModuleResolutionError> {
        match self {
            Module::Middleware(exports) => {
                exports
                    .default
                    .as_ref()
                    .ok_or_else(|| ModuleResolutionError::MissingDefault {
                        module: identifier.to_string(),
                    })
            }
            Module::Router(_) => Err(ModuleResolutionError::NotMiddleware {
                module: identifier.to_string(),
            }),
        }
    }

    pub fn router_factory(&self, identifier: &str) -> Result<&RouterFactory, ModuleResolutionError> {
        match self {
            Module::Router(factory) => Ok(factory),
            Module::Middleware(_) => Err(ModuleResolutionError::NotRouter {
                module: identifier.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Module::Middleware(exports) => {
                let mut names: Vec<&str> = exports.named.keys().map(String::as_str).collect();
                names.sort_unstable();
                f.debug_struct("Module::Middleware")
                    .field("default", &exports.default.is_some())
                    .field("named", &names)
                    .finish()
            }
            Module::Router(_) => f.write_str("Module::Router"),
        }
    }
}
