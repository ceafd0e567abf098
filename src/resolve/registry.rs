//! In-memory module registry.

use std::collections::HashMap;

use super::{Module, ModuleResolutionError, ModuleResolver};

/// Maps module identifiers to their exports.
///
/// Applications register their middleware and router implementations here at
/// startup; manifests then reference them by identifier.
#[derive(Clone, Default)]
pub struct Registry {
    modules: HashMap<String, Module>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the builtin middleware modules
    /// (`request-id`, `trace`, `timeout`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("request-id", crate::middleware::request_id::module());
        registry.register("trace", crate::middleware::trace::module());
        registry.register("timeout", crate::middleware::timeout::module());
        registry
    }

    pub fn register(&mut self, identifier: impl Into<String>, module: Module) -> &mut Self {
        self.modules.insert(identifier.into(), module);
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.modules.contains_key(identifier)
    }
}

impl ModuleResolver for Registry {
    fn resolve(&self, identifier: &str) -> Result<Module, ModuleResolutionError> {
        self.modules
            .get(identifier)
            .cloned()
            .ok_or_else(|| ModuleResolutionError::NotFound(identifier.to_string()))
    }
}
