//! Module resolution subsystem.
//!
//! # Responsibilities
//! - Late-bound, configuration-driven lookup of middleware and router
//!   implementations by string identifier
//! - Expose the resolver as a trait so composition never depends on where
//!   modules come from
//!
//! # Design Decisions
//! - Rust has no runtime module system, so the production resolver *is* an
//!   in-memory registry populated at startup; the same registry doubles as
//!   the test seam
//! - Resolution is a blocking, synchronous operation; entries are resolved
//!   strictly in manifest order, each fully before the next

pub mod module;
pub mod registry;

use thiserror::Error;

pub use module::{DefaultFactory, MiddlewareExports, Module, NamedFactory, RouterFactory};
pub use registry::Registry;

/// Resolve a module identifier to its exports.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, identifier: &str) -> Result<Module, ModuleResolutionError>;
}

/// A referenced module identifier could not be loaded, or the loaded module
/// does not provide what the manifest entry asked of it.
#[derive(Debug, Error)]
pub enum ModuleResolutionError {
    #[error("no module registered for identifier `{0}`")]
    NotFound(String),

    #[error("module `{module}` has no export named `{export}`")]
    MissingExport { module: String, export: String },

    #[error("module `{module}` has no default export")]
    MissingDefault { module: String },

    #[error("module `{module}` does not export a router")]
    NotRouter { module: String },

    #[error("module `{module}` does not export middleware")]
    NotMiddleware { module: String },
}
