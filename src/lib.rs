//! Declarative application composition from a static manifest.
//!
//! A manifest describes application settings, view-engine configuration, an
//! ordered middleware chain, direct routes and sub-router mounts. The
//! composer validates it against a fixed schema and produces a fully wired
//! application object backed by an axum router; middleware and router
//! implementations are supplied through a module registry and referenced by
//! identifier.
//!
//! ```text
//! manifest document
//!     → manifest (parse, validate)
//!     → compose (settings phase, router phase, registrar)
//!     → resolve (registry lookup of referenced modules)
//!     → engine (Application / SubRouter over axum)
//! ```

pub mod compose;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod middleware;
pub mod resolve;

pub use compose::{CallArg, CompletionCallback, ComposeOutcome, Composer};
pub use engine::{
    handler_fn, middleware_fn, Application, HandlerFn, MiddlewareFn, MiddlewareTarget, SubRouter,
    SETTING_VIEWS, SETTING_VIEW_ENGINE,
};
pub use error::{BoxError, ComposeError};
pub use manifest::{
    ApplicationConfig, ComposeOptions, Manifest, MiddlewareEntry, RouteEntry, RouterEntry,
    RouterOptions, ValidationError, ViewsConfig,
};
pub use resolve::{MiddlewareExports, Module, ModuleResolutionError, ModuleResolver, Registry};
