//! Manifest subsystem.
//!
//! # Data Flow
//! ```text
//! manifest document (JSON value / JSON text / TOML text)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (schema conformance, first error wins)
//!     → Manifest (validated, read-only input)
//!     → compose (settings phase, then router phase)
//! ```
//!
//! # Design Decisions
//! - The manifest is read-only input; composition never mutates it
//! - Middleware entries and route handlers can carry directly supplied
//!   callables, so a manifest is a typed struct rather than a raw document;
//!   documents are lifted into the typed form by the loader
//! - Unknown keys are rejected at parse time; malformed sub-shapes fail
//!   validation before any application state exists

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    ApplicationConfig, ComposeOptions, Manifest, MiddlewareEntry, MiddlewareShape, RouteEntry,
    RouterEntry, RouterOptions, ViewsConfig,
};
pub use validation::{validate, ValidationError};
