//! Application composition.
//!
//! # Data Flow
//! ```text
//! Manifest + ComposeOptions
//!     → validation (synchronous, raised at call time)
//!     → settings phase: middleware chain, locals, views, routes
//!     → router phase: resolve, register scoped middleware, mount in order
//!     → Application
//! ```
//!
//! # Design Decisions
//! - One synchronous core; the callback and deferred surfaces are thin
//!   adapters over it, never duplicated logic
//! - Argument and validation errors are returned synchronously even for the
//!   asynchronous calling conventions; assembly errors travel through the
//!   callback/deferred channel
//! - Composition is one-shot and deterministic: no retries, and no partial
//!   application escapes on failure

pub mod call;
pub mod composer;
pub mod paths;
pub mod registrar;

pub use call::{CallArg, CompletionCallback, ComposeOutcome};
pub use composer::Composer;
pub use registrar::register_middleware;
