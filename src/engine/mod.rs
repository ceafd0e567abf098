//! Application/router engine seam.
//!
//! # Data Flow
//! ```text
//! Composer output
//!     → Application (locals, settings, middleware chain, routes, mounts)
//!     → into_router()
//!     → axum::Router (chain applied outermost-first, declaration order
//!       equals execution order)
//! ```
//!
//! # Design Decisions
//! - The underlying engine is axum; this module only wraps it behind the
//!   narrow surface composition needs: a locals store, named settings, a
//!   `use` capability and prefixed/unprefixed mounting.
//! - Middleware units are `from_fn`-shaped callables `(Request, Next) ->
//!   Response`, registered in order and applied as layers at finalization.
//! - Chain and mount records stay introspectable so composition order is
//!   observable without driving traffic.

pub mod application;
pub mod middleware;
pub mod router;

pub use application::{Application, SETTING_VIEWS, SETTING_VIEW_ENGINE};
pub use middleware::{
    handler_fn, middleware_fn, BoxFuture, HandlerFn, Middleware, MiddlewareFn, MiddlewareTarget,
};
pub use router::SubRouter;
