//! Builtin middleware modules.
//!
//! Ready-made registry entries for the concerns most manifests want wired:
//! request correlation, request logging and deadlines. Each submodule
//! exposes the middleware constructor plus a `module()` that packages it as
//! a resolvable registry module; `Registry::with_builtins` pre-registers all
//! three.

pub mod request_id;
pub mod timeout;
pub mod trace;

pub use request_id::request_id;
pub use timeout::timeout;
pub use trace::trace;
