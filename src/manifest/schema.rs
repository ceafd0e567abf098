//! Manifest schema definitions.
//!
//! Typed mirror of the manifest document. Data fields deserialize with Serde;
//! callable fields (`custom`, route guards and handlers) are supplied
//! programmatically and never appear in serialized documents.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::engine::{HandlerFn, MiddlewareFn};

/// Root configuration document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Application composition. Required; validated, not type-enforced, so a
    /// missing section reports a validation error rather than a parse error.
    pub application: Option<ApplicationConfig>,
}

/// Application-level composition settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfig {
    /// Key/value data merged into the application's locals map.
    #[serde(default)]
    pub locals: Map<String, Value>,

    /// View-engine selection and templates directory.
    #[serde(default)]
    pub views: Option<ViewsConfig>,

    /// Ordered application-level middleware chain.
    #[serde(default)]
    pub middleware: Vec<MiddlewareEntry>,

    /// Ordered direct route registrations.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,

    /// Ordered sub-router mounts.
    #[serde(default)]
    pub routers: Vec<RouterEntry>,
}

/// View subsystem configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewsConfig {
    /// View-engine name, stored verbatim under the `view engine` setting.
    #[serde(default)]
    pub engine: Option<String>,

    /// Templates directory; resolved against `relativeTo` when it starts
    /// with `.`.
    #[serde(default)]
    pub path: Option<String>,
}

/// One middleware chain entry. Three mutually exclusive shapes are
/// recognized; see [`MiddlewareEntry::shape`].
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MiddlewareEntry {
    /// Resolvable module identifier.
    #[serde(default)]
    pub module: Option<String>,

    /// Named export on the module to invoke as the factory.
    #[serde(default)]
    pub use_function: Option<String>,

    /// Ordered factory arguments.
    #[serde(default)]
    pub args: Option<Vec<Value>>,

    /// Directly supplied middleware callable.
    #[serde(skip)]
    pub custom: Option<MiddlewareFn>,
}

/// Discriminant over the recognized middleware-entry shapes, computed once
/// so precedence is a single match rather than implicit field probing.
pub enum MiddlewareShape<'a> {
    /// `module` + `useFunction`: invoke the named export with args spread.
    Factory {
        module: &'a str,
        function: &'a str,
        args: &'a [Value],
    },
    /// `module` only: invoke the default export with the collapsed argument.
    Constructor {
        module: &'a str,
        args: Option<&'a [Value]>,
    },
    /// `custom` only: register the supplied callable directly.
    Custom(&'a MiddlewareFn),
    /// None of the above; skipped without error.
    Unrecognized,
}

impl MiddlewareEntry {
    /// Compute the entry's shape. Precedence when fields overlap:
    /// module+useFunction, then module-only, then custom.
    pub fn shape(&self) -> MiddlewareShape<'_> {
        match (&self.module, &self.use_function, &self.custom) {
            (Some(module), Some(function), _) => MiddlewareShape::Factory {
                module,
                function,
                args: self.args.as_deref().unwrap_or(&[]),
            },
            (Some(module), None, _) => MiddlewareShape::Constructor {
                module,
                args: self.args.as_deref(),
            },
            (None, _, Some(custom)) => MiddlewareShape::Custom(custom),
            _ => MiddlewareShape::Unrecognized,
        }
    }
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry")
            .field("module", &self.module)
            .field("use_function", &self.use_function)
            .field("args", &self.args)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// One direct route registration: method, path and a handler chain. The
/// guards run in order before the terminal handler.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// HTTP method name, case-insensitive.
    #[serde(default)]
    pub method: Option<String>,

    /// Route path; must begin with `/`.
    #[serde(default)]
    pub path: Option<String>,

    /// Middleware-shaped callables run before the handler, in order.
    #[serde(skip)]
    pub guards: Vec<MiddlewareFn>,

    /// Terminal handler.
    #[serde(skip)]
    pub handler: Option<HandlerFn>,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("guards", &self.guards.len())
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// One sub-router mount.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterEntry {
    /// Resolvable module identifier exporting a router.
    #[serde(default)]
    pub router: String,

    /// Middleware scoped to this router, registered before mounting.
    #[serde(default)]
    pub middleware: Vec<MiddlewareEntry>,

    #[serde(default)]
    pub options: Option<RouterOptions>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterOptions {
    /// Mount path prefix; absent means unprefixed (global) mounting.
    #[serde(default)]
    pub path: Option<String>,
}

/// Options accepted by the composition entry points.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ComposeOptions {
    /// Base directory for resolving `.`-prefixed paths and identifiers.
    #[serde(default)]
    pub relative_to: Option<String>,
}
