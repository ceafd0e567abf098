//! Calling-convention adapters over the synchronous core.
//!
//! Three surfaces share one assembly path: a plain `Result` call, a
//! completion-callback call, and a deferred call whose future resolves to
//! the already-computed outcome. Argument and validation errors are always
//! returned synchronously so misconfiguration is caught at call time; only
//! assembly-phase errors travel through the callback or deferred channel.

use std::future::{ready, Ready};

use serde_json::Value;

use super::composer::Composer;
use crate::engine::Application;
use crate::error::ComposeError;
use crate::manifest::schema::{ComposeOptions, Manifest};
use crate::manifest::validation::{validate, ValidationError};
use crate::resolve::ModuleResolver;

/// Completion callback: receives exactly one terminal outcome.
pub type CompletionCallback = Box<dyn FnOnce(Result<Application, ComposeError>) + Send>;

/// A trailing argument of the dynamic compose surface.
pub enum CallArg {
    /// An options document (`{ "relativeTo": … }`).
    Options(Value),
    /// A completion callback.
    Callback(CompletionCallback),
}

/// Outcome of the dynamic compose surface.
#[derive(Debug)]
pub enum ComposeOutcome {
    /// No callback was supplied: a deferred result carrying the assembly
    /// outcome.
    Deferred(Ready<Result<Application, ComposeError>>),
    /// A callback was supplied and has received the outcome.
    Delivered,
}

impl<R: ModuleResolver> Composer<R> {
    /// Callback convention. Argument and validation errors are returned
    /// here and the callback is never invoked; assembly errors are delivered
    /// to the callback.
    pub fn compose_with<F>(
        &self,
        manifest: &Manifest,
        options: &ComposeOptions,
        callback: F,
    ) -> Result<(), ComposeError>
    where
        F: FnOnce(Result<Application, ComposeError>),
    {
        validate(manifest, options)?;
        callback(self.assemble(manifest, options));
        Ok(())
    }

    /// Deferred convention. The outer `Err` carries only the synchronously
    /// raised kinds; the future resolves to the assembly outcome.
    pub fn compose_deferred(
        &self,
        manifest: &Manifest,
        options: &ComposeOptions,
    ) -> Result<Ready<Result<Application, ComposeError>>, ComposeError> {
        validate(manifest, options)?;
        Ok(ready(self.assemble(manifest, options)))
    }

    /// Dynamic surface mirroring a variadic call: the manifest plus up to
    /// two trailing arguments, an optional options document followed by an
    /// optional callback. Any other trailing shape fails with an argument
    /// error before manifest validation begins.
    pub fn compose_call(
        &self,
        manifest: &Manifest,
        args: Vec<CallArg>,
    ) -> Result<ComposeOutcome, ComposeError> {
        if args.len() > 2 {
            return Err(ComposeError::Argument(format!(
                "expected at most 2 trailing arguments, got {}",
                args.len()
            )));
        }

        let mut options_doc = None;
        let mut callback = None;
        for arg in args {
            match arg {
                CallArg::Options(value) => {
                    if options_doc.is_some() {
                        return Err(ComposeError::Argument(
                            "duplicate options argument".to_string(),
                        ));
                    }
                    if callback.is_some() {
                        return Err(ComposeError::Argument(
                            "options must precede the callback".to_string(),
                        ));
                    }
                    options_doc = Some(value);
                }
                CallArg::Callback(f) => {
                    if callback.is_some() {
                        return Err(ComposeError::Argument(
                            "duplicate callback argument".to_string(),
                        ));
                    }
                    callback = Some(f);
                }
            }
        }

        let options = match options_doc {
            Some(value) => serde_json::from_value::<ComposeOptions>(value)
                .map_err(|e| ValidationError::Options(e.to_string()))?,
            None => ComposeOptions::default(),
        };

        validate(manifest, &options)?;

        match callback {
            Some(callback) => {
                callback(self.assemble(manifest, &options));
                Ok(ComposeOutcome::Delivered)
            }
            None => Ok(ComposeOutcome::Deferred(ready(self.assemble(manifest, &options)))),
        }
    }
}
