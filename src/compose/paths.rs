//! Relative path and identifier resolution.

use std::path::{Component, Path, PathBuf};

/// Resolve a path or module identifier against an optional base directory.
///
/// Only `.`-prefixed values are joined; everything else is used verbatim.
/// The join is lexical: `.` segments collapse and `..` pops, so
/// `/srv/app` + `./views` yields `/srv/app/views` without touching the
/// filesystem.
pub(crate) fn resolve_relative(relative_to: Option<&str>, path: &str) -> String {
    match relative_to {
        Some(base) if path.starts_with('.') => join(base, path),
        _ => path.to_string(),
    }
}

fn join(base: &str, relative: &str) -> String {
    let mut joined = PathBuf::from(base);
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                joined.pop();
            }
            Component::Normal(segment) => joined.push(segment),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    joined.to_string_lossy().into_owned()
}
