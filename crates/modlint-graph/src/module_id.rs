//! Canonical module identity.

use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical identity of a resolved module.
///
/// Two specifiers that resolve to the same file or package produce equal
/// `ModuleId`s, so the id is usable directly as a graph key. The `Ord`
/// implementation gives cycle paths a stable rotation point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    /// A project file, identified by its normalized absolute path.
    Internal(PathBuf),
    /// A third-party package, identified by its leading package segment
    /// (e.g. `lodash`, `@scope/name`). External modules are graph leaves.
    External(String),
}

impl ModuleId {
    /// Creates an internal module id from a path.
    ///
    /// The caller is responsible for normalization; the resolver always
    /// hands out cleaned absolute paths.
    #[must_use]
    pub fn internal(path: impl Into<PathBuf>) -> Self {
        Self::Internal(path.into())
    }

    /// Creates an external module id from a bare specifier.
    ///
    /// Only the leading package segment is kept, respecting scoped-package
    /// syntax: `lodash/fp` becomes `lodash`, `@scope/pkg/sub` becomes
    /// `@scope/pkg`.
    #[must_use]
    pub fn external(specifier: &str) -> Self {
        Self::External(package_segment(specifier))
    }

    /// Returns true for external (third-party package) modules.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Returns the filesystem path for internal modules.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Internal(p) => Some(p),
            Self::External(_) => None,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(p) => write!(f, "{}", p.display()),
            Self::External(name) => write!(f, "{name}"),
        }
    }
}

/// Extracts the leading package segment of a bare specifier.
fn package_segment(specifier: &str) -> String {
    let mut parts = specifier.split('/');
    let first = parts.next().unwrap_or(specifier);
    if first.starts_with('@') {
        match parts.next() {
            Some(second) => format!("{first}/{second}"),
            None => first.to_string(),
        }
    } else {
        first.to_string()
    }
}
