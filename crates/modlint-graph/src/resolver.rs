//! Import specifier resolution.
//!
//! Maps `(importing file, specifier)` pairs to canonical [`ModuleId`]s.
//! Resolution is a pure function of its inputs plus filesystem state at
//! resolution time: the only side effect is `is_file` probing.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::module_id::ModuleId;

/// Outcome of resolving one import specifier.
///
/// `Unresolvable` is a normal terminal answer, not an error: callers
/// simply record no edge for that import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier resolved to a concrete module.
    Module(ModuleId),
    /// No module could be found for the specifier.
    Unresolvable,
}

impl Resolution {
    /// Returns the resolved module, if any.
    #[must_use]
    pub fn module(&self) -> Option<&ModuleId> {
        match self {
            Self::Module(id) => Some(id),
            Self::Unresolvable => None,
        }
    }
}

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Candidate extensions probed, in order, for extensionless paths.
    pub extensions: Vec<String>,
    /// Index-file suffixes probed after the plain extensions.
    pub index_suffixes: Vec<String>,
    /// Alias prefix → base directory rewrites, checked in configured order.
    pub aliases: Vec<(String, PathBuf)>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: [".ts", ".tsx", ".js", ".jsx"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            index_suffixes: ["/index.ts", "/index.tsx", "/index.js", "/index.jsx"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            aliases: Vec::new(),
        }
    }
}

/// Resolves import specifiers to canonical module identities.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver from configuration.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolves `specifier` as written in `importing_file`.
    ///
    /// - Alias prefixes are rewritten to their base directory, then treated
    ///   like relative paths.
    /// - Relative specifiers resolve against the importer's directory and
    ///   are lexically normalized. The path as written is accepted if it
    ///   names an existing file; otherwise the configured extension and
    ///   index suffixes are probed in order.
    /// - Absolute specifiers are normalized and returned without probing.
    /// - Anything else is a bare specifier and yields an external id from
    ///   its leading package segment.
    #[must_use]
    pub fn resolve(&self, importing_file: &Path, specifier: &str) -> Resolution {
        if let Some((prefix, base)) = self.matching_alias(specifier) {
            let rest = specifier[prefix.len()..].trim_start_matches('/');
            return self.resolve_file(base.join(rest));
        }

        if is_relative(specifier) {
            let dir = importing_file.parent().unwrap_or_else(|| Path::new("/"));
            return self.resolve_file(dir.join(specifier));
        }

        if Path::new(specifier).is_absolute() {
            return Resolution::Module(ModuleId::internal(PathBuf::from(specifier).clean()));
        }

        Resolution::Module(ModuleId::external(specifier))
    }

    /// First configured alias whose prefix matches the specifier.
    fn matching_alias(&self, specifier: &str) -> Option<(&str, &Path)> {
        self.config
            .aliases
            .iter()
            .find(|(prefix, _)| specifier.starts_with(prefix.as_str()))
            .map(|(prefix, base)| (prefix.as_str(), base.as_path()))
    }

    /// Probes the filesystem for the file a normalized path refers to.
    fn resolve_file(&self, path: PathBuf) -> Resolution {
        let path = path.clean();

        if path.is_file() {
            return Resolution::Module(ModuleId::Internal(path));
        }

        let base = path.as_os_str().to_string_lossy().into_owned();
        for suffix in self
            .config
            .extensions
            .iter()
            .chain(self.config.index_suffixes.iter())
        {
            let candidate = PathBuf::from(format!("{base}{suffix}"));
            if candidate.is_file() {
                return Resolution::Module(ModuleId::Internal(candidate));
            }
        }

        tracing::debug!("unresolvable specifier at {}", path.display());
        Resolution::Unresolvable
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}
