//! Ownership classification: maps modules to named groups.
//!
//! Groups are matched against project-root-relative paths using glob-like
//! patterns compiled once into anchored regexes. External packages are
//! matched only against each group's public-package prefixes.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::module_id::ModuleId;

/// Error raised while compiling an ownership path pattern.
///
/// Pattern errors are configuration errors: they must surface at load
/// time, since silently dropping a boundary pattern would turn a policy
/// into a false negative.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Pattern was empty.
    #[error("ownership pattern must not be empty")]
    Empty,

    /// The translated regex failed to compile.
    #[error("invalid ownership pattern `{pattern}`: {reason}")]
    Invalid {
        /// The offending pattern.
        pattern: String,
        /// Why it failed.
        reason: String,
    },
}

/// A compiled path pattern.
///
/// `**` matches across path separators, `*` stays within one segment.
/// The pattern is anchored: it must match the whole relative path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    compiled: Regex,
}

impl PathPattern {
    /// Compiles a glob-like pattern.
    ///
    /// # Errors
    ///
    /// Returns an error for empty patterns or patterns whose translated
    /// regex does not compile.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let compiled = Regex::new(&translate(pattern)).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests a root-relative path against the pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.compiled.is_match(path)
    }

    /// The pattern as written in configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Translates a glob pattern into an anchored regex.
fn translate(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'*') {
                chars.next();
                re.push_str(".*");
            } else {
                re.push_str("[^/]*");
            }
        } else {
            re.push_str(&regex::escape(&c.to_string()));
        }
    }
    re.push('$');
    re
}

/// A named ownership group ("team" or "domain").
#[derive(Debug, Clone)]
pub struct OwnershipGroup {
    name: String,
    patterns: Vec<PathPattern>,
    allowed_dependencies: Vec<String>,
    public_packages: Vec<String>,
}

impl OwnershipGroup {
    /// Creates a group.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        patterns: Vec<PathPattern>,
        allowed_dependencies: Vec<String>,
        public_packages: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            patterns,
            allowed_dependencies,
            public_packages,
        }
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of groups this group may depend on.
    #[must_use]
    pub fn allowed_dependencies(&self) -> &[String] {
        &self.allowed_dependencies
    }

    /// Package-name prefixes this group publishes for everyone.
    #[must_use]
    pub fn public_packages(&self) -> &[String] {
        &self.public_packages
    }

    fn contains_path(&self, relative: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(relative))
    }

    fn owns_package(&self, package: &str) -> bool {
        self.public_packages.iter().any(|p| package.starts_with(p.as_str()))
    }
}

/// Maps module identities to ownership groups.
///
/// Groups are evaluated in configuration order and the first match wins;
/// this order must be preserved exactly for deterministic results.
#[derive(Debug, Clone)]
pub struct OwnershipClassifier {
    root: PathBuf,
    groups: Vec<OwnershipGroup>,
    shared: Vec<PathPattern>,
}

impl OwnershipClassifier {
    /// Creates a classifier rooted at the project directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, groups: Vec<OwnershipGroup>, shared: Vec<PathPattern>) -> Self {
        Self {
            root: root.into(),
            groups,
            shared,
        }
    }

    /// Resolves which group owns a module, if any.
    ///
    /// Internal modules match by root-relative path against each group's
    /// patterns; external modules match only public-package prefixes.
    /// An unmatched module is unclassified and exempt from boundary
    /// enforcement.
    #[must_use]
    pub fn classify(&self, id: &ModuleId) -> Option<&OwnershipGroup> {
        match id {
            ModuleId::Internal(path) => {
                let relative = self.relative(path);
                self.groups.iter().find(|g| g.contains_path(&relative))
            }
            ModuleId::External(package) => self.groups.iter().find(|g| g.owns_package(package)),
        }
    }

    /// Whether a module sits on a shared path exempt from all boundary checks.
    #[must_use]
    pub fn is_shared(&self, id: &ModuleId) -> bool {
        match id {
            ModuleId::Internal(path) => {
                let relative = self.relative(path);
                self.shared.iter().any(|p| p.matches(&relative))
            }
            ModuleId::External(_) => false,
        }
    }

    /// All configured groups, in configuration order.
    #[must_use]
    pub fn groups(&self) -> &[OwnershipGroup] {
        &self.groups
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}
