//! Configuration types for modlint.
//!
//! Configuration is TOML; structural problems (unknown team references,
//! malformed path patterns) fail at load time with the offending field
//! named. Silently dropping a boundary pattern would turn a policy into
//! a false negative, so nothing here degrades quietly.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use modlint_graph::{
    BoundaryPolicy, OwnershipClassifier, OwnershipGroup, PathPattern, PatternError, ResolverConfig,
};

use crate::types::Severity;

/// Top-level configuration for modlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for test failure (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Resolver configuration.
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Team ownership definitions, in priority order (first match wins).
    #[serde(default)]
    pub teams: Vec<TeamConfig>,

    /// Layer definitions for dependency-direction enforcement; order is
    /// the allowed direction (a layer may depend on layers listed after it).
    #[serde(default)]
    pub layers: Vec<LayerConfig>,

    /// Boundary enforcement options.
    #[serde(default)]
    pub boundaries: BoundariesConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-references and pattern syntax.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut team_names: HashSet<&str> = HashSet::new();
        for (i, team) in self.teams.iter().enumerate() {
            if team.name.is_empty() {
                return Err(ConfigError::Validation(format!("teams[{i}].name is empty")));
            }
            if !team_names.insert(&team.name) {
                return Err(ConfigError::Validation(format!(
                    "teams[{i}]: duplicate team name '{}'",
                    team.name
                )));
            }
            if team.paths.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "teams[{i}] ('{}'): paths must not be empty",
                    team.name
                )));
            }
            compile_all(&team.paths, &format!("teams[{i}].paths"))?;
        }
        for (i, team) in self.teams.iter().enumerate() {
            for dep in &team.allowed_dependencies {
                if !team_names.contains(dep.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "teams[{i}].allowed_dependencies: unknown team '{dep}'"
                    )));
                }
            }
        }

        let mut layer_names: HashSet<&str> = HashSet::new();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.name.is_empty() {
                return Err(ConfigError::Validation(format!("layers[{i}].name is empty")));
            }
            if !layer_names.insert(&layer.name) {
                return Err(ConfigError::Validation(format!(
                    "layers[{i}]: duplicate layer name '{}'",
                    layer.name
                )));
            }
            if layer.paths.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "layers[{i}] ('{}'): paths must not be empty",
                    layer.name
                )));
            }
            compile_all(&layer.paths, &format!("layers[{i}].paths"))?;
        }

        compile_all(&self.boundaries.shared_paths, "boundaries.shared_paths")?;

        if let Some(fail_on) = &self.fail_on {
            parse_severity(fail_on)
                .ok_or_else(|| ConfigError::Validation(format!("fail_on: unknown severity '{fail_on}'")))?;
        }

        Ok(())
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// The `fail_on` threshold as a severity (default: error).
    #[must_use]
    pub fn fail_on_severity(&self) -> Severity {
        self.fail_on
            .as_deref()
            .and_then(parse_severity)
            .unwrap_or(Severity::Error)
    }

    /// Builds the resolver configuration, rooting alias bases at `root`.
    #[must_use]
    pub fn resolver_config(&self, root: &Path) -> ResolverConfig {
        ResolverConfig {
            extensions: self.resolver.extensions.clone(),
            index_suffixes: self.resolver.index_suffixes.clone(),
            aliases: self
                .resolver
                .aliases
                .iter()
                .map(|a| (a.prefix.clone(), root.join(&a.base)))
                .collect(),
        }
    }

    /// Builds the team ownership classifier.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed path patterns (also caught earlier
    /// by [`Config::validate`]).
    pub fn team_classifier(&self, root: &Path) -> Result<OwnershipClassifier, ConfigError> {
        let mut groups = Vec::with_capacity(self.teams.len());
        for (i, team) in self.teams.iter().enumerate() {
            groups.push(OwnershipGroup::new(
                team.name.clone(),
                compile_all(&team.paths, &format!("teams[{i}].paths"))?,
                team.allowed_dependencies.clone(),
                team.public_packages.clone(),
            ));
        }
        let shared = compile_all(&self.boundaries.shared_paths, "boundaries.shared_paths")?;
        Ok(OwnershipClassifier::new(root, groups, shared))
    }

    /// Builds a classifier expressing the layer ordering.
    ///
    /// Each layer's allow-list is every layer that follows it, which turns
    /// "imports only point sideways or down" into an ordinary boundary
    /// policy query.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed path patterns.
    pub fn layer_classifier(&self, root: &Path) -> Result<OwnershipClassifier, ConfigError> {
        let mut groups = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            let below: Vec<String> = self.layers[i + 1..].iter().map(|l| l.name.clone()).collect();
            groups.push(OwnershipGroup::new(
                layer.name.clone(),
                compile_all(&layer.paths, &format!("layers[{i}].paths"))?,
                below,
                vec![],
            ));
        }
        Ok(OwnershipClassifier::new(root, groups, vec![]))
    }

    /// Builds the boundary policy from the `[boundaries]` section.
    #[must_use]
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        BoundaryPolicy::new(self.boundaries.allow_type_imports)
    }
}

fn compile_all(patterns: &[String], context: &str) -> Result<Vec<PathPattern>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(j, p)| {
            PathPattern::new(p).map_err(|source| ConfigError::Pattern {
                context: format!("{context}[{j}]"),
                source,
            })
        })
        .collect()
}

fn parse_severity(value: &str) -> Option<Severity> {
    match value {
        "error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            respect_gitignore: true,
        }
    }
}

/// Resolver configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Candidate extensions probed, in order, for extensionless specifiers.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Index-file suffixes probed after the plain extensions.
    #[serde(default = "default_index_suffixes")]
    pub index_suffixes: Vec<String>,

    /// Alias rewrites, checked in order.
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            index_suffixes: default_index_suffixes(),
            aliases: Vec::new(),
        }
    }
}

/// One alias rewrite: a specifier prefix mapped to a base directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Specifier prefix (e.g., `"@/"`).
    pub prefix: String,
    /// Base directory relative to the project root (e.g., `"src"`).
    pub base: PathBuf,
}

/// A team ownership definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Team identifier (e.g., `"payments"`).
    pub name: String,
    /// Path patterns belonging to this team.
    pub paths: Vec<String>,
    /// Teams this team is allowed to import from.
    #[serde(default)]
    pub allowed_dependencies: Vec<String>,
    /// Package-name prefixes this team publishes for everyone.
    #[serde(default)]
    pub public_packages: Vec<String>,
}

/// An architecture layer for dependency-direction enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer name (e.g., `"app"`, `"domain"`).
    pub name: String,
    /// Path patterns belonging to this layer.
    pub paths: Vec<String>,
}

/// Boundary enforcement options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundariesConfig {
    /// Paths anyone may import from, exempt from all boundary checks.
    #[serde(default)]
    pub shared_paths: Vec<String>,

    /// Allow type-only imports across any boundary.
    #[serde(default)]
    pub allow_type_imports: bool,

    /// Treat external packages as always importable.
    #[serde(default = "default_true")]
    pub allow_external_packages: bool,
}

impl Default for BoundariesConfig {
    fn default() -> Self {
        Self {
            shared_paths: Vec::new(),
            allow_type_imports: false,
            allow_external_packages: true,
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a float option with a default value.
    #[must_use]
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_float)
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),

    /// A path pattern failed to compile.
    #[error("{context}: {source}")]
    Pattern {
        /// Field path of the offending pattern.
        context: String,
        /// The underlying pattern error.
        source: PatternError,
    },
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_excludes() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/build/**"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_extensions() -> Vec<String> {
    [".ts", ".tsx", ".js", ".jsx"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_index_suffixes() -> Vec<String> {
    ["/index.ts", "/index.tsx", "/index.js", "/index.jsx"]
        .iter()
        .map(ToString::to_string)
        .collect()
}
