//! Runner for `cargo test` integration.
//!
//! [`check`] lints the project's JS/TS sources and panics with a
//! formatted report when violations at or above the `fail_on` threshold
//! are found, so a plain `#[test]` function turns import boundaries into
//! a CI gate.

use std::path::{Path, PathBuf};

use modlint_core::{Analyzer, Config, Severity};
use modlint_rules::{assemble_rules, Preset};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["modlint.toml", ".modlint.toml"];

/// Options for [`check_with`].
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Preset name; overrides the config file's `preset`.
    pub preset: Option<String>,
    /// Explicit config file path (relative paths resolve against the root).
    pub config: Option<PathBuf>,
    /// Severity threshold; overrides the config file's `fail_on`.
    pub fail_on: Option<String>,
    /// Project root; overrides workspace-root discovery.
    pub root: Option<PathBuf>,
}

/// Runs modlint with defaults as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if violations at or above the
/// configured `fail_on` severity are found, or if setup fails.
pub fn check() {
    check_with(CheckOptions::default());
}

/// Runs modlint with explicit options as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if violations at or above `fail_on`
/// severity are found, or if setup fails.
pub fn check_with(options: CheckOptions) {
    let root = options.root.unwrap_or_else(find_project_root);
    let content = read_config_content(&root, options.config.as_deref());
    let config = parse_config(&content);

    let preset = resolve_preset(options.preset.as_deref(), &config);
    let fail_on = resolve_fail_on(options.fail_on.as_deref(), &config);

    let rules = assemble_rules(Some(preset), &config, &root)
        .unwrap_or_else(|e| panic!("modlint: invalid boundary config: {e}"));

    let mut builder = Analyzer::builder().root(&root).config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder
        .build()
        .unwrap_or_else(|e| panic!("modlint: failed to build analyzer: {e}"));

    let result = analyzer
        .analyze()
        .unwrap_or_else(|e| panic!("modlint: analysis failed: {e}"));

    if result.has_violations_at(fail_on) {
        let report = result.format_test_report(fail_on);
        panic!("{report}");
    }
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&Path>) -> String {
    if let Some(path) = explicit_path {
        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "modlint: failed to read config from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!("modlint: failed to read config from {}: {e}", path.display());
            });
        }
    }

    String::new()
}

/// Parses a `Config` from TOML content.
fn parse_config(content: &str) -> Config {
    if content.is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("modlint: failed to parse config: {e}");
    })
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // No workspace root found — use manifest dir itself
        return manifest_path;
    }

    // Fallback: current directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolves the effective preset from options > config > default.
fn resolve_preset(option: Option<&str>, config: &Config) -> Preset {
    let name = option.or(config.preset.as_deref()).unwrap_or("recommended");

    match name {
        "recommended" => Preset::Recommended,
        "strict" => Preset::Strict,
        other => panic!("modlint: unknown preset `{other}`. Valid presets: recommended, strict"),
    }
}

/// Resolves the effective `fail_on` severity from options > config > default.
fn resolve_fail_on(option: Option<&str>, config: &Config) -> Severity {
    let name = option.or(config.fail_on.as_deref()).unwrap_or("error");

    match name {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        "info" => Severity::Info,
        other => {
            panic!("modlint: unknown severity `{other}`. Valid values: error, warning, info")
        }
    }
}
