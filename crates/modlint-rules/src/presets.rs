//! Rule presets for common configurations.

use std::path::Path;

use modlint_core::{Config, ConfigError, ImportRuleBox};

use crate::{DependencyDirection, NoBarrelFile, NoCircularImports, NoSelfImport, TeamBoundaries};

/// Preset configurations for modlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    #[default]
    Recommended,
    /// Strict rules for maximum enforcement.
    Strict,
}

impl Preset {
    /// Resolves a preset by name; unknown names fall back to recommended.
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("strict") => Self::Strict,
            Some("recommended") | None => Self::Recommended,
            Some(other) => {
                tracing::warn!("unknown preset '{other}', using recommended");
                Self::Recommended
            }
        }
    }

    /// Returns the config-free rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<ImportRuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `no-circular-imports` (ML001)
/// - `no-self-import` (ML002)
#[must_use]
pub fn recommended_rules() -> Vec<ImportRuleBox> {
    vec![Box::new(NoCircularImports::new()), Box::new(NoSelfImport::new())]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - `no-barrel-file` (ML005)
#[must_use]
pub fn strict_rules() -> Vec<ImportRuleBox> {
    vec![
        Box::new(NoCircularImports::new()),
        Box::new(NoSelfImport::new()),
        Box::new(NoBarrelFile::new()),
    ]
}

/// Returns one instance of every rule, for listing purposes.
///
/// The boundary rules are built with empty classifiers; they are inert
/// without configuration but still expose code, name, and description.
#[must_use]
pub fn all_rules() -> Vec<ImportRuleBox> {
    use modlint_graph::{BoundaryPolicy, OwnershipClassifier};

    let empty = || OwnershipClassifier::new(".", vec![], vec![]);
    vec![
        Box::new(NoCircularImports::new()),
        Box::new(NoSelfImport::new()),
        Box::new(TeamBoundaries::new(empty(), BoundaryPolicy::default(), true)),
        Box::new(DependencyDirection::new(empty(), BoundaryPolicy::default())),
        Box::new(NoBarrelFile::new()),
    ]
}

/// Assembles the full rule set for one lint run.
///
/// Starts from the preset (the config's `preset` key unless overridden by
/// `preset`), adds `no-barrel-file` when its options table is present, and
/// adds the boundary rules when `[[teams]]` / `[[layers]]` are configured.
/// Per-rule `enabled = false` still disables any of them at run time.
///
/// # Errors
///
/// Returns an error if a configured path pattern does not compile.
pub fn assemble_rules(
    preset: Option<Preset>,
    config: &Config,
    root: &Path,
) -> Result<Vec<ImportRuleBox>, ConfigError> {
    let preset = preset.unwrap_or_else(|| Preset::from_name(config.preset.as_deref()));
    let mut rules = preset.rules();

    let barrel_configured = config.rule_config("no-barrel-file").is_some();
    let barrel_in_preset = preset == Preset::Strict;
    if barrel_configured {
        let configured = NoBarrelFile::from_config(config.rule_config("no-barrel-file"));
        if barrel_in_preset {
            // Replace the default-option instance with the configured one.
            rules.retain(|r| r.name() != "no-barrel-file");
        }
        rules.push(Box::new(configured));
    }

    if !config.teams.is_empty() {
        rules.push(Box::new(TeamBoundaries::from_config(config, root)?));
    }
    if !config.layers.is_empty() {
        rules.push(Box::new(DependencyDirection::from_config(config, root)?));
    }

    Ok(rules)
}
