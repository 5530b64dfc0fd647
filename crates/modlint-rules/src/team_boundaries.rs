//! Rule to restrict cross-team imports to an explicit allow-list.
//!
//! # Rationale
//!
//! In large codebases, uncontrolled imports couple teams to each other's
//! internals: refactors ripple across ownership boundaries and CI fans
//! out over every accidental dependent. This rule makes cross-team
//! dependencies explicit: a team may only import from teams named in
//! its `allowed_dependencies`.
//!
//! Files owned by no team, shared paths, and (by default) external
//! packages are exempt.

use std::path::Path;

use modlint_core::{
    Config, ConfigError, FileContext, ImportRule, Location, SourceAnalysis, Suggestion, Violation,
};
use modlint_graph::{BoundaryPolicy, GraphContext, ModuleId, OwnershipClassifier, Resolution};

use crate::display_module;

/// Rule code for team-boundaries.
pub const CODE: &str = "ML003";

/// Rule name for team-boundaries.
pub const NAME: &str = "team-boundaries";

/// Restricts cross-team imports to each team's allow-list.
#[derive(Debug, Clone)]
pub struct TeamBoundaries {
    classifier: OwnershipClassifier,
    policy: BoundaryPolicy,
    allow_external_packages: bool,
}

impl TeamBoundaries {
    /// Creates a rule from a classifier and policy.
    #[must_use]
    pub fn new(
        classifier: OwnershipClassifier,
        policy: BoundaryPolicy,
        allow_external_packages: bool,
    ) -> Self {
        Self {
            classifier,
            policy,
            allow_external_packages,
        }
    }

    /// Creates a rule from the `[[teams]]` and `[boundaries]` config sections.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured path pattern does not compile.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.team_classifier(root)?,
            config.boundary_policy(),
            config.boundaries.allow_external_packages,
        ))
    }
}

impl ImportRule for TeamBoundaries {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts cross-team imports to an explicit allow-list"
    }

    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        graph: &mut GraphContext,
    ) -> Vec<Violation> {
        let from = ModuleId::internal(ctx.path);

        // A file owned by no team is unrestricted.
        let Some(source_team) = self.classifier.classify(&from) else {
            return Vec::new();
        };

        let mut violations = Vec::new();

        for import in &analysis.imports {
            let Resolution::Module(target) = graph.resolve(ctx.path, &import.specifier) else {
                continue;
            };
            graph.record_edge(from.clone(), target.clone(), import.kind, &import.specifier);

            if self.allow_external_packages && target.is_external() {
                continue;
            }
            if self.classifier.is_shared(&target) {
                continue;
            }

            let target_team = self.classifier.classify(&target);
            if self.policy.is_allowed(source_team, target_team, import.kind) {
                continue;
            }

            // is_allowed only denies when the target is classified.
            let target_name = target_team.map_or("?", modlint_graph::OwnershipGroup::name);
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::new(ctx.relative_path.clone(), import.line, import.column + 1),
                    format!(
                        "team '{}' may not import from team '{}' ({})",
                        source_team.name(),
                        target_name,
                        display_module(&target, ctx.root),
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "add '{target_name}' to allowed_dependencies of team '{}' in modlint.toml, \
                     or move the shared code to a shared path",
                    source_team.name(),
                ))),
            );
        }

        violations
    }
}
