//! Rule to keep imports pointing down the configured layer order.
//!
//! # Rationale
//!
//! Layered architectures only stay layered if the dependency arrows all
//! point the same way. The `[[layers]]` config lists layers from the top
//! down; a module may import from its own layer or any layer below it,
//! never from one above.

use std::path::Path;

use modlint_core::{
    Config, ConfigError, FileContext, ImportRule, Location, SourceAnalysis, Suggestion, Violation,
};
use modlint_graph::{BoundaryPolicy, GraphContext, ModuleId, OwnershipClassifier, Resolution};

use crate::display_module;

/// Rule code for dependency-direction.
pub const CODE: &str = "ML004";

/// Rule name for dependency-direction.
pub const NAME: &str = "dependency-direction";

/// Enforces that imports never point up the layer order.
#[derive(Debug, Clone)]
pub struct DependencyDirection {
    classifier: OwnershipClassifier,
    policy: BoundaryPolicy,
}

impl DependencyDirection {
    /// Creates a rule from a layer classifier.
    ///
    /// The classifier encodes the direction: each layer's allow-list is
    /// exactly the layers configured after it.
    #[must_use]
    pub fn new(classifier: OwnershipClassifier, policy: BoundaryPolicy) -> Self {
        Self { classifier, policy }
    }

    /// Creates a rule from the `[[layers]]` config section.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured path pattern does not compile.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.layer_classifier(root)?,
            config.boundary_policy(),
        ))
    }
}

impl ImportRule for DependencyDirection {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Keeps imports pointing down the configured layer order"
    }

    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        graph: &mut GraphContext,
    ) -> Vec<Violation> {
        let from = ModuleId::internal(ctx.path);

        let Some(source_layer) = self.classifier.classify(&from) else {
            return Vec::new();
        };

        let mut violations = Vec::new();

        for import in &analysis.imports {
            let Resolution::Module(target) = graph.resolve(ctx.path, &import.specifier) else {
                continue;
            };
            graph.record_edge(from.clone(), target.clone(), import.kind, &import.specifier);

            if target.is_external() {
                continue;
            }

            let Some(target_layer) = self.classifier.classify(&target) else {
                continue;
            };
            if self
                .policy
                .is_allowed(source_layer, Some(target_layer), import.kind)
            {
                continue;
            }

            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::new(ctx.relative_path.clone(), import.line, import.column + 1),
                    format!(
                        "'{}' -> '{}' points against the layer order ({})",
                        source_layer.name(),
                        target_layer.name(),
                        display_module(&target, ctx.root),
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "invert the dependency, or move the shared code into '{}' or below",
                    source_layer.name(),
                ))),
            );
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlint_core::{ImportMechanism, ImportRecord};
    use modlint_graph::{ImportKind, ResolverConfig};
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in [
            "src/app/page.ts",
            "src/services/orders.ts",
            "src/domain/order.ts",
            "src/util/fmt.ts",
        ] {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "export {};\n").unwrap();
        }
        tmp
    }

    fn config() -> Config {
        Config::parse(
            r#"
[[layers]]
name = "app"
paths = ["src/app/**"]

[[layers]]
name = "services"
paths = ["src/services/**"]

[[layers]]
name = "domain"
paths = ["src/domain/**"]
"#,
        )
        .expect("config parse failed")
    }

    fn analysis(specs: &[&str]) -> SourceAnalysis {
        SourceAnalysis {
            file_path: std::path::PathBuf::new(),
            imports: specs
                .iter()
                .enumerate()
                .map(|(i, s)| ImportRecord {
                    specifier: (*s).to_string(),
                    kind: ImportKind::Value,
                    mechanism: ImportMechanism::EsmImport,
                    line: i + 1,
                    column: 0,
                })
                .collect(),
            local_exports: 0,
        }
    }

    fn check(tmp: &TempDir, file: &str, specs: &[&str]) -> Vec<Violation> {
        let cfg = config();
        let rule = DependencyDirection::from_config(&cfg, tmp.path()).expect("rule build failed");
        let mut graph = GraphContext::new(ResolverConfig::default());
        let path = tmp.path().join(file);
        let ctx = FileContext::new(&path, tmp.path());
        rule.check(&ctx, &analysis(specs), &mut graph)
    }

    #[test]
    fn downward_import_is_allowed() {
        let tmp = project();
        assert!(check(&tmp, "src/app/page.ts", &["../services/orders"]).is_empty());
        assert!(check(&tmp, "src/app/page.ts", &["../domain/order"]).is_empty());
        assert!(check(&tmp, "src/services/orders.ts", &["../domain/order"]).is_empty());
    }

    #[test]
    fn same_layer_import_is_allowed() {
        let tmp = project();
        assert!(check(&tmp, "src/domain/order.ts", &["./order"]).is_empty());
    }

    #[test]
    fn upward_import_is_denied() {
        let tmp = project();
        let violations = check(&tmp, "src/domain/order.ts", &["../services/orders"]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'domain' -> 'services'"));
    }

    #[test]
    fn skipping_a_layer_upward_is_denied() {
        let tmp = project();
        let violations = check(&tmp, "src/domain/order.ts", &["../app/page"]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'domain' -> 'app'"));
    }

    #[test]
    fn unlayered_modules_are_exempt() {
        let tmp = project();
        // util is in no layer, in either direction.
        assert!(check(&tmp, "src/domain/order.ts", &["../util/fmt"]).is_empty());
        assert!(check(&tmp, "src/util/fmt.ts", &["../app/page"]).is_empty());
    }

    #[test]
    fn external_imports_are_exempt() {
        let tmp = project();
        assert!(check(&tmp, "src/domain/order.ts", &["lodash"]).is_empty());
    }
}
