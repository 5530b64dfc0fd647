//! Rule to forbid a module importing itself.
//!
//! A self-import is almost always a refactoring leftover: the specifier
//! once pointed elsewhere, or an alias now resolves back onto the file
//! that uses it. At runtime it yields half-initialized bindings.

use modlint_core::{FileContext, ImportRule, Location, SourceAnalysis, Suggestion, Violation};
use modlint_graph::{GraphContext, ModuleId, Resolution};

/// Rule code for no-self-import.
pub const CODE: &str = "ML002";

/// Rule name for no-self-import.
pub const NAME: &str = "no-self-import";

/// Forbids imports that resolve back to the importing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelfImport;

impl NoSelfImport {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImportRule for NoSelfImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids a module importing itself"
    }

    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        graph: &mut GraphContext,
    ) -> Vec<Violation> {
        let own_id = ModuleId::internal(ctx.path);
        let mut violations = Vec::new();

        for import in &analysis.imports {
            let Resolution::Module(target) = graph.resolve(ctx.path, &import.specifier) else {
                continue;
            };
            if target != own_id {
                continue;
            }

            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::new(ctx.relative_path.clone(), import.line, import.column + 1),
                    format!("'{}' resolves to the importing module itself", import.specifier),
                )
                .with_suggestion(Suggestion::new("remove the import or point it at the intended module")),
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

    #[test]
    fn flags_import_resolving_to_itself() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.ts"), "export {};\n").unwrap();

        let rule = NoSelfImport::new();
        let mut graph = GraphContext::new(ResolverConfig::default());
        let path = src.join("a.ts");
        let ctx = FileContext::new(&path, tmp.path());

        // Both the plain and the dotted spelling point back at a.ts.
        let violations = rule.check(&ctx, &analysis(&["./a", "././a.ts"]), &mut graph);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].code, CODE);
    }

    #[test]
    fn sibling_import_is_fine() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.ts"), "export {};\n").unwrap();
        fs::write(src.join("b.ts"), "export {};\n").unwrap();

        let rule = NoSelfImport::new();
        let mut graph = GraphContext::new(ResolverConfig::default());
        let path = src.join("a.ts");
        let ctx = FileContext::new(&path, tmp.path());

        assert!(rule.check(&ctx, &analysis(&["./b"]), &mut graph).is_empty());
    }

    #[test]
    fn external_and_unresolvable_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.ts"), "export {};\n").unwrap();

        let rule = NoSelfImport::new();
        let mut graph = GraphContext::new(ResolverConfig::default());
        let path = src.join("a.ts");
        let ctx = FileContext::new(&path, tmp.path());

        assert!(rule
            .check(&ctx, &analysis(&["lodash", "./missing"]), &mut graph)
            .is_empty());
    }
}
