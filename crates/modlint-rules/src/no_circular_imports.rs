//! Rule to detect circular imports across files.
//!
//! # Rationale
//!
//! Import cycles make module initialization order fragile: a member of the
//! cycle can observe another member before its bindings exist, which
//! surfaces as `undefined` at runtime long after the edit that closed the
//! loop. Cycles also defeat incremental builds and test isolation.
//!
//! The rule feeds every resolved import into the shared dependency graph
//! and, after each recorded edge, asks whether the importing module now
//! sits on a cycle. Because the host visits files in no particular order,
//! a cycle is only reported once its closing edge has actually been seen.

use modlint_core::{FileContext, ImportRule, Label, Location, SourceAnalysis, Suggestion, Violation};
use modlint_graph::{CycleResult, GraphContext, ModuleId, Resolution};

use crate::display_module;

/// Rule code for no-circular-imports.
pub const CODE: &str = "ML001";

/// Rule name for no-circular-imports.
pub const NAME: &str = "no-circular-imports";

/// Detects import cycles spanning any number of files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCircularImports;

impl NoCircularImports {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn render_cycle(path: &[ModuleId], root: &std::path::Path) -> String {
        let mut names: Vec<String> = path.iter().map(|id| display_module(id, root)).collect();
        if let Some(first) = names.first().cloned() {
            names.push(first);
        }
        names.join(" -> ")
    }
}

impl ImportRule for NoCircularImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Detects circular imports across files"
    }

    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        graph: &mut GraphContext,
    ) -> Vec<Violation> {
        let from = ModuleId::internal(ctx.path);
        let mut violations = Vec::new();
        let mut reported: Vec<Vec<ModuleId>> = Vec::new();

        for import in &analysis.imports {
            let Resolution::Module(to) = graph.resolve(ctx.path, &import.specifier) else {
                continue;
            };
            graph.record_edge(from.clone(), to, import.kind, &import.specifier);

            let CycleResult::Cycle(cycle) = graph.cycle_through(&from) else {
                continue;
            };
            // Only report cycles this file is part of; other members report
            // their own membership when they are visited.
            if !cycle.contains(&from) || reported.contains(&cycle) {
                continue;
            }

            let mut violation = Violation::new(
                CODE,
                NAME,
                self.default_severity(),
                Location::new(ctx.relative_path.clone(), import.line, import.column + 1),
                format!(
                    "circular import detected: {}",
                    Self::render_cycle(&cycle, ctx.root)
                ),
            )
            .with_suggestion(Suggestion::new(
                "break the cycle by moving the shared pieces into a module \
                 that no cycle member imports back from",
            ));

            for member in cycle.iter().filter(|m| **m != from) {
                violation = violation.with_label(Label::new(
                    Location::new(display_module(member, ctx.root).into(), 1, 1),
                    "part of the cycle",
                ));
            }

            violations.push(violation);
            reported.push(cycle);
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlint_graph::ResolverConfig;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "export {};\n").unwrap();
        }
        tmp
    }

    fn imports(specs: &[&str]) -> SourceAnalysis {
        SourceAnalysis {
            file_path: PathBuf::new(),
            imports: specs
                .iter()
                .enumerate()
                .map(|(i, s)| modlint_core::ImportRecord {
                    specifier: (*s).to_string(),
                    kind: modlint_graph::ImportKind::Value,
                    mechanism: modlint_core::ImportMechanism::EsmImport,
                    line: i + 1,
                    column: 0,
                })
                .collect(),
            local_exports: 0,
        }
    }

    fn check(
        rule: &NoCircularImports,
        graph: &mut GraphContext,
        root: &std::path::Path,
        file: &str,
        specs: &[&str],
    ) -> Vec<Violation> {
        let path = root.join(file);
        let ctx = FileContext::new(&path, root);
        rule.check(&ctx, &imports(specs), graph)
    }

    #[test]
    fn chain_produces_no_violations() {
        let tmp = project(&["src/a.ts", "src/b.ts", "src/c.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        assert!(check(&rule, &mut graph, tmp.path(), "src/a.ts", &["./b"]).is_empty());
        assert!(check(&rule, &mut graph, tmp.path(), "src/b.ts", &["./c"]).is_empty());
        assert!(check(&rule, &mut graph, tmp.path(), "src/c.ts", &[]).is_empty());
    }

    #[test]
    fn cycle_is_reported_when_closing_file_is_visited() {
        let tmp = project(&["src/a.ts", "src/b.ts", "src/c.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        assert!(check(&rule, &mut graph, tmp.path(), "src/a.ts", &["./b"]).is_empty());
        assert!(check(&rule, &mut graph, tmp.path(), "src/b.ts", &["./c"]).is_empty());

        let violations = check(&rule, &mut graph, tmp.path(), "src/c.ts", &["./a"]);
        assert_eq!(violations.len(), 1);
        let message = &violations[0].message;
        assert!(message.contains("src/a.ts"), "message: {message}");
        assert!(message.contains("src/b.ts"), "message: {message}");
        assert!(message.contains("src/c.ts"), "message: {message}");
        // Two other members are labeled.
        assert_eq!(violations[0].labels.len(), 2);
    }

    #[test]
    fn self_import_is_a_cycle_of_one() {
        let tmp = project(&["src/a.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        let violations = check(&rule, &mut graph, tmp.path(), "src/a.ts", &["./a"]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("src/a.ts -> src/a.ts"));
        assert!(violations[0].labels.is_empty());
    }

    #[test]
    fn same_cycle_is_reported_once_per_file() {
        let tmp = project(&["src/a.ts", "src/b.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        assert!(check(&rule, &mut graph, tmp.path(), "src/a.ts", &["./b"]).is_empty());
        // Two spellings of the same dependency close the same cycle.
        let violations = check(&rule, &mut graph, tmp.path(), "src/b.ts", &["./a", "./a.ts"]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn external_imports_never_cycle() {
        let tmp = project(&["src/a.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        let violations = check(
            &rule,
            &mut graph,
            tmp.path(),
            "src/a.ts",
            &["lodash", "react", "@acme/ui"],
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn unresolvable_imports_are_skipped() {
        let tmp = project(&["src/a.ts"]);
        let rule = NoCircularImports::new();
        let mut graph = GraphContext::new(ResolverConfig::default());

        let violations = check(&rule, &mut graph, tmp.path(), "src/a.ts", &["./missing"]);
        assert!(violations.is_empty());
        assert!(!graph.graph().has_node(&ModuleId::internal(tmp.path().join("src/missing"))));
    }
}
