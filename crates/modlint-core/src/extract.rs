//! Language-agnostic import extraction types and trait.
//!
//! `SourceExtractor` is the seam between the host parser and everything
//! else: rules and the graph engine only ever see the small set of
//! syntactic shapes below, never the parser's full AST.

use std::path::PathBuf;

use modlint_graph::ImportKind;

/// The syntactic shape an import edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMechanism {
    /// `import ... from 'x'` or a bare `import 'x'`.
    EsmImport,
    /// `export ... from 'x'` / `export * from 'x'` (a re-export).
    ExportFrom,
    /// A dynamic `import('x')` call.
    DynamicImport,
    /// A CommonJS `require('x')` call.
    Require,
}

/// One import found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// The specifier text between the quotes.
    pub specifier: String,
    /// Value or type-only import.
    pub kind: ImportKind,
    /// Which syntactic shape produced this record.
    pub mechanism: ImportMechanism,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct SourceAnalysis {
    /// Path relative to project root (filled in by the analyzer).
    pub file_path: PathBuf,
    /// All imports in source order, including re-exports.
    pub imports: Vec<ImportRecord>,
    /// Export statements that do not re-export from another module.
    pub local_exports: usize,
}

impl SourceAnalysis {
    /// Re-export records (`export ... from 'x'`), in source order.
    pub fn reexports(&self) -> impl Iterator<Item = &ImportRecord> {
        self.imports
            .iter()
            .filter(|i| i.mechanism == ImportMechanism::ExportFrom)
    }
}

/// Trait for language-specific import extraction.
///
/// Implement this to add support for a new language. The extractor
/// receives raw source text and returns the language-agnostic
/// [`SourceAnalysis`] intermediate representation.
pub trait SourceExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".ts", ".mts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts imports and export counts from source code.
    fn analyze(&self, source: &str) -> SourceAnalysis;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_filters_by_mechanism() {
        let analysis = SourceAnalysis {
            file_path: PathBuf::from("src/index.ts"),
            imports: vec![
                ImportRecord {
                    specifier: "./a".into(),
                    kind: ImportKind::Value,
                    mechanism: ImportMechanism::EsmImport,
                    line: 1,
                    column: 0,
                },
                ImportRecord {
                    specifier: "./b".into(),
                    kind: ImportKind::Value,
                    mechanism: ImportMechanism::ExportFrom,
                    line: 2,
                    column: 0,
                },
            ],
            local_exports: 0,
        };

        let reexports: Vec<&str> = analysis.reexports().map(|r| r.specifier.as_str()).collect();
        assert_eq!(reexports, vec!["./b"]);
    }
}
