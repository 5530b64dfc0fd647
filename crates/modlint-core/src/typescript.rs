//! TypeScript/JavaScript import extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use modlint_graph::ImportKind;

use crate::extract::{ImportMechanism, ImportRecord, SourceAnalysis, SourceExtractor};

/// Extracts imports, re-exports, and export counts from TS/JS source.
///
/// Two instances cover the whole extension family: [`Self::typescript`]
/// for plain TypeScript and [`Self::tsx`] for JSX-bearing files (the TSX
/// grammar is a superset that also parses plain JavaScript).
pub struct TypeScriptExtractor {
    language: Language,
    language_id: &'static str,
    extensions: &'static [&'static str],
}

impl TypeScriptExtractor {
    /// Creates an extractor for `.ts` / `.mts` / `.cts` files.
    #[must_use]
    pub fn typescript() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            language_id: "typescript",
            extensions: &[".ts", ".mts", ".cts"],
        }
    }

    /// Creates an extractor for `.tsx` / `.jsx` / `.js` / `.mjs` files.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            language_id: "tsx",
            extensions: &[".tsx", ".jsx", ".js", ".mjs", ".cjs"],
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// True if the node has a direct child token of the given kind.
    fn has_token(node: &Node<'_>, kind: &str) -> bool {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).any(|c| c.kind() == kind);
        found
    }

    /// The `source` string of an import/export statement, if present.
    ///
    /// The grammar sets the field for every variant that names a module,
    /// including bare `import 'x'`; a plain `export default "text"` has
    /// no source and stays a local export.
    fn source_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
        node.child_by_field_name("source")
    }

    /// The unquoted text of a string literal node.
    fn string_value(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let mut cursor = node.walk();
        let fragments: Vec<&str> = node
            .children(&mut cursor)
            .filter(|c| c.kind() == "string_fragment")
            .map(|c| Self::text(&c, src))
            .collect();
        if fragments.is_empty() {
            return None;
        }
        Some(fragments.concat())
    }

    fn record(node: &Node<'_>, specifier: String, kind: ImportKind, mechanism: ImportMechanism) -> ImportRecord {
        ImportRecord {
            specifier,
            kind,
            mechanism,
            line: node.start_position().row + 1,
            column: node.start_position().column,
        }
    }

    fn visit(node: &Node<'_>, src: &[u8], out: &mut SourceAnalysis) {
        match node.kind() {
            "import_statement" => {
                if let Some(specifier) = Self::source_node(node).and_then(|s| Self::string_value(&s, src)) {
                    let kind = if Self::has_token(node, "type") {
                        ImportKind::TypeOnly
                    } else {
                        ImportKind::Value
                    };
                    out.imports
                        .push(Self::record(node, specifier, kind, ImportMechanism::EsmImport));
                }
            }
            "export_statement" => {
                match Self::source_node(node).and_then(|s| Self::string_value(&s, src)) {
                    Some(specifier) => {
                        let kind = if Self::has_token(node, "type") {
                            ImportKind::TypeOnly
                        } else {
                            ImportKind::Value
                        };
                        out.imports.push(Self::record(
                            node,
                            specifier,
                            kind,
                            ImportMechanism::ExportFrom,
                        ));
                    }
                    None => out.local_exports += 1,
                }
            }
            "call_expression" => {
                if let Some(callee) = node.child_by_field_name("function") {
                    let mechanism = match callee.kind() {
                        "import" => Some(ImportMechanism::DynamicImport),
                        "identifier" if Self::text(&callee, src) == "require" => {
                            Some(ImportMechanism::Require)
                        }
                        _ => None,
                    };
                    if let Some(mechanism) = mechanism {
                        let specifier = node
                            .child_by_field_name("arguments")
                            .and_then(|args| {
                                let mut cursor = args.walk();
                                let found = args.children(&mut cursor).find(|c| c.kind() == "string");
                                found
                            })
                            .and_then(|s| Self::string_value(&s, src));
                        if let Some(specifier) = specifier {
                            out.imports.push(Self::record(
                                node,
                                specifier,
                                ImportKind::Value,
                                mechanism,
                            ));
                        }
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::visit(&child, src, out);
        }
    }
}

impl SourceExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        self.language_id
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn analyze(&self, source: &str) -> SourceAnalysis {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            tracing::warn!("failed to load {} grammar: {e}", self.language_id);
            return SourceAnalysis::default();
        }

        let src = source.as_bytes();
        let Some(tree) = parser.parse(src, None) else {
            tracing::warn!("{} parse returned no tree", self.language_id);
            return SourceAnalysis::default();
        };

        let mut result = SourceAnalysis::default();
        Self::visit(&tree.root_node(), src, &mut result);
        result
    }
}
