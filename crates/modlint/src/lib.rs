//! # modlint
//!
//! Import and dependency-boundary linter for JavaScript/TypeScript
//! projects: circular imports, team boundaries, layer direction, and
//! barrel files, backed by a cross-file dependency graph.
//!
//! This is the main facade crate that re-exports the framework, the
//! graph engine, and the built-in rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! modlint = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/imports.rs
//! #[test]
//! fn import_boundaries() {
//!     modlint::check();
//! }
//! ```
//!
//! This lints the repository's JS/TS sources as part of `cargo test` and
//! fails the test with a readable report when violations are found.
//! Configure via `modlint.toml` at the workspace root.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use modlint::Analyzer;
//! use modlint::rules::NoCircularImports;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(NoCircularImports::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]

mod runner;

// Re-export core types and traits
pub use modlint_core::*;

// Re-export the graph engine
pub use modlint_graph as graph;

/// Built-in rules and presets.
pub mod rules {
    pub use modlint_rules::*;
}

pub use runner::{check, check_with, CheckOptions};
