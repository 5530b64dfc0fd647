//! # modlint-core
//!
//! Core framework for import linting over JavaScript/TypeScript projects.
//!
//! This crate provides the pieces rule packages build on:
//!
//! - [`ImportRule`] trait for rules fed one file's imports at a time
//! - [`SourceExtractor`] and the Tree-sitter based [`TypeScriptExtractor`]
//! - [`Analyzer`] for orchestrating a lint run over a project
//! - [`Violation`] / [`LintResult`] for representing findings
//! - [`Config`] for TOML configuration
//!
//! The cross-file dependency engine itself (resolution, graph, cycles,
//! boundaries) lives in `modlint-graph`; the analyzer owns one
//! [`modlint_graph::GraphContext`] per run and hands it to every rule.
//!
//! ## Example
//!
//! ```ignore
//! use modlint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{} violations", result.violations.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod extract;
mod rule;
mod types;
mod typescript;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    AliasConfig, AnalyzerConfig, BoundariesConfig, Config, ConfigError, LayerConfig,
    ResolverSettings, RuleConfig, TeamConfig,
};
pub use context::FileContext;
pub use extract::{ImportMechanism, ImportRecord, SourceAnalysis, SourceExtractor};
pub use rule::{ImportRule, ImportRuleBox};
pub use types::{Label, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use typescript::TypeScriptExtractor;
