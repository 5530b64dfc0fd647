//! Rule trait for defining import lint rules.

use modlint_graph::GraphContext;

use crate::context::FileContext;
use crate::extract::SourceAnalysis;
use crate::types::{Severity, Violation};

/// An import lint rule.
///
/// The analyzer calls `check` once per file, in visit order, with that
/// file's extracted imports and the shared [`GraphContext`]. Rules that
/// only look at one file ignore the context; graph rules resolve their
/// imports through it, record edges, and query it; state accumulated
/// this way persists across files for the duration of one analyzer run.
///
/// # Example
///
/// ```ignore
/// use modlint_core::{ImportRule, FileContext, SourceAnalysis, Violation};
/// use modlint_graph::GraphContext;
///
/// pub struct NoDeepImports;
///
/// impl ImportRule for NoDeepImports {
///     fn name(&self) -> &'static str { "no-deep-imports" }
///     fn code(&self) -> &'static str { "ML900" }
///
///     fn check(
///         &self,
///         ctx: &FileContext,
///         analysis: &SourceAnalysis,
///         _graph: &mut GraphContext,
///     ) -> Vec<Violation> {
///         // inspect analysis.imports ...
///         vec![]
///     }
/// }
/// ```
pub trait ImportRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-circular-imports").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "ML001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        graph: &mut GraphContext,
    ) -> Vec<Violation>;
}

/// Type alias for boxed `ImportRule` trait objects.
pub type ImportRuleBox = Box<dyn ImportRule>;
