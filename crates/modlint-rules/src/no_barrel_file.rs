//! Rule to flag barrel files.
//!
//! # Rationale
//!
//! A barrel file (typically an `index.ts` whose content is mostly
//! re-exports) forces bundlers and test runners to load the whole
//! subtree behind it and defeats tree-shaking. The rule flags files
//! whose distinct re-export sources reach a threshold and whose
//! re-export ratio exceeds a limit.
//!
//! # Configuration
//!
//! - `threshold`: minimum distinct re-export sources (default 3)
//! - `reexport_ratio`: maximum allowed re-export share of all exports
//!   (default 0.8)
//! - `allow_with_local_exports`: skip files that also export their own
//!   declarations (default false)
//! - `allowed_paths`: regex patterns for paths where barrels are fine,
//!   e.g. public API entry points

use std::collections::HashSet;

use regex::Regex;

use modlint_core::{
    FileContext, ImportRule, Location, RuleConfig, SourceAnalysis, Suggestion, Violation,
};
use modlint_graph::GraphContext;

/// Rule code for no-barrel-file.
pub const CODE: &str = "ML005";

/// Rule name for no-barrel-file.
pub const NAME: &str = "no-barrel-file";

/// Default file pattern: index files of any supported extension.
const DEFAULT_BARREL_PATTERN: &str = r"(^|.*[/\\])index\.(ts|tsx|js|jsx|mts|mjs)$";

/// Flags barrel files that defeat tree-shaking.
#[derive(Debug, Clone)]
pub struct NoBarrelFile {
    threshold: usize,
    reexport_ratio: f64,
    allow_with_local_exports: bool,
    allowed_paths: Vec<Regex>,
    barrel_patterns: Vec<Regex>,
}

impl Default for NoBarrelFile {
    fn default() -> Self {
        Self::new()
    }
}

impl NoBarrelFile {
    /// Creates a rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: 3,
            reexport_ratio: 0.8,
            allow_with_local_exports: false,
            allowed_paths: Vec::new(),
            barrel_patterns: Regex::new(DEFAULT_BARREL_PATTERN)
                .map(|r| vec![r])
                .unwrap_or_default(),
        }
    }

    /// Sets the minimum number of distinct re-export sources.
    #[must_use]
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the maximum allowed re-export ratio.
    #[must_use]
    pub fn reexport_ratio(mut self, ratio: f64) -> Self {
        self.reexport_ratio = ratio;
        self
    }

    /// Allows barrels that also export local declarations.
    #[must_use]
    pub fn allow_with_local_exports(mut self, allow: bool) -> Self {
        self.allow_with_local_exports = allow;
        self
    }

    /// Creates a rule from the `[rules.no-barrel-file]` options table.
    ///
    /// Invalid regexes in `allowed_paths` are dropped with a log line;
    /// unlike ownership patterns they only widen the rule, never silence
    /// a policy.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let mut rule = Self::new();
        let Some(config) = config else {
            return rule;
        };

        #[allow(clippy::cast_sign_loss)]
        {
            rule.threshold = config.get_int("threshold", 3).max(0) as usize;
        }
        rule.reexport_ratio = config.get_float("reexport_ratio", 0.8);
        rule.allow_with_local_exports = config.get_bool("allow_with_local_exports", false);
        rule.allowed_paths = compile_patterns(&config.get_str_array("allowed_paths"));

        let barrel_patterns = config.get_str_array("barrel_patterns");
        if !barrel_patterns.is_empty() {
            rule.barrel_patterns = compile_patterns(&barrel_patterns);
        }

        rule
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("no-barrel-file: ignoring invalid pattern '{p}': {e}");
                None
            }
        })
        .collect()
}

impl ImportRule for NoBarrelFile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags re-export barrels that defeat tree-shaking"
    }

    fn default_severity(&self) -> modlint_core::Severity {
        modlint_core::Severity::Warning
    }

    fn check(
        &self,
        ctx: &FileContext,
        analysis: &SourceAnalysis,
        _graph: &mut GraphContext,
    ) -> Vec<Violation> {
        let path = ctx.relative_path.to_string_lossy();

        if self.allowed_paths.iter().any(|re| re.is_match(&path)) {
            return Vec::new();
        }
        if !self.barrel_patterns.iter().any(|re| re.is_match(&path)) {
            return Vec::new();
        }

        let sources: HashSet<&str> = analysis
            .reexports()
            .map(|r| r.specifier.as_str())
            .collect();
        if sources.len() < self.threshold {
            return Vec::new();
        }
        if self.allow_with_local_exports && analysis.local_exports > 0 {
            return Vec::new();
        }

        let reexport_count = analysis.reexports().count();
        let total = reexport_count + analysis.local_exports;
        #[allow(clippy::cast_precision_loss)]
        let ratio = if total == 0 {
            0.0
        } else {
            reexport_count as f64 / total as f64
        };
        if ratio < self.reexport_ratio {
            return Vec::new();
        }

        let (line, column) = analysis
            .reexports()
            .next()
            .map_or((1, 1), |r| (r.line, r.column + 1));

        vec![Violation::new(
            CODE,
            NAME,
            self.default_severity(),
            Location::new(ctx.relative_path.clone(), line, column),
            format!(
                "barrel file re-exports {} modules ({}% of its exports)",
                sources.len(),
                (ratio * 100.0).round()
            ),
        )
        .with_suggestion(Suggestion::new(
            "import directly from the source modules instead of the barrel",
        ))]
    }
}
