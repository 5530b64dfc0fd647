//! Core analyzer for orchestrating lint execution.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use modlint_graph::GraphContext;

use crate::config::Config;
use crate::context::FileContext;
use crate::extract::{SourceAnalysis, SourceExtractor};
use crate::rule::{ImportRule, ImportRuleBox};
use crate::types::{LintResult, Violation};
use crate::typescript::TypeScriptExtractor;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<ImportRuleBox>,
    extractors: Vec<Box<dyn SourceExtractor>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: ImportRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: ImportRuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a source extractor.
    ///
    /// When none are added, the TypeScript and TSX extractors are used.
    #[must_use]
    pub fn extractor<E: SourceExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.clone());

        let extractors = if self.extractors.is_empty() {
            vec![
                Box::new(TypeScriptExtractor::typescript()) as Box<dyn SourceExtractor>,
                Box::new(TypeScriptExtractor::tsx()) as Box<dyn SourceExtractor>,
            ]
        } else {
            self.extractors
        };

        Ok(Analyzer {
            root,
            rules: self.rules,
            extractors,
            exclude_patterns,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// One analyzer run owns one [`GraphContext`]: the graph accumulates
/// across files within a run and is discarded with the context at the
/// end, so consecutive runs never see each other's state.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<ImportRuleBox>,
    extractors: Vec<Box<dyn SourceExtractor>>,
    exclude_patterns: Vec<String>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// Files are visited in sorted path order so two runs over the same
    /// snapshot produce identical output.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("starting analysis at {}", self.root.display());

        let files = self.discover_files();
        info!("found {} files to analyze", files.len());

        let mut graph = GraphContext::new(self.config.resolver_config(&self.root));
        let mut result = LintResult::new();

        for file_path in &files {
            let violations = self.analyze_file(file_path, &mut graph)?;
            result.violations.extend(violations);
            result.files_checked += 1;
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(
        &self,
        path: &Path,
        graph: &mut GraphContext,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("analyzing {}", path.display());

        let Some(extractor) = self.extractor_for(path) else {
            return Ok(Vec::new());
        };

        let content = std::fs::read_to_string(path)?;
        let ctx = FileContext::new(path, &self.root);

        let mut analysis: SourceAnalysis = extractor.analyze(&content);
        analysis.file_path = ctx.relative_path.clone();

        let mut violations = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("skipping disabled rule {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &analysis, graph);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers source files to analyze, in sorted order.
    fn discover_files(&self) -> Vec<PathBuf> {
        let walker = ignore::WalkBuilder::new(&self.root)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .hidden(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.extractor_for(path).is_none() {
                continue;
            }
            if self.should_exclude(path) {
                debug!("excluding {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        files
    }

    /// Finds the extractor responsible for a file, by extension.
    fn extractor_for(&self, path: &Path) -> Option<&dyn SourceExtractor> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))?;
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
            .map(|e| &**e)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/node_modules/**".
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}
