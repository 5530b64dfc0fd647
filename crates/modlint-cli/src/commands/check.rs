//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use modlint_core::{Analyzer, Config};
use modlint_rules::assemble_rules;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("failed to load config: {}", p.display()))?
        }
    };

    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut rules = assemble_rules(None, &config, &root).context("failed to build rules")?;

    if let Some(filter) = rules_filter {
        let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules.retain(|r| wanted.contains(&r.name()) || wanted.contains(&r.code()));
        for name in &wanted {
            if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
                tracing::warn!("unknown rule: {name}");
            }
        }
    }

    let mut builder = Analyzer::builder().root(&root).config(config);
    for pattern in exclude {
        builder = builder.exclude(pattern);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("failed to build analyzer")?;

    tracing::info!(
        "analyzing {} with {} rules",
        root.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
