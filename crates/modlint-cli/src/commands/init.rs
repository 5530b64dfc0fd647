//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# modlint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./web"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# Respect .gitignore files
respect_gitignore = true

[resolver]
# Candidate extensions probed for extensionless imports, in order
extensions = [".ts", ".tsx", ".js", ".jsx"]

# Alias rewrites, checked in order
# [[resolver.aliases]]
# prefix = "@/"
# base = "src"

# Team ownership for cross-team import enforcement (ML003).
# First matching team wins; order the entries from specific to broad.
# [[teams]]
# name = "payments"
# paths = ["src/teams/payments/**"]
# allowed_dependencies = ["platform"]
# public_packages = ["@acme/payments-api"]

# Layer ordering for dependency-direction enforcement (ML004).
# A layer may import from its own layer or any layer listed after it.
# [[layers]]
# name = "app"
# paths = ["src/app/**"]
#
# [[layers]]
# name = "domain"
# paths = ["src/domain/**"]

[boundaries]
# Paths anyone may import from, exempt from all boundary checks
shared_paths = []

# Allow `import type` across any boundary
allow_type_imports = false

# Rule configurations
[rules.no-circular-imports]
enabled = true

# [rules.no-barrel-file]
# enabled = true
# threshold = 3
# reexport_ratio = 0.8
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("modlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created modlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit modlint.toml to describe your teams and layers");
    println!("  2. Run: modlint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let config = modlint_core::Config::parse(DEFAULT_CONFIG).expect("starter config must parse");
        assert!(config.is_rule_enabled("no-circular-imports"));
        assert!(config.teams.is_empty());
    }
}
