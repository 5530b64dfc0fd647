//! # modlint-rules
//!
//! Built-in dependency-boundary rules for modlint.
//!
//! Every rule here is an adapter over the `modlint-graph` engine: it feeds
//! one file's imports into the shared graph context and translates the
//! engine's verdicts into violations.
//!
//! ## Available Rules
//!
//! | Code  | Name | Description |
//! |-------|------|-------------|
//! | ML001 | `no-circular-imports` | Detects import cycles across files |
//! | ML002 | `no-self-import` | Forbids a module importing itself |
//! | ML003 | `team-boundaries` | Restricts cross-team imports to an allow-list |
//! | ML004 | `dependency-direction` | Keeps imports pointing down the layer order |
//! | ML005 | `no-barrel-file` | Flags re-export barrels that defeat tree-shaking |
//!
//! ## Usage
//!
//! ```ignore
//! use modlint_core::Analyzer;
//! use modlint_rules::{NoCircularImports, NoSelfImport};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(NoCircularImports::new())
//!     .rule(NoSelfImport::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dependency_direction;
mod no_barrel_file;
mod no_circular_imports;
mod no_self_import;
mod presets;
mod team_boundaries;

pub use dependency_direction::DependencyDirection;
pub use no_barrel_file::NoBarrelFile;
pub use no_circular_imports::NoCircularImports;
pub use no_self_import::NoSelfImport;
pub use presets::{all_rules, assemble_rules, recommended_rules, strict_rules, Preset};
pub use team_boundaries::TeamBoundaries;

use std::path::Path;

use modlint_graph::ModuleId;

/// Renders a module id relative to the project root for messages.
pub(crate) fn display_module(id: &ModuleId, root: &Path) -> String {
    match id.as_path() {
        Some(path) => path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string(),
        None => id.to_string(),
    }
}
