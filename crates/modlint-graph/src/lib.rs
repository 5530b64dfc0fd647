//! # modlint-graph
//!
//! Cross-file engine behind modlint's dependency-boundary rules: resolves
//! import specifiers to canonical module identities, accumulates them into
//! a directed import graph, answers cycle queries, and evaluates ownership
//! boundary policy over graph edges.
//!
//! The host linter visits files one at a time, in no particular order, so
//! the graph tolerates partial state (a module may be referenced before its
//! own file has been visited) and every query is answerable incrementally.
//! All state for one lint invocation lives in a [`GraphContext`] owned by
//! the caller; there is no process-wide global.
//!
//! ## Example
//!
//! ```ignore
//! use modlint_graph::{GraphContext, ImportKind, Resolution, ResolverConfig};
//!
//! let mut ctx = GraphContext::new(ResolverConfig::default());
//! if let Resolution::Module(target) = ctx.resolve(&importer, "./widget") {
//!     let from = modlint_graph::ModuleId::internal(&importer);
//!     ctx.record_edge(from.clone(), target, ImportKind::Value, "./widget");
//!     if ctx.cycle_through(&from).is_cycle() {
//!         // report
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod cycle;
mod graph;
mod module_id;
mod ownership;
mod policy;
mod resolver;

pub use context::GraphContext;
pub use cycle::{find_cycle, CycleResult};
pub use graph::{DependencyGraph, Edge, ImportKind};
pub use module_id::ModuleId;
pub use ownership::{OwnershipClassifier, OwnershipGroup, PathPattern, PatternError};
pub use policy::BoundaryPolicy;
pub use resolver::{Resolution, Resolver, ResolverConfig};
