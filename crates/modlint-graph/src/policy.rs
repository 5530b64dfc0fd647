//! Boundary policy evaluation.

use crate::graph::ImportKind;
use crate::ownership::OwnershipGroup;

/// Decides whether one ownership group may depend on another.
///
/// The evaluator is a pure function: all state lives in the classifier's
/// compiled groups and the edge the caller hands in. Callers only invoke
/// it when the source module is classified; an unowned source file is
/// unrestricted by definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryPolicy {
    /// When set, type-only edges are always allowed. Type imports are
    /// erased at build time and cannot create runtime coupling.
    pub allow_type_imports: bool,
}

impl BoundaryPolicy {
    /// Creates a policy.
    #[must_use]
    pub fn new(allow_type_imports: bool) -> Self {
        Self { allow_type_imports }
    }

    /// Evaluates one edge.
    ///
    /// Same group → allowed. Unclassified target → allowed (what isn't
    /// owned can't be restricted). Otherwise the target group's name must
    /// appear in the source group's allow-list.
    #[must_use]
    pub fn is_allowed(
        &self,
        source: &OwnershipGroup,
        target: Option<&OwnershipGroup>,
        kind: ImportKind,
    ) -> bool {
        if self.allow_type_imports && kind == ImportKind::TypeOnly {
            return true;
        }

        let Some(target) = target else {
            return true;
        };

        if target.name() == source.name() {
            return true;
        }

        source
            .allowed_dependencies()
            .iter()
            .any(|name| name == target.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::PathPattern;

    fn group(name: &str, allowed: &[&str]) -> OwnershipGroup {
        OwnershipGroup::new(
            name,
            vec![PathPattern::new(&format!("src/{name}/**")).unwrap()],
            allowed.iter().map(ToString::to_string).collect(),
            vec![],
        )
    }

    #[test]
    fn same_group_is_always_allowed() {
        let payments = group("payments", &[]);
        let policy = BoundaryPolicy::default();
        assert!(policy.is_allowed(&payments, Some(&payments), ImportKind::Value));
    }

    #[test]
    fn unclassified_target_is_allowed() {
        let payments = group("payments", &[]);
        let policy = BoundaryPolicy::default();
        assert!(policy.is_allowed(&payments, None, ImportKind::Value));
    }

    #[test]
    fn listed_dependency_is_allowed() {
        let payments = group("payments", &["platform"]);
        let platform = group("platform", &[]);
        let policy = BoundaryPolicy::default();
        assert!(policy.is_allowed(&payments, Some(&platform), ImportKind::Value));
    }

    #[test]
    fn unlisted_dependency_is_denied() {
        let payments = group("payments", &["platform"]);
        let auth = group("auth", &[]);
        let policy = BoundaryPolicy::default();
        assert!(!policy.is_allowed(&payments, Some(&auth), ImportKind::Value));
    }

    #[test]
    fn allow_list_is_directional() {
        let payments = group("payments", &["platform"]);
        let platform = group("platform", &[]);
        let policy = BoundaryPolicy::default();
        assert!(!policy.is_allowed(&platform, Some(&payments), ImportKind::Value));
    }

    #[test]
    fn type_only_exemption_is_opt_in() {
        let payments = group("payments", &[]);
        let auth = group("auth", &[]);

        let strict = BoundaryPolicy::default();
        assert!(!strict.is_allowed(&payments, Some(&auth), ImportKind::TypeOnly));

        let relaxed = BoundaryPolicy::new(true);
        assert!(relaxed.is_allowed(&payments, Some(&auth), ImportKind::TypeOnly));
        assert!(!relaxed.is_allowed(&payments, Some(&auth), ImportKind::Value));
    }

    #[test]
    fn answers_are_deterministic() {
        let payments = group("payments", &["platform"]);
        let auth = group("auth", &[]);
        let policy = BoundaryPolicy::default();

        let first = policy.is_allowed(&payments, Some(&auth), ImportKind::Value);
        let second = policy.is_allowed(&payments, Some(&auth), ImportKind::Value);
        assert_eq!(first, second);
    }
}
