//! End-to-end engine tests against a real project layout on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use modlint_graph::{
    BoundaryPolicy, CycleResult, GraphContext, ImportKind, ModuleId, OwnershipClassifier,
    OwnershipGroup, PathPattern, Resolution, ResolverConfig,
};

/// Writes a small project: a.ts -> b.ts -> c.ts -> a.ts.
fn cyclic_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.ts"), "import { b } from './b';\n").unwrap();
    fs::write(src.join("b.ts"), "import { c } from './c';\n").unwrap();
    fs::write(src.join("c.ts"), "import { a } from './a';\n").unwrap();
    tmp
}

/// Resolves one import and records the edge, mirroring what rule adapters do.
fn record(ctx: &mut GraphContext, importer: &PathBuf, specifier: &str) -> ModuleId {
    let from = ModuleId::internal(importer.clone());
    let Resolution::Module(to) = ctx.resolve(importer, specifier) else {
        panic!("expected {specifier} to resolve from {}", importer.display());
    };
    ctx.record_edge(from.clone(), to, ImportKind::Value, specifier);
    from
}

#[test]
fn three_file_cycle_is_detected_end_to_end() {
    let tmp = cyclic_project();
    let src = tmp.path().join("src");
    let mut ctx = GraphContext::new(ResolverConfig::default());

    // Visit files out of dependency order, as a host linter may.
    record(&mut ctx, &src.join("c.ts"), "./a");
    record(&mut ctx, &src.join("a.ts"), "./b");
    let from_b = record(&mut ctx, &src.join("b.ts"), "./c");

    let result = ctx.cycle_through(&from_b);
    let mut members = result.members().to_vec();
    members.sort();
    assert_eq!(
        members,
        vec![
            ModuleId::internal(src.join("a.ts")),
            ModuleId::internal(src.join("b.ts")),
            ModuleId::internal(src.join("c.ts")),
        ]
    );

    // The same cycle reports identically from every member.
    let from_a = ctx.cycle_through(&ModuleId::internal(src.join("a.ts")));
    let from_c = ctx.cycle_through(&ModuleId::internal(src.join("c.ts")));
    assert_eq!(from_a, result);
    assert_eq!(from_c, result);
}

#[test]
fn cycle_closes_only_on_the_final_edge() {
    let tmp = cyclic_project();
    let src = tmp.path().join("src");
    let mut ctx = GraphContext::new(ResolverConfig::default());

    let a = record(&mut ctx, &src.join("a.ts"), "./b");
    assert_eq!(ctx.cycle_through(&a), CycleResult::NoCycle);

    let b = record(&mut ctx, &src.join("b.ts"), "./c");
    assert_eq!(ctx.cycle_through(&a), CycleResult::NoCycle);
    assert_eq!(ctx.cycle_through(&b), CycleResult::NoCycle);

    let c = record(&mut ctx, &src.join("c.ts"), "./a");
    assert!(ctx.cycle_through(&a).is_cycle());
    assert!(ctx.cycle_through(&b).is_cycle());
    assert!(ctx.cycle_through(&c).is_cycle());
}

#[test]
fn external_only_importer_never_cycles() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("app.ts"), "import _ from 'lodash';\n").unwrap();

    let mut ctx = GraphContext::new(ResolverConfig::default());
    let importer = src.join("app.ts");
    let from = ModuleId::internal(importer.clone());

    for specifier in ["lodash", "react", "@acme/ui/button"] {
        let Resolution::Module(to) = ctx.resolve(&importer, specifier) else {
            panic!("bare specifier must resolve");
        };
        assert!(to.is_external());
        ctx.record_edge(from.clone(), to, ImportKind::Value, specifier);
    }

    assert_eq!(ctx.cycle_through(&from), CycleResult::NoCycle);
    // External ids never appear as the source of a recorded edge.
    for node in ctx.graph().nodes() {
        if node.is_external() {
            assert!(ctx.graph().out_edges(node).is_empty());
        }
    }
}

#[test]
fn reset_then_relint_reuses_the_same_context() {
    let tmp = cyclic_project();
    let src = tmp.path().join("src");
    let mut ctx = GraphContext::new(ResolverConfig::default());

    let a = record(&mut ctx, &src.join("a.ts"), "./b");
    record(&mut ctx, &src.join("b.ts"), "./c");
    record(&mut ctx, &src.join("c.ts"), "./a");
    assert!(ctx.cycle_through(&a).is_cycle());

    // Watch-mode style re-lint: full reset, then replay.
    ctx.reset_all();
    assert!(!ctx.graph().has_node(&a));

    let a = record(&mut ctx, &src.join("a.ts"), "./b");
    record(&mut ctx, &src.join("b.ts"), "./c");
    record(&mut ctx, &src.join("c.ts"), "./a");
    assert!(ctx.cycle_through(&a).is_cycle());
}

#[test]
fn boundary_verdicts_over_resolved_edges() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for file in [
        "src/teams/payments/api.ts",
        "src/teams/platform/log.ts",
        "src/teams/auth/session.ts",
        "src/shared/result.ts",
    ] {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "export {};\n").unwrap();
    }

    let classifier = OwnershipClassifier::new(
        root,
        vec![
            OwnershipGroup::new(
                "payments",
                vec![PathPattern::new("src/teams/payments/**").unwrap()],
                vec!["platform".to_string()],
                vec![],
            ),
            OwnershipGroup::new(
                "platform",
                vec![PathPattern::new("src/teams/platform/**").unwrap()],
                vec![],
                vec![],
            ),
            OwnershipGroup::new(
                "auth",
                vec![PathPattern::new("src/teams/auth/**").unwrap()],
                vec![],
                vec![],
            ),
        ],
        vec![PathPattern::new("src/shared/**").unwrap()],
    );
    let policy = BoundaryPolicy::default();

    let mut ctx = GraphContext::new(ResolverConfig::default());
    let importer = root.join("src/teams/payments/api.ts");
    let source = classifier
        .classify(&ModuleId::internal(importer.clone()))
        .unwrap();

    // platform is on the allow list.
    let Resolution::Module(platform) = ctx.resolve(&importer, "../platform/log") else {
        panic!("platform must resolve");
    };
    assert!(policy.is_allowed(source, classifier.classify(&platform), ImportKind::Value));

    // auth is not.
    let Resolution::Module(auth) = ctx.resolve(&importer, "../auth/session") else {
        panic!("auth must resolve");
    };
    assert!(!policy.is_allowed(source, classifier.classify(&auth), ImportKind::Value));

    // shared paths are exempt before policy is even consulted.
    let Resolution::Module(shared) = ctx.resolve(&importer, "../../shared/result") else {
        panic!("shared must resolve");
    };
    assert!(classifier.is_shared(&shared));

    // Unclassified targets are always allowed.
    assert!(policy.is_allowed(source, None, ImportKind::Value));
}
