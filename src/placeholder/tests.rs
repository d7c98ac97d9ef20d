//! Tests for placeholder resolution and the full dynamic-argument pipeline.

use super::*;
use super::resolve::ResolutionPass;
use crate::test_support::{FakeTaskLoader, TaskFixture, write_file};
use crate::task_loader::PddlTaskLoader;
use std::path::PathBuf;

fn keys(texts: &[&str]) -> BTreeSet<PlaceholderKey> {
    texts.iter().map(|t| t.parse().unwrap()).collect()
}

fn context(inputs: &[&str]) -> ResolutionContext {
    ResolutionContext::new(inputs.iter().map(PathBuf::from).collect())
}

fn resolve_one(key: &str, ctx: &ResolutionContext) -> Result<ResolvedValue> {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let resolver = Resolver::new(&config, &loader);
    let mut mapping = resolver.resolve(&keys(&[key]), ctx)?;
    let key: PlaceholderKey = key.parse().unwrap();
    Ok(mapping.remove(&key).unwrap())
}

// ============================================================================
// Directories
// ============================================================================

#[test]
fn test_problem_and_domain_directories() {
    let ctx = context(&["/data/domains/dom.pddl", "/data/problems/p3.pddl"]);
    assert_eq!(
        resolve_one("PDIR", &ctx).unwrap(),
        ResolvedValue::Text("/data/problems".to_string())
    );
    assert_eq!(
        resolve_one("DDIR", &ctx).unwrap(),
        ResolvedValue::Text("/data/domains".to_string())
    );
}

#[test]
fn test_directory_of_bare_file_name_is_empty() {
    let ctx = context(&["dom.pddl", "p3.pddl"]);
    assert_eq!(
        resolve_one("PDIR", &ctx).unwrap(),
        ResolvedValue::Text(String::new())
    );
}

#[test]
fn test_directories_require_two_inputs() {
    for inputs in [&[][..], &["/a/p3.pddl"][..], &["/a/d.pddl", "/a/p.pddl", "/a/x"][..]] {
        let err = resolve_one("PDIR", &context(inputs)).unwrap_err();
        assert!(
            matches!(err, DynArgsError::ConfigurationError(_)),
            "expected configuration error for {:?}, got {:?}",
            inputs,
            err
        );
    }
    let err = resolve_one("DDIR", &context(&["/a/p3.pddl"])).unwrap_err();
    assert!(err.to_string().contains("{DDIR} requires exactly two input files"));
}

// ============================================================================
// Folds
// ============================================================================

#[test]
fn test_fold_for_every_index() {
    for idx in 1..=200u32 {
        let ctx = context(&[&format!("/bench/p{}.pddl", idx)]);
        assert_eq!(
            resolve_one("FOLD", &ctx).unwrap(),
            ResolvedValue::Integer((idx - 1) / 20),
            "wrong fold for index {}",
            idx
        );
    }
}

#[test]
fn test_fold_boundaries() {
    let fold = |name: &str| resolve_one("FOLD", &context(&["d.pddl", name])).unwrap();
    assert_eq!(fold("p01.pddl"), ResolvedValue::Integer(0));
    assert_eq!(fold("p20.pddl"), ResolvedValue::Integer(0));
    assert_eq!(fold("p21.pddl"), ResolvedValue::Integer(1));
    assert_eq!(fold("p181.pddl"), ResolvedValue::Integer(9));
    assert_eq!(fold("p200.pddl"), ResolvedValue::Integer(9));
}

#[test]
fn test_fold_out_of_range() {
    for name in ["p0.pddl", "p201.pddl", "p99999999999999999999.pddl"] {
        let err = resolve_one("FOLD", &context(&[name])).unwrap_err();
        assert!(
            matches!(err, DynArgsError::FoldRangeError { .. }),
            "expected range error for {}, got {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_fold_pattern_mismatch() {
    for name in ["domain.pddl", "p3.sas", "p3.pddl.bak", "p3"] {
        let err = resolve_one("FOLD", &context(&[name])).unwrap_err();
        assert!(
            matches!(err, DynArgsError::FoldPatternError { .. }),
            "expected pattern error for {}, got {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_fold_uses_file_name_only() {
    let ctx = context(&["/runs/2024/task-07.pddl"]);
    assert_eq!(resolve_one("FOLD", &ctx).unwrap(), ResolvedValue::Integer(0));
}

#[test]
fn test_fold_with_custom_config() {
    let config = Config {
        fold_size: 5,
        fold_count: 4,
        problem_extension: "sas".to_string(),
        ..Config::default()
    };
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let resolver = Resolver::new(&config, &loader);

    let mapping = resolver
        .resolve(&keys(&["FOLD"]), &context(&["p12.sas"]))
        .unwrap();
    assert_eq!(mapping.values().next(), Some(&ResolvedValue::Integer(2)));

    let err = resolver
        .resolve(&keys(&["FOLD"]), &context(&["p21.sas"]))
        .unwrap_err();
    assert!(err.to_string().contains("between 1 and 20"));
}

#[test]
fn test_fold_without_inputs() {
    let err = resolve_one("FOLD", &context(&[])).unwrap_err();
    assert!(matches!(err, DynArgsError::ConfigurationError(_)));
}

// ============================================================================
// Atom catalogue
// ============================================================================

#[test]
fn test_pddl_atoms_rendered_from_catalogue() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(r#"{"pddl-atoms-foo": ["(a)","(b)"]}"#);
    let ctx = ResolutionContext::new(fixture.inputs());

    assert_eq!(
        resolve_one("PDDL_ATOMS_foo", &ctx).unwrap(),
        ResolvedValue::Text("[(a),(b)]".to_string())
    );
}

#[test]
fn test_sas_facts_from_shared_catalogue() {
    let fixture = TaskFixture::blocks("p01.pddl");
    write_file(fixture.dir(), "atoms.json", r#"{"SAS_FACTS": ["f0", "f1", "f2"]}"#);
    let ctx = ResolutionContext::new(vec![fixture.problem.clone()]);

    assert_eq!(
        resolve_one("SAS_FACTS", &ctx).unwrap(),
        ResolvedValue::Text("[f0,f1,f2]".to_string())
    );
}

#[test]
fn test_missing_catalogue_entry() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(r#"{"SAS_FACTS": []}"#);
    let ctx = ResolutionContext::new(fixture.inputs());

    let err = resolve_one("PDDL_ATOMS_goal", &ctx).unwrap_err();
    match err {
        DynArgsError::MissingCatalogueEntry {
            category,
            key,
            catalogue,
        } => {
            assert_eq!(category, "PDDL_ATOMS_goal");
            assert_eq!(key, "PDDL_ATOMS_goal");
            assert_eq!(catalogue, fixture.problem.with_extension("atoms"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_catalogue_loaded_once_per_pass() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(
        r#"{"SAS_FACTS": ["Atom clear(b)"],
            "PDDL_ATOMS_a": ["Atom clear(a)"],
            "PDDL_ATOMS_b": ["Atom on(b, a)", "Atom ontable(a)"]}"#,
    );
    let ctx = ResolutionContext::new(fixture.inputs());
    let config = Config::default();
    let loader = FakeTaskLoader::new(["Atom clear(b)", "Atom on(b, a)"]);
    let resolver = Resolver::new(&config, &loader);

    let mut pass = ResolutionPass::default();
    let mapping = resolver
        .resolve_in(
            &mut pass,
            &keys(&[
                "SAS_FACTS",
                "SAS_INITS",
                "PDDL_ATOMS_a",
                "PDDL_ATOMS_b",
                "PDDL_INITS_b",
            ]),
            &ctx,
        )
        .unwrap();

    assert_eq!(mapping.len(), 5);
    assert_eq!(
        mapping[&"PDDL_INITS_b".parse::<PlaceholderKey>().unwrap()],
        ResolvedValue::Text("[1,0]".to_string())
    );
    assert_eq!(pass.catalogue.loads, 1);
    assert_eq!(pass.initial_state.loads, 1);
    assert_eq!(loader.calls(), 1);
}

#[test]
fn test_pass_without_catalogue_keys_loads_nothing() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let resolver = Resolver::new(&config, &loader);

    let mut pass = ResolutionPass::default();
    resolver
        .resolve_in(&mut pass, &keys(&["FOLD", "SPLIT"]), &context(&["p07.pddl"]))
        .unwrap();

    assert_eq!(pass.catalogue.loads, 0);
    assert_eq!(pass.initial_state.loads, 0);
}

#[test]
fn test_missing_catalogue_file() {
    let fixture = TaskFixture::blocks("p01.pddl");
    let ctx = ResolutionContext::new(fixture.inputs());

    let err = resolve_one("SAS_FACTS", &ctx).unwrap_err();
    assert!(matches!(err, DynArgsError::CatalogueLoadError { .. }));
}

// ============================================================================
// Initial states
// ============================================================================

#[test]
fn test_init_bits_aligned_with_atoms() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(
        r#"{"SAS_FACTS": ["Atom on(b, a)", "Atom clear(a)", "Atom handempty()"],
            "PDDL_ATOMS_x": ["Atom clear(a)", "Atom clear(b)"]}"#,
    );
    let ctx = ResolutionContext::new(fixture.inputs());
    let config = Config::default();
    let loader = FakeTaskLoader::new(["Atom on(b, a)", "Atom handempty()", "Atom clear(b)"]);
    let resolver = Resolver::new(&config, &loader);

    let mapping = resolver
        .resolve(&keys(&["SAS_INITS", "PDDL_INITS_x", "SAS_FACTS"]), &ctx)
        .unwrap();

    assert_eq!(
        mapping[&"SAS_INITS".parse::<PlaceholderKey>().unwrap()],
        ResolvedValue::Text("[1,0,1]".to_string())
    );
    assert_eq!(
        mapping[&"PDDL_INITS_x".parse::<PlaceholderKey>().unwrap()],
        ResolvedValue::Text("[0,1]".to_string())
    );
    assert_eq!(loader.calls(), 1, "initial state must be loaded once per pass");
}

#[test]
fn test_init_requires_matching_atoms_category() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(r#"{"PDDL_ATOMS_y": []}"#);
    let ctx = ResolutionContext::new(fixture.inputs());

    let err = resolve_one("PDDL_INITS_x", &ctx).unwrap_err();
    match err {
        DynArgsError::MissingCatalogueEntry {
            category,
            key,
            catalogue,
        } => {
            assert_eq!(category, "PDDL_ATOMS_x");
            assert_eq!(key, "PDDL_INITS_x");
            assert_eq!(catalogue, fixture.problem.with_extension("atoms"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_init_requires_domain_and_problem() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(r#"{"SAS_FACTS": ["x"]}"#);
    let ctx = ResolutionContext::new(vec![fixture.problem.clone()]);

    let err = resolve_one("SAS_INITS", &ctx).unwrap_err();
    assert!(matches!(err, DynArgsError::ConfigurationError(_)));
}

#[test]
fn test_init_with_native_pddl_loader() {
    let fixture = TaskFixture::blocks("p01.pddl").with_atoms(
        r#"{"SAS_FACTS": ["Atom on(b, a)", "Atom on(a, b)", "Atom clear(b)", "Atom =(a, a)"]}"#,
    );
    let ctx = ResolutionContext::new(fixture.inputs());
    let config = Config::default();
    let loader = PddlTaskLoader::new();
    let resolver = Resolver::new(&config, &loader);

    let mapping = resolver.resolve(&keys(&["SAS_INITS"]), &ctx).unwrap();
    assert_eq!(
        mapping.values().next(),
        Some(&ResolvedValue::Text("[1,0,1,1]".to_string()))
    );
}

// ============================================================================
// Split marker, model artifacts, unknown kinds
// ============================================================================

#[test]
fn test_split_resolves_to_structural_marker() {
    let value = resolve_one("SPLIT", &context(&[])).unwrap();
    assert_eq!(value, ResolvedValue::Split);
    assert_eq!(value.substitution(), None);
}

#[test]
fn test_model_output_layer() {
    let fixture = TaskFixture::blocks("p01.pddl");
    let model = fixture.dir().join("model.pb");
    std::fs::write(&model, b"\x0a\x05graph\x12Identity: out/Softmax*\x00").unwrap();

    let key = format!("MODEL_OUTPUT_LAYER,{}", model.display());
    assert_eq!(
        resolve_one(&key, &context(&[])).unwrap(),
        ResolvedValue::Text("out/Softmax".to_string())
    );
}

#[test]
fn test_model_output_layer_without_anchor() {
    let fixture = TaskFixture::blocks("p01.pddl");
    let model = write_file(fixture.dir(), "model.pb", "no layer here");

    let key = format!("MODEL_OUTPUT_LAYER,{}", model.display());
    let err = resolve_one(&key, &context(&[])).unwrap_err();
    assert!(matches!(err, DynArgsError::AnchorNotFound { .. }));
}

#[test]
fn test_fixed_key_of_family_kind_is_unknown() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let resolver = Resolver::new(&config, &loader);

    let keys: BTreeSet<_> = [PlaceholderKey::Fixed(PlaceholderKind::PddlAtoms)].into();
    let err = resolver.resolve(&keys, &context(&["p1.pddl"])).unwrap_err();
    assert!(matches!(err, DynArgsError::UnknownPlaceholderKind(ref k) if k == "PDDL_ATOMS"));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_replace_directories_example() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();

    let segments = dynamic
        .replace(
            "{PDIR}/x {DDIR}/y",
            CommandKind::Network,
            &context(&["/a/dom.pddl", "/a/p3.pddl"]),
        )
        .unwrap();
    assert_eq!(segments, vec!["/a/x /a/y"]);
}

#[test]
fn test_replace_split_template() {
    let fixture = TaskFixture::blocks("p07.pddl").with_atoms(r#"{"SAS_FACTS": ["a", "b"]}"#);
    let config = Config::default();
    let loader = FakeTaskLoader::new(["a"]);
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();

    let segments = dynamic
        .replace(
            "--search{SPLIT}astar(nn(path={PDIR}/fold{FOLD}.pb, facts={SAS_FACTS}, init={SAS_INITS}))",
            CommandKind::PbNetwork,
            &ResolutionContext::new(fixture.inputs()),
        )
        .unwrap();

    assert_eq!(
        segments,
        vec![
            "--search".to_string(),
            format!(
                "astar(nn(path={}/fold0.pb, facts=[a,b], init=[1,0]))",
                fixture.dir().display()
            ),
        ]
    );
}

#[test]
fn test_split_not_admitted_outside_pb_network() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();

    let err = dynamic
        .replace("a{SPLIT}b", CommandKind::Heuristic, &context(&[]))
        .unwrap_err();
    assert!(matches!(err, DynArgsError::UnresolvedPlaceholder { .. }));
}

#[test]
fn test_set_search_options_replaces_bare_flag() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();
    let existing = vec!["--alias".to_string(), "x".to_string(), "--search".to_string()];

    let options = dynamic
        .set_search_options(
            "astar(nn(fold={FOLD}))",
            CommandKind::PbNetwork,
            &context(&["/a/dom.pddl", "/a/p42.pddl"]),
            &existing,
        )
        .unwrap();
    assert_eq!(options, vec!["--alias", "x", "--search", "astar(nn(fold=2))"]);
}

#[test]
fn test_set_search_options_conflict() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();
    let existing = vec!["--search".to_string(), "astar(blind())".to_string()];

    let err = dynamic
        .set_search_options("astar(nn())", CommandKind::PbNetwork, &context(&[]), &existing)
        .unwrap_err();
    assert!(matches!(err, DynArgsError::ConflictingConfigurationError { .. }));
}

#[test]
fn test_set_search_options_only_for_pb_network() {
    let config = Config::default();
    let loader = FakeTaskLoader::new(Vec::<String>::new());
    let dynamic = DynamicArgs::new(&config, &loader).unwrap();

    let err = dynamic
        .set_search_options("astar(nn())", CommandKind::Search, &context(&[]), &[])
        .unwrap_err();
    assert!(matches!(err, DynArgsError::UnsupportedCommand { .. }));
}
