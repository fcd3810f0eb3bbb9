use std::fs;

use craft_planner::PlannerConfig;

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.per_strategy, 20);
    assert_eq!(config.top, 10);
    assert!(config.prune_with_world);
    assert!(config.optimizers.hoist_mining);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".craftplan")).unwrap();
    fs::write(
        dir.path().join(".craftplan/config.yaml"),
        "top: 3\nparallel: true\nmax_distance: 48.0\nbuilder:\n  max_depth: 6\n  prefer_minimal_tools: false\noptimizers:\n  hoist_mining: false\n",
    )
    .unwrap();

    let config = PlannerConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.top, 3);
    assert!(config.parallel);
    assert_eq!(config.max_distance, Some(48.0));
    assert_eq!(config.per_strategy, 20);
    assert_eq!(config.builder.max_depth, 6);
    assert!(!config.builder.prefer_minimal_tools);
    assert!(config.builder.combine_similar_variants);
    assert!(!config.optimizers.hoist_mining);
    assert!(config.optimizers.dedupe_persistent);
}

#[test]
fn malformed_config_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.yaml");
    fs::write(&path, "top: [not, a, number]\n").unwrap();

    let err = PlannerConfig::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse config from"));

    let missing = PlannerConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(missing.to_string().starts_with("Failed to read config from"));
}
