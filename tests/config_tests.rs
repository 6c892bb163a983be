use gryphon_mapf::common::PlanningError;
use gryphon_mapf::config::{Config, SolverConfig, MAX_DEPTH_BUDGET};
use gryphon_mapf::domains::mapf::{PlanningAlgorithm, RepairStrategy};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.attempts, 5);
    assert_eq!(config.depth_budget, 10);
    assert_eq!(config.strategy, RepairStrategy::GreedyRandom);
    assert_eq!(config.algorithm, PlanningAlgorithm::AStar);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
[solver]
attempts = 12
strategy = "ranked_search"
algorithm = "breadth_first"
seed = 7

[logging]
level = "debug"

[data]
dir = "/tmp/maps"
"#,
    )
    .unwrap();

    assert_eq!(config.solver.attempts, 12);
    assert_eq!(config.solver.strategy, RepairStrategy::RankedSearch);
    assert_eq!(config.solver.algorithm, PlanningAlgorithm::BreadthFirst);
    assert_eq!(config.solver.seed, Some(7));
    assert_eq!(config.solver.depth_budget, 10);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, None);
    assert_eq!(config.data.dir, Some(PathBuf::from("/tmp/maps")));
}

#[test]
fn test_empty_toml_is_default() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.solver, SolverConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        SolverConfig { attempts: 0, ..SolverConfig::default() },
        SolverConfig { depth_budget: MAX_DEPTH_BUDGET + 1, ..SolverConfig::default() },
        SolverConfig { candidate_draws: 0, ..SolverConfig::default() },
        SolverConfig { search_node_budget: 0, ..SolverConfig::default() },
    ];
    for config in cases {
        assert!(matches!(config.validate(), Err(PlanningError::InvalidConfig { .. })));
    }
    assert!(SolverConfig { depth_budget: MAX_DEPTH_BUDGET, ..SolverConfig::default() }.validate().is_ok());
}

#[test]
fn test_invalid_toml_values_fail_to_load() {
    assert!(Config::from_toml("[solver]\nattempts = 0\n").is_err());
    assert!(Config::from_toml("[solver]\nstrategy = \"simulated_annealing\"\n").is_err());
}

#[tokio::test]
async fn test_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    tokio::fs::write(&path, "[solver]\ndepth_budget = 6\nmax_path_queries = 500\n").await.unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.solver.depth_budget, 6);
    assert_eq!(config.solver.max_path_queries, Some(500));
}

#[tokio::test]
async fn test_from_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.toml")).await.is_err());
}
