use indoc::indoc;
use maintidx::{EvalPolicy, MiConfig, Thresholds, Tier};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_empty_toml_yields_canonical_defaults() {
    let config = MiConfig::from_toml_str("").unwrap();
    assert_eq!(config, MiConfig::default());
}

#[test]
fn test_override_one_dimension_leaves_the_rest_canonical() {
    let toml = indoc! {r#"
        [thresholds.cyclomatic]
        good = { low = 1.0, high = 5.0 }
        tolerant = { low = 5.0, high = 10.0, low_inclusive = false }
        bad = { low = 10.0, high = 25.0, low_inclusive = false }
    "#};
    let config = MiConfig::from_toml_str(toml).unwrap();

    // 8 was good under the canonical bounds, now tolerant.
    assert_eq!(config.thresholds.cyclomatic.tier_of(8.0), Tier::Tolerant);
    assert_eq!(config.thresholds.cyclomatic.tier_of(30.0), Tier::Dead);

    // Every other dimension keeps its defaults.
    let defaults = Thresholds::default();
    assert_eq!(config.thresholds.cognitive, defaults.cognitive);
    assert_eq!(config.thresholds.file_loc, defaults.file_loc);
    assert_eq!(config.thresholds.cohesion, defaults.cohesion);
}

#[test]
fn test_policy_selectable_per_dimension() {
    let toml = indoc! {r#"
        [thresholds.cohesion]
        good = { low = 75.0, high = 100.0 }
        tolerant = { low = 20.0, high = 100.0 }
        bad = { low = 0.0, high = 100.0 }
        policy = { kind = "proportion" }
    "#};
    let config = MiConfig::from_toml_str(toml).unwrap();
    assert_eq!(
        config.thresholds.cohesion.policy,
        EvalPolicy::proportion()
    );
    // Unconfigured dimensions keep the deduction default.
    assert_eq!(
        config.thresholds.cyclomatic.policy,
        EvalPolicy::deduction()
    );
}

#[test]
fn test_policy_penalties_overridable() {
    let toml = indoc! {r#"
        [thresholds.cyclomatic]
        good = { low = 1.0, high = 10.0 }
        tolerant = { low = 10.0, high = 20.0, low_inclusive = false }
        bad = { low = 20.0, high = 50.0, low_inclusive = false, high_inclusive = false }
        policy = { kind = "deduction", bad_penalty = 2.0 }
    "#};
    let config = MiConfig::from_toml_str(toml).unwrap();
    match config.thresholds.cyclomatic.policy {
        EvalPolicy::Deduction {
            bad_penalty,
            tolerant_penalty,
        } => {
            assert_eq!(bad_penalty, 2.0);
            // Unspecified penalty falls back to its default.
            assert_eq!(tolerant_penalty, 0.5);
        }
        other => panic!("expected deduction policy, got {:?}", other),
    }
}

#[test]
fn test_invalid_weights_rejected() {
    let toml = indoc! {r#"
        [weights]
        volume = 0.5
        complexity = 0.5
        redundancy = 0.5
        coverage = 0.5
    "#};
    let err = MiConfig::from_toml_str(toml).unwrap_err();
    assert!(err.to_string().contains("sum to 1.0"));
}

#[test]
fn test_inverted_interval_rejected() {
    let toml = indoc! {r#"
        [thresholds.file_loc]
        good = { low = 400.0, high = 20.0 }
        tolerant = { low = 0.0, high = 1000.0 }
        bad = { low = 0.0, high = 2000.0 }
    "#};
    let err = MiConfig::from_toml_str(toml).unwrap_err();
    assert!(err.to_string().contains("inverted"));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = MiConfig::from_toml_str("thresholds = 3").unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn test_load_from_file() {
    let toml = indoc! {r#"
        [weights]
        volume = 0.4
        complexity = 0.4
        redundancy = 0.1
        coverage = 0.1
    "#};
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();

    let config = MiConfig::load(file.path()).unwrap();
    assert_eq!(config.weights.volume, 0.4);
    assert_eq!(config.weights.coverage, 0.1);
    assert!(config.weights.validate().is_ok());
}

#[test]
fn test_load_missing_file_fails_with_path_context() {
    let err = MiConfig::load(std::path::Path::new("/nonexistent/mi.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/mi.toml"));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = MiConfig::default();
    let serialized = toml::to_string(&config).unwrap();
    let reparsed = MiConfig::from_toml_str(&serialized).unwrap();
    assert_eq!(config, reparsed);
}
