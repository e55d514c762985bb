//! # Configuration Tests
//!
//! Defaults, JSON deserialization and caller-side validation.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;

use cachesim_core::common::ConfigError;
use cachesim_core::config::*;

#[test]
fn test_config_default() {
    let config = SimConfig::default();
    assert_eq!(config.l1, LevelConfig { c: 12, b: 5, s: 3 });
    assert_eq!(config.victim_blocks, 3);
    assert_eq!(config.l2, LevelConfig { c: 15, b: 6, s: 5 });
    assert!(config.validate().is_ok());
}

#[test]
fn test_latency_model_defaults() {
    let latency = LatencyModel::default();
    assert_eq!(latency.l2_miss_penalty, 500.0);
    assert_eq!(latency.l1_hit_base, 2.0);
    assert_eq!(latency.l1_hit_per_way_bit, 0.2);
    assert_eq!(latency.l2_hit_base, 4.0);
    assert_eq!(latency.l2_hit_per_way_bit, 0.4);
}

#[test]
fn test_level_geometry() {
    let geo = LevelConfig { c: 12, b: 5, s: 3 }.geometry();
    assert_eq!(geo.cache_size, 4096);
    assert_eq!(geo.block_size, 32);
    assert_eq!(geo.associativity, 8);
    assert_eq!(geo.num_sets(), 16);
}

#[test]
fn test_json_empty_object_is_default() {
    let config = SimConfig::from_json("{}").unwrap();
    assert_eq!(config, SimConfig::default());
}

#[test]
fn test_json_full() {
    let json = r#"{
        "l1": { "c": 10, "b": 6, "s": 1 },
        "victim_blocks": 0,
        "l2": { "c": 16, "b": 7, "s": 4 },
        "latency": {
            "l2_miss_penalty": 100.0,
            "l1_hit_base": 1.0,
            "l1_hit_per_way_bit": 0.5,
            "l2_hit_base": 10.0,
            "l2_hit_per_way_bit": 1.0
        }
    }"#;
    let config = SimConfig::from_json(json).unwrap();
    assert_eq!(config.l1, LevelConfig { c: 10, b: 6, s: 1 });
    assert_eq!(config.victim_blocks, 0);
    assert_eq!(config.l2, LevelConfig { c: 16, b: 7, s: 4 });
    assert_eq!(config.latency.l2_hit_base, 10.0);
}

#[test]
fn test_json_level_requires_all_exponents() {
    let err = SimConfig::from_json(r#"{ "l1": { "c": 10 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "victim_blocks": 1 }}"#).unwrap();
    let config = SimConfig::from_file(file.path()).unwrap();
    assert_eq!(config.victim_blocks, 1);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimConfig::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

fn with(l1: (u64, u64, u64), v: u64, l2: (u64, u64, u64)) -> SimConfig {
    SimConfig {
        l1: LevelConfig {
            c: l1.0,
            b: l1.1,
            s: l1.2,
        },
        victim_blocks: v,
        l2: LevelConfig {
            c: l2.0,
            b: l2.1,
            s: l2.2,
        },
        latency: LatencyModel::default(),
    }
}

#[rstest]
#[case::l2_smaller(with((12, 5, 3), 0, (11, 6, 5)), "c")]
#[case::l2_block_smaller(with((12, 6, 3), 0, (15, 5, 5)), "b")]
#[case::l2_fewer_ways(with((12, 5, 3), 0, (15, 6, 2)), "s")]
fn test_validate_l2_smaller(#[case] config: SimConfig, #[case] field: &str) {
    match config.validate() {
        Err(ConfigError::L2SmallerThanL1 { name, .. }) => assert_eq!(name, field),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_validate_no_sets() {
    let err = with((8, 6, 3), 0, (15, 6, 5)).validate().unwrap_err();
    assert!(matches!(err, ConfigError::NoSets { level: "L1", .. }));
}

#[test]
fn test_validate_exponent_range() {
    let err = with((12, 5, 3), 0, (64, 6, 5)).validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ExponentOutOfRange {
            level: "L2",
            name: "c",
            value: 64
        }
    ));
}

#[test]
fn test_validate_victim_range() {
    assert!(with((12, 5, 3), 4, (15, 6, 5)).validate().is_ok());
    let err = with((12, 5, 3), 5, (15, 6, 5)).validate().unwrap_err();
    assert!(matches!(err, ConfigError::VictimOutOfRange(5)));
}

#[test]
fn test_validate_fully_associative_is_ok() {
    // c = b + s: a single set.
    assert!(with((10, 6, 4), 1, (12, 6, 6)).validate().is_ok());
}

#[test]
fn test_error_messages() {
    let err = with((12, 5, 3), 0, (11, 6, 5)).validate().unwrap_err();
    assert_eq!(err.to_string(), "L2 c=11 must be at least L1 c=12");
}
