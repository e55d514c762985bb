//! Hierarchy Scenario Tests.
//!
//! End-to-end event sequences through L1 → (victim) → L2 → memory, checking
//! every counter the hierarchy writes.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;
use cachesim_core::cache::{AccessOutcome, Hierarchy};
use cachesim_core::common::Geometry;
use cachesim_core::stats::{CacheStats, LevelStats};

#[test]
fn direct_mapped_conflict_thrashes() {
    let mut ctx = TestContext::direct_mapped(0);
    let _ = ctx.read(0x0);
    let _ = ctx.read(0x400);
    let _ = ctx.read(0x0);

    assert_eq!(ctx.stats.reads, 3);
    assert_eq!(
        ctx.stats.l1,
        LevelStats {
            accesses: 3,
            read_misses: 3,
            write_misses: 0,
            write_backs: 0,
        }
    );
    assert_eq!(ctx.stats.l1.hits(), 0);
    assert_eq!(
        ctx.stats.l2,
        LevelStats {
            accesses: 3,
            read_misses: 2,
            write_misses: 0,
            write_backs: 0,
        }
    );
}

#[test]
fn event_kinds_are_counted_before_routing() {
    let mut ctx = TestContext::direct_mapped(1);
    let _ = ctx.read(0x10);
    let _ = ctx.write(0x10);
    let _ = ctx.write(0x20);
    assert_eq!((ctx.stats.reads, ctx.stats.writes), (1, 2));
    assert_eq!(ctx.stats.events(), ctx.stats.l1.accesses);
}

#[test]
fn explicit_construction_matches_config() {
    let mut stats = CacheStats::default();
    let mut hierarchy = Hierarchy::new(
        Geometry::from_exponents(10, 6, 0),
        1,
        Geometry::from_exponents(15, 6, 5),
    );
    assert!(hierarchy.victim_enabled());
    assert_eq!(hierarchy.l1().geometry().num_sets(), 16);
    assert_eq!(hierarchy.l2().unwrap().geometry().num_sets(), 16);
    assert!(hierarchy.l2().unwrap().next().is_none());

    let _ = hierarchy.read(0x0, &mut stats);
    let _ = hierarchy.read(0x400, &mut stats);
    assert_eq!(hierarchy.read(0x0, &mut stats), AccessOutcome::VictimHit);
}

#[test]
fn larger_l2_block_covers_neighbouring_l1_blocks() {
    // L1: 32-byte blocks; L2: 64-byte blocks.
    let mut ctx = TestContext::new((10, 5, 0), 0, (15, 6, 5));
    let _ = ctx.read(0x00);
    // Different L1 block, same L2 block.
    assert_eq!(ctx.read(0x20), AccessOutcome::L2Hit);
    assert_eq!(ctx.stats.l2.read_misses, 1);
}

#[test]
fn l2_lru_sees_fetch_before_write_back() {
    // L1: one set, 1-way. L2: one set, 2-way.
    let mut ctx = TestContext::new((6, 6, 0), 0, (7, 6, 1));
    let _ = ctx.write(0x00); // L2: [0]
    let _ = ctx.read(0x40); // L2 fetch 1 -> [1, 0], then write-back 0 hits -> [0, 1]
    let _ = ctx.read(0x80); // L2 fetch 2 evicts 1 (LRU) -> [2, 0]

    let l2 = ctx.hierarchy.l2().unwrap();
    assert!(l2.contains(0x00));
    assert!(!l2.contains(0x40));
    assert!(l2.contains(0x80));
    assert_eq!(ctx.stats.l2.write_backs, 0);
}

#[rstest]
#[case(AccessOutcome::L1Hit, false, "H1**")]
#[case(AccessOutcome::L1Hit, true, "H1****")]
#[case(AccessOutcome::VictimHit, true, "M1HV**")]
#[case(AccessOutcome::L2Hit, false, "M1H2")]
#[case(AccessOutcome::L2Hit, true, "M1MVH2")]
#[case(AccessOutcome::L2Miss, false, "M1M2")]
#[case(AccessOutcome::L2Miss, true, "M1MVM2")]
fn outcome_codes(#[case] outcome: AccessOutcome, #[case] victim: bool, #[case] code: &str) {
    assert_eq!(outcome.code(victim), code);
}

#[test]
fn outcome_sequence_with_victim_cache() {
    let mut ctx = TestContext::direct_mapped(1);
    let codes: Vec<&str> = [0x0, 0x400, 0x0, 0x0, 0x400]
        .into_iter()
        .map(|addr| ctx.read(addr).code(true))
        .collect();
    assert_eq!(codes, vec!["M1MVM2", "M1MVM2", "M1HV**", "H1****", "M1HV**"]);
}
