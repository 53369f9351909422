//! Run-to-run determinism: the same configuration and seed must give
//! the same event stream, the same final positions and the same crash
//! set, whichever mobility model is in use.

use manet_core::{Application, NodeId, Point};
use manet_engine::{RunSummary, SimConfig, Simulator};
use manet_model::ModelConfig;
use manet_replay::{compare_events, compare_positions, events_hash, positions_hash, EventLog};
use manet_test_utils::{mock_registry, reference_config, FloodApp};

// ── Helpers ─────────────────────────────────────────────────────

struct Outcome {
    log: EventLog,
    positions: Vec<Point>,
    crashed: Vec<NodeId>,
    summary: RunSummary,
}

fn run(config: &SimConfig) -> Outcome {
    let mut sim = Simulator::build(
        config,
        &mock_registry(),
        |_| -> Box<dyn Application> { Box::new(FloodApp::default()) },
        EventLog::new(),
    )
    .unwrap();
    let summary = sim.run().unwrap();
    let positions = sim.positions();
    let crashed = sim.crashed().to_vec();
    Outcome {
        log: sim.into_sink(),
        positions,
        crashed,
        summary,
    }
}

fn config(mobility: &str, seed: u64) -> SimConfig {
    let mut cfg = reference_config(25, 300, seed);
    cfg.mobility = ModelConfig::new(mobility);
    cfg.failure = ModelConfig::new("crash").with("probability", 0.002);
    cfg
}

fn assert_identical(a: &Outcome, b: &Outcome) {
    if let Some(d) = compare_events(a.log.events(), b.log.events()) {
        panic!("event streams diverge: {d:?}");
    }
    if let Some(d) = compare_positions(&a.positions, &b.positions) {
        panic!("positions diverge: {d:?}");
    }
    assert_eq!(a.log.hash(), b.log.hash());
    assert_eq!(positions_hash(&a.positions), positions_hash(&b.positions));
    assert_eq!(a.crashed, b.crashed);
    assert_eq!(a.summary, b.summary);
}

// ── Tests ───────────────────────────────────────────────────────

#[test]
fn every_mobility_model_is_reproducible() {
    for mobility in [
        "random_waypoint",
        "random_direction",
        "gauss_markov",
        "nomadic_community",
        "stationary",
    ] {
        let a = run(&config(mobility, 42));
        let b = run(&config(mobility, 42));
        assert!(!a.log.is_empty(), "{mobility}: no events");
        assert_identical(&a, &b);
    }
}

#[test]
fn running_hash_matches_recorded_stream() {
    let out = run(&config("random_waypoint", 9));
    assert_eq!(out.log.hash(), events_hash(out.log.events()));
    assert_eq!(out.log.count("crashed"), out.crashed.len() as u64);
    assert_eq!(out.summary.nodes_crashed, out.crashed.len() as u64);
    assert_eq!(out.log.count("delivered"), out.summary.delivered);
}

#[test]
fn different_seeds_diverge() {
    let a = run(&config("random_waypoint", 1));
    let b = run(&config("random_waypoint", 2));
    assert!(compare_positions(&a.positions, &b.positions).is_some());
    let d = compare_events(a.log.events(), b.log.events()).unwrap();
    assert!(d.recorded.is_some() || d.replayed.is_some());
}

#[test]
fn stepping_manually_matches_run() {
    let cfg = config("gauss_markov", 5);
    let whole = run(&cfg);

    let mut sim = Simulator::build(
        &cfg,
        &mock_registry(),
        |_| -> Box<dyn Application> { Box::new(FloodApp::default()) },
        EventLog::new(),
    )
    .unwrap();
    while sim.step().unwrap() {}
    sim.finalize();
    let positions = sim.positions();
    let log = sim.into_sink();

    assert_eq!(compare_positions(&whole.positions, &positions), None);
    assert_eq!(compare_events(whole.log.events(), log.events()), None);
}
