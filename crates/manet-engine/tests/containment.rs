//! Whole-simulation properties over arbitrary seeds and boundary
//! policies: nodes stay inside the area and crashes are terminal.

use manet_core::{EventKind, NodeId, SimEvent};
use manet_engine::{NodeStatus, Simulator};
use manet_model::ModelConfig;
use manet_space::{AreaConfig, BoundaryPolicy};
use manet_test_utils::{mock_registry, reference_config, FloodApp};
use proptest::prelude::*;

fn arb_policy() -> impl Strategy<Value = BoundaryPolicy> {
    prop_oneof![
        Just(BoundaryPolicy::Reflect),
        Just(BoundaryPolicy::Wrap),
        Just(BoundaryPolicy::Clamp),
    ]
}

fn arb_mobility() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("random_waypoint"),
        Just("random_direction"),
        Just("nomadic_community"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn active_nodes_stay_inside_and_crashes_stick(
        seed in any::<u64>(),
        policy in arb_policy(),
        mobility in arb_mobility(),
    ) {
        let mut config = reference_config(12, 60, seed);
        config.area = AreaConfig::rectangle(150.0, 90.0, policy);
        config.mobility = ModelConfig::new(mobility);
        config.speed = ModelConfig::new("uniform").with("min", 1.0).with("max", 15.0);
        config.failure = ModelConfig::new("crash").with("probability", 0.02);

        let mut sim = Simulator::build(
            &config,
            &mock_registry(),
            |_| Box::new(FloodApp::default()),
            Vec::<SimEvent>::new(),
        )
        .unwrap();

        let mut crashed: Vec<NodeId> = Vec::new();
        while sim.step().unwrap() {
            for node in sim.network().nodes() {
                if node.is_active() {
                    prop_assert!((0.0..=150.0).contains(&node.position().x));
                    prop_assert!((0.0..=90.0).contains(&node.position().y));
                }
            }
            for id in &crashed {
                let node = sim.network().node(*id).unwrap();
                prop_assert_eq!(node.status(), NodeStatus::Crashed);
            }
            crashed = sim.crashed().to_vec();
        }

        let crash_events = sim
            .sink()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Crashed { .. }))
            .count();
        prop_assert_eq!(crash_events, sim.crashed().len());
    }
}
