//! Top-level orchestrator.
//!
//! [`Simulator`] validates a [`SimConfig`], builds the component graph
//! (area, then placement, speed and mobility, then propagation and
//! packet loss, then failure), places the nodes and drives the step
//! loop until the clock runs out or is stopped.
//!
//! # Example
//!
//! ```
//! use manet_core::{Application, ApplicationError, ChannelAccess, NodeId, SimTime};
//! use manet_engine::{SimConfig, Simulator};
//! use manet_space::{AreaConfig, BoundaryPolicy};
//!
//! struct Idle;
//!
//! impl Application for Idle {
//!     fn step(
//!         &mut self,
//!         _time: SimTime,
//!         _neighbors: &[NodeId],
//!         _channel: &mut dyn ChannelAccess,
//!     ) -> Result<(), ApplicationError> {
//!         Ok(())
//!     }
//! }
//!
//! let config = SimConfig::new(5, AreaConfig::square(100.0, BoundaryPolicy::Reflect), 20)
//!     .with_seed(1);
//! let mut sim = Simulator::new(&config, |_| Box::new(Idle)).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.steps_run, 20);
//! ```

use std::fmt;

use manet_core::{
    Application, EventKind, EventSink, ModelError, NodeId, Point, SimEvent, StepId,
};
use manet_model::{keys, validate_composition, BuildContext, ModelRegistry, RandomSource};
use manet_models::builtin_registry;
use tracing::info;

use crate::clock::{Clock, StopHandle};
use crate::config::{ConfigError, SimConfig};
use crate::metrics::{RunSummary, StepMetrics};
use crate::network::{Models, Network, Node, StepError};
use crate::sink::TracingSink;

/// A configured simulation.
///
/// Generic over the [`EventSink`] receiving the event stream; the
/// default forwards events to `tracing`.
pub struct Simulator<S: EventSink = TracingSink> {
    clock: Clock,
    network: Network,
    sink: S,
    summary: RunSummary,
    last_metrics: StepMetrics,
    finalized: bool,
}

impl Simulator<TracingSink> {
    /// Build a simulation from the reference models, logging through
    /// `tracing`.
    ///
    /// `apps` is called once per node, in id order, to create its
    /// application.
    pub fn new<F>(config: &SimConfig, apps: F) -> Result<Self, ConfigError>
    where
        F: FnMut(NodeId) -> Box<dyn Application>,
    {
        Self::build(config, &builtin_registry(), apps, TracingSink)
    }
}

impl<S: EventSink> Simulator<S> {
    /// Build a simulation resolving model names through `registry` and
    /// reporting events to `sink`.
    ///
    /// Every check runs here: scalar options, area dimensions, model
    /// names and parameters, then the composition check. Placement
    /// warnings are reported to `sink` at step 0.
    pub fn build<F>(
        config: &SimConfig,
        registry: &ModelRegistry,
        mut apps: F,
        mut sink: S,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(NodeId) -> Box<dyn Application>,
    {
        config.validate()?;
        let area = config.area.build()?;
        let mut random = RandomSource::from_config(config.seed, config.deterministic)?;
        let seed = random.seed();

        let mut ctx = BuildContext {
            area: &*area,
            node_count: config.node_count,
            steps: config.steps,
            period: config.period(),
            random: &mut random,
        };
        let placement = registry.placement(&config.placement, &mut ctx)?;
        let speed = registry.speed(&config.speed, &mut ctx)?;
        let mobility = registry.mobility(&config.mobility, &mut ctx)?;
        let propagation = registry.propagation(&config.propagation, &mut ctx)?;
        let packet_loss = registry.packet_loss(&config.packet_loss, &mut ctx)?;
        let failure = registry.failure(&config.failure, &mut ctx)?;
        validate_composition(&*area, &*mobility)?;

        let mut placement_random = random.stream(keys::placement())?;
        let placed = placement.place(config.node_count, &*area, &mut placement_random);
        if placed.positions.len() != config.node_count {
            return Err(ConfigError::InvalidPlacement {
                expected: config.node_count,
                actual: placed.positions.len(),
            });
        }

        let mut model_errors = 0;
        for error in placed.warnings {
            model_errors += 1;
            sink.record(SimEvent::new(
                StepId(0),
                EventKind::ModelError { node: None, error },
            ));
        }

        let mut nodes = Vec::with_capacity(config.node_count);
        for (i, position) in placed.positions.into_iter().enumerate() {
            // node_count fits u32 after validate().
            let id = NodeId(i as u32);
            let position = if area.contains(position) {
                position
            } else {
                let clamped = area.clamp(position);
                model_errors += 1;
                sink.record(SimEvent::new(
                    StepId(0),
                    EventKind::ModelError {
                        node: Some(id),
                        error: ModelError::new(
                            placement.name(),
                            format!(
                                "initial position {position} outside the area, \
                                 clamped to {clamped}"
                            ),
                        ),
                    },
                ));
                clamped
            };
            nodes.push(Node::new(
                id,
                position,
                random.stream(keys::mobility(id))?,
                random.stream(keys::failure(id))?,
                apps(id),
            ));
        }
        let group_random = random.stream(keys::mobility_group())?;

        let models = Models {
            area,
            speed,
            mobility,
            propagation,
            packet_loss,
            failure,
        };
        let mut network = Network::new(models, nodes, random, group_random, config.link_expiry);
        let init_errors = network.initialize(&mut sink);

        info!(
            nodes = config.node_count,
            steps = config.steps,
            seed,
            placement = %config.placement.name,
            mobility = %config.mobility.name,
            propagation = %config.propagation.name,
            packet_loss = %config.packet_loss.name,
            failure = %config.failure.name,
            "simulator configured"
        );

        Ok(Self {
            clock: Clock::new(config.steps, config.frequency),
            network,
            sink,
            summary: RunSummary {
                seed,
                model_errors,
                application_errors: init_errors,
                ..RunSummary::default()
            },
            last_metrics: StepMetrics::default(),
            finalized: false,
        })
    }

    /// Advance the clock and run one step.
    ///
    /// Returns `Ok(false)` without running anything once the budget is
    /// exhausted, a stop was requested, or the run was finalized. Raises
    /// the stop flag itself when no Active node remains.
    pub fn step(&mut self) -> Result<bool, StepError> {
        if self.finalized || !self.clock.advance() {
            return Ok(false);
        }
        let step = self.clock.current();
        let metrics = self.network.step(&self.clock, &mut self.sink)?;
        self.summary.absorb(&metrics);
        if metrics.crashed > 0 {
            self.summary.crashed.extend(
                self.network
                    .nodes()
                    .iter()
                    .filter(|n| n.crashed_at() == Some(step))
                    .map(|n| n.id()),
            );
        }
        self.last_metrics = metrics;

        if self.network.active_count() == 0 && !self.clock.is_stopped() {
            info!(step = step.0, "no active node remains, stopping");
            self.clock.stop_handle().stop();
        }
        Ok(true)
    }

    /// Run every remaining step, then finalize.
    pub fn run(&mut self) -> Result<RunSummary, StepError> {
        info!(
            from = self.clock.current().0,
            steps = self.clock.total(),
            "simulation started"
        );
        while self.step()? {}
        self.finalize();
        let summary = self.summary();
        info!(
            steps_run = summary.steps_run,
            crashed = summary.nodes_crashed,
            delivered = summary.delivered,
            lost = summary.lost,
            stopped_early = summary.stopped_early,
            "simulation finished"
        );
        Ok(summary)
    }

    /// Call every application's `finalize` once. Later calls, and later
    /// steps, do nothing.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let errors = self
            .network
            .finalize(self.clock.current(), &mut self.sink);
        self.summary.application_errors += errors;
        self.finalized = true;
    }

    /// Totals so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            stopped_early: self.clock.is_stopped() && !self.clock.is_exhausted(),
            ..self.summary.clone()
        }
    }

    /// Metrics of the last step run.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Current node positions, in id order.
    pub fn positions(&self) -> Vec<Point> {
        self.network.positions()
    }

    /// Crashed nodes, in crash order.
    pub fn crashed(&self) -> &[NodeId] {
        &self.summary.crashed
    }

    /// The master seed.
    pub fn seed(&self) -> u64 {
        self.summary.seed
    }

    /// The clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// A handle that stops the run after the current step.
    pub fn stop_handle(&self) -> StopHandle {
        self.clock.stop_handle()
    }

    /// The network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the simulator, returning the event sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: EventSink> fmt::Debug for Simulator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("step", &self.clock.current())
            .field("total", &self.clock.total())
            .field("network", &self.network)
            .field("finalized", &self.finalized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_core::{ApplicationError, ChannelAccess, SimTime};
    use manet_model::{BuildError, CompositionError, ModelConfig, ModelFamily};
    use manet_space::{AreaConfig, BoundaryPolicy};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        steps: Rc<Cell<u64>>,
        finals: Rc<Cell<u64>>,
    }

    impl Application for Counting {
        fn step(
            &mut self,
            _time: SimTime,
            neighbors: &[NodeId],
            channel: &mut dyn ChannelAccess,
        ) -> Result<(), ApplicationError> {
            self.steps.set(self.steps.get() + 1);
            while channel.receive().is_some() {}
            if let Some(&n) = neighbors.first() {
                channel.send(n, vec![0]);
            }
            Ok(())
        }

        fn finalize(&mut self) {
            self.finals.set(self.finals.get() + 1);
        }
    }

    fn config() -> SimConfig {
        let mut cfg = SimConfig::new(8, AreaConfig::square(100.0, BoundaryPolicy::Reflect), 30)
            .with_seed(11);
        cfg.propagation = ModelConfig::new("unit_disk").with("range", 40.0);
        cfg.speed = ModelConfig::new("constant").with("speed", 2.0);
        cfg
    }

    fn counting(
        config: &SimConfig,
    ) -> (Simulator<Vec<SimEvent>>, Rc<Cell<u64>>, Rc<Cell<u64>>) {
        let steps = Rc::new(Cell::new(0));
        let finals = Rc::new(Cell::new(0));
        let (s, f) = (steps.clone(), finals.clone());
        let sim = Simulator::build(
            config,
            &builtin_registry(),
            move |_| {
                Box::new(Counting {
                    steps: s.clone(),
                    finals: f.clone(),
                })
            },
            Vec::new(),
        )
        .unwrap();
        (sim, steps, finals)
    }

    #[test]
    fn runs_the_budget_and_finalizes_once() {
        let (mut sim, steps, finals) = counting(&config());
        let summary = sim.run().unwrap();
        assert_eq!(summary.steps_run, 30);
        assert!(!summary.stopped_early);
        assert_eq!(summary.seed, 11);
        assert_eq!(steps.get(), 8 * 30);
        assert_eq!(finals.get(), 8);
        sim.finalize();
        assert_eq!(finals.get(), 8);
        assert!(!sim.step().unwrap());
        assert!(summary.delivered > 0);
        assert_eq!(summary.lost, 0);
    }

    #[test]
    fn identical_seeds_reproduce_the_event_log() {
        let (mut a, _, _) = counting(&config());
        let (mut b, _, _) = counting(&config());
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.sink(), b.sink());

        let mut other = config();
        other.seed = Some(12);
        let (mut c, _, _) = counting(&other);
        c.run().unwrap();
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn unknown_model_fails_before_running() {
        let mut cfg = config();
        cfg.mobility = ModelConfig::new("teleport");
        let err = Simulator::new(&cfg, |_| unreachable!("no app is built"))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Model(BuildError::UnknownModel {
                family: ModelFamily::Mobility,
                name: "teleport".into(),
            })
        );
    }

    #[test]
    fn unsupported_boundary_is_fatal() {
        let mut cfg = config();
        cfg.area.boundary = BoundaryPolicy::Clamp;
        cfg.mobility = ModelConfig::new("gauss_markov");
        let err = Simulator::new(&cfg, |_| unreachable!("no app is built"))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Composition(CompositionError::UnsupportedBoundary {
                mobility: "gauss_markov".into(),
                boundary: BoundaryPolicy::Clamp,
            })
        );
    }

    #[test]
    fn all_crashed_stops_early() {
        let mut cfg = config();
        cfg.failure = ModelConfig::new("crash").with("probability", 1.0);
        let (mut sim, steps, finals) = counting(&cfg);
        let summary = sim.run().unwrap();
        assert_eq!(summary.steps_run, 1);
        assert!(summary.stopped_early);
        assert_eq!(summary.nodes_crashed, 8);
        assert_eq!(summary.crashed, (0..8).map(NodeId).collect::<Vec<_>>());
        assert_eq!(steps.get(), 0);
        assert_eq!(finals.get(), 8);
    }

    #[test]
    fn stop_handle_ends_the_run_after_the_current_step() {
        let (mut sim, _, _) = counting(&config());
        let handle = sim.stop_handle();
        for _ in 0..3 {
            assert!(sim.step().unwrap());
        }
        handle.stop();
        let summary = sim.run().unwrap();
        assert_eq!(summary.steps_run, 3);
        assert!(summary.stopped_early);
    }

    #[test]
    fn placement_warnings_are_reported_at_step_zero() {
        let mut cfg = config();
        cfg.node_count = 20;
        cfg.placement = ModelConfig::new("normal")
            .with("sigma", 50.0)
            .with("center_x", 0.0)
            .with("center_y", 0.0)
            .with("max_retries", 0.0);
        let (sim, _, _) = counting(&cfg);
        let warnings = sim
            .sink()
            .iter()
            .filter(|e| e.step == StepId(0) && e.kind.name() == "model_error")
            .count() as u64;
        assert!(warnings > 0);
        assert_eq!(sim.summary().model_errors, warnings);
        assert!(sim
            .positions()
            .iter()
            .all(|&p| sim.network().models().area.contains(p)));
    }
}
