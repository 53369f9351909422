//! Nodes and the per-step pipeline.
//!
//! [`Network::step()`] runs the phases of one step in a fixed order,
//! each phase seeing only the committed results of the phases before
//! it:
//!
//! 1. mobility, for every Active node, then the containment check;
//! 2. failure, for every Active node (a crashed node takes no further
//!    part in the run);
//! 3. link resolution over the remaining Active nodes;
//! 4. applications, for every remaining Active node, then delivery of
//!    the step's messages to the receivers' inboxes.
//!
//! Nodes are visited in ascending id order within every phase.

use std::any::Any;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use manet_core::{
    Application, ApplicationError, EventKind, EventSink, Message, ModelError, NodeId, Point,
    SimEvent, SimTime, StepId, Vector,
};
use manet_model::{
    FailureModel, MobilityModel, MotionContext, NodeMotion, PacketLossModel, PropagationModel,
    RandomError, RandomSource, RandomStream, SpeedModel,
};
use manet_space::Area;

use crate::channel::{Channel, NodeChannel, Traffic};
use crate::clock::Clock;
use crate::metrics::StepMetrics;

// ── StepError ──────────────────────────────────────────────────────

/// Error that aborts a step.
#[derive(Debug, PartialEq)]
pub enum StepError {
    /// A link's packet-loss stream could not be issued.
    Random(RandomError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random(e) => write!(f, "random: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Random(e) => Some(e),
        }
    }
}

impl From<RandomError> for StepError {
    fn from(e: RandomError) -> Self {
        Self::Random(e)
    }
}

// ── Containment ────────────────────────────────────────────────────

/// Run user code, turning a panic into [`ApplicationError::Panicked`].
pub(crate) fn contained<F>(f: F) -> Result<(), ApplicationError>
where
    F: FnOnce() -> Result<(), ApplicationError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(ApplicationError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ── Node ───────────────────────────────────────────────────────────

/// Liveness of a node. `Crashed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    /// Taking part in every phase.
    Active,
    /// Crashed; never moves, links or runs its application again.
    Crashed,
}

/// One simulated node.
pub struct Node {
    id: NodeId,
    motion: NodeMotion,
    status: NodeStatus,
    crashed_at: Option<StepId>,
    mobility_random: RandomStream,
    failure_random: RandomStream,
    app: Box<dyn Application>,
    inbox: VecDeque<Message>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        position: Point,
        mobility_random: RandomStream,
        failure_random: RandomStream,
        app: Box<dyn Application>,
    ) -> Self {
        Self {
            id,
            motion: NodeMotion::at_rest(id, position),
            status: NodeStatus::Active,
            crashed_at: None,
            mobility_random,
            failure_random,
            app,
            inbox: VecDeque::new(),
        }
    }

    /// The node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.motion.position
    }

    /// Velocity over the last step.
    pub fn velocity(&self) -> Vector {
        self.motion.velocity
    }

    /// Full motion state.
    pub fn motion(&self) -> &NodeMotion {
        &self.motion
    }

    /// Liveness.
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Whether the node is Active.
    pub fn is_active(&self) -> bool {
        self.status == NodeStatus::Active
    }

    /// Step during which the node crashed.
    pub fn crashed_at(&self) -> Option<StepId> {
        self.crashed_at
    }

    /// Messages waiting in the inbox.
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("position", &self.motion.position)
            .field("status", &self.status)
            .field("crashed_at", &self.crashed_at)
            .field("pending", &self.inbox.len())
            .finish()
    }
}

// ── Models ─────────────────────────────────────────────────────────

/// The built model graph a [`Network`] runs.
pub struct Models {
    /// Simulation area.
    pub area: Box<dyn Area>,
    /// Speed model.
    pub speed: Box<dyn SpeedModel>,
    /// Mobility model.
    pub mobility: Box<dyn MobilityModel>,
    /// Propagation model.
    pub propagation: Box<dyn PropagationModel>,
    /// Packet-loss model.
    pub packet_loss: Box<dyn PacketLossModel>,
    /// Failure model.
    pub failure: Box<dyn FailureModel>,
}

// ── Network ────────────────────────────────────────────────────────

/// Nodes, the model graph and the channel.
pub struct Network {
    nodes: Vec<Node>,
    models: Models,
    channel: Channel,
    random: RandomSource,
    group_random: RandomStream,
    outbox: Vec<(NodeId, Message)>,
}

impl Network {
    pub(crate) fn new(
        models: Models,
        nodes: Vec<Node>,
        random: RandomSource,
        group_random: RandomStream,
        link_expiry: Option<u64>,
    ) -> Self {
        let channel = Channel::new(nodes.len(), models.propagation.is_symmetric(), link_expiry);
        Self {
            nodes,
            models,
            channel,
            random,
            group_random,
            outbox: Vec::new(),
        }
    }

    /// Call every application's `initialize`, in node order. Panics are
    /// contained and reported at step 0.
    pub(crate) fn initialize<S: EventSink>(&mut self, sink: &mut S) -> u64 {
        let mut errors = 0;
        for node in &mut self.nodes {
            let id = node.id;
            let app = &mut node.app;
            if let Err(error) = contained(|| {
                app.initialize(id);
                Ok(())
            }) {
                errors += 1;
                sink.record(SimEvent::new(
                    StepId(0),
                    EventKind::ApplicationError { node: id, error },
                ));
            }
        }
        errors
    }

    /// Call every application's `finalize`, crashed nodes included.
    pub(crate) fn finalize<S: EventSink>(&mut self, step: StepId, sink: &mut S) -> u64 {
        let mut errors = 0;
        for node in &mut self.nodes {
            let app = &mut node.app;
            if let Err(error) = contained(|| {
                app.finalize();
                Ok(())
            }) {
                errors += 1;
                sink.record(SimEvent::new(
                    step,
                    EventKind::ApplicationError {
                        node: node.id,
                        error,
                    },
                ));
            }
        }
        errors
    }

    /// Run the clock's current step.
    pub fn step<S: EventSink>(
        &mut self,
        clock: &Clock,
        sink: &mut S,
    ) -> Result<StepMetrics, StepError> {
        let Self {
            nodes,
            models,
            channel,
            random,
            group_random,
            outbox,
        } = self;
        let step = clock.current();
        let time = SimTime {
            step,
            time: clock.time(),
        };
        let _span = tracing::debug_span!("step", step = step.0).entered();
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();

        // 1. Mobility.
        let phase_start = Instant::now();
        let ctx = MotionContext {
            area: &*models.area,
            step,
            time: time.time,
            dt: clock.period(),
        };
        models.mobility.begin_step(&ctx, group_random);
        for node in nodes.iter_mut().filter(|n| n.is_active()) {
            let from = node.motion.position;
            models.mobility.step(
                &ctx,
                &mut node.motion,
                &*models.speed,
                &mut node.mobility_random,
            );
            if !models.area.contains(node.motion.position) {
                let clamped = models.area.clamp(node.motion.position);
                let error = ModelError::new(
                    models.mobility.name(),
                    format!(
                        "position {} left the area, clamped to {clamped}",
                        node.motion.position
                    ),
                );
                node.motion.position = clamped;
                metrics.model_errors += 1;
                sink.record(SimEvent::new(
                    step,
                    EventKind::ModelError {
                        node: Some(node.id),
                        error,
                    },
                ));
            }
            let to = node.motion.position;
            if to != from {
                metrics.moved += 1;
                sink.record(SimEvent::new(
                    step,
                    EventKind::Moved {
                        node: node.id,
                        from,
                        to,
                    },
                ));
            }
        }
        metrics.mobility_us = phase_start.elapsed().as_micros() as u64;

        // 2. Failure.
        let phase_start = Instant::now();
        for node in nodes.iter_mut().filter(|n| n.is_active()) {
            if !models
                .failure
                .decide(node.id, step, &mut node.failure_random)
            {
                continue;
            }
            node.status = NodeStatus::Crashed;
            node.crashed_at = Some(step);
            node.inbox.clear();
            metrics.crashed += 1;
            sink.record(SimEvent::new(step, EventKind::Crashed { node: node.id }));
            let app = &mut node.app;
            if let Err(error) = contained(|| {
                app.failure(time);
                Ok(())
            }) {
                metrics.application_errors += 1;
                sink.record(SimEvent::new(
                    step,
                    EventKind::ApplicationError {
                        node: node.id,
                        error,
                    },
                ));
            }
        }
        metrics.failure_us = phase_start.elapsed().as_micros() as u64;

        // 3. Link resolution.
        let phase_start = Instant::now();
        let active: Vec<(NodeId, Point)> = nodes
            .iter()
            .filter(|n| n.is_active())
            .map(|n| (n.id, n.motion.position))
            .collect();
        metrics.active_nodes = active.len() as u64;
        let stats = channel.resolve(
            step,
            &active,
            &*models.propagation,
            &*models.packet_loss,
            random,
            &mut *sink,
        )?;
        metrics.links_up = stats.links_up;
        metrics.links_down = stats.links_down;
        metrics.live_links = stats.live_links;
        metrics.link_resolutions = stats.resolutions;
        metrics.channel_us = phase_start.elapsed().as_micros() as u64;

        // 4. Applications, then delivery.
        let phase_start = Instant::now();
        let channel: &Channel = channel;
        let mut traffic = Traffic::default();
        for node in nodes.iter_mut().filter(|n| n.is_active()) {
            let id = node.id;
            let result = {
                let mut access = NodeChannel::new(
                    id,
                    step,
                    channel,
                    &mut node.inbox,
                    &mut *outbox,
                    &mut *sink,
                    &mut traffic,
                );
                let app = &mut node.app;
                let neighbors = channel.neighbors(id);
                contained(|| app.step(time, neighbors, &mut access))
            };
            if let Err(error) = result {
                metrics.application_errors += 1;
                sink.record(SimEvent::new(
                    step,
                    EventKind::ApplicationError { node: id, error },
                ));
            }
        }
        for (to, message) in outbox.drain(..) {
            if let Some(node) = nodes.get_mut(to.index()).filter(|n| n.is_active()) {
                node.inbox.push_back(message);
            }
        }
        metrics.delivered = traffic.delivered;
        metrics.lost = traffic.lost;
        metrics.application_us = phase_start.elapsed().as_micros() as u64;

        metrics.total_us = step_start.elapsed().as_micros() as u64;
        Ok(metrics)
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// One node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Current positions, in id order.
    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(Node::position).collect()
    }

    /// Number of Active nodes.
    pub fn active_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_active()).count()
    }

    /// The channel, as resolved by the last step.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// The models the network runs.
    pub fn models(&self) -> &Models {
        &self.models
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("nodes", &self.nodes.len())
            .field("active", &self.active_count())
            .field("links", &self.channel.len())
            .field("area", &self.models.area)
            .field("mobility", &self.models.mobility.name())
            .field("propagation", &self.models.propagation.name())
            .field("packet_loss", &self.models.packet_loss.name())
            .field("failure", &self.models.failure.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_core::ChannelAccess;
    use manet_models::{ConstantSpeed, Lossless, NoFailure, RandomWaypoint, Stationary, UnitDisk};
    use manet_space::{BoundaryPolicy, Rectangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Sends one message to every neighbor and logs what it receives.
    struct Chatty {
        log: Log,
    }

    impl Application for Chatty {
        fn step(
            &mut self,
            time: SimTime,
            neighbors: &[NodeId],
            channel: &mut dyn ChannelAccess,
        ) -> Result<(), ApplicationError> {
            while let Some(m) = channel.receive() {
                self.log.borrow_mut().push(format!(
                    "{} got {:?} from {} sent {}",
                    channel.node(),
                    m.payload,
                    m.from,
                    m.sent_at
                ));
            }
            for &n in neighbors {
                channel.send(n, vec![time.step.0 as u8]);
            }
            Ok(())
        }

        fn failure(&mut self, time: SimTime) {
            self.log.borrow_mut().push(format!("failed at {}", time.step));
        }
    }

    struct Bomb;

    impl Application for Bomb {
        fn step(
            &mut self,
            time: SimTime,
            _neighbors: &[NodeId],
            _channel: &mut dyn ChannelAccess,
        ) -> Result<(), ApplicationError> {
            match time.step.0 {
                1 => panic!("exploded"),
                2 => Err(ApplicationError::failed("fizzled")),
                _ => Ok(()),
            }
        }
    }

    /// Crashes node 0 at step 2.
    struct CrashFirst;

    impl FailureModel for CrashFirst {
        fn name(&self) -> &str {
            "crash_first"
        }

        fn decide(&mut self, node: NodeId, step: StepId, _r: &mut RandomStream) -> bool {
            node == NodeId(0) && step == StepId(2)
        }
    }

    fn network(
        positions: &[Point],
        failure: Box<dyn FailureModel>,
        apps: impl Fn(NodeId) -> Box<dyn Application>,
    ) -> Network {
        let mut random = RandomSource::new(5);
        let nodes = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let id = NodeId(i as u32);
                Node::new(
                    id,
                    p,
                    random.stream(format!("mobility:node{i}")).unwrap(),
                    random.stream(format!("failure:node{i}")).unwrap(),
                    apps(id),
                )
            })
            .collect();
        let group = random.stream("mobility:group").unwrap();
        let models = Models {
            area: Box::new(Rectangle::new(100.0, 100.0, BoundaryPolicy::Reflect).unwrap()),
            speed: Box::new(ConstantSpeed::new(1.0)),
            mobility: Box::new(Stationary),
            propagation: Box::new(UnitDisk::new(20.0)),
            packet_loss: Box::new(Lossless),
            failure,
        };
        Network::new(models, nodes, random, group, None)
    }

    fn run(net: &mut Network, clock: &mut Clock, events: &mut Vec<SimEvent>) -> Vec<StepMetrics> {
        let mut out = Vec::new();
        while clock.advance() {
            out.push(net.step(clock, events).unwrap());
        }
        out
    }

    #[test]
    fn messages_arrive_on_the_next_step() {
        let log = Log::default();
        let pts = [Point::new(10.0, 10.0), Point::new(20.0, 10.0)];
        let mut net = network(&pts, Box::new(NoFailure), |_| {
            Box::new(Chatty { log: log.clone() })
        });
        let mut clock = Clock::new(2, 1.0);
        let mut events = Vec::new();
        let metrics = run(&mut net, &mut clock, &mut events);

        assert_eq!(metrics[0].delivered, 2);
        assert_eq!(metrics[0].links_up, 1);
        assert_eq!(metrics[0].moved, 0);
        assert_eq!(
            *log.borrow(),
            ["0 got [1] from 1 sent 1", "1 got [1] from 0 sent 1"]
        );
        assert_eq!(net.node(NodeId(0)).unwrap().pending(), 1);
    }

    #[test]
    fn crashed_node_leaves_every_later_phase() {
        let log = Log::default();
        let pts = [Point::new(10.0, 10.0), Point::new(20.0, 10.0)];
        let mut net = network(&pts, Box::new(CrashFirst), |_| {
            Box::new(Chatty { log: log.clone() })
        });
        let mut clock = Clock::new(4, 1.0);
        let mut events = Vec::new();
        let metrics = run(&mut net, &mut clock, &mut events);

        let node = net.node(NodeId(0)).unwrap();
        assert_eq!(node.status(), NodeStatus::Crashed);
        assert_eq!(node.crashed_at(), Some(StepId(2)));
        assert_eq!(node.pending(), 0);
        assert_eq!(metrics[1].crashed, 1);
        assert_eq!(metrics[1].links_down, 1);
        assert_eq!(metrics[1].delivered, 0);
        assert_eq!(metrics[3].active_nodes, 1);
        assert!(log.borrow().contains(&"failed at 2".to_string()));
        assert!(!log.borrow().iter().any(|l| l.starts_with("0 got")));

        let order: Vec<&str> = events
            .iter()
            .filter(|e| e.step == StepId(2))
            .map(|e| e.kind.name())
            .collect();
        assert_eq!(order, ["crashed", "link_down"]);
    }

    #[test]
    fn application_failures_are_contained() {
        let pts = [Point::new(10.0, 10.0), Point::new(90.0, 90.0)];
        let mut net = network(&pts, Box::new(NoFailure), |id| {
            if id == NodeId(0) {
                Box::new(Bomb)
            } else {
                Box::new(Chatty {
                    log: Log::default(),
                })
            }
        });
        let mut clock = Clock::new(3, 1.0);
        let mut events = Vec::new();
        let metrics = run(&mut net, &mut clock, &mut events);

        assert_eq!(metrics.len(), 3);
        assert_eq!(metrics[0].application_errors, 1);
        assert_eq!(metrics[1].application_errors, 1);
        assert_eq!(metrics[2].application_errors, 0);
        assert!(net.node(NodeId(0)).unwrap().is_active());
        let errors: Vec<&EventKind> = events
            .iter()
            .map(|e| &e.kind)
            .filter(|k| matches!(k, EventKind::ApplicationError { .. }))
            .collect();
        assert_eq!(
            errors,
            [
                &EventKind::ApplicationError {
                    node: NodeId(0),
                    error: ApplicationError::Panicked {
                        message: "exploded".into()
                    }
                },
                &EventKind::ApplicationError {
                    node: NodeId(0),
                    error: ApplicationError::failed("fizzled")
                },
            ]
        );
    }

    #[test]
    fn moving_nodes_stay_inside() {
        let pts: Vec<Point> = (0..6).map(|i| Point::new(10.0 + 15.0 * i as f64, 50.0)).collect();
        let mut net = network(&pts, Box::new(NoFailure), |_| {
            Box::new(Chatty {
                log: Log::default(),
            })
        });
        net.models.mobility = Box::new(RandomWaypoint::new(0.0));
        net.models.speed = Box::new(ConstantSpeed::new(7.0));
        let mut clock = Clock::new(200, 1.0);
        let mut events = Vec::new();
        while clock.advance() {
            net.step(&clock, &mut events).unwrap();
            for node in net.nodes() {
                assert!(net.models().area.contains(node.position()));
            }
        }
        assert!(events.iter().any(|e| e.kind.name() == "moved"));
        assert!(!events.iter().any(|e| e.kind.name() == "model_error"));
    }

    #[test]
    fn panic_payloads_become_messages() {
        let e = contained(|| panic!("static")).unwrap_err();
        assert_eq!(e, ApplicationError::Panicked { message: "static".into() });
        let e = contained(|| panic!("{}", 42)).unwrap_err();
        assert_eq!(e, ApplicationError::Panicked { message: "42".into() });
        assert!(contained(|| Ok(())).is_ok());
    }
}
