//! Flooding over a mobile network with crashes.
//!
//! Every node rebroadcasts each new rumour it hears. Prints how far the
//! rumour from node 0 spread and what the channel did along the way.
//! Set `RUST_LOG=manet_engine=debug` to watch individual link events.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use manet_bench::dense_profile;
use manet_core::{Application, ApplicationError, ChannelAccess, NodeId, SimTime};
use manet_engine::Simulator;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Reached = Rc<RefCell<BTreeSet<NodeId>>>;

struct Gossip {
    informed: bool,
    forwarded: bool,
    reached: Reached,
}

impl Application for Gossip {
    fn initialize(&mut self, node: NodeId) {
        if self.informed {
            self.reached.borrow_mut().insert(node);
        }
    }

    fn step(
        &mut self,
        _time: SimTime,
        _neighbors: &[NodeId],
        channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        while channel.receive().is_some() {
            self.informed = true;
        }
        if self.informed && !self.forwarded {
            self.reached.borrow_mut().insert(channel.node());
            channel.broadcast(b"rumour".to_vec());
            self.forwarded = true;
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,flooding=info")),
        )
        .init();

    let mut config = dense_profile(7);
    config.steps = 100;
    let reached = Reached::default();

    let mut sim = Simulator::new(&config, |id| {
        Box::new(Gossip {
            informed: id == NodeId(0),
            forwarded: false,
            reached: reached.clone(),
        })
    })
    .unwrap_or_else(|e| panic!("invalid configuration: {e}"));

    let summary = sim.run().unwrap_or_else(|e| panic!("step failed: {e}"));
    info!(seed = summary.seed, "run complete");

    println!("=== MANET Flooding Example ===\n");
    println!("nodes:          {}", config.node_count);
    println!("steps run:      {}", summary.steps_run);
    println!("reached:        {}", reached.borrow().len());
    println!("crashed:        {}", summary.nodes_crashed);
    println!("delivered:      {}", summary.delivered);
    println!("lost:           {}", summary.lost);
    println!("loss ratio:     {:.3}", summary.loss_ratio());
    println!("link resolves:  {}", summary.link_resolutions);
}
