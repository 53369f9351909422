//! Link table, per-step link resolution and per-node message access.
//!
//! [`Channel`] keeps one record per link, created lazily the first time
//! two Active nodes come into range. A record outlives range changes:
//! its packet-loss state only advances on steps where the link is in
//! range and resolved, and is never reset on re-entry. Loss is resolved
//! once per link per step; every message sent over the link that step
//! sees the same outcome.
//!
//! Pairs are unordered unless the propagation model reports itself
//! asymmetric, in which case each direction has its own record.

use std::collections::VecDeque;

use indexmap::map::Entry;
use indexmap::IndexMap;
use manet_core::{
    ChannelAccess, EventKind, EventSink, LinkKey, LossCause, Message, NodeId, NodeSet, Point,
    SimEvent, StepId,
};
use manet_model::{
    keys, LinkState, PacketLossModel, PropagationModel, RandomError, RandomSource, RandomStream,
};

// ── LinkRecord ─────────────────────────────────────────────────────

#[derive(Debug)]
struct LinkRecord {
    state: LinkState,
    quality: f64,
    in_range: bool,
    deliverable: bool,
    created: StepId,
    last_resolved: Option<StepId>,
    resolutions: u64,
    out_of_range_since: Option<StepId>,
    random: RandomStream,
}

impl LinkRecord {
    fn new(state: LinkState, created: StepId, random: RandomStream) -> Self {
        Self {
            state,
            quality: f64::NEG_INFINITY,
            in_range: false,
            deliverable: false,
            created,
            last_resolved: None,
            resolutions: 0,
            out_of_range_since: None,
            random,
        }
    }
}

/// Read-only snapshot of one link record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkView {
    /// The link.
    pub key: LinkKey,
    /// Packet-loss state after the last resolution.
    pub state: LinkState,
    /// Quality at the last evaluation.
    pub quality: f64,
    /// Whether the link is currently over the reception threshold.
    pub in_range: bool,
    /// Whether traffic over the link is delivered this step.
    pub deliverable: bool,
    /// Step the record was created.
    pub created: StepId,
    /// Last step the packet-loss process advanced.
    pub last_resolved: Option<StepId>,
    /// Number of times the packet-loss process advanced.
    pub resolutions: u64,
}

/// Counters from one [`Channel::resolve()`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Links that came into range.
    pub links_up: u64,
    /// Links that left range or lost an endpoint.
    pub links_down: u64,
    /// Packet-loss resolutions performed.
    pub resolutions: u64,
    /// Links in range after the pass.
    pub live_links: u64,
    /// Records evicted by link expiry.
    pub expired: u64,
}

// ── Channel ────────────────────────────────────────────────────────

/// The link table and this step's resolved neighbor sets.
#[derive(Debug)]
pub struct Channel {
    links: IndexMap<LinkKey, LinkRecord>,
    symmetric: bool,
    expiry: Option<u64>,
    neighbors: Vec<NodeSet>,
    reachable: Vec<NodeSet>,
}

impl Channel {
    /// An empty channel for `node_count` nodes.
    ///
    /// `expiry` evicts records that stay out of range for that many
    /// consecutive steps; `None` keeps every record for the whole run.
    pub fn new(node_count: usize, symmetric: bool, expiry: Option<u64>) -> Self {
        Self {
            links: IndexMap::new(),
            symmetric,
            expiry,
            neighbors: vec![NodeSet::new(); node_count],
            reachable: vec![NodeSet::new(); node_count],
        }
    }

    /// Whether pairs are resolved unordered.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Key of the record carrying traffic from `from` to `to`.
    pub fn key(&self, from: NodeId, to: NodeId) -> LinkKey {
        if self.symmetric {
            LinkKey::undirected(from, to)
        } else {
            LinkKey::directed(from, to)
        }
    }

    /// Resolve this step's link set over the Active nodes.
    ///
    /// `active` must be in ascending node order. Links with an endpoint
    /// missing from `active` go down first, then every pair is evaluated
    /// in node order, then expired records are evicted.
    pub fn resolve<S: EventSink + ?Sized>(
        &mut self,
        step: StepId,
        active: &[(NodeId, Point)],
        propagation: &dyn PropagationModel,
        packet_loss: &dyn PacketLossModel,
        random: &mut RandomSource,
        sink: &mut S,
    ) -> Result<ResolveStats, RandomError> {
        let mut stats = ResolveStats::default();
        self.neighbors.iter_mut().for_each(NodeSet::clear);
        self.reachable.iter_mut().for_each(NodeSet::clear);

        let mut alive = vec![false; self.neighbors.len()];
        for (id, _) in active {
            if let Some(slot) = alive.get_mut(id.index()) {
                *slot = true;
            }
        }
        let is_alive = |id: NodeId| alive.get(id.index()).copied().unwrap_or(false);

        for (key, record) in self.links.iter_mut() {
            if record.in_range && !(is_alive(key.first()) && is_alive(key.second())) {
                record.in_range = false;
                record.deliverable = false;
                record.out_of_range_since = Some(step);
                stats.links_down += 1;
                sink.record(SimEvent::new(step, EventKind::LinkDown { link: *key }));
            }
        }

        for (i, &(a, pa)) in active.iter().enumerate() {
            let peers = if self.symmetric {
                &active[i + 1..]
            } else {
                active
            };
            for &(b, pb) in peers {
                if a == b {
                    continue;
                }
                let key = self.key(a, b);
                let quality = propagation.quality(pa, pb);

                if !propagation.in_range(quality) {
                    if let Some(record) = self.links.get_mut(&key) {
                        record.quality = quality;
                        record.deliverable = false;
                        if record.in_range {
                            record.in_range = false;
                            record.out_of_range_since = Some(step);
                            stats.links_down += 1;
                            sink.record(SimEvent::new(step, EventKind::LinkDown { link: key }));
                        }
                    }
                    continue;
                }

                let record = match self.links.entry(key) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => {
                        let stream = random.stream(keys::packet_loss(key, step))?;
                        e.insert(LinkRecord::new(packet_loss.initial_state(), step, stream))
                    }
                };
                let (delivered, next) =
                    packet_loss.resolve(record.state, quality, &mut record.random);
                record.state = next;
                record.quality = quality;
                record.deliverable = delivered;
                record.last_resolved = Some(step);
                record.resolutions += 1;
                record.out_of_range_since = None;
                stats.resolutions += 1;
                if !record.in_range {
                    record.in_range = true;
                    stats.links_up += 1;
                    sink.record(SimEvent::new(step, EventKind::LinkUp { link: key, quality }));
                }

                self.reachable[a.index()].push(b);
                if delivered {
                    self.neighbors[a.index()].push(b);
                }
                if self.symmetric {
                    self.reachable[b.index()].push(a);
                    if delivered {
                        self.neighbors[b.index()].push(a);
                    }
                }
            }
        }

        if let Some(expiry) = self.expiry {
            let before = self.links.len();
            self.links.retain(|_, r| {
                r.out_of_range_since
                    .is_none_or(|since| step.0.saturating_sub(since.0) < expiry)
            });
            stats.expired = (before - self.links.len()) as u64;
        }

        stats.live_links = self.links.values().filter(|r| r.in_range).count() as u64;
        Ok(stats)
    }

    /// Peers `node` can deliver to this step, ascending.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.neighbors.get(node.index()).map_or(&[], |s| s.as_slice())
    }

    /// Peers in range of `node` this step, whether or not traffic is
    /// lost, ascending.
    pub fn reachable(&self, node: NodeId) -> &[NodeId] {
        self.reachable.get(node.index()).map_or(&[], |s| s.as_slice())
    }

    /// Whether the link from `from` to `to` is in range this step.
    pub fn is_in_range(&self, from: NodeId, to: NodeId) -> bool {
        from != to
            && self
                .links
                .get(&self.key(from, to))
                .is_some_and(|r| r.in_range)
    }

    /// Whether traffic from `from` to `to` is delivered this step.
    pub fn is_deliverable(&self, from: NodeId, to: NodeId) -> bool {
        from != to
            && self
                .links
                .get(&self.key(from, to))
                .is_some_and(|r| r.in_range && r.deliverable)
    }

    /// Snapshot of the record carrying traffic from `from` to `to`.
    pub fn link(&self, from: NodeId, to: NodeId) -> Option<LinkView> {
        let key = self.key(from, to);
        self.links.get(&key).map(|r| view(key, r))
    }

    /// Snapshots of every record, in creation order.
    pub fn links(&self) -> impl Iterator<Item = LinkView> + '_ {
        self.links.iter().map(|(k, r)| view(*k, r))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no record exists.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

fn view(key: LinkKey, r: &LinkRecord) -> LinkView {
    LinkView {
        key,
        state: r.state,
        quality: r.quality,
        in_range: r.in_range,
        deliverable: r.deliverable,
        created: r.created,
        last_resolved: r.last_resolved,
        resolutions: r.resolutions,
    }
}

// ── NodeChannel ────────────────────────────────────────────────────

/// Delivery counters accumulated by [`NodeChannel`]s during a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Traffic {
    /// Messages delivered.
    pub delivered: u64,
    /// Messages lost, for any cause.
    pub lost: u64,
}

/// One node's handle onto the channel during the application phase.
///
/// Sends consult the step's resolved link state and never re-roll loss.
/// Delivered messages are staged in the step's outbox and reach the
/// receiver's inbox once the application phase is over.
pub struct NodeChannel<'a> {
    node: NodeId,
    step: StepId,
    channel: &'a Channel,
    inbox: &'a mut VecDeque<Message>,
    outbox: &'a mut Vec<(NodeId, Message)>,
    sink: &'a mut dyn EventSink,
    traffic: &'a mut Traffic,
}

impl<'a> NodeChannel<'a> {
    pub(crate) fn new(
        node: NodeId,
        step: StepId,
        channel: &'a Channel,
        inbox: &'a mut VecDeque<Message>,
        outbox: &'a mut Vec<(NodeId, Message)>,
        sink: &'a mut dyn EventSink,
        traffic: &'a mut Traffic,
    ) -> Self {
        Self {
            node,
            step,
            channel,
            inbox,
            outbox,
            sink,
            traffic,
        }
    }
}

impl ChannelAccess for NodeChannel<'_> {
    fn node(&self) -> NodeId {
        self.node
    }

    fn send(&mut self, to: NodeId, payload: Vec<u8>) -> bool {
        let from = self.node;
        let cause = if !self.channel.is_in_range(from, to) {
            Some(LossCause::NoLink)
        } else if !self.channel.is_deliverable(from, to) {
            Some(LossCause::PacketLoss)
        } else {
            None
        };
        match cause {
            None => {
                self.outbox.push((
                    to,
                    Message {
                        from,
                        sent_at: self.step,
                        payload,
                    },
                ));
                self.traffic.delivered += 1;
                self.sink
                    .record(SimEvent::new(self.step, EventKind::Delivered { from, to }));
                true
            }
            Some(cause) => {
                self.traffic.lost += 1;
                self.sink
                    .record(SimEvent::new(self.step, EventKind::Lost { from, to, cause }));
                false
            }
        }
    }

    fn broadcast(&mut self, payload: Vec<u8>) -> usize {
        let channel = self.channel;
        channel
            .reachable(self.node)
            .iter()
            .filter(|&&peer| self.send(peer, payload.clone()))
            .count()
    }

    fn receive(&mut self) -> Option<Message> {
        self.inbox.pop_front()
    }

    fn pending(&self) -> usize {
        self.inbox.len()
    }
}
