//! First-divergence comparison between a recorded and a replayed run.
//!
//! Comparison is bit-exact: coordinates are compared by their bit
//! patterns, so `-0.0` and `0.0` differ and equal NaNs match.

use manet_core::{NodeId, Point, SimEvent, StepId};

use crate::hash::{event_hash, FNV_OFFSET};

/// The first point at which two event streams disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDivergence {
    /// Index into both streams.
    pub index: usize,
    /// Step of whichever event is present (the recorded one if both).
    pub step: StepId,
    /// The recorded event, `None` if the recorded stream ended first.
    pub recorded: Option<SimEvent>,
    /// The replayed event, `None` if the replayed stream ended first.
    pub replayed: Option<SimEvent>,
}

/// The first node whose positions disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionDivergence {
    /// The node.
    pub node: NodeId,
    /// Recorded position, `None` if the recording has fewer nodes.
    pub recorded: Option<Point>,
    /// Replayed position, `None` if the replay has fewer nodes.
    pub replayed: Option<Point>,
}

fn same_event(a: &SimEvent, b: &SimEvent) -> bool {
    a.step == b.step && event_hash(FNV_OFFSET, a) == event_hash(FNV_OFFSET, b)
}

fn same_point(a: Point, b: Point) -> bool {
    a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits()
}

/// Compare two event streams. Returns `None` if they are identical.
pub fn compare_events(recorded: &[SimEvent], replayed: &[SimEvent]) -> Option<EventDivergence> {
    let len = recorded.len().max(replayed.len());
    (0..len).find_map(|index| {
        let (rec, rep) = (recorded.get(index), replayed.get(index));
        match (rec, rep) {
            (Some(a), Some(b)) if same_event(a, b) => None,
            _ => {
                let step = rec.or(rep).map(|e| e.step).unwrap_or_default();
                Some(EventDivergence {
                    index,
                    step,
                    recorded: rec.cloned(),
                    replayed: rep.cloned(),
                })
            }
        }
    })
}

/// Compare two position lists indexed by node. Returns `None` if they
/// are bit-for-bit identical.
pub fn compare_positions(recorded: &[Point], replayed: &[Point]) -> Option<PositionDivergence> {
    let len = recorded.len().max(replayed.len());
    (0..len).find_map(|i| {
        let (rec, rep) = (recorded.get(i).copied(), replayed.get(i).copied());
        match (rec, rep) {
            (Some(a), Some(b)) if same_point(a, b) => None,
            _ => Some(PositionDivergence {
                node: NodeId(i as u32),
                recorded: rec,
                replayed: rep,
            }),
        }
    })
}
