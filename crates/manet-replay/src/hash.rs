//! Hashing utilities for position and event-log comparison.
//!
//! Uses FNV-1a over exact bit patterns: two hashes are equal only when
//! every coordinate and every event field is bit-for-bit identical.
//! These hashes are not cryptographically secure; they are used for
//! fast equality checks between runs.

use manet_core::{ApplicationError, EventKind, LinkKey, LossCause, NodeId, Point, SimEvent};

/// FNV-1a offset basis for 64-bit.
pub(crate) const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(hash: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(hash, |h, &b| fnv1a_byte(h, b))
}

#[inline]
fn fnv1a_u32(hash: u64, v: u32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

#[inline]
fn fnv1a_u64(hash: u64, v: u64) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

#[inline]
fn fnv1a_f64(hash: u64, v: f64) -> u64 {
    fnv1a_u64(hash, v.to_bits())
}

/// Length-prefixed, so adjacent strings cannot alias.
fn fnv1a_str(hash: u64, s: &str) -> u64 {
    fnv1a_bytes(fnv1a_u64(hash, s.len() as u64), s.as_bytes())
}

fn fnv1a_node(hash: u64, node: NodeId) -> u64 {
    fnv1a_u32(hash, node.0)
}

fn fnv1a_point(hash: u64, p: Point) -> u64 {
    fnv1a_f64(fnv1a_f64(hash, p.x), p.y)
}

fn fnv1a_link(hash: u64, link: LinkKey) -> u64 {
    let hash = fnv1a_node(fnv1a_node(hash, link.first()), link.second());
    fnv1a_byte(hash, link.is_directed() as u8)
}

/// Hash a position list.
///
/// The node index is folded in before each position so that order
/// matters. Returns the FNV-1a offset basis for an empty list.
pub fn positions_hash(positions: &[Point]) -> u64 {
    positions
        .iter()
        .enumerate()
        .fold(FNV_OFFSET, |hash, (i, &p)| fnv1a_point(fnv1a_u64(hash, i as u64), p))
}

/// Fold one event into a running hash.
pub fn event_hash(hash: u64, event: &SimEvent) -> u64 {
    let hash = fnv1a_u64(hash, event.step.0);
    match &event.kind {
        EventKind::Moved { node, from, to } => {
            let hash = fnv1a_node(fnv1a_byte(hash, 0), *node);
            fnv1a_point(fnv1a_point(hash, *from), *to)
        }
        EventKind::LinkUp { link, quality } => {
            fnv1a_f64(fnv1a_link(fnv1a_byte(hash, 1), *link), *quality)
        }
        EventKind::LinkDown { link } => fnv1a_link(fnv1a_byte(hash, 2), *link),
        EventKind::Delivered { from, to } => {
            fnv1a_node(fnv1a_node(fnv1a_byte(hash, 3), *from), *to)
        }
        EventKind::Lost { from, to, cause } => {
            let hash = fnv1a_node(fnv1a_node(fnv1a_byte(hash, 4), *from), *to);
            fnv1a_byte(
                hash,
                match cause {
                    LossCause::PacketLoss => 0,
                    LossCause::NoLink => 1,
                },
            )
        }
        EventKind::Crashed { node } => fnv1a_node(fnv1a_byte(hash, 5), *node),
        EventKind::ApplicationError { node, error } => {
            let hash = fnv1a_node(fnv1a_byte(hash, 6), *node);
            match error {
                ApplicationError::Failed { reason } => fnv1a_str(fnv1a_byte(hash, 0), reason),
                ApplicationError::Panicked { message } => fnv1a_str(fnv1a_byte(hash, 1), message),
            }
        }
        EventKind::ModelError { node, error } => {
            let mut hash = fnv1a_byte(hash, 7);
            hash = match node {
                Some(n) => fnv1a_node(fnv1a_byte(hash, 1), *n),
                None => fnv1a_byte(hash, 0),
            };
            fnv1a_str(fnv1a_str(hash, &error.model), &error.reason)
        }
    }
}

/// Hash an event log. Returns the FNV-1a offset basis for an empty log.
pub fn events_hash(events: &[SimEvent]) -> u64 {
    events.iter().fold(FNV_OFFSET, event_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_core::{ModelError, StepId};

    fn moved(step: u64, node: u32, x: f64) -> SimEvent {
        SimEvent::new(
            StepId(step),
            EventKind::Moved {
                node: NodeId(node),
                from: Point::new(0.0, 0.0),
                to: Point::new(x, 1.0),
            },
        )
    }

    #[test]
    fn empty_inputs_hash_to_offset() {
        assert_eq!(positions_hash(&[]), FNV_OFFSET);
        assert_eq!(events_hash(&[]), FNV_OFFSET);
    }

    #[test]
    fn same_positions_same_hash() {
        let a = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let b = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(positions_hash(&a), positions_hash(&b));
    }

    #[test]
    fn position_order_matters() {
        let a = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let b = [Point::new(3.0, 4.0), Point::new(1.0, 2.0)];
        assert_ne!(positions_hash(&a), positions_hash(&b));
    }

    #[test]
    fn last_bit_changes_the_hash() {
        let x = 0.1_f64;
        let nudged = f64::from_bits(x.to_bits() + 1);
        assert_ne!(
            positions_hash(&[Point::new(x, 0.0)]),
            positions_hash(&[Point::new(nudged, 0.0)])
        );
        assert_ne!(events_hash(&[moved(1, 0, x)]), events_hash(&[moved(1, 0, nudged)]));
    }

    #[test]
    fn event_step_and_kind_matter() {
        assert_ne!(events_hash(&[moved(1, 0, 5.0)]), events_hash(&[moved(2, 0, 5.0)]));
        let up = SimEvent::new(
            StepId(1),
            EventKind::LinkDown {
                link: LinkKey::undirected(NodeId(0), NodeId(1)),
            },
        );
        let directed = SimEvent::new(
            StepId(1),
            EventKind::LinkDown {
                link: LinkKey::directed(NodeId(0), NodeId(1)),
            },
        );
        assert_ne!(events_hash(&[up]), events_hash(&[directed]));
    }

    #[test]
    fn strings_are_length_prefixed() {
        let a = SimEvent::new(
            StepId(0),
            EventKind::ModelError {
                node: None,
                error: ModelError::new("ab", "c"),
            },
        );
        let b = SimEvent::new(
            StepId(0),
            EventKind::ModelError {
                node: None,
                error: ModelError::new("a", "bc"),
            },
        );
        assert_ne!(events_hash(&[a]), events_hash(&[b]));
    }

    #[test]
    fn running_hash_matches_batch_hash() {
        let events = [moved(1, 0, 1.0), moved(1, 1, 2.0), moved(2, 0, 3.0)];
        let running = events.iter().fold(FNV_OFFSET, event_hash);
        assert_eq!(running, events_hash(&events));
    }
}
