//! Strongly-typed identifiers and the [`NodeSet`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a node within a simulated network.
///
/// Nodes are created at simulation start and numbered sequentially:
/// `NodeId(n)` is the n-th node produced by placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The node's position in network order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Step 0 is the initial state produced by placement; the first
/// executed step is step 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Key of a link record in the channel's link table.
///
/// Undirected keys are normalized so that `undirected(a, b)` and
/// `undirected(b, a)` are the same key. Directed keys keep their
/// orientation and never compare equal to an undirected key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey {
    a: NodeId,
    b: NodeId,
    directed: bool,
}

impl LinkKey {
    /// Unordered pair; endpoint order is irrelevant.
    pub fn undirected(a: NodeId, b: NodeId) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
            directed: false,
        }
    }

    /// Ordered pair for transmissions from `from` to `to`.
    pub fn directed(from: NodeId, to: NodeId) -> Self {
        Self {
            a: from,
            b: to,
            directed: true,
        }
    }

    /// First endpoint (the sender for directed keys).
    pub fn first(&self) -> NodeId {
        self.a
    }

    /// Second endpoint (the receiver for directed keys).
    pub fn second(&self) -> NodeId {
        self.b
    }

    /// Whether this key names an ordered link.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.directed {
            write!(f, "link({}->{})", self.a, self.b)
        } else {
            write!(f, "link({},{})", self.a, self.b)
        }
    }
}

/// A node's neighbor set for one step.
///
/// Uses `SmallVec<[NodeId; 8]>` so that typical sparse neighborhoods
/// stay on the stack. Always sorted ascending.
pub type NodeSet = SmallVec<[NodeId; 8]>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn undirected_key_is_order_independent() {
        let k1 = LinkKey::undirected(NodeId(9), NodeId(3));
        let k2 = LinkKey::undirected(NodeId(3), NodeId(9));
        assert_eq!(k1, k2);
        assert_eq!(k1.first(), NodeId(3));
        assert_eq!(k1.to_string(), "link(3,9)");
    }

    #[test]
    fn directed_key_keeps_orientation() {
        let fwd = LinkKey::directed(NodeId(9), NodeId(3));
        let back = LinkKey::directed(NodeId(3), NodeId(9));
        assert_ne!(fwd, back);
        assert_ne!(fwd, LinkKey::undirected(NodeId(9), NodeId(3)));
        assert_eq!(fwd.to_string(), "link(9->3)");
        assert!(fwd.touches(NodeId(3)));
        assert!(!fwd.touches(NodeId(4)));
    }

    #[test]
    fn step_next_increments() {
        assert_eq!(StepId(4).next(), StepId(5));
        assert_eq!(StepId::default(), StepId(0));
    }

    proptest! {
        #[test]
        fn undirected_key_orders_endpoints(a in any::<u32>(), b in any::<u32>()) {
            let key = LinkKey::undirected(NodeId(a), NodeId(b));
            prop_assert_eq!(key, LinkKey::undirected(NodeId(b), NodeId(a)));
            prop_assert!(key.first() <= key.second());
            prop_assert!(key.touches(NodeId(a)) && key.touches(NodeId(b)));
            prop_assert!(!key.is_directed());
        }
    }
}
