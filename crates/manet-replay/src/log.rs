//! In-memory event recording.

use indexmap::IndexMap;
use manet_core::{EventSink, SimEvent, StepId};

use crate::hash::{event_hash, FNV_OFFSET};

/// Sink that keeps every event and a running hash of the stream.
///
/// The running hash always equals [`events_hash`](crate::events_hash)
/// of the recorded events.
#[derive(Clone, Debug)]
pub struct EventLog {
    events: Vec<SimEvent>,
    hash: u64,
    counts: IndexMap<&'static str, u64>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            hash: FNV_OFFSET,
            counts: IndexMap::new(),
        }
    }
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, in arrival order.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Hash of everything recorded so far.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events of the kind named `name` (see
    /// [`EventKind::name`](manet_core::EventKind::name)).
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Per-kind counts, in order of first occurrence.
    pub fn counts(&self) -> &IndexMap<&'static str, u64> {
        &self.counts
    }

    /// Events recorded during `step`.
    pub fn at(&self, step: StepId) -> impl Iterator<Item = &SimEvent> + '_ {
        self.events.iter().filter(move |e| e.step == step)
    }

    /// Consume the log, returning the events.
    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: SimEvent) {
        self.hash = event_hash(self.hash, &event);
        *self.counts.entry(event.kind.name()).or_insert(0) += 1;
        self.events.push(event);
    }
}
