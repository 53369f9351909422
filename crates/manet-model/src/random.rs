//! Deterministic, keyed random streams.
//!
//! A [`RandomSource`] owns the master seed and issues one
//! [`RandomStream`] per consumer key. A stream depends only on the
//! master seed and its key, so streams are independent of request
//! order: adding or removing one consumer never shifts another's
//! sequence. Each key is issued at most once; the stream is then owned
//! exclusively by whoever requested it.

use crate::error::RandomError;
use indexmap::IndexSet;
use manet_core::{LinkKey, NodeId, StepId};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

/// FNV-1a over the key bytes; selects the ChaCha stream.
fn key_hash(key: &str) -> u64 {
    key.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Bank of keyed deterministic random streams.
#[derive(Debug)]
pub struct RandomSource {
    seed: u64,
    issued: IndexSet<String>,
}

impl RandomSource {
    /// Create a source from an explicit master seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            issued: IndexSet::new(),
        }
    }

    /// Create a source from an optional seed.
    ///
    /// Deterministic runs require a seed. Non-deterministic runs without
    /// one draw a master seed from the thread-local entropy source; the
    /// drawn seed is still reported by [`seed`](Self::seed) so the run
    /// can be reproduced afterwards.
    pub fn from_config(seed: Option<u64>, deterministic: bool) -> Result<Self, RandomError> {
        match (seed, deterministic) {
            (Some(seed), _) => Ok(Self::new(seed)),
            (None, true) => Err(RandomError::MissingSeed),
            (None, false) => Ok(Self::new(rand::rng().next_u64())),
        }
    }

    /// The master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Issue the stream for `key`.
    ///
    /// Returns `Err(RandomError::DuplicateStream)` if the key was already
    /// issued by this source.
    pub fn stream(&mut self, key: impl Into<String>) -> Result<RandomStream, RandomError> {
        let key = key.into();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(key_hash(&key));
        if !self.issued.insert(key.clone()) {
            return Err(RandomError::DuplicateStream { key });
        }
        Ok(RandomStream { rng })
    }

    /// Number of streams issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

/// One consumer's private random sequence.
///
/// Implements [`RngCore`], so every `rand::Rng` method is available,
/// plus the handful of distributions the models need.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: ChaCha8Rng,
}

impl RandomStream {
    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform sample in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            lo + (hi - lo) * self.unit()
        } else {
            lo
        }
    }

    /// Gaussian sample via the Box-Muller transform.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - unit() lies in (0, 1], keeping ln() finite.
        let u1 = 1.0 - self.unit();
        let u2 = self.unit();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std_dev * z
    }

    /// Bernoulli trial: true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst);
    }
}

/// Canonical stream keys.
///
/// Every consumer in the kernel requests its stream through one of
/// these, so the key space is documented in one place.
pub mod keys {
    use super::*;

    /// Initial placement.
    pub fn placement() -> String {
        "placement".to_string()
    }

    /// A node's mobility (and speed) draws.
    pub fn mobility(node: NodeId) -> String {
        format!("mobility:node{node}")
    }

    /// Group-level mobility state shared by all nodes of a model.
    pub fn mobility_group() -> String {
        "mobility:group".to_string()
    }

    /// A node's per-step failure draws.
    pub fn failure(node: NodeId) -> String {
        format!("failure:node{node}")
    }

    /// Failure schedules computed at construction.
    pub fn failure_schedule() -> String {
        "failure:schedule".to_string()
    }

    /// A link record's packet-loss process. `created` distinguishes a
    /// record re-created after expiry from the original.
    pub fn packet_loss(link: LinkKey, created: StepId) -> String {
        format!("packetloss:{link}@step{created}")
    }
}
