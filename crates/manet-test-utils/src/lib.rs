//! Test utilities for MANET development.
//!
//! Provides canned [`Application`](manet_core::Application)
//! implementations, mock models registered under their own names, and
//! ready-made configurations for integration tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod apps;
pub mod fixtures;
pub mod mocks;

pub use apps::{
    Callback, CallbackLog, FaultyApp, FloodApp, PanickingApp, RecordingApp, SilentApp,
};
pub use fixtures::{reference_config, scenario_config, silent};
pub use mocks::{mock_registry, Eastward, ScriptedFailure};
