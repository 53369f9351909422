//! Default event sink: forwards simulation events to `tracing`.

use manet_core::{EventKind, EventSink, SimEvent};
use tracing::{debug, info, trace, warn};

/// Maps each [`SimEvent`] onto a `tracing` record.
///
/// Movement is logged at `trace`; link and delivery events at `debug`;
/// crashes at `info`; contained application and model errors at `warn`.
/// Every record carries the step index as a field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: SimEvent) {
        let step = event.step.0;
        match event.kind {
            EventKind::Moved { node, from, to } => {
                trace!(step, %node, %from, %to, "moved");
            }
            EventKind::LinkUp { link, quality } => {
                debug!(step, %link, quality, "link_up");
            }
            EventKind::LinkDown { link } => {
                debug!(step, %link, "link_down");
            }
            EventKind::Delivered { from, to } => {
                debug!(step, %from, %to, "delivered");
            }
            EventKind::Lost { from, to, cause } => {
                debug!(step, %from, %to, ?cause, "lost");
            }
            EventKind::Crashed { node } => {
                info!(step, %node, "crashed");
            }
            EventKind::ApplicationError { node, error } => {
                warn!(step, %node, %error, "application_error");
            }
            EventKind::ModelError { node, error } => {
                warn!(step, ?node, %error, "model_error");
            }
        }
    }
}
