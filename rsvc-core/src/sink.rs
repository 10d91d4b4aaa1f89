// rsvc-core/src/sink.rs
use rsvc_common::events::{InstallEvent, LoggingSink};

/// Forwards install progress into the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LoggingSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "rsvc::install", "{}", message);
    }

    fn event(&self, event: &InstallEvent) {
        tracing::info!(target: "rsvc::install", ?event, "{}", event);
    }
}
