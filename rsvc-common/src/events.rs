// rsvc-common/src/events.rs
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Lifecycle markers emitted around a full installation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallEvent {
    InstallationStarted { total_types: usize },
    InstallationFinished { total_types: usize },
}

impl fmt::Display for InstallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallEvent::InstallationStarted { total_types } => {
                write!(f, "starting installation of {total_types} services")
            }
            InstallEvent::InstallationFinished { total_types } => {
                write!(f, "finished installing {total_types}")
            }
        }
    }
}

/// Observer of installation progress.
pub trait LoggingSink: Send + Sync {
    fn info(&self, message: &str);

    /// Lifecycle events arrive here; by default they are rendered as info messages.
    fn event(&self, event: &InstallEvent) {
        self.info(&event.to_string());
    }
}

/// Formats `args` once and hands the message to every sink.
pub fn broadcast(sinks: &[Arc<dyn LoggingSink>], args: fmt::Arguments<'_>) {
    if sinks.is_empty() {
        return;
    }
    let message = fmt::format(args);
    for sink in sinks {
        sink.info(&message);
    }
}
