use std::fmt;

use kitup_tools::ToolId;
use tracing::info;

/// How an install session ended. Finalized exactly once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded,
    Cancelled,
    Failed,
}

impl InstallOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fire-and-forget sink for install-attempt records.
pub trait Telemetry: Send + Sync {
    fn record_install(&self, tool: ToolId, outcome: InstallOutcome);
}

/// Default emitter: one structured log event per attempt.
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record_install(&self, tool: ToolId, outcome: InstallOutcome) {
        info!(cli = %tool, result = %outcome, "install attempt finished");
    }
}
