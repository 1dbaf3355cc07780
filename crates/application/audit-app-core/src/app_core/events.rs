use chrono::{DateTime, Utc};

use crate::session::{LogEvent, RunId};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Run lifecycle
    RunStarted {
        run_id: RunId,
        started_at: DateTime<Utc>,
    },
    StepEmitted {
        run_id: RunId,
        event: LogEvent,
    },
    SessionReset,

    // Detail gate
    UnlockRequested {
        contact: String,
    },
}
