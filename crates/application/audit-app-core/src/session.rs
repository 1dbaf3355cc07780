use audit_core::{Finding, LogEventSpec};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Token identifying one run. Emissions stamped with any other token are dropped.
pub type RunId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanPhase {
    Idle,
    Running,
    Complete,
}

/// A catalog step as it was actually emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub index: usize,
    pub spec: LogEventSpec,
    pub emitted_at: DateTime<Utc>,
    /// Scheduler-clock offset from run start.
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSession {
    pub run_id: Option<RunId>,
    pub phase: ScanPhase,
    pub emitted_events: Vec<LogEvent>,
    pub progress_percent: u8,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanSession {
    pub fn idle() -> Self {
        Self {
            run_id: None,
            phase: ScanPhase::Idle,
            emitted_events: Vec::new(),
            progress_percent: 0,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn running(run_id: RunId, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Some(run_id),
            phase: ScanPhase::Running,
            started_at: Some(started_at),
            ..Self::idle()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == ScanPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ScanPhase::Complete
    }

    /// Catalog index the session expects to receive next.
    pub fn next_index(&self) -> usize {
        self.emitted_events.len()
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailGate {
    pub unlocked: bool,
    pub contact: Option<String>,
}

/// Everything the presentation layer observes.
///
/// Serializes the same view presenters get: `finding` is `null` until the run
/// completes and its `breakdown` is omitted while the gate is locked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanState {
    pub session: ScanSession,
    pub gate: DetailGate,
    pub total_steps: usize,
    finding: Finding,
}

impl ScanState {
    pub fn new(total_steps: usize, finding: Finding) -> Self {
        Self {
            session: ScanSession::idle(),
            gate: DetailGate::default(),
            total_steps,
            finding,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.session.phase
    }

    pub fn detail_unlocked(&self) -> bool {
        self.gate.unlocked
    }

    /// The synthetic result; only disclosed once the run is complete.
    pub fn finding(&self) -> Option<&Finding> {
        self.session.is_complete().then_some(&self.finding)
    }
}

#[derive(Serialize)]
struct FindingSnapshot<'a> {
    headline: &'a str,
    amount_cents: u64,
    narrative: &'a str,
    verifications: &'a [String],
    call_to_action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a [String]>,
}

#[derive(Serialize)]
struct StateSnapshot<'a> {
    session: &'a ScanSession,
    gate: &'a DetailGate,
    total_steps: usize,
    finding: Option<FindingSnapshot<'a>>,
}

impl Serialize for ScanState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let finding = self.finding().map(|f| FindingSnapshot {
            headline: &f.headline,
            amount_cents: f.amount_cents,
            narrative: &f.narrative,
            verifications: &f.verifications,
            call_to_action: &f.call_to_action,
            breakdown: self.gate.unlocked.then_some(f.breakdown.as_slice()),
        });
        StateSnapshot {
            session: &self.session,
            gate: &self.gate,
            total_steps: self.total_steps,
            finding,
        }
        .serialize(serializer)
    }
}
