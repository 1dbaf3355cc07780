use audit_core::StyleTag;
use chrono::{DateTime, Local, Utc};

use crate::session::{LogEvent, ScanPhase, ScanState};

pub const IDLE_PROMPT: &str = "DROP_FILE_HERE";
pub const IDLE_HINT: &str = ".PDF, .CSV, .XLSX";
pub const RUNNING_LABEL: &str = "PROCESSING_NEURAL_LAYERS...";

fn format_stamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone)]
pub struct LogLineVm {
    pub stamp: String,
    pub message: String,
    pub style: StyleTag,
}

impl From<&LogEvent> for LogLineVm {
    fn from(ev: &LogEvent) -> Self {
        Self {
            stamp: format_stamp(ev.emitted_at),
            message: ev.spec.message.clone(),
            style: ev.spec.style,
        }
    }
}

impl LogLineVm {
    /// `[HH:MM:SS] message`, the way the terminal log shows it.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.stamp, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ResultCardVm {
    pub headline: String,
    pub amount: String,
    pub narrative: String,
    pub verifications: Vec<String>,
    pub call_to_action: String,
    /// Present only once the detail gate is open.
    pub breakdown: Option<Vec<String>>,
    pub unlocked_for: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScanVm {
    pub phase: ScanPhase,
    pub status_label: String,
    pub progress: u8,
    pub progress_label: String,
    pub lines: Vec<LogLineVm>,
    pub result: Option<ResultCardVm>,
    pub can_unlock: bool,
}

pub fn scan_vm(state: &ScanState) -> ScanVm {
    let session = &state.session;
    let result = state.finding().map(|finding| ResultCardVm {
        headline: finding.headline.clone(),
        amount: finding.amount_display(),
        narrative: finding.narrative.clone(),
        verifications: finding.verifications.clone(),
        call_to_action: finding.call_to_action.clone(),
        breakdown: state
            .gate
            .unlocked
            .then(|| finding.breakdown.clone()),
        unlocked_for: state.gate.contact.clone(),
    });

    let status_label = match session.phase {
        ScanPhase::Idle => IDLE_PROMPT.to_string(),
        ScanPhase::Running => RUNNING_LABEL.to_string(),
        ScanPhase::Complete => result
            .as_ref()
            .map(|r| r.headline.to_uppercase())
            .unwrap_or_default(),
    };

    ScanVm {
        phase: session.phase,
        status_label,
        progress: session.progress_percent,
        progress_label: format!("{}%", session.progress_percent),
        lines: session.emitted_events.iter().map(LogLineVm::from).collect(),
        can_unlock: session.is_complete() && !state.gate.unlocked,
        result,
    }
}
