use audit_core::progress_percent;
use tracing::debug;

use crate::session::{DetailGate, ScanPhase, ScanSession, ScanState};

use super::events::DomainEvent;

/// Whether `ev` may be applied to `state`.
///
/// Emissions must carry the active run's token and the next expected index;
/// unlocks require a completed run and a non-empty contact.
pub fn accepts(state: &ScanState, ev: &DomainEvent) -> bool {
    match ev {
        DomainEvent::RunStarted { .. } | DomainEvent::SessionReset => true,

        DomainEvent::StepEmitted { run_id, event } => {
            let session = &state.session;
            if session.run_id != Some(*run_id) {
                debug!(%run_id, index = event.index, "dropping emission from superseded run");
                return false;
            }
            if !session.is_running() {
                debug!(%run_id, index = event.index, "dropping emission after run finished");
                return false;
            }
            if event.index != session.next_index() || event.index >= state.total_steps {
                debug!(
                    %run_id,
                    index = event.index,
                    expected = session.next_index(),
                    "dropping out-of-order emission"
                );
                return false;
            }
            true
        }

        DomainEvent::UnlockRequested { contact } => {
            if !state.session.is_complete() {
                debug!(phase = ?state.session.phase, "unlock requested before scan completed");
                return false;
            }
            if contact.trim().is_empty() {
                debug!("unlock requested without a contact");
                return false;
            }
            true
        }
    }
}

pub fn reduce(mut state: ScanState, ev: DomainEvent) -> ScanState {
    if !accepts(&state, &ev) {
        return state;
    }

    match ev {
        DomainEvent::RunStarted { run_id, started_at } => {
            state.session = ScanSession::running(run_id, started_at);
            state.gate = DetailGate::default();
        }

        DomainEvent::StepEmitted { run_id: _, event } => {
            let emitted_at = event.emitted_at;
            let session = &mut state.session;
            session.emitted_events.push(event);
            session.progress_percent =
                progress_percent(session.emitted_events.len(), state.total_steps);
            if session.emitted_events.len() == state.total_steps {
                session.phase = ScanPhase::Complete;
                session.completed_at = Some(emitted_at);
            }
        }

        DomainEvent::SessionReset => {
            state.session = ScanSession::idle();
            state.gate = DetailGate::default();
        }

        DomainEvent::UnlockRequested { contact } => {
            state.gate.unlocked = true;
            state.gate.contact = Some(contact.trim().to_string());
        }
    }
    state
}
