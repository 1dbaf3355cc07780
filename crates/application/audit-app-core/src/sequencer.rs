use std::sync::Arc;
use std::time::Duration;

use audit_core::{Catalog, Finding};
use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::app_core::{DomainEvent, ScanCommand, ScanStore};
use crate::ports::{LeadCapturePort, NoLeadCapture};
use crate::session::{LogEvent, RunId, ScanState};

/// Drives one simulated scan at a time through the catalog.
///
/// Each run gets a fresh [`RunId`] and a single scheduled task that sleeps
/// until `run start + delay` for every step in order. Starting again or
/// resetting cancels that task, and the store rejects anything still stamped
/// with an old token.
pub struct ScanSequencer<L = NoLeadCapture> {
    catalog: Arc<Catalog>,
    store: ScanStore,
    leads: Arc<L>,
    cancel: Option<CancellationToken>,
}

impl ScanSequencer<NoLeadCapture> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_lead_capture(catalog, NoLeadCapture)
    }
}

impl<L> ScanSequencer<L>
where
    L: LeadCapturePort,
{
    pub fn with_lead_capture(catalog: Catalog, leads: L) -> Self {
        let store = ScanStore::new(ScanState::new(catalog.len(), Finding::shadow_audit()));
        Self {
            catalog: Arc::new(catalog),
            store,
            leads: Arc::new(leads),
            cancel: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ScanStore {
        &self.store
    }

    pub fn state(&self) -> ScanState {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// Route an intent. Returns `false` when an unlock request was rejected.
    pub fn dispatch(&mut self, cmd: ScanCommand) -> anyhow::Result<bool> {
        match cmd {
            ScanCommand::StartScan => {
                self.start_run()?;
                Ok(true)
            }
            ScanCommand::RequestUnlock { contact } => Ok(self.request_unlock(&contact)),
            ScanCommand::Reset => {
                self.reset();
                Ok(true)
            }
        }
    }

    /// Begin a fresh run, superseding any run in flight. Returns without waiting.
    ///
    /// Uses the caller's tokio runtime when it has timers enabled, otherwise a
    /// shared single-worker fallback runtime. Fails only if that fallback
    /// cannot be built.
    pub fn start_run(&mut self) -> anyhow::Result<RunId> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) if timers_enabled() => handle,
            Ok(_) => {
                debug!("current runtime has no timer driver, using fallback runtime");
                crate::async_runtime::runtime()?.handle().clone()
            }
            Err(_) => crate::async_runtime::runtime()?.handle().clone(),
        };

        self.cancel();
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let run_id: RunId = uuid::Uuid::new_v4();
        let started = Instant::now();
        self.store.apply(DomainEvent::RunStarted {
            run_id,
            started_at: Utc::now(),
        });
        debug!(%run_id, steps = self.catalog.len(), "scan run started");

        handle.spawn(run_schedule(
            self.catalog.clone(),
            self.store.clone(),
            run_id,
            started,
            token,
        ));

        Ok(run_id)
    }

    /// Cancel any pending emissions and return to an empty idle session.
    pub fn reset(&mut self) {
        self.cancel();
        self.store.apply(DomainEvent::SessionReset);
    }

    /// Open the detail gate for `contact`. Only takes effect after the run completes.
    pub fn request_unlock(&mut self, contact: &str) -> bool {
        let applied = self.store.apply(DomainEvent::UnlockRequested {
            contact: contact.to_string(),
        });
        if !applied {
            return false;
        }

        let state = self.store.state();
        if let (Some(contact), Some(finding)) = (state.gate.contact.as_deref(), state.finding()) {
            info!(contact, "forensic report unlocked");
            if let Err(e) = self.leads.capture(contact, finding) {
                warn!("Failed to hand off captured lead: {e:#}");
            }
        }
        true
    }

    fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

impl<L> Drop for ScanSequencer<L> {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

// tokio panics when a sleep is created on a runtime built without
// `enable_time`, so try one here rather than inside the spawned task.
fn timers_enabled() -> bool {
    std::panic::catch_unwind(|| drop(tokio::time::sleep(Duration::ZERO))).is_ok()
}

async fn run_schedule(
    catalog: Arc<Catalog>,
    store: ScanStore,
    run_id: RunId,
    started: Instant,
    token: CancellationToken,
) {
    for (index, spec) in catalog.steps().iter().enumerate() {
        // Absolute deadlines: a late wake-up never pushes later steps back.
        let deadline = started + spec.delay();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(%run_id, index, "scan run cancelled");
                return;
            }
            _ = sleep_until(deadline) => {}
        }

        let event = LogEvent {
            index,
            spec: spec.clone(),
            emitted_at: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        if !store.apply(DomainEvent::StepEmitted { run_id, event }) {
            return;
        }
    }
    info!(%run_id, "scan run complete");
}
