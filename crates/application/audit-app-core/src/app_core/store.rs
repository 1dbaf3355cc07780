use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::session::ScanState;

use super::{events::DomainEvent, reducer};

#[derive(Clone)]
pub struct ScanStore {
    inner: Arc<Mutex<ScanState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl ScanStore {
    pub fn new(state: ScanState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(state)),
            revision: Arc::new(revision),
        }
    }

    pub fn state(&self) -> ScanState {
        self.lock().clone()
    }

    /// Apply `ev` if the reducer accepts it. Returns whether state changed.
    pub fn apply(&self, ev: DomainEvent) -> bool {
        {
            let mut guard = self.lock();
            if !reducer::accepts(&guard, &ev) {
                return false;
            }
            let next = reducer::reduce(guard.clone(), ev);
            *guard = next;
        }
        self.revision.send_modify(|rev| *rev += 1);
        true
    }

    /// Receiver bumped after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ScanState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
