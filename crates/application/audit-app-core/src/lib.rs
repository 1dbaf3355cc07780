pub mod app_core;
mod async_runtime;
pub mod ports;
pub mod sequencer;
pub mod session;
pub mod viewmodel;

pub use app_core::*;
pub use ports::*;
pub use sequencer::ScanSequencer;
pub use session::{DetailGate, LogEvent, RunId, ScanPhase, ScanSession, ScanState};
pub use viewmodel::*;
