/// Intents relayed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCommand {
    /// Drop or click on the upload zone. Restarts any run in flight.
    StartScan,

    // Detail gate
    RequestUnlock { contact: String },

    Reset,
}
