#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no steps")]
    Empty,
    #[error("step {index} has an empty message")]
    EmptyMessage { index: usize },
    #[error("step {index} fires at {delay_ms}ms, not after the previous step at {previous_ms}ms")]
    NonIncreasingDelay {
        index: usize,
        previous_ms: u64,
        delay_ms: u64,
    },
    #[error("invalid speed factor: {0}")]
    InvalidScale(f64),
}
