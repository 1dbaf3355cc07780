pub mod commands;
pub mod events;
pub mod reducer;
pub mod store;

pub use commands::ScanCommand;
pub use events::DomainEvent;
pub use reducer::{accepts, reduce};
pub use store::ScanStore;
