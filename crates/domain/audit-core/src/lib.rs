pub mod catalog;
pub mod error;
pub mod finding;
pub mod formats;
pub mod progress;

pub use catalog::{Catalog, LogEventSpec, StyleTag};
pub use error::CatalogError;
pub use finding::Finding;
pub use progress::progress_percent;
