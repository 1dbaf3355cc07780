//! JSON catalog files.
//!
//! ```json
//! { "steps": [ { "message": "BOOTING...", "style": "info", "delay_ms": 800 } ] }
//! ```

use anyhow::Context;
use camino::Utf8Path;

use crate::catalog::Catalog;

pub fn parse_catalog(json: &str) -> anyhow::Result<Catalog> {
    serde_json::from_str(json).context("Invalid catalog JSON")
}

pub fn load_catalog(path: &Utf8Path) -> anyhow::Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {path}"))?;
    parse_catalog(&json).with_context(|| format!("Failed to load catalog {path}"))
}

pub fn catalog_to_json(catalog: &Catalog) -> anyhow::Result<String> {
    serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")
}
