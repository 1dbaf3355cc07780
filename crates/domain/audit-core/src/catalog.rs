use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CatalogError;

/// Emphasis class for a log line. Presentation only; it never affects scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Info,
    Highlight,
    Muted,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEventSpec {
    pub message: String,
    pub style: StyleTag,
    /// Offset from run start, not from the previous step.
    pub delay_ms: u64,
}

impl LogEventSpec {
    pub fn new(message: impl Into<String>, style: StyleTag, delay_ms: u64) -> Self {
        Self {
            message: message.into(),
            style,
            delay_ms,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    steps: Vec<LogEventSpec>,
}

/// Ordered, validated list of scan steps.
///
/// A `Catalog` is never empty and its delays are strictly increasing, so
/// emitting steps in index order is the same as emitting them in time order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    steps: Vec<LogEventSpec>,
}

#[allow(clippy::len_without_is_empty)]
impl Catalog {
    pub fn new(steps: Vec<LogEventSpec>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut previous: Option<u64> = None;
        for (index, step) in steps.iter().enumerate() {
            if step.message.trim().is_empty() {
                return Err(CatalogError::EmptyMessage { index });
            }
            if let Some(previous_ms) = previous {
                if step.delay_ms <= previous_ms {
                    return Err(CatalogError::NonIncreasingDelay {
                        index,
                        previous_ms,
                        delay_ms: step.delay_ms,
                    });
                }
            }
            previous = Some(step.delay_ms);
        }

        Ok(Self { steps })
    }

    /// The seven-step fee audit used by the landing page.
    pub fn shadow_audit() -> Self {
        Self {
            steps: vec![
                LogEventSpec::new("INITIALIZING_VERTEX_AI_AGENT...", StyleTag::Info, 800),
                LogEventSpec::new(
                    "INGESTING_PDF: \"Q3_Fee_Invoice.pdf\"",
                    StyleTag::Highlight,
                    1500,
                ),
                LogEventSpec::new("OCR_PROCESS: EXTRACTING_TABLES...", StyleTag::Muted, 2400),
                LogEventSpec::new(
                    "> RUNNING: simplifi.core.waterfall.calculate_pref()",
                    StyleTag::Success,
                    3200,
                ),
                LogEventSpec::new("> VERIFYING_WITH_GROK_API...", StyleTag::Warning, 4500),
                LogEventSpec::new(
                    "ALERT: MANAGEMENT_FEE_CALC_ERROR DETECTED",
                    StyleTag::Error,
                    5500,
                ),
                LogEventSpec::new("GENERATING_FORENSIC_REPORT...", StyleTag::Highlight, 6500),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[LogEventSpec] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&LogEventSpec> {
        self.steps.get(index)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    /// Offset of the final step, i.e. the total run length.
    pub fn total_duration(&self) -> Duration {
        self.steps.last().map(LogEventSpec::delay).unwrap_or_default()
    }

    /// Rescale every offset by `1 / speed`. The result is revalidated, so a
    /// speed high enough to collapse two steps onto the same millisecond fails.
    pub fn scaled(&self, speed: f64) -> Result<Self, CatalogError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(CatalogError::InvalidScale(speed));
        }
        if speed == 1.0 {
            return Ok(self.clone());
        }

        let steps = self
            .steps
            .iter()
            .map(|s| LogEventSpec {
                delay_ms: (s.delay_ms as f64 / speed).round() as u64,
                ..s.clone()
            })
            .collect();
        Self::new(steps)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::shadow_audit()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::new(file.steps)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        CatalogFile {
            steps: catalog.steps,
        }
    }
}
