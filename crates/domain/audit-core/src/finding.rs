use serde::{Deserialize, Serialize};

/// Synthetic result revealed when a scan completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub headline: String,
    pub amount_cents: u64,
    pub narrative: String,
    pub verifications: Vec<String>,
    pub call_to_action: String,
    /// Full breakdown, only shown once the detail gate is open.
    pub breakdown: Vec<String>,
}

impl Finding {
    pub fn shadow_audit() -> Self {
        Self {
            headline: "Anomaly Detected".into(),
            amount_cents: 1_245_000,
            narrative: "Potential overpayment identified in Q3 Management Fees. The GP Catchup \
                        calculation was applied before the Hurdle was fully cleared."
                .into(),
            verifications: vec![
                "GROK_VERIFICATION: CONFIRMED".into(),
                "GEMINI_ANALYSIS: CONFIRMED".into(),
            ],
            call_to_action: "Unlock Full Forensic Report".into(),
            breakdown: vec![
                "Period: Q3 management fee invoice".into(),
                "Error: GP catch-up applied before the preferred-return hurdle cleared".into(),
                "Overpayment: $12,450.00".into(),
                "Next step: correction letter to LPs ready to generate".into(),
            ],
        }
    }

    /// Dollar amount formatted as `$12,450.00`.
    pub fn amount_display(&self) -> String {
        format_cents(self.amount_cents)
    }
}

impl Default for Finding {
    fn default() -> Self {
        Self::shadow_audit()
    }
}

fn format_cents(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}
