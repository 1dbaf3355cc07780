use audit_app_core::LeadCapturePort;
use audit_core::Finding;

/// Stands in for the onboarding hand-off: reports where the visitor would go next.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalLeadCapture;

impl LeadCapturePort for TerminalLeadCapture {
    fn capture(&self, contact: &str, finding: &Finding) -> anyhow::Result<()> {
        tracing::info!(contact, amount = finding.amount_cents, "lead captured");
        println!(":: Redirecting {contact} to onboarding flow...");
        Ok(())
    }
}
