use audit_core::Finding;

/// Receives the contact captured when a visitor unlocks the full report.
pub trait LeadCapturePort: Send + Sync + 'static {
    fn capture(&self, contact: &str, finding: &Finding) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoLeadCapture;

impl LeadCapturePort for NoLeadCapture {
    fn capture(&self, _contact: &str, _finding: &Finding) -> anyhow::Result<()> {
        Ok(())
    }
}
