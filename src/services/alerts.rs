/// Transient user-facing notification surface. Fire-and-forget: the wizard
/// never reads anything back from it.
pub trait AlertSink: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that routes alerts into the log stream.
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn success(&self, message: &str) {
        tracing::info!(alert = "success", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(alert = "warning", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(alert = "error", "{message}");
    }
}
