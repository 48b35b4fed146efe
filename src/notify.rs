//! Seam for the transactional-notification collaborator. The directory
//! only ever hands a template key, a recipient, and a context document to
//! this trait; delivery itself lives outside the service.

use serde_json::Value;

pub trait Notifier: Send + Sync {
    fn send(&self, template: &str, recipient: &str, context: &Value);
}

/// Default implementation: record the notification in the log stream.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, template: &str, recipient: &str, context: &Value) {
        tracing::info!(template, recipient, %context, "notification queued");
    }
}
