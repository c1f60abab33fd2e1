//! User-facing notification sink.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client reports every failure exactly once at the point it is
//! detected. Callers decide where those messages land: a terminal, a log, or
//! a test recorder.

/// Receives user-visible error messages.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Routes notifications into the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(%message, "user notification");
    }
}
