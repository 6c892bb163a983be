use std::sync::Arc;

/// Logging port of the planning domain.
///
/// The solver reports attempt outcomes through this trait and never learns
/// where the messages end up; adapters live in `adapters::outbound`.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;
