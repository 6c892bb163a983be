use crate::config::LoggingConfig;
use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain messages into the `tracing` subscriber installed by the binary.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) { tracing::info!(target: "gryphon_mapf::domain", "{}", msg); }
    fn warn(&self, msg: &str) { tracing::warn!(target: "gryphon_mapf::domain", "{}", msg); }
    fn error(&self, msg: &str) { tracing::error!(target: "gryphon_mapf::domain", "{}", msg); }
}

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge)
}

/// Silent logger; the solver default until one is injected.
pub fn init_noop_logger() -> Arc<dyn DomainLogger> {
    Arc::new(NoOp)
}

/// Fans every message out to each sink, in insertion order.
#[derive(Clone, Default)]
pub struct MultiLogger {
    sinks: Vec<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<Arc<dyn DomainLogger>>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: Arc<dyn DomainLogger>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.error(msg));
    }
}

/// Domain logger for the configured log file, or tracing alone when there is
/// none or the file logger cannot start.
pub fn init_domain_logger(config: &LoggingConfig) -> Arc<dyn DomainLogger> {
    let tracing_logger = init_tracing_logger();
    let Some(path) = config.file.as_deref() else {
        return tracing_logger;
    };
    match super::file_logger::init_file_logger(path, &config.level) {
        Ok(file_logger) => Arc::new(MultiLogger::new(vec![file_logger, tracing_logger])),
        Err(e) => {
            tracing::warn!("{}; logging to tracing only", e);
            tracing_logger
        }
    }
}
