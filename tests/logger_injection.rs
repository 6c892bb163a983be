use std::sync::{Arc, Mutex};

use gryphon_mapf::adapters::outbound::{init_domain_logger, init_noop_logger, MultiLogger};
use gryphon_mapf::config::LoggingConfig;
use gryphon_mapf::domains::logger::DomainLogger;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[test]
fn test_multi_logger_fans_out() {
    let primary = Arc::new(BridgeCapture::new());
    let secondary = Arc::new(BridgeCapture::new());
    let logger = MultiLogger::default().with(primary.clone()).with(secondary.clone());
    assert_eq!(logger.len(), 2);

    logger.info("one");
    logger.warn("two");
    logger.error("three");

    for capture in [&primary, &secondary] {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
    }
}

#[test]
fn test_multi_logger_with_single_and_no_sinks() {
    let primary = Arc::new(BridgeCapture::new());
    let logger = MultiLogger::new(vec![primary.clone() as Arc<dyn DomainLogger>]);
    logger.warn("only");
    assert_eq!(*primary.messages.lock().unwrap(), vec!["WARN:only"]);

    let empty = MultiLogger::default();
    assert!(empty.is_empty());
    empty.error("dropped");
}

#[test]
fn test_noop_and_tracing_loggers_accept_calls() {
    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");

    // without a file the domain logger is the tracing bridge
    let logger = init_domain_logger(&LoggingConfig::default());
    logger.info("routed to tracing");
}
