use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use log::LevelFilter;

use crate::domains::logger::DomainLogger;

/// Writes domain messages through the process-wide `fast_log` file appender.
pub struct FileLogger;

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log::info!(target: "gryphon_mapf", "{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!(target: "gryphon_mapf", "{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!(target: "gryphon_mapf", "{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Start `fast_log` on `path` and return a domain logger writing to it.
///
/// `level` uses the `log` names (`trace` .. `error`); unknown names fall back
/// to `info`. `fast_log` can only be initialized once per process.
pub fn init_file_logger(path: &str, level: &str) -> Result<Arc<dyn DomainLogger>, String> {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    fast_log::init(fast_log::config::Config::new().file(path).level(level))
        .map_err(|e| format!("Failed to initialize fast_log for {}: {}", path, e))?;
    Ok(Arc::new(FileLogger))
}
