//! Global logger for tests that need to see what was logged.

use std::sync::{Mutex, OnceLock};

use feedback_logging::DIAGNOSTICS_TARGET;
use log::{LevelFilter, Log, Metadata, Record};

struct RecordingLogger {
    records: Mutex<Vec<(String, String)>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.target().to_string(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<RecordingLogger> = OnceLock::new();

pub fn init_logging() {
    let logger = LOGGER.get_or_init(|| RecordingLogger {
        records: Mutex::new(Vec::new()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Messages logged so far on the diagnostics target.
pub fn diagnostics() -> Vec<String> {
    let Some(logger) = LOGGER.get() else {
        return Vec::new();
    };
    let records = logger.records.lock().unwrap();
    records
        .iter()
        .filter(|(target, _)| target == DIAGNOSTICS_TARGET)
        .map(|(_, message)| message.clone())
        .collect()
}
