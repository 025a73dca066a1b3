use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feedback_logging::{feedback_error, feedback_info, feedback_warn};
use log::LevelFilter;
use magnet_core::{
    parse_tracker_list, FeedbackSettings, PendingPolicy, DEFAULT_FEEDBACK_DURATION,
};
use magnet_engine::DispatchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "magnet_feedback.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Application settings, read from a RON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub queue_base_url: String,
    pub feedback_duration_ms: u64,
    pub pending_policy: PendingPolicy,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    /// Trackers appended to magnet links built by `copy-stream`.
    pub trackers: Vec<String>,
    /// Tracker list file, one per line; read after `trackers`.
    pub trackers_file: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dispatch = DispatchSettings::default();
        Self {
            queue_base_url: dispatch.base_url,
            feedback_duration_ms: DEFAULT_FEEDBACK_DURATION.as_millis() as u64,
            pending_policy: PendingPolicy::default(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
            trackers: Vec::new(),
            trackers_file: None,
            log_destination: LogDestination::default(),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn feedback_settings(&self) -> FeedbackSettings {
        FeedbackSettings {
            duration: Duration::from_millis(self.feedback_duration_ms),
            pending_policy: self.pending_policy,
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            base_url: self.queue_base_url.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Inline trackers followed by the tracker file's entries. An unreadable
    /// file contributes nothing.
    pub fn load_trackers(&self) -> Vec<String> {
        let mut trackers = parse_tracker_list(&self.trackers.join("\n"));
        let Some(path) = &self.trackers_file else {
            return trackers;
        };
        match fs::read_to_string(path) {
            Ok(text) => {
                let from_file = parse_tracker_list(&text);
                if from_file.is_empty() {
                    feedback_warn!("No trackers found in {:?}", path);
                }
                trackers.extend(from_file);
            }
            Err(err) => feedback_error!("Failed to read trackers from {:?}: {}", path, err),
        }
        trackers
    }

    pub fn log_summary(&self) {
        feedback_info!(
            "Config: queue={} feedback={}ms policy={:?} request_timeout={:?}",
            self.queue_base_url,
            self.feedback_duration_ms,
            self.pending_policy,
            self.request_timeout_ms
        );
    }
}
