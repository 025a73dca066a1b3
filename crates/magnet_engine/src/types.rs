use std::fmt;
use std::io;

use magnet_core::{ActionError, ControlId, CycleToken, DispatchResult};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ClipboardWritten {
        control_id: ControlId,
        result: Result<(), ClipboardError>,
    },
    DispatchCompleted {
        control_id: ControlId,
        result: Result<DispatchResult, DispatchError>,
    },
    RevertDue {
        control_id: ControlId,
        token: CycleToken,
    },
}

/// The download-queue request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<DispatchError> for ActionError {
    fn from(err: DispatchError) -> Self {
        ActionError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Encoding,
    Timeout,
    Network,
    MalformedResponse { http_status: u16 },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Encoding => write!(f, "request encoding failed"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse { http_status } => {
                write!(f, "malformed response (http status {http_status})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("failed to set clipboard text: {0}")]
    Write(String),
}

impl From<ClipboardError> for ActionError {
    fn from(err: ClipboardError) -> Self {
        ActionError::Clipboard(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
