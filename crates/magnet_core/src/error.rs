use thiserror::Error;

/// Failures an action converts into error feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    #[error("request to download queue failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Application(String),
}
