//! Magnet engine: clipboard, download-queue dispatch and revert timers.
mod clipboard;
mod dispatch;
mod engine;
mod types;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use dispatch::{DispatchSettings, QueueDispatcher, ReqwestDispatcher, SEND_TO_QUEUE_PATH};
pub use engine::EngineHandle;
pub use types::{ClipboardError, DispatchError, EngineError, EngineEvent, FailureKind};
