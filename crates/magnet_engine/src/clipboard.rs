use std::fmt::Display;
use std::sync::Mutex;

use feedback_logging::feedback_debug;

use crate::ClipboardError;

/// Writes text to a clipboard. Implementations may block; the engine calls
/// them on the blocking pool.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard through `arboard`.
///
/// On X11 and Wayland the copied text lives only as long as this process
/// holds a clipboard handle, so one handle is opened on first use and kept
/// for every later write. A failed open is retried on the next write.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;
        let clipboard = open_once(&mut *slot, arboard::Clipboard::new)?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Write(err.to_string()))?;
        feedback_debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// Returns the cached handle, opening it first if needed.
fn open_once<H, E: Display>(
    slot: &mut Option<H>,
    open: impl FnOnce() -> Result<H, E>,
) -> Result<&mut H, ClipboardError> {
    if slot.is_none() {
        let handle = open().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        *slot = Some(handle);
    }
    slot.as_mut()
        .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".to_string()))
}
