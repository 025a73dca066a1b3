use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use feedback_logging::{feedback_debug, feedback_warn};
use magnet_core::{ControlId, CycleToken, DispatchRequest};

use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::dispatch::{DispatchSettings, QueueDispatcher, ReqwestDispatcher};
use crate::{ClipboardError, EngineError, EngineEvent};

enum EngineCommand {
    WriteClipboard {
        control_id: ControlId,
        text: String,
    },
    Dispatch {
        control_id: ControlId,
        request: DispatchRequest,
    },
    ScheduleRevert {
        control_id: ControlId,
        token: CycleToken,
        after: Duration,
    },
}

/// Runs clipboard writes, queue requests and revert timers on a tokio
/// runtime owned by a dedicated thread. Every command runs as its own task;
/// results come back as [`EngineEvent`]s in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> Result<Self, EngineError> {
        let dispatcher = ReqwestDispatcher::new(settings)?;
        Self::with_backends(Arc::new(dispatcher), Arc::new(SystemClipboard::new()))
    }

    pub fn with_backends(
        dispatcher: Arc<dyn QueueDispatcher>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("magnet-engine-worker")
            .build()?;

        thread::Builder::new()
            .name("magnet-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let dispatcher = Arc::clone(&dispatcher);
                    let clipboard = Arc::clone(&clipboard);
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(dispatcher.as_ref(), clipboard, command, event_tx).await;
                    });
                }
                feedback_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn write_clipboard(&self, control_id: ControlId, text: impl Into<String>) {
        self.send(EngineCommand::WriteClipboard {
            control_id,
            text: text.into(),
        });
    }

    pub fn dispatch(&self, control_id: ControlId, request: DispatchRequest) {
        self.send(EngineCommand::Dispatch {
            control_id,
            request,
        });
    }

    /// Timers are never cancelled; stale ones are filtered by the core.
    pub fn schedule_revert(&self, control_id: ControlId, token: CycleToken, after: Duration) {
        self.send(EngineCommand::ScheduleRevert {
            control_id,
            token,
            after,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no event will ever arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            feedback_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    dispatcher: &dyn QueueDispatcher,
    clipboard: Arc<dyn ClipboardWriter>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::WriteClipboard { control_id, text } => {
            let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
                .await
                .unwrap_or_else(|err| Err(ClipboardError::Write(err.to_string())));
            EngineEvent::ClipboardWritten { control_id, result }
        }
        EngineCommand::Dispatch {
            control_id,
            request,
        } => {
            let result = dispatcher.dispatch(&request).await;
            EngineEvent::DispatchCompleted { control_id, result }
        }
        EngineCommand::ScheduleRevert {
            control_id,
            token,
            after,
        } => {
            tokio::time::sleep(after).await;
            EngineEvent::RevertDue { control_id, token }
        }
    };
    let _ = event_tx.send(event);
}
