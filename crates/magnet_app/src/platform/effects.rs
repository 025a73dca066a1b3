use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use feedback_logging::{feedback_debug, feedback_diagnostic, feedback_trace, feedback_warn};
use magnet_core::{ActionError, Effect, Msg};
use magnet_engine::{EngineEvent, EngineHandle};

use super::app::AppEvent;

const EVENT_POLL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, app_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(app_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::WriteClipboard { control_id, text } => {
                    feedback_debug!("WriteClipboard control={} len={}", control_id, text.len());
                    self.engine.write_clipboard(control_id, text);
                }
                Effect::SendToQueue {
                    control_id,
                    request,
                } => {
                    feedback_debug!(
                        "SendToQueue control={} is_series={}",
                        control_id,
                        request.is_series()
                    );
                    self.engine.dispatch(control_id, request);
                }
                Effect::ScheduleRevert {
                    control_id,
                    token,
                    after,
                } => {
                    self.engine.schedule_revert(control_id, token, after);
                }
                Effect::Diagnostic(err) => {
                    feedback_diagnostic!("{}", err);
                }
            }
        }
    }

    fn spawn_event_loop(&self, app_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || forward_events(|| engine.recv_timeout(EVENT_POLL), &app_tx));
    }
}

/// Forwards engine events to the page until either side goes away.
fn forward_events(
    mut recv: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    app_tx: &mpsc::Sender<AppEvent>,
) {
    loop {
        match recv() {
            Ok(event) => {
                feedback_trace!("Engine event {:?}", event);
                if app_tx.send(AppEvent::Msg(event_to_msg(event))).is_err() {
                    feedback_debug!("Page closed; engine forwarding stopped");
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                feedback_warn!("Engine event channel closed; no further feedback");
                return;
            }
        }
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ClipboardWritten { control_id, result } => Msg::ClipboardWritten {
            control_id,
            result: result.map_err(ActionError::from),
        },
        EngineEvent::DispatchCompleted { control_id, result } => Msg::DispatchCompleted {
            control_id,
            result: result.map_err(ActionError::from),
        },
        EngineEvent::RevertDue { control_id, token } => Msg::RevertElapsed { control_id, token },
    }
}
