use std::time::Duration;

use crate::{ActionError, ControlId, CycleToken, DispatchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    WriteClipboard {
        control_id: ControlId,
        text: String,
    },
    SendToQueue {
        control_id: ControlId,
        request: DispatchRequest,
    },
    /// One-shot timer; fires `Msg::RevertElapsed` with the same token.
    ScheduleRevert {
        control_id: ControlId,
        token: CycleToken,
        after: Duration,
    },
    /// Report a swallowed failure on the diagnostics channel.
    Diagnostic(ActionError),
}
