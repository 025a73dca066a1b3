use crate::{ActionError, ControlId, CycleToken, DispatchRequest, DispatchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A control was created on the page; its label becomes the baseline.
    ControlRegistered { control_id: ControlId, label: String },
    /// User clicked a copy control.
    CopyClicked { control_id: ControlId, text: String },
    /// User clicked a send control.
    SendClicked {
        control_id: ControlId,
        request: DispatchRequest,
    },
    /// Clipboard write finished.
    ClipboardWritten {
        control_id: ControlId,
        result: Result<(), ActionError>,
    },
    /// Download queue request finished.
    DispatchCompleted {
        control_id: ControlId,
        result: Result<DispatchResult, ActionError>,
    },
    /// A revert timer fired.
    RevertElapsed {
        control_id: ControlId,
        token: CycleToken,
    },
    /// Carries nothing; `update` returns the state unchanged with no effects.
    NoOp,
}
