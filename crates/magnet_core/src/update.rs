use crate::feedback::{apply_feedback, revert_feedback};
use crate::{
    ActionError, ControlId, DispatchResult, Effect, FeedbackKind, Msg, PageState, PendingPolicy,
    LABEL_COPIED, LABEL_COPY_FAILED, LABEL_ERROR, LABEL_SENT, LABEL_SEND_FAILED,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PageState, msg: Msg) -> (PageState, Vec<Effect>) {
    let effects = match msg {
        Msg::ControlRegistered { control_id, label } => {
            state.register(control_id, label);
            Vec::new()
        }
        Msg::CopyClicked { control_id, text } => {
            if begin_action(&mut state, control_id) {
                vec![Effect::WriteClipboard { control_id, text }]
            } else {
                Vec::new()
            }
        }
        Msg::SendClicked {
            control_id,
            request,
        } => {
            if begin_action(&mut state, control_id) {
                vec![Effect::SendToQueue {
                    control_id,
                    request,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ClipboardWritten { control_id, result } => {
            let outcome = match result {
                Ok(()) => Outcome::success(LABEL_COPIED),
                Err(err) => Outcome::failure(LABEL_COPY_FAILED, err),
            };
            finish_action(&mut state, control_id, outcome)
        }
        Msg::DispatchCompleted { control_id, result } => {
            let outcome = match result {
                Ok(DispatchResult::Success) => Outcome::success(LABEL_SENT),
                Ok(DispatchResult::Failure { reason }) => {
                    Outcome::failure(LABEL_SEND_FAILED, ActionError::Application(reason))
                }
                Err(err) => Outcome::failure(LABEL_ERROR, err),
            };
            finish_action(&mut state, control_id, outcome)
        }
        Msg::RevertElapsed { control_id, token } => {
            let reverted = state
                .control_mut(control_id)
                .is_some_and(|control| revert_feedback(control, token));
            if reverted {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

struct Outcome {
    label: &'static str,
    kind: FeedbackKind,
    error: Option<ActionError>,
}

impl Outcome {
    fn success(label: &'static str) -> Self {
        Self {
            label,
            kind: FeedbackKind::Success,
            error: None,
        }
    }

    fn failure(label: &'static str, error: ActionError) -> Self {
        Self {
            label,
            kind: FeedbackKind::Error,
            error: Some(error),
        }
    }
}

/// Accepts a click when the control exists and is enabled.
fn begin_action(state: &mut PageState, control_id: ControlId) -> bool {
    let disable = state.settings().pending_policy == PendingPolicy::DisableOnClick;
    let Some(control) = state.control_mut(control_id) else {
        return false;
    };
    if !control.is_enabled() {
        return false;
    }
    control.begin_pending(disable);
    if disable {
        state.mark_dirty();
    }
    true
}

fn finish_action(state: &mut PageState, control_id: ControlId, outcome: Outcome) -> Vec<Effect> {
    let duration = state.settings().duration;
    let Some(control) = state.control_mut(control_id) else {
        return Vec::new();
    };
    let revert = apply_feedback(control, outcome.label, outcome.kind, duration);
    state.mark_dirty();

    let mut effects = Vec::with_capacity(2);
    if let Some(error) = outcome.error {
        effects.push(Effect::Diagnostic(error));
    }
    effects.push(revert);
    effects
}
