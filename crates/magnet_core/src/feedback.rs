use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Control, Effect};

pub const LABEL_COPIED: &str = "Copied!";
pub const LABEL_COPY_FAILED: &str = "Copy Failed!";
pub const LABEL_SENT: &str = "Sent!";
pub const LABEL_SEND_FAILED: &str = "Send Failed!";
pub const LABEL_ERROR: &str = "Error!";

pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(3000);

/// Identifies one feedback cycle on one control.
///
/// Tokens increase per control. Only the most recently issued token may
/// revert the control; timers carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// When an action disables its control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PendingPolicy {
    /// Stay enabled while the operation runs; every click issues its own
    /// operation and the control is disabled only once a result is shown.
    #[default]
    DisableOnResult,
    /// Disable as soon as the action is requested, before the result is known.
    DisableOnClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSettings {
    pub duration: Duration,
    pub pending_policy: PendingPolicy,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FEEDBACK_DURATION,
            pending_policy: PendingPolicy::default(),
        }
    }
}

/// Shows `message` on the control and returns the timer that will revert it.
pub(crate) fn apply_feedback(
    control: &mut Control,
    message: &str,
    kind: FeedbackKind,
    duration: Duration,
) -> Effect {
    let token = control.show_feedback(message, kind);
    Effect::ScheduleRevert {
        control_id: control.id(),
        token,
        after: duration,
    }
}

/// Reverts the control when `token` is still its active cycle.
pub(crate) fn revert_feedback(control: &mut Control, token: CycleToken) -> bool {
    control.revert(token)
}
