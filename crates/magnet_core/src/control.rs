use crate::feedback::{CycleToken, FeedbackKind};

pub type ControlId = u64;

/// Background override shown while a feedback cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Default,
    Success,
    Error,
}

impl Background {
    /// CSS color for the override; `None` means the stylesheet decides.
    pub fn css_color(self) -> Option<&'static str> {
        match self {
            Background::Default => None,
            Background::Success => Some("#28a745"),
            Background::Error => Some("#dc3545"),
        }
    }
}

impl From<FeedbackKind> for Background {
    fn from(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Success => Background::Success,
            FeedbackKind::Error => Background::Error,
        }
    }
}

/// A clickable control on the page.
///
/// The baseline label is captured once at construction and never changes;
/// every revert restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    id: ControlId,
    baseline_label: String,
    label: String,
    enabled: bool,
    background: Background,
    active_cycle: Option<CycleToken>,
    last_issued: u64,
    pending: bool,
}

impl Control {
    pub fn new(id: ControlId, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id,
            baseline_label: label.clone(),
            label,
            enabled: true,
            background: Background::Default,
            active_cycle: None,
            last_issued: 0,
            pending: false,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn baseline_label(&self) -> &str {
        &self.baseline_label
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn active_cycle(&self) -> Option<CycleToken> {
        self.active_cycle
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// True when the control shows its baseline and accepts clicks.
    pub fn is_idle(&self) -> bool {
        self.enabled
            && !self.pending
            && self.active_cycle.is_none()
            && self.label == self.baseline_label
            && self.background == Background::Default
    }

    pub(crate) fn begin_pending(&mut self, disable: bool) {
        self.pending = true;
        if disable {
            self.enabled = false;
        }
    }

    /// Swaps in the feedback label and style, returning the new cycle's token.
    pub(crate) fn show_feedback(&mut self, message: &str, kind: FeedbackKind) -> CycleToken {
        self.last_issued += 1;
        let token = CycleToken(self.last_issued);
        self.label = message.to_owned();
        self.enabled = false;
        self.background = kind.into();
        self.active_cycle = Some(token);
        self.pending = false;
        token
    }

    /// Restores the baseline if `token` still owns the control.
    pub(crate) fn revert(&mut self, token: CycleToken) -> bool {
        if self.active_cycle != Some(token) {
            return false;
        }
        self.label.clone_from(&self.baseline_label);
        self.enabled = true;
        self.background = Background::Default;
        self.active_cycle = None;
        true
    }
}
