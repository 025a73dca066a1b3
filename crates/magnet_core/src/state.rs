use std::collections::BTreeMap;

use crate::view_model::{ControlView, PageViewModel};
use crate::{Control, ControlId, FeedbackSettings};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    settings: FeedbackSettings,
    controls: BTreeMap<ControlId, Control>,
    dirty: bool,
}

impl PageState {
    pub fn new(settings: FeedbackSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &FeedbackSettings {
        &self.settings
    }

    pub fn control(&self, control_id: ControlId) -> Option<&Control> {
        self.controls.get(&control_id)
    }

    pub fn view(&self) -> PageViewModel {
        PageViewModel {
            controls: self
                .controls
                .values()
                .map(|control| ControlView {
                    control_id: control.id(),
                    label: control.label().to_owned(),
                    enabled: control.is_enabled(),
                    background: control.background(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Registers a control; an existing baseline is never replaced.
    pub(crate) fn register(&mut self, control_id: ControlId, label: String) -> bool {
        if self.controls.contains_key(&control_id) {
            return false;
        }
        self.controls
            .insert(control_id, Control::new(control_id, label));
        self.dirty = true;
        true
    }

    pub(crate) fn control_mut(&mut self, control_id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(&control_id)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
