use crate::{Background, ControlId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageViewModel {
    pub controls: Vec<ControlView>,
    pub dirty: bool,
}

impl PageViewModel {
    pub fn control(&self, control_id: ControlId) -> Option<&ControlView> {
        self.controls.iter().find(|c| c.control_id == control_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub control_id: ControlId,
    pub label: String,
    pub enabled: bool,
    pub background: Background,
}
