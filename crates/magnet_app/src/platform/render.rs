use magnet_core::{Background, ControlView, PageViewModel};

/// Formats one control as a status line.
pub fn control_line(control: &ControlView) -> String {
    let state = if control.enabled { "enabled" } else { "disabled" };
    match control.background.css_color() {
        Some(color) => format!(
            "#{} [{}] {} {} ({})",
            control.control_id,
            control.label,
            state,
            color,
            background_name(control.background)
        ),
        None => format!("#{} [{}] {}", control.control_id, control.label, state),
    }
}

/// Lines for controls that are new or differ from `previous`.
pub fn changed_lines(previous: &PageViewModel, current: &PageViewModel) -> Vec<String> {
    current
        .controls
        .iter()
        .filter(|control| previous.control(control.control_id) != Some(*control))
        .map(control_line)
        .collect()
}

pub fn all_lines(view: &PageViewModel) -> Vec<String> {
    view.controls.iter().map(control_line).collect()
}

fn background_name(background: Background) -> &'static str {
    match background {
        Background::Default => "default",
        Background::Success => "success",
        Background::Error => "error",
    }
}
