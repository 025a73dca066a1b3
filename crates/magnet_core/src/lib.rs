//! Magnet core: pure feedback state machine, dispatch wire types and magnet helpers.
mod control;
mod dispatch;
mod effect;
mod error;
mod feedback;
mod magnet;
mod msg;
mod state;
mod update;
mod view_model;

pub use control::{Background, Control, ControlId};
pub use dispatch::{DispatchRequest, DispatchResponse, DispatchResult, SeriesFlag};
pub use effect::Effect;
pub use error::ActionError;
pub use feedback::{
    CycleToken, FeedbackKind, FeedbackSettings, PendingPolicy, DEFAULT_FEEDBACK_DURATION,
    LABEL_COPIED, LABEL_COPY_FAILED, LABEL_ERROR, LABEL_SENT, LABEL_SEND_FAILED,
};
pub use magnet::{
    build_magnet_link, encode_display_name, extract_display_name, parse_tracker_list,
};
pub use msg::Msg;
pub use state::PageState;
pub use update::update;
pub use view_model::{ControlView, PageViewModel};
