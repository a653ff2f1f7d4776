//! Magnet courier core: link identity, pure popup state machine and view-model helpers.
mod effect;
mod link;
mod msg;
mod outcome;
mod scan;
mod settings;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use link::{
    dedupe_key, display_name, info_hash, name_from_magnet, Anchor, MagnetLink, MAGNET_SCHEME,
    UNNAMED_TORRENT,
};
pub use msg::Msg;
pub use outcome::{LinkOutcome, SubmissionReport, SubmitOutcome};
pub use scan::{badge_text, count_magnet_anchors, scan_anchors, MagnetLinks, BADGE_COLOR};
pub use settings::{api_url, ConnectionSettings, ADD_TORRENT_PATH, LOGIN_PATH, VERSION_PATH};
pub use state::{matches_filter, PopupState, StatusKind, EMPTY_LIST_MESSAGE, STATUS_TTL};
pub use update::{update, CONFIGURATION_REQUIRED, SCAN_UNAVAILABLE, SELECTION_REQUIRED, SETTINGS_SAVED};
pub use view_model::{ButtonView, LinkRowView, PopupViewModel, SettingsView, StatusView};
