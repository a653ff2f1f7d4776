use crate::{Effect, Msg, PopupState, StatusKind};

pub const CONFIGURATION_REQUIRED: &str = "Please configure qBittorrent settings first";
pub const SELECTION_REQUIRED: &str = "Please select at least one magnet link";
pub const SETTINGS_SAVED: &str = "Settings saved successfully!";
pub const SCAN_UNAVAILABLE: &str = "Magnet links cannot be read from this page";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PopupState, msg: Msg) -> (PopupState, Vec<Effect>) {
    let effects = match msg {
        Msg::PopupOpened => {
            state.set_scanning(true);
            vec![Effect::LoadSettings, Effect::ScanActivePage]
        }
        Msg::ScanRequested => {
            if state.busy().scanning {
                return (state, Vec::new());
            }
            state.set_scanning(true);
            vec![Effect::ScanActivePage]
        }
        Msg::ScanFinished(links) => {
            state.set_scanning(false);
            state.replace_links(links);
            Vec::new()
        }
        Msg::ScanUnavailable { reason } => {
            state.set_scanning(false);
            state.replace_links(Vec::new());
            state.post_status(format!("{SCAN_UNAVAILABLE} ({reason})"), StatusKind::Info);
            Vec::new()
        }
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::LinkToggled { index } => {
            state.toggle(index);
            Vec::new()
        }
        Msg::LinkSelected { index, selected } => {
            state.set_selected(index, selected);
            Vec::new()
        }
        Msg::SelectAllVisible(selected) => {
            state.select_visible(selected);
            Vec::new()
        }
        Msg::CategoryChanged(category) => {
            state.set_category(category);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.busy().submitting {
                return (state, Vec::new());
            }
            if !state.stored_settings().has_webui_url() {
                state.post_status(CONFIGURATION_REQUIRED, StatusKind::Error);
                return (state, Vec::new());
            }
            let urls = state.selected_urls();
            if urls.is_empty() {
                state.post_status(SELECTION_REQUIRED, StatusKind::Error);
                return (state, Vec::new());
            }
            state.clear_outcomes();
            state.set_submitting(true);
            vec![Effect::SubmitLinks {
                urls,
                category: state.category(),
            }]
        }
        Msg::SubmitFinished(report) => {
            state.set_submitting(false);
            state.apply_report(&report);
            let kind = if report.all_succeeded() {
                StatusKind::Success
            } else {
                StatusKind::Error
            };
            state.post_status(report.status_message(), kind);
            Vec::new()
        }
        Msg::SubmitFailed(message) => {
            state.set_submitting(false);
            state.post_status(format!("Error adding torrents: {message}"), StatusKind::Error);
            Vec::new()
        }
        Msg::SettingsLoaded(settings) => {
            state.settings_stored(settings.clone());
            state.set_settings_form(settings);
            Vec::new()
        }
        Msg::SettingsEdited(settings) => {
            state.set_settings_form(settings);
            Vec::new()
        }
        Msg::SaveSettingsClicked => {
            let trimmed = state.settings_form().trimmed();
            state.set_settings_form(trimmed.clone());
            state.begin_save(trimmed.clone());
            vec![Effect::SaveSettings(trimmed)]
        }
        Msg::SettingsSaved => {
            state.finish_save(true);
            state.post_status(SETTINGS_SAVED, StatusKind::Success);
            Vec::new()
        }
        Msg::SettingsSaveFailed(message) => {
            state.finish_save(false);
            state.post_status(format!("Could not save settings: {message}"), StatusKind::Error);
            Vec::new()
        }
        Msg::TestConnectionClicked => {
            if state.busy().testing {
                return (state, Vec::new());
            }
            state.set_testing(true);
            vec![Effect::TestConnection]
        }
        Msg::ConnectionTested(result) => {
            state.set_testing(false);
            match result {
                Ok(version) => state.post_status(
                    format!("Connected successfully! qBittorrent version: {version}"),
                    StatusKind::Success,
                ),
                Err(message) => {
                    state.post_status(format!("Connection failed: {message}"), StatusKind::Error)
                }
            }
            Vec::new()
        }
        Msg::Tick { elapsed } => {
            state.advance_clock(elapsed);
            Vec::new()
        }
    };

    (state, effects)
}
