use std::sync::Once;
use std::time::Duration;

use magnet_core::{
    update, ConnectionSettings, Effect, LinkOutcome, MagnetLink, Msg, PopupState, StatusKind,
    SubmissionReport, SubmitOutcome, CONFIGURATION_REQUIRED, EMPTY_LIST_MESSAGE, SELECTION_REQUIRED,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn link(name: &str, hash_char: char) -> MagnetLink {
    MagnetLink {
        url: format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            hash_char.to_string().repeat(40),
            name.replace(' ', "+")
        ),
        name: name.to_string(),
    }
}

fn configured() -> PopupState {
    let settings = ConnectionSettings::new("http://nas:8080", "admin", "secret");
    update(PopupState::new(), Msg::SettingsLoaded(settings)).0
}

fn scanned(links: Vec<MagnetLink>) -> PopupState {
    let (state, _) = update(configured(), Msg::ScanRequested);
    let (state, _) = update(state, Msg::ScanFinished(links));
    state
}

fn apply(state: PopupState, msgs: Vec<Msg>) -> PopupState {
    msgs.into_iter()
        .fold(state, |state, msg| update(state, msg).0)
}

#[test]
fn popup_opened_loads_settings_and_scans() {
    init_logging();
    let (state, effects) = update(PopupState::new(), Msg::PopupOpened);

    assert_eq!(effects, vec![Effect::LoadSettings, Effect::ScanActivePage]);
    let view = state.view();
    assert_eq!(view.refresh_button.label, "Scanning...");
    assert!(!view.refresh_button.enabled);
}

#[test]
fn refresh_is_ignored_while_scanning() {
    init_logging();
    let (state, effects) = update(PopupState::new(), Msg::ScanRequested);
    assert_eq!(effects, vec![Effect::ScanActivePage]);

    let (_state, effects) = update(state, Msg::ScanRequested);
    assert!(effects.is_empty());
}

#[test]
fn empty_scan_shows_placeholder() {
    init_logging();
    let view = scanned(Vec::new()).view();

    assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));
    assert!(view.refresh_button.enabled);
    assert_eq!(view.refresh_button.label, "Refresh");
}

#[test]
fn unavailable_page_is_an_informational_note() {
    init_logging();
    let (state, _) = update(PopupState::new(), Msg::ScanRequested);
    let (state, effects) = update(
        state,
        Msg::ScanUnavailable {
            reason: "restricted origin".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));
    let status = view.status.expect("status line");
    assert_eq!(status.kind, StatusKind::Info);
    assert!(status.text.contains("restricted origin"));
}

#[test]
fn submit_without_selection_is_rejected_locally() {
    init_logging();
    let state = scanned(vec![link("Ubuntu ISO", 'a')]);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    let status = state.view().status.expect("status line");
    assert_eq!(status.text, SELECTION_REQUIRED);
    assert_eq!(status.kind, StatusKind::Error);
}

#[test]
fn submit_without_webui_url_is_rejected_before_selection() {
    init_logging();
    let state = apply(
        PopupState::new(),
        vec![
            Msg::ScanFinished(vec![link("Ubuntu ISO", 'a')]),
            Msg::LinkToggled { index: 0 },
        ],
    );
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.status.expect("status line").text, CONFIGURATION_REQUIRED);
    assert!(view.download_button.enabled);
}

#[test]
fn submit_emits_selected_urls_with_category() {
    init_logging();
    let links = vec![link("One", 'a'), link("Two", 'b'), link("Three", 'c')];
    let state = apply(
        scanned(links.clone()),
        vec![
            Msg::LinkToggled { index: 0 },
            Msg::LinkToggled { index: 2 },
            Msg::CategoryChanged(Some("  linux ".to_string())),
        ],
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitLinks {
            urls: vec![links[0].url.clone(), links[2].url.clone()],
            category: Some("linux".to_string()),
        }]
    );

    let view = state.view();
    assert_eq!(view.download_button.label, "Downloading...");
    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty(), "second click while submitting is ignored");
}

#[test]
fn explicit_selection_keeps_rows_already_selected() {
    init_logging();
    let links = vec![link("One", 'a'), link("Two", 'b')];
    let state = apply(
        scanned(links.clone()),
        vec![
            Msg::SelectAllVisible(true),
            Msg::LinkSelected {
                index: 0,
                selected: true,
            },
            Msg::LinkSelected {
                index: 1,
                selected: true,
            },
            Msg::LinkSelected {
                index: 1,
                selected: true,
            },
        ],
    );

    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitLinks {
            urls: vec![links[0].url.clone(), links[1].url.clone()],
            category: None,
        }]
    );
}

#[test]
fn unsaved_webui_url_does_not_count_as_configured() {
    init_logging();
    let edited = ConnectionSettings::new("http://nas:8080", "admin", "secret");
    let state = apply(
        PopupState::new(),
        vec![
            Msg::ScanFinished(vec![link("One", 'a')]),
            Msg::LinkToggled { index: 0 },
            Msg::SettingsEdited(edited),
        ],
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().status.expect("status line").text,
        CONFIGURATION_REQUIRED
    );

    let (state, _) = update(state, Msg::SaveSettingsClicked);
    let (state, _) = update(state, Msg::SettingsSaved);
    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
}

#[test]
fn failed_save_leaves_stored_settings_untouched() {
    init_logging();
    let state = apply(
        configured(),
        vec![
            Msg::SettingsEdited(ConnectionSettings::new("", "admin", "secret")),
            Msg::SaveSettingsClicked,
            Msg::SettingsSaveFailed("disk full".to_string()),
        ],
    );

    assert_eq!(state.stored_settings().webui_url, "http://nas:8080");
    assert_eq!(state.settings_form().webui_url, "");
}

#[test]
fn blank_category_is_treated_as_none() {
    init_logging();
    let links = vec![link("One", 'a')];
    let state = apply(
        scanned(links),
        vec![
            Msg::CategoryChanged(Some("   ".to_string())),
            Msg::LinkToggled { index: 0 },
        ],
    );

    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::SubmitLinks { category: None, .. }]
    ));
}

#[test]
fn partial_failure_annotates_rows_and_reports_counts() {
    init_logging();
    let links = vec![link("One", 'a'), link("Two", 'b'), link("Three", 'c')];
    let state = apply(scanned(links.clone()), vec![Msg::SelectAllVisible(true)]);
    let (state, _) = update(state, Msg::SubmitClicked);

    let report = SubmissionReport::new(vec![
        LinkOutcome {
            url: links[0].url.clone(),
            outcome: SubmitOutcome::Success,
        },
        LinkOutcome {
            url: links[1].url.clone(),
            outcome: SubmitOutcome::Failure { status: Some(500) },
        },
        LinkOutcome {
            url: links[2].url.clone(),
            outcome: SubmitOutcome::Success,
        },
    ]);
    let (state, _) = update(state, Msg::SubmitFinished(report));
    let view = state.view();

    let status = view.status.clone().expect("status line");
    assert_eq!(status.text, "Added 2, failed 1 torrent(s)");
    assert_eq!(status.kind, StatusKind::Error);

    let marks: Vec<Option<char>> = view.rows.iter().map(|row| row.outcome_mark()).collect();
    assert_eq!(marks, vec![Some('\u{2714}'), Some('\u{2718}'), Some('\u{2714}')]);
    assert!(view.download_button.enabled);
}

#[test]
fn full_success_reports_total() {
    init_logging();
    let links = vec![link("One", 'a')];
    let state = apply(scanned(links.clone()), vec![Msg::LinkToggled { index: 0 }]);
    let (state, _) = update(state, Msg::SubmitClicked);
    let report = SubmissionReport::new(vec![LinkOutcome {
        url: links[0].url.clone(),
        outcome: SubmitOutcome::Success,
    }]);
    let (state, _) = update(state, Msg::SubmitFinished(report));

    let status = state.view().status.expect("status line");
    assert_eq!(status.text, "Successfully added 1 torrent(s) to qBittorrent");
    assert_eq!(status.kind, StatusKind::Success);
}

#[test]
fn submit_failure_surfaces_message() {
    init_logging();
    let state = apply(
        scanned(vec![link("One", 'a')]),
        vec![Msg::LinkToggled { index: 0 }, Msg::SubmitClicked],
    );
    let (state, _) = update(
        state,
        Msg::SubmitFailed("Authentication failed".to_string()),
    );

    let view = state.view();
    assert_eq!(
        view.status.expect("status").text,
        "Error adding torrents: Authentication failed"
    );
    assert!(view.download_button.enabled);
    assert!(view.rows.iter().all(|row| row.outcome.is_none()));
}

#[test]
fn select_all_only_touches_visible_rows() {
    init_logging();
    let state = apply(
        scanned(vec![link("Ubuntu ISO", 'a'), link("Debian ISO", 'b')]),
        vec![
            Msg::FilterChanged("ubuntu".to_string()),
            Msg::SelectAllVisible(true),
        ],
    );

    let view = state.view();
    assert_eq!(view.visible_count, 1);
    assert_eq!(view.selected_count, 1);
    assert!(view.select_all_checked);
    let selected: Vec<&str> = view
        .rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(selected, vec!["Ubuntu ISO"]);

    // Clearing the filter reveals the untouched row, so select-all is no longer checked.
    let state = apply(state, vec![Msg::FilterChanged(String::new())]);
    let view = state.view();
    assert_eq!(view.visible_count, 2);
    assert!(!view.select_all_checked);
}

#[test]
fn filter_is_case_insensitive() {
    init_logging();
    let state = apply(
        scanned(vec![link("Ubuntu ISO", 'a'), link("Debian ISO", 'b')]),
        vec![Msg::FilterChanged("iso".to_string())],
    );
    assert_eq!(state.view().visible_count, 2);

    let state = apply(state, vec![Msg::FilterChanged("DEB".to_string())]);
    let visible: Vec<String> = state
        .view()
        .visible_rows()
        .map(|row| row.name.clone())
        .collect();
    assert_eq!(visible, vec!["Debian ISO".to_string()]);
}

#[test]
fn rescan_drops_previous_selection() {
    init_logging();
    let state = apply(
        scanned(vec![link("One", 'a')]),
        vec![Msg::LinkToggled { index: 0 }, Msg::ScanRequested],
    );
    let (state, _) = update(state, Msg::ScanFinished(vec![link("One", 'a')]));

    assert_eq!(state.view().selected_count, 0);
}

#[test]
fn save_settings_trims_fields() {
    init_logging();
    let edited = ConnectionSettings::new(" http://nas:8080/ ", " admin ", " secret ");
    let (state, _) = update(PopupState::new(), Msg::SettingsEdited(edited));
    let (state, effects) = update(state, Msg::SaveSettingsClicked);

    let expected = ConnectionSettings::new("http://nas:8080/", "admin", "secret");
    assert_eq!(effects, vec![Effect::SaveSettings(expected.clone())]);
    assert_eq!(state.settings_form(), &expected);

    let (state, _) = update(state, Msg::SettingsSaved);
    let view = state.view();
    assert_eq!(view.status.expect("status").text, "Settings saved successfully!");
    assert!(view.settings.password_set);
}

#[test]
fn connection_test_reports_version_or_failure() {
    init_logging();
    let (state, effects) = update(PopupState::new(), Msg::TestConnectionClicked);
    assert_eq!(effects, vec![Effect::TestConnection]);
    assert_eq!(state.view().test_button.label, "Testing...");

    let (state, _) = update(state, Msg::ConnectionTested(Ok("v4.6.2".to_string())));
    assert_eq!(
        state.view().status.expect("status").text,
        "Connected successfully! qBittorrent version: v4.6.2"
    );

    let (state, _) = update(state, Msg::TestConnectionClicked);
    let (state, _) = update(
        state,
        Msg::ConnectionTested(Err("HTTP error! status: 401".to_string())),
    );
    let status = state.view().status.expect("status");
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Connection failed: HTTP error! status: 401");
}

#[test]
fn status_line_clears_after_five_seconds() {
    init_logging();
    let (mut state, _) = update(PopupState::new(), Msg::SettingsSaved);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(4_900),
        },
    );
    assert!(state.view().status.is_some());
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(100),
        },
    );
    assert!(state.view().status.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn new_status_restarts_the_timer() {
    init_logging();
    let (state, _) = update(PopupState::new(), Msg::SettingsSaved);
    let state = apply(
        state,
        vec![
            Msg::Tick {
                elapsed: Duration::from_secs(4),
            },
            Msg::SettingsSaveFailed("disk full".to_string()),
            Msg::Tick {
                elapsed: Duration::from_secs(4),
            },
        ],
    );

    let status = state.view().status.expect("status");
    assert_eq!(status.text, "Could not save settings: disk full");
}
