use std::time::Duration;

use crate::{ConnectionSettings, MagnetLink, SubmissionReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Popup became visible: load settings and scan the active page.
    PopupOpened,
    /// User clicked Refresh.
    ScanRequested,
    /// Engine finished scanning; links are already deduplicated.
    ScanFinished(Vec<MagnetLink>),
    /// The active page could not be queried (restricted origin, fetch failure).
    ScanUnavailable { reason: String },
    /// User edited the name filter.
    FilterChanged(String),
    /// User toggled the checkbox of the row at `index` (scan order).
    LinkToggled { index: usize },
    /// Sets the checkbox of the row at `index` regardless of its current state.
    LinkSelected { index: usize, selected: bool },
    /// User toggled select-all; applies to visible rows only.
    SelectAllVisible(bool),
    /// User picked a category for the next submission.
    CategoryChanged(Option<String>),
    /// User clicked Download.
    SubmitClicked,
    /// Engine collected every per-link outcome.
    SubmitFinished(SubmissionReport),
    /// Submission aborted before any add request (configuration or auth).
    SubmitFailed(String),
    /// Settings read from the store.
    SettingsLoaded(ConnectionSettings),
    /// User edited the settings form.
    SettingsEdited(ConnectionSettings),
    /// User clicked Save.
    SaveSettingsClicked,
    SettingsSaved,
    SettingsSaveFailed(String),
    /// User clicked Test Connection.
    TestConnectionClicked,
    /// Connectivity probe finished; `Ok` carries the server version.
    ConnectionTested(Result<String, String>),
    /// Wall-clock progress used to expire the status line.
    Tick { elapsed: Duration },
}
