use std::time::Duration;

use crate::view_model::{ButtonView, LinkRowView, PopupViewModel, SettingsView, StatusView};
use crate::{ConnectionSettings, MagnetLink, SubmissionReport, SubmitOutcome};

/// How long a status line stays visible after being posted.
pub const STATUS_TTL: Duration = Duration::from_secs(5);
pub const EMPTY_LIST_MESSAGE: &str = "No magnet links found on this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    text: String,
    kind: StatusKind,
    remaining: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkRow {
    link: MagnetLink,
    selected: bool,
    outcome: Option<SubmitOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Busy {
    pub(crate) scanning: bool,
    pub(crate) submitting: bool,
    pub(crate) testing: bool,
}

/// Everything the popup shows, owned explicitly instead of living in
/// widget references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupState {
    rows: Vec<LinkRow>,
    scanned: bool,
    filter: String,
    category: Option<String>,
    settings_form: ConnectionSettings,
    /// Last settings known to be in the store; submissions check these.
    stored_settings: ConnectionSettings,
    pending_save: Option<ConnectionSettings>,
    status: Option<StatusLine>,
    busy: Busy,
    dirty: bool,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PopupViewModel {
        let rows: Vec<LinkRowView> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| LinkRowView {
                index,
                name: row.link.name.clone(),
                url: row.link.url.clone(),
                selected: row.selected,
                visible: matches_filter(&row.link.name, &self.filter),
                outcome: row.outcome,
            })
            .collect();

        let visible_count = rows.iter().filter(|row| row.visible).count();
        let select_all_checked = visible_count > 0
            && rows
                .iter()
                .filter(|row| row.visible)
                .all(|row| row.selected);
        let empty_message = (self.scanned && self.rows.is_empty()).then_some(EMPTY_LIST_MESSAGE);

        PopupViewModel {
            visible_count,
            selected_count: self.rows.iter().filter(|row| row.selected).count(),
            select_all_checked,
            rows,
            empty_message,
            filter: self.filter.clone(),
            category: self.category.clone(),
            status: self.status.as_ref().map(|line| StatusView {
                text: line.text.clone(),
                kind: line.kind,
            }),
            refresh_button: ButtonView::new("Refresh", "Scanning...", self.busy.scanning),
            download_button: ButtonView::new(
                "Download Selected",
                "Downloading...",
                self.busy.submitting,
            ),
            test_button: ButtonView::new("Test Connection", "Testing...", self.busy.testing),
            settings: SettingsView {
                webui_url: self.settings_form.webui_url.clone(),
                username: self.settings_form.username.clone(),
                password_set: !self.settings_form.password.is_empty(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn settings_form(&self) -> &ConnectionSettings {
        &self.settings_form
    }

    pub fn stored_settings(&self) -> &ConnectionSettings {
        &self.stored_settings
    }

    pub(crate) fn settings_stored(&mut self, settings: ConnectionSettings) {
        self.stored_settings = settings;
    }

    pub(crate) fn begin_save(&mut self, settings: ConnectionSettings) {
        self.pending_save = Some(settings);
    }

    pub(crate) fn finish_save(&mut self, saved: bool) {
        if let Some(settings) = self.pending_save.take() {
            if saved {
                self.stored_settings = settings;
            }
        }
    }

    pub(crate) fn busy(&self) -> Busy {
        self.busy
    }

    pub(crate) fn post_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine {
            text: text.into(),
            kind,
            remaining: STATUS_TTL,
        });
        self.dirty = true;
    }

    pub(crate) fn advance_clock(&mut self, elapsed: Duration) {
        let expired = match self.status.as_mut() {
            Some(line) => {
                line.remaining = line.remaining.saturating_sub(elapsed);
                line.remaining.is_zero()
            }
            None => false,
        };
        if expired {
            self.status = None;
            self.dirty = true;
        }
    }

    pub(crate) fn set_scanning(&mut self, scanning: bool) {
        self.busy.scanning = scanning;
        self.dirty = true;
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.busy.submitting = submitting;
        self.dirty = true;
    }

    pub(crate) fn set_testing(&mut self, testing: bool) {
        self.busy.testing = testing;
        self.dirty = true;
    }

    /// Replaces the list with a fresh scan result; selections and
    /// annotations from the previous scan are dropped.
    pub(crate) fn replace_links(&mut self, links: Vec<MagnetLink>) {
        self.rows = links
            .into_iter()
            .map(|link| LinkRow {
                link,
                selected: false,
                outcome: None,
            })
            .collect();
        self.scanned = true;
        self.dirty = true;
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        if self.filter != filter {
            self.filter = filter;
            self.dirty = true;
        }
    }

    pub(crate) fn toggle(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.selected = !row.selected;
            self.dirty = true;
        }
    }

    pub(crate) fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            if row.selected != selected {
                row.selected = selected;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn select_visible(&mut self, selected: bool) {
        for row in self
            .rows
            .iter_mut()
            .filter(|row| matches_filter(&row.link.name, &self.filter))
        {
            row.selected = selected;
        }
        self.dirty = true;
    }

    pub(crate) fn set_category(&mut self, category: Option<String>) {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.dirty = true;
    }

    pub(crate) fn category(&self) -> Option<String> {
        self.category.clone()
    }

    pub(crate) fn selected_urls(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.link.url.clone())
            .collect()
    }

    pub(crate) fn clear_outcomes(&mut self) {
        for row in &mut self.rows {
            row.outcome = None;
        }
    }

    pub(crate) fn apply_report(&mut self, report: &SubmissionReport) {
        for row in &mut self.rows {
            if let Some(outcome) = report.outcome_for(&row.link.url) {
                row.outcome = Some(outcome);
            }
        }
        self.dirty = true;
    }

    pub(crate) fn set_settings_form(&mut self, settings: ConnectionSettings) {
        self.settings_form = settings;
        self.dirty = true;
    }
}

/// Case-insensitive substring match; an empty filter shows everything.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    needle.is_empty() || name.to_lowercase().contains(&needle)
}
