use crate::{StatusKind, SubmitOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupViewModel {
    pub rows: Vec<LinkRowView>,
    pub visible_count: usize,
    pub selected_count: usize,
    pub select_all_checked: bool,
    pub empty_message: Option<&'static str>,
    pub filter: String,
    pub category: Option<String>,
    pub status: Option<StatusView>,
    pub refresh_button: ButtonView,
    pub download_button: ButtonView,
    pub test_button: ButtonView,
    pub settings: SettingsView,
    pub dirty: bool,
}

impl PopupViewModel {
    pub fn visible_rows(&self) -> impl Iterator<Item = &LinkRowView> {
        self.rows.iter().filter(|row| row.visible)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRowView {
    pub index: usize,
    pub name: String,
    pub url: String,
    pub selected: bool,
    pub visible: bool,
    pub outcome: Option<SubmitOutcome>,
}

impl LinkRowView {
    /// Check or cross shown next to the row after a submission.
    pub fn outcome_mark(&self) -> Option<char> {
        self.outcome.map(|outcome| match outcome {
            SubmitOutcome::Success => '\u{2714}',
            SubmitOutcome::Failure { .. } => '\u{2718}',
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

impl ButtonView {
    pub(crate) fn new(idle: &'static str, busy_label: &'static str, busy: bool) -> Self {
        if busy {
            Self {
                label: busy_label,
                enabled: false,
            }
        } else {
            Self {
                label: idle,
                enabled: true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsView {
    pub webui_url: String,
    pub username: String,
    pub password_set: bool,
}
