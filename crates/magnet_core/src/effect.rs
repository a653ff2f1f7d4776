use crate::ConnectionSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadSettings,
    ScanActivePage,
    SubmitLinks {
        urls: Vec<String>,
        category: Option<String>,
    },
    SaveSettings(ConnectionSettings),
    TestConnection,
}
