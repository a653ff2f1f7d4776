pub const LOGIN_PATH: &str = "/api/v2/auth/login";
pub const VERSION_PATH: &str = "/api/v2/app/version";
pub const ADD_TORRENT_PATH: &str = "/api/v2/torrents/add";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionSettings {
    pub webui_url: String,
    pub username: String,
    pub password: String,
}

impl ConnectionSettings {
    pub fn new(
        webui_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            webui_url: webui_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field, as stored
    /// when the user saves the form.
    pub fn trimmed(&self) -> Self {
        Self {
            webui_url: self.webui_url.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }

    pub fn has_webui_url(&self) -> bool {
        !self.webui_url.is_empty()
    }

    pub fn endpoint(&self, path: &str) -> String {
        api_url(&self.webui_url, path)
    }
}

/// Joins a WebUI base URL and an API path, dropping trailing slashes from
/// the base.
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
