use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use magnet_core::{ConnectionSettings, SubmitOutcome, ADD_TORRENT_PATH, LOGIN_PATH, VERSION_PATH};
use reqwest::header::REFERER;
use reqwest::{Method, Response, StatusCode};
use thiserror::Error;

/// Body the WebUI returns for a successful login.
pub const LOGIN_OK_BODY: &str = "Ok.";

pub const CONNECTION_CHECKLIST: &str = "Please check:\n\
    1. The WebUI accepts cross-origin requests from this client\n\
    2. The WebUI URL is correct\n\
    3. qBittorrent is running and accessible";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication failed")]
    Rejected { status: u16 },
    #[error("Authentication failed")]
    UnexpectedBody { body: String },
    #[error("could not reach the WebUI. {checklist}", checklist = CONNECTION_CHECKLIST)]
    Unreachable(#[source] reqwest::Error),
    #[error("Authentication failed: {0}")]
    Transport(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("could not reach the WebUI. {checklist}", checklist = CONNECTION_CHECKLIST)]
    Unreachable(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::Unreachable(err)
        } else {
            ClientError::Transport(err)
        }
    }
}

/// Timeouts for WebUI calls. None by default: a hung WebUI stalls the call
/// until the platform gives up.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

/// A replayable WebUI request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            form: Vec::new(),
        }
    }

    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            form,
        }
    }
}

/// qBittorrent WebUI client.
///
/// Holds only the cookie jar of the server-side session; connection
/// settings are passed to every call so edits take effect immediately.
#[derive(Debug, Clone)]
pub struct WebUiClient {
    http: reqwest::Client,
}

impl WebUiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Transport)?;
        Ok(Self { http })
    }

    /// Logs in; succeeds only on an OK status with the exact `Ok.` body.
    pub async fn authenticate(&self, settings: &ConnectionSettings) -> Result<(), AuthError> {
        let request = ApiRequest::post_form(
            settings.endpoint(LOGIN_PATH),
            vec![
                ("username".to_string(), settings.username.clone()),
                ("password".to_string(), settings.password.clone()),
            ],
        );
        let response = self.send(settings, &request).await.map_err(|err| {
            if err.is_connect() {
                AuthError::Unreachable(err)
            } else {
                AuthError::Transport(err)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("Login rejected with status {}", status);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(AuthError::Transport)?;
        if body != LOGIN_OK_BODY {
            engine_warn!("Login returned unexpected body ({} bytes)", body.len());
            return Err(AuthError::UnexpectedBody { body });
        }
        engine_info!("Authenticated against {}", settings.webui_url);
        Ok(())
    }

    /// Sends `request`; on a 403 logs in once and resends once. Whatever the
    /// second attempt yields is returned unchanged.
    pub async fn request_with_auth(
        &self,
        settings: &ConnectionSettings,
        request: &ApiRequest,
    ) -> Result<Response, ClientError> {
        let response = self.send(settings, request).await?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        engine_debug!("{} {} returned 403, re-authenticating", request.method, request.url);
        self.authenticate(settings).await?;
        Ok(self.send(settings, request).await?)
    }

    /// Connectivity probe: the server version string, verbatim.
    pub async fn app_version(&self, settings: &ConnectionSettings) -> Result<String, ClientError> {
        let request = ApiRequest::get(settings.endpoint(VERSION_PATH));
        let response = self.request_with_auth(settings, &request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Adds one magnet link. Transport errors become a failure without status.
    pub async fn add_torrent(
        &self,
        settings: &ConnectionSettings,
        magnet_url: &str,
        category: Option<&str>,
    ) -> SubmitOutcome {
        let request = ApiRequest::post_form(
            settings.endpoint(ADD_TORRENT_PATH),
            add_form(magnet_url, category),
        );
        match self.request_with_auth(settings, &request).await {
            Ok(response) => {
                let outcome = SubmitOutcome::from_status(response.status().as_u16());
                if !outcome.is_success() {
                    engine_warn!(
                        "Add rejected with status {} for {}",
                        response.status(),
                        engine_logging::abbreviate_uri(magnet_url, 60)
                    );
                }
                outcome
            }
            Err(err) => {
                engine_warn!(
                    "Add failed for {}: {}",
                    engine_logging::abbreviate_uri(magnet_url, 60),
                    err
                );
                SubmitOutcome::Failure { status: None }
            }
        }
    }

    async fn send(
        &self,
        settings: &ConnectionSettings,
        request: &ApiRequest,
    ) -> Result<Response, reqwest::Error> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .header(REFERER, settings.webui_url.as_str());
        if request.method == Method::POST {
            builder = builder.form(&request.form);
        }
        builder.send().await
    }
}

fn add_form(magnet_url: &str, category: Option<&str>) -> Vec<(String, String)> {
    let mut form = vec![("urls".to_string(), magnet_url.to_string())];
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        form.push(("category".to_string(), category.to_string()));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_includes_category_only_when_set() {
        assert_eq!(
            add_form("magnet:?x", None),
            vec![("urls".to_string(), "magnet:?x".to_string())]
        );
        assert_eq!(add_form("magnet:?x", Some("")).len(), 1);
        assert_eq!(
            add_form("magnet:?x", Some("linux")),
            vec![
                ("urls".to_string(), "magnet:?x".to_string()),
                ("category".to_string(), "linux".to_string()),
            ]
        );
    }

    #[test]
    fn auth_errors_render_the_fixed_message() {
        let err = AuthError::UnexpectedBody {
            body: "Fails.".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed");
        assert_eq!(
            AuthError::Rejected { status: 401 }.to_string(),
            "Authentication failed"
        );
    }
}
