use engine_logging::engine_warn;
use magnet_core::ConnectionSettings;

use crate::client::WebUiClient;

pub const WEBUI_URL_REQUIRED: &str = "WebUI URL is required";

/// Connectivity check against `/api/v2/app/version`. Returns the version
/// text or a message ready for the status line.
pub async fn probe_connection(
    client: &WebUiClient,
    settings: &ConnectionSettings,
) -> Result<String, String> {
    if !settings.has_webui_url() {
        return Err(WEBUI_URL_REQUIRED.to_string());
    }
    client.app_version(settings).await.map_err(|err| {
        engine_warn!("Connection test against {} failed: {}", settings.webui_url, err);
        err.to_string()
    })
}
