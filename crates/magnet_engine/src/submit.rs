use engine_logging::engine_info;
use futures_util::future::join_all;
use magnet_core::{ConnectionSettings, LinkOutcome, SubmissionReport};
use thiserror::Error;

use crate::client::{AuthError, WebUiClient};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please configure qBittorrent settings first")]
    Configuration,
    #[error("Please select at least one magnet link")]
    Selection,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Adds every selected link to the WebUI.
///
/// Logs in once up front, then issues all add requests concurrently on the
/// current task and waits for every one of them; a failed add never cancels
/// its siblings. Outcomes keep selection order.
pub async fn submit(
    client: &WebUiClient,
    settings: &ConnectionSettings,
    selected: &[String],
    category: Option<&str>,
) -> Result<SubmissionReport, SubmitError> {
    if !settings.has_webui_url() {
        return Err(SubmitError::Configuration);
    }
    if selected.is_empty() {
        return Err(SubmitError::Selection);
    }

    client.authenticate(settings).await?;

    let adds = selected.iter().map(|url| async move {
        LinkOutcome {
            url: url.clone(),
            outcome: client.add_torrent(settings, url, category).await,
        }
    });
    let report = SubmissionReport::new(join_all(adds).await);

    engine_info!(
        "Submission finished: {} added, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}
