use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use magnet_core::ConnectionSettings;
use thiserror::Error;
use tokio::sync::mpsc as async_mpsc;

use crate::client::{ClientError, ClientSettings, WebUiClient};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::page::{page_query_for, PageTarget};
use crate::probe::probe_connection;
use crate::scan::{count_page_links, scan_page};
use crate::settings_store::SettingsStore;
use crate::submit::submit;
use crate::{EngineEvent, FetchError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build page fetcher: {0}")]
    Fetcher(#[from] FetchError),
    #[error("failed to build WebUI client: {0}")]
    Client(#[from] ClientError),
}

pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub client: ClientSettings,
    pub settings_store: Arc<dyn SettingsStore>,
}

impl EngineConfig {
    pub fn with_store(settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            fetch: FetchSettings::default(),
            client: ClientSettings::default(),
            settings_store,
        }
    }
}

enum EngineCommand {
    Scan { target: PageTarget },
    CountLinks { target: PageTarget },
    Submit { urls: Vec<String>, category: Option<String> },
    TestConnection,
    SaveSettings(ConnectionSettings),
}

struct EngineContext {
    fetcher: Arc<dyn Fetcher>,
    client: WebUiClient,
    settings_store: Arc<dyn SettingsStore>,
}

/// Runs IO on a single-threaded runtime owned by a background thread.
///
/// Commands are handled concurrently on that one thread; each produces
/// exactly one `EngineEvent`.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let context = Arc::new(EngineContext {
            fetcher: Arc::new(ReqwestFetcher::new(config.fetch)?),
            client: WebUiClient::new(&config.client)?,
            settings_store: config.settings_store,
        });

        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            runtime.block_on(run_loop(cmd_rx, event_tx, context));
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn scan(&self, target: PageTarget) {
        self.send(EngineCommand::Scan { target });
    }

    pub fn count_links(&self, target: PageTarget) {
        self.send(EngineCommand::CountLinks { target });
    }

    pub fn submit(&self, urls: Vec<String>, category: Option<String>) {
        self.send(EngineCommand::Submit { urls, category });
    }

    pub fn test_connection(&self) {
        self.send(EngineCommand::TestConnection);
    }

    pub fn save_settings(&self, settings: ConnectionSettings) {
        self.send(EngineCommand::SaveSettings(settings));
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_error!("Engine thread is gone; command dropped");
        }
    }
}

async fn run_loop(
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    context: Arc<EngineContext>,
) {
    while let Some(command) = cmd_rx.recv().await {
        let context = context.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let event = handle_command(&context, command).await;
            let _ = event_tx.send(event);
        });
    }
    engine_debug!("Engine command channel closed");
}

async fn handle_command(context: &EngineContext, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Scan { target } => {
            let query = page_query_for(&target, context.fetcher.clone());
            EngineEvent::ScanCompleted(scan_page(query.as_ref()).await)
        }
        EngineCommand::CountLinks { target } => {
            let query = page_query_for(&target, context.fetcher.clone());
            EngineEvent::LinksCounted {
                count: count_page_links(query.as_ref()).await,
            }
        }
        EngineCommand::Submit { urls, category } => {
            let result = match context.settings_store.load() {
                Ok(settings) => submit(&context.client, &settings, &urls, category.as_deref())
                    .await
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            EngineEvent::SubmitCompleted(result)
        }
        EngineCommand::TestConnection => {
            let result = match context.settings_store.load() {
                Ok(settings) => probe_connection(&context.client, &settings).await,
                Err(err) => Err(err.to_string()),
            };
            EngineEvent::ConnectionTested(result)
        }
        EngineCommand::SaveSettings(settings) => EngineEvent::SettingsSaved(
            context
                .settings_store
                .save(&settings)
                .map_err(|err| err.to_string()),
        ),
    }
}
