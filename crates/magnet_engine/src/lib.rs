//! Magnet courier engine: page scanning, WebUI client and effect execution.
mod client;
mod decode;
mod engine;
mod fetch;
mod page;
mod persist;
mod probe;
mod scan;
mod settings_store;
mod submit;
mod types;

pub use client::{
    ApiRequest, AuthError, ClientError, ClientSettings, WebUiClient, CONNECTION_CHECKLIST,
    LOGIN_OK_BODY,
};
pub use decode::{decode_page, DecodedPage};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::{
    extract_magnet_anchors, page_query_for, FilePage, PageQuery, PageTarget, RemotePage,
    StaticPage,
};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use probe::{probe_connection, WEBUI_URL_REQUIRED};
pub use scan::{count_page_links, scan_page};
pub use settings_store::{MemorySettingsStore, SettingsError, SettingsStore};
pub use submit::{submit, SubmitError};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, ScanUnavailable};
