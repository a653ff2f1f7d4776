use std::path::PathBuf;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_warn};
use magnet_core::{Anchor, MAGNET_SCHEME};
use scraper::{Html, Selector};
use url::Url;

use crate::decode::decode_page;
use crate::fetch::Fetcher;
use crate::ScanUnavailable;

/// Read-only view of the page being scanned.
#[async_trait::async_trait]
pub trait PageQuery: Send + Sync {
    /// Magnet anchors in document order.
    async fn magnet_anchors(&self) -> Result<Vec<Anchor>, ScanUnavailable>;
}

/// What the user pointed the tool at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    Url(String),
    File(PathBuf),
    Html(String),
}

impl PageTarget {
    /// Anything that looks like a URI (`scheme:` prefix other than a drive
    /// letter) is a URL; everything else is a local path.
    pub fn from_arg(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if url.scheme().len() > 1 => PageTarget::Url(arg.to_string()),
            _ => PageTarget::File(PathBuf::from(arg)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PageTarget::Url(url) => url.clone(),
            PageTarget::File(path) => path.display().to_string(),
            PageTarget::Html(_) => "inline document".to_string(),
        }
    }
}

/// Builds the query for a target. URLs with schemes other than `http`,
/// `https` and `file` are restricted and always report `ScanUnavailable`.
pub fn page_query_for(target: &PageTarget, fetcher: Arc<dyn Fetcher>) -> Box<dyn PageQuery> {
    match target {
        PageTarget::Html(html) => Box::new(StaticPage::new(html.clone())),
        PageTarget::File(path) => Box::new(FilePage::new(path.clone())),
        PageTarget::Url(raw) => match Url::parse(raw) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Box::new(FilePage::new(path)),
                Err(()) => Box::new(RestrictedPage(raw.clone())),
            },
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Box::new(RemotePage::new(url.to_string(), fetcher))
            }
            _ => Box::new(RestrictedPage(raw.clone())),
        },
    }
}

pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait::async_trait]
impl PageQuery for StaticPage {
    async fn magnet_anchors(&self) -> Result<Vec<Anchor>, ScanUnavailable> {
        Ok(extract_magnet_anchors(&self.html))
    }
}

pub struct FilePage {
    path: PathBuf,
}

impl FilePage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl PageQuery for FilePage {
    async fn magnet_anchors(&self) -> Result<Vec<Anchor>, ScanUnavailable> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            ScanUnavailable::Read(format!("{}: {}", self.path.display(), err))
        })?;
        let page = decode_page(&bytes, None);
        Ok(extract_magnet_anchors(&page.html))
    }
}

pub struct RemotePage {
    url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl RemotePage {
    pub fn new(url: String, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { url, fetcher }
    }
}

#[async_trait::async_trait]
impl PageQuery for RemotePage {
    async fn magnet_anchors(&self) -> Result<Vec<Anchor>, ScanUnavailable> {
        let output = self.fetcher.fetch(&self.url).await?;
        let page = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        if page.lossy {
            engine_warn!(
                "Page {} decoded lossily as {}",
                output.metadata.final_url,
                page.encoding_label
            );
        }
        Ok(extract_magnet_anchors(&page.html))
    }
}

struct RestrictedPage(String);

#[async_trait::async_trait]
impl PageQuery for RestrictedPage {
    async fn magnet_anchors(&self) -> Result<Vec<Anchor>, ScanUnavailable> {
        Err(ScanUnavailable::RestrictedOrigin(self.0.clone()))
    }
}

/// Every `<a>` whose raw `href` starts with `magnet:`, with its text content.
pub fn extract_magnet_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let selector_text = format!(r#"a[href^="{MAGNET_SCHEME}"]"#);
    let Ok(selector) = Selector::parse(&selector_text) else {
        return Vec::new();
    };

    let anchors: Vec<Anchor> = document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(Anchor::new(href, element.text().collect::<String>()))
        })
        .collect();
    engine_debug!("Found {} magnet anchors", anchors.len());
    anchors
}
