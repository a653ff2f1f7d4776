use engine_logging::{engine_info, engine_warn};
use magnet_core::{count_magnet_anchors, scan_anchors, MagnetLink};

use crate::page::PageQuery;
use crate::ScanUnavailable;

/// Deduplicated magnet links of a page, in document order.
pub async fn scan_page(query: &dyn PageQuery) -> Result<Vec<MagnetLink>, ScanUnavailable> {
    let anchors = query.magnet_anchors().await?;
    let links: Vec<MagnetLink> = scan_anchors(&anchors).collect();
    engine_info!(
        "Scan found {} magnet links ({} anchors)",
        links.len(),
        anchors.len()
    );
    Ok(links)
}

/// Raw magnet anchor count for the badge. Unavailable pages count as zero.
pub async fn count_page_links(query: &dyn PageQuery) -> usize {
    match query.magnet_anchors().await {
        Ok(anchors) => count_magnet_anchors(&anchors),
        Err(err) => {
            engine_warn!("Badge count unavailable: {}", err);
            0
        }
    }
}
