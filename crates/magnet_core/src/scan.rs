use std::collections::HashSet;

use crate::link::{dedupe_key, Anchor, MagnetLink};

pub const BADGE_COLOR: &str = "#2196F3";

/// Lazy, deduplicating pass over page anchors.
///
/// Yields magnet links in document order, skipping any link whose identity
/// was already seen earlier in the same pass.
pub struct MagnetLinks<I> {
    anchors: I,
    seen: HashSet<String>,
}

impl<I> MagnetLinks<I> {
    pub fn new(anchors: I) -> Self {
        Self {
            anchors,
            seen: HashSet::new(),
        }
    }
}

impl<'a, I> Iterator for MagnetLinks<I>
where
    I: Iterator<Item = &'a Anchor>,
{
    type Item = MagnetLink;

    fn next(&mut self) -> Option<Self::Item> {
        for anchor in self.anchors.by_ref() {
            if !anchor.is_magnet() {
                continue;
            }
            if self.seen.insert(dedupe_key(&anchor.href)) {
                return Some(MagnetLink::from_anchor(anchor));
            }
        }
        None
    }
}

/// Starts a fresh scan over `anchors`. Calling it again restarts from the top.
pub fn scan_anchors(anchors: &[Anchor]) -> MagnetLinks<std::slice::Iter<'_, Anchor>> {
    MagnetLinks::new(anchors.iter())
}

/// Number of magnet anchors on the page, duplicates included.
pub fn count_magnet_anchors(anchors: &[Anchor]) -> usize {
    anchors.iter().filter(|anchor| anchor.is_magnet()).count()
}

/// Badge label for a link count: empty when there is nothing to show.
pub fn badge_text(count: usize) -> String {
    if count > 0 {
        count.to_string()
    } else {
        String::new()
    }
}
