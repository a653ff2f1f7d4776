use std::fmt::Write;

pub const MAGNET_SCHEME: &str = "magnet:";
pub const UNNAMED_TORRENT: &str = "Unnamed torrent";

const BTIH_MARKER: &str = "btih:";
const HEX_HASH_LEN: usize = 40;
const BASE32_HASH_LEN: usize = 32;

/// A raw anchor as reported by the host page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

impl Anchor {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }

    pub fn is_magnet(&self) -> bool {
        self.href.starts_with(MAGNET_SCHEME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub url: String,
    pub name: String,
}

impl MagnetLink {
    /// Builds a link from an anchor, resolving the display name from the
    /// anchor text, then the `dn` parameter, then a fixed fallback.
    pub fn from_anchor(anchor: &Anchor) -> Self {
        Self {
            url: anchor.href.clone(),
            name: display_name(&anchor.text, &anchor.href),
        }
    }
}

pub fn display_name(text: &str, href: &str) -> String {
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    name_from_magnet(href).unwrap_or_else(|| UNNAMED_TORRENT.to_string())
}

/// Decoded `dn` parameter of a magnet URI (`+` is a space).
pub fn name_from_magnet(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "dn")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Identity used for deduplication: the info-hash when present, otherwise
/// the full href.
pub fn dedupe_key(href: &str) -> String {
    info_hash(href).unwrap_or_else(|| href.to_string())
}

/// Extracts the BitTorrent v1 info-hash from a magnet URI.
///
/// Accepts the 40-char hex and the 32-char base32 forms in any case and
/// returns the hash as lowercase hex, so both encodings of the same torrent
/// compare equal.
pub fn info_hash(href: &str) -> Option<String> {
    let lower = href.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(BTIH_MARKER) {
        let start = from + pos + BTIH_MARKER.len();
        let candidate = &lower[start..];
        if let Some(hex) = leading_hex_hash(candidate) {
            return Some(hex);
        }
        if let Some(hex) = leading_base32_hash(candidate) {
            return Some(hex);
        }
        from = start;
    }
    None
}

fn leading_hex_hash(candidate: &str) -> Option<String> {
    let head = candidate.get(..HEX_HASH_LEN)?;
    head.bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then(|| head.to_string())
}

fn leading_base32_hash(candidate: &str) -> Option<String> {
    let head = candidate.get(..BASE32_HASH_LEN)?;
    let bytes = decode_base32(head)?;
    let mut hex = String::with_capacity(HEX_HASH_LEN);
    for byte in bytes {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    Some(hex)
}

/// RFC 4648 base32 without padding. Input must be a multiple of 8 chars.
fn decode_base32(input: &str) -> Option<Vec<u8>> {
    if input.len() % 8 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u64 = 0;
    let mut bits = 0u32;
    for b in input.bytes() {
        let value = match b {
            b'a'..=b'z' => b - b'a',
            b'A'..=b'Z' => b - b'A',
            b'2'..=b'7' => b - b'2' + 26,
            _ => return None,
        };
        buffer = (buffer << 5) | u64::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_hash_is_lowercased() {
        let href = "magnet:?xt=urn:btih:ABCDEF0123456789ABCDEF0123456789ABCDEF01&dn=x";
        assert_eq!(
            info_hash(href).as_deref(),
            Some("abcdef0123456789abcdef0123456789abcdef01")
        );
    }

    #[test]
    fn base32_hash_decodes_to_hex() {
        // 20 zero bytes.
        let href = "magnet:?xt=urn:btih:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        assert_eq!(info_hash(href).as_deref(), Some("0".repeat(40).as_str()));
    }

    #[test]
    fn short_hash_is_not_an_identity() {
        assert_eq!(info_hash("magnet:?xt=urn:btih:abc123"), None);
        assert_eq!(dedupe_key("magnet:?xt=urn:btih:abc123"), "magnet:?xt=urn:btih:abc123");
    }

    #[test]
    fn base32_rejects_bad_length() {
        assert_eq!(decode_base32("AAAAAAA"), None);
        assert_eq!(decode_base32("AAAAAAA1"), None);
    }
}
