use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Decode page bytes to UTF-8: BOM -> Content-Type charset -> chardetng guess.
///
/// Never fails: magnet URIs are ASCII, so a few replacement characters in
/// surrounding text must not hide the links.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedPage {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        lossy: had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type_wins_over_detection() {
        let bytes = b"<a href=\"magnet:?dn=caf\xe9\">x</a>";
        let page = decode_page(bytes, Some("text/html; Charset=\"windows-1252\""));
        assert_eq!(page.encoding_label, "windows-1252");
        assert!(page.html.contains("café"));
        assert!(!page.lossy);
    }

    #[test]
    fn bom_is_honoured() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<p>é</p>".as_bytes());
        let page = decode_page(&bytes, Some("text/html; charset=iso-8859-1"));
        assert_eq!(page.encoding_label, "UTF-8");
        assert_eq!(page.html, "<p>é</p>");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let page = decode_page(b"<a href=\"magnet:?x\">\xff</a>", Some("text/html; charset=utf-8"));
        assert!(page.lossy);
        assert!(page.html.contains("magnet:?x"));
    }
}
