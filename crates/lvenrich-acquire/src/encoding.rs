use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// How far into a page to look for a `<meta>` charset declaration.
const META_SCAN_BYTES: usize = 1024;

/// Decode a fetched page to text.
///
/// A byte-order mark wins, then the `Content-Type` header's charset, then a
/// `<meta charset>` / `<meta http-equiv>` declaration near the top of the
/// page. Undeclared pages are read as UTF-8 when they are valid UTF-8 and as
/// windows-1252 otherwise.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(bytes))
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()));

    if let Some(encoding) = declared {
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }

    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// The `charset` parameter of a `Content-Type` header value.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// The charset named by the first `<meta>` tag that declares one.
fn charset_from_meta(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(start) = rest.find("<meta") {
        let tag = &rest[start..];
        let end = tag.find('>').unwrap_or(tag.len());
        let (tag, remainder) = tag.split_at(end);

        if let Some(pos) = tag.find("charset=") {
            let value = tag[pos + "charset=".len()..]
                .trim_start_matches(|c: char| c == '"' || c == '\'' || c == ' ');
            let label_end = value
                .find(|c: char| matches!(c, '"' | '\'' | ';' | '/' | '>') || c.is_whitespace())
                .unwrap_or(value.len());
            if label_end > 0 {
                return Some(value[..label_end].to_string());
            }
        }
        rest = remainder;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // "Kosmos-3M Ürün" in ISO-8859-1
    const LATIN1_NAME: &[u8] = b"Kosmos-3M \xdcr\xfcn";

    #[test]
    fn test_utf8_default() {
        let html = "<table><tr><td>Long March é</td></tr></table>";
        assert_eq!(decode_html(html.as_bytes(), None), html);
    }

    #[test]
    fn test_content_type_charset() {
        let text = decode_html(LATIN1_NAME, Some("text/html; charset=ISO-8859-1"));
        assert_eq!(text, "Kosmos-3M Ürün");
    }

    #[test]
    fn test_meta_charset() {
        let mut page = b"<html><head><meta charset=\"iso-8859-1\"></head><body>".to_vec();
        page.extend_from_slice(LATIN1_NAME);
        let text = decode_html(&page, Some("text/html"));
        assert!(text.ends_with("<body>Kosmos-3M Ürün"));
    }

    #[test]
    fn test_meta_http_equiv_charset() {
        let mut page = b"<HEAD><META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=windows-1252\"></HEAD>".to_vec();
        page.extend_from_slice(LATIN1_NAME);
        assert!(decode_html(&page, None).ends_with("Kosmos-3M Ürün"));
    }

    #[test]
    fn test_undeclared_latin1_falls_back() {
        assert_eq!(decode_html(LATIN1_NAME, None), "Kosmos-3M Ürün");
    }

    #[test]
    fn test_header_beats_meta() {
        let page = "<meta charset=\"iso-8859-1\">Ürün".as_bytes();
        assert_eq!(
            decode_html(page, Some("text/html; charset=utf-8")),
            "<meta charset=\"iso-8859-1\">Ürün"
        );
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; Charset=\"UTF-8\""),
            Some("UTF-8".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }
}
