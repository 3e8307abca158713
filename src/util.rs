//! Input decoding helpers used by the command-line front end.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<?xml encoding="..."?>`
///    or a `<meta>` charset)
/// 3. Falls back to Windows-1252 (superset of ISO-8859-1, common in old
///    HTML)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```
/// use tagdown::util::decode_text;
///
/// assert_eq!(decode_text("Hello, World!".as_bytes(), None), "Hello, World!");
/// assert_eq!(decode_text(b"caf\xe9", Some("iso-8859-1")), "café");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("input is not UTF-8; decoding as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    log::debug!("input is not UTF-8; decoding as windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Decode a markup document, using the charset it declares as the hint.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, sniff_charset(bytes))
}

/// How far into the document a charset declaration is looked for.
const SNIFF_LIMIT: usize = 1024;

/// Find a declared character encoding near the start of a document.
///
/// Recognizes the XML declaration (`<?xml ... encoding="..."?>`), HTML5
/// `<meta charset="...">` and the older
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
///
/// # Examples
///
/// ```
/// use tagdown::util::sniff_charset;
///
/// assert_eq!(sniff_charset(br#"<?xml version="1.0" encoding="UTF-8"?>"#), Some("UTF-8"));
/// assert_eq!(sniff_charset(br#"<meta charset=latin1>"#), Some("latin1"));
/// assert_eq!(sniff_charset(b"<p>plain</p>"), None);
/// ```
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LIMIT)];

    if prefix.starts_with(b"<?xml")
        && let Some(encoding) = attribute_value(prefix, b"encoding=")
    {
        return Some(encoding);
    }

    let meta = find_ignore_case(prefix, b"<meta")?;
    attribute_value(&prefix[meta..], b"charset=")
}

/// Value following `key` (which includes the `=`), quoted or bare.
fn attribute_value<'a>(bytes: &'a [u8], key: &[u8]) -> Option<&'a str> {
    let pos = find_ignore_case(bytes, key)?;
    let after = &bytes[pos + key.len()..];

    let value = match after.first()? {
        &quote @ (b'"' | b'\'') => {
            let end = memchr::memchr(quote, &after[1..])?;
            &after[1..1 + end]
        }
        _ => {
            let end = after
                .iter()
                .position(|b| {
                    b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b';' | b'>' | b'/')
                })
                .unwrap_or(after.len());
            &after[..end]
        }
    };

    std::str::from_utf8(value).ok().filter(|v| !v.is_empty())
}

fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
