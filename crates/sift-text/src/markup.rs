//! Markup stripping.
//!
//! Article bodies arrive as HTML fragments. [`strip_markup`] removes tags in one linear
//! pass over the input and decodes a small fixed set of character references, leaving
//! the readable text. It is not a validating parser: malformed markup degrades to text.
//!
//! # Examples
//!
//! ```
//! use sift_text::strip_markup;
//!
//! assert_eq!(strip_markup("<p>Rust &amp; <b>Go</b></p>"), " Rust &  Go  ");
//! assert_eq!(strip_markup("1 < 2"), "1 < 2");
//! ```

/// Elements whose content is dropped along with their tags.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Longest character reference the scanner will try to decode, including `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Strips markup tags and decodes character references.
///
/// - Tags (`<p>`, `</div>`, `<br/>`), comments and declarations are replaced by a single
///   space so that words on either side stay separate.
/// - The contents of `<script>` and `<style>` elements are dropped.
/// - `&amp; &lt; &gt; &quot; &#39; &apos; &nbsp;` and decimal/hex numeric references are
///   decoded. Unknown references are kept verbatim.
/// - A `<` that does not start a tag is kept as text.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['<', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('&') {
            match decode_entity(rest) {
                Some((decoded, len)) => {
                    out.push(decoded);
                    rest = &rest[len..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
            continue;
        }

        match scan_tag(rest) {
            Some(tag) => {
                out.push(' ');
                rest = &rest[tag.len..];
                if let Some(name) = tag.opens_raw_text {
                    rest = skip_raw_text(rest, name);
                }
            }
            None => {
                out.push('<');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// A tag recognised at the start of the input.
struct Tag {
    /// Byte length of the tag including both angle brackets.
    len: usize,
    /// Set when the tag opens a raw-text element whose content must be skipped.
    opens_raw_text: Option<&'static str>,
}

/// Recognises a tag, comment or declaration at the start of `input` (which begins with `<`).
fn scan_tag(input: &str) -> Option<Tag> {
    let after = &input[1..];

    if let Some(body) = after.strip_prefix("!--") {
        let end = body.find("-->").map_or(input.len(), |i| 4 + i + 3);
        return Some(Tag {
            len: end,
            opens_raw_text: None,
        });
    }

    let first = after.chars().next()?;
    if !(first.is_ascii_alphabetic() || matches!(first, '/' | '!' | '?')) {
        return None;
    }

    let close = after.find('>')?;
    let inner = &after[..close];
    let opens_raw_text = if first.is_ascii_alphabetic() && !inner.ends_with('/') {
        let name_end = inner
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        RAW_TEXT_ELEMENTS
            .iter()
            .copied()
            .find(|raw| raw.eq_ignore_ascii_case(name))
    } else {
        None
    };

    Some(Tag {
        len: close + 2,
        opens_raw_text,
    })
}

/// Skips raw-text content up to and including the matching close tag.
///
/// An unterminated element swallows the rest of the input.
fn skip_raw_text<'a>(input: &'a str, name: &str) -> &'a str {
    let bytes = input.as_bytes();
    let mut from = 0;
    while let Some(offset) = input[from..].find("</") {
        let start = from + offset;
        let name_start = start + 2;
        let name_end = name_start + name.len();
        if name_end <= input.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes())
            && let Some(close) = input[name_end..].find('>')
        {
            return &input[name_end + close + 1..];
        }
        from = start + 2;
    }
    ""
}

/// Decodes a character reference at the start of `input` (which begins with `&`).
///
/// Returns the decoded character and the byte length consumed.
fn decode_entity(input: &str) -> Option<(char, usize)> {
    let window = &input.as_bytes()[..input.len().min(MAX_ENTITY_LEN)];
    let semi = window.iter().position(|&b| b == b';')?;
    let name = &input[1..semi];
    let len = semi + 1;

    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };

    Some((decoded, len))
}
