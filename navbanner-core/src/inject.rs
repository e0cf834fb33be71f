// Insertion of the banner into page markup
//
// All operations are "ensure present": running them again on their own
// output leaves the page unchanged.

use crate::render::RenderedBanner;
use crate::script::SCRIPT_ID;
use crate::style::STYLE_ID;
use scraper::{Html, Selector};
use tracing::debug;

pub const BLOCK_START: &str = "<!-- nav-banner:start -->";
pub const BLOCK_END: &str = "<!-- nav-banner:end -->";

/// Applies style, script and banner to a page.
pub fn inject(html: &str, banner: &RenderedBanner) -> String {
    let html = ensure_style(html, &banner.style);
    let html = ensure_script(&html, &banner.script);
    inject_banner(&html, &banner.markup)
}

/// Whether the page has an element with the given id.
pub fn has_element_id(html: &str, id: &str) -> bool {
    let Ok(selector) = Selector::parse(&format!("#{}", id)) else {
        return false;
    };
    Html::parse_document(html).select(&selector).next().is_some()
}

pub fn ensure_style(html: &str, css: &str) -> String {
    let element = format!("<style id=\"{}\">{}</style>\n", STYLE_ID, css);
    ensure_head_element(html, STYLE_ID, &element)
}

pub fn ensure_script(html: &str, js: &str) -> String {
    let element = format!("<script id=\"{}\">{}</script>\n", SCRIPT_ID, js);
    ensure_head_element(html, SCRIPT_ID, &element)
}

fn ensure_head_element(html: &str, id: &str, element: &str) -> String {
    if has_element_id(html, id) {
        debug!("#{} already present", id);
        return html.to_string();
    }

    let (at, wrap) = match find_close_tag(html, "head") {
        Some(close) => (close, false),
        None => {
            let after = find_open_tag(html, "html")
                .or_else(|| find_open_tag(html, "!doctype"))
                .map(|(_, end)| end)
                .unwrap_or(0);
            (after, true)
        }
    };

    let mut out = String::with_capacity(html.len() + element.len() + 16);
    out.push_str(&html[..at]);
    if wrap {
        out.push_str("<head>");
        out.push_str(element);
        out.push_str("</head>\n");
    } else {
        out.push_str(element);
    }
    out.push_str(&html[at..]);
    out
}

/// Places `markup` (banner and spacer) right after the `<body>` open tag,
/// replacing any block injected earlier.
pub fn inject_banner(html: &str, markup: &str) -> String {
    let html = remove_banner(html);
    let at = find_open_tag(&html, "body")
        .or_else(|| find_close_tag(&html, "head").and_then(|close| tag_end(&html, close)))
        .map(|(_, end)| end)
        .unwrap_or(0);

    let mut out = String::with_capacity(html.len() + markup.len() + 64);
    out.push_str(&html[..at]);
    out.push_str(BLOCK_START);
    out.push('\n');
    out.push_str(markup);
    out.push_str(BLOCK_END);
    out.push('\n');
    out.push_str(&html[at..]);
    out
}

/// Drops a previously injected banner block, if any.
pub fn remove_banner(html: &str) -> String {
    let Some(start) = html.find(BLOCK_START) else {
        return html.to_string();
    };
    let Some(end_rel) = html[start..].find(BLOCK_END) else {
        return html.to_string();
    };
    let mut end = start + end_rel + BLOCK_END.len();
    if html[end..].starts_with('\n') {
        end += 1;
    }
    format!("{}{}", &html[..start], &html[end..])
}

/// Elements whose content is raw text; tags inside them are not markup.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Lowercased copy of `html` with comments and raw-text element content
/// blanked out, so tag searches only see real markup. Byte offsets match
/// `html`.
fn searchable(html: &str) -> Vec<u8> {
    let mut bytes = html.to_ascii_lowercase().into_bytes();
    let mut i = 0;
    'scan: while i < bytes.len() {
        if bytes[i..].starts_with(b"<!--") {
            let end = find_bytes(&bytes, b"-->", i + 4).map_or(bytes.len(), |e| e + 3);
            bytes[i..end].fill(b' ');
            i = end;
            continue;
        }
        for name in RAW_TEXT_ELEMENTS {
            if !is_tag_at(&bytes, i, &format!("<{}", name)) {
                continue;
            }
            let Some(open_end) = find_bytes(&bytes, b">", i).map(|e| e + 1) else {
                break 'scan;
            };
            let close = find_bytes(&bytes, format!("</{}", name).as_bytes(), open_end)
                .unwrap_or(bytes.len());
            bytes[open_end..close].fill(b' ');
            i = close;
            continue 'scan;
        }
        i += 1;
    }
    bytes
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|rel| from + rel)
}

/// Whether `needle` (`<name` or `</name`) starts a tag at `at` rather than a
/// longer tag name such as `<header` for `<head`.
fn is_tag_at(bytes: &[u8], at: usize, needle: &str) -> bool {
    bytes[at..].starts_with(needle.as_bytes())
        && match bytes.get(at + needle.len()).copied() {
            Some(b'>' | b'/') => true,
            Some(b) => b.is_ascii_whitespace(),
            None => false,
        }
}

/// Byte range of the first `<name ...>` open tag, ASCII case-insensitive.
fn find_open_tag(html: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = searchable(html);
    let needle = format!("<{}", name);
    let start = (0..bytes.len()).find(|&at| is_tag_at(&bytes, at, &needle))?;
    tag_end(html, start)
}

/// Start of the first `</name` close tag, ASCII case-insensitive.
fn find_close_tag(html: &str, name: &str) -> Option<usize> {
    let bytes = searchable(html);
    let needle = format!("</{}", name);
    (0..bytes.len()).find(|&at| is_tag_at(&bytes, at, &needle))
}

fn tag_end(html: &str, start: usize) -> Option<(usize, usize)> {
    let close = html[start..].find('>')?;
    Some((start, start + close + 1))
}
