//! Composite-file parsing.
//!
//! Byte-level scanning with zero-copy content. The container grammar is
//! deliberately shallow: top-level blocks demarcated by start/end tags.
//! Only the script region is materialized; markup, style, and custom
//! blocks are measured and skipped. Nested `<template>` tags inside the
//! markup region are tracked by depth so an inner close cannot terminate
//! the outer block early.

use crate::types::{BlockLocation, PadOption, SfcDescriptor, SfcError, SfcParseOptions, SfcScriptBlock};
use memchr::{memchr, memchr_iter};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

// Static closing tags for fast comparison (avoid format!)
const CLOSING_TEMPLATE: &[u8] = b"</template>";
const CLOSING_SCRIPT: &[u8] = b"</script>";
const CLOSING_STYLE: &[u8] = b"</style>";

// Tag name bytes for fast comparison
const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";
const TAG_STYLE: &[u8] = b"style";

/// Parse a composite file into a descriptor with zero-copy strings.
///
/// At most one script block is accepted; a second one is a
/// `DUPLICATE_SCRIPT` error, and a script block whose closing tag never
/// appears is an `UNTERMINATED_SCRIPT` error. Blocks other than script
/// never error; an unterminated one simply ends block recognition at its
/// opening tag.
pub fn parse_sfc<'a>(
    source: &'a str,
    options: SfcParseOptions,
) -> Result<SfcDescriptor<'a>, SfcError> {
    let mut descriptor = SfcDescriptor {
        filename: Cow::Owned(options.filename),
        source: Cow::Borrowed(source),
        script: None,
    };

    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        // Jump to the next '<'
        pos = match memchr(b'<', &bytes[pos..]) {
            Some(offset) => pos + offset,
            None => break,
        };

        let open = match scan_open_tag(bytes, source, pos) {
            Some(open) => open,
            None => {
                // Not an opening tag; treat the '<' as text
                pos += 1;
                continue;
            }
        };

        if tag_name_eq(open.name, TAG_SCRIPT) {
            let (content_start, content_end, end_pos) = if open.self_closing {
                (open.end, open.end, open.end)
            } else {
                match find_static_end(bytes, open.end, CLOSING_SCRIPT) {
                    Some((content_end, end_pos)) => (open.end, content_end, end_pos),
                    None => {
                        return Err(SfcError::new(
                            "script block is missing its closing tag",
                            "UNTERMINATED_SCRIPT",
                            Some(block_location(bytes, open.end, len)),
                        ));
                    }
                }
            };

            let loc = block_location(bytes, content_start, content_end);
            if descriptor.script.is_some() {
                return Err(SfcError::new(
                    "composite file can only contain one script block",
                    "DUPLICATE_SCRIPT",
                    Some(loc),
                ));
            }

            let content = pad_content(
                source,
                Cow::Borrowed(&source[content_start..content_end]),
                content_start,
                options.pad,
            );
            descriptor.script = Some(SfcScriptBlock {
                content,
                loc,
                lang: open.attrs.get("lang").cloned(),
                attrs: open.attrs,
            });
            pos = end_pos;
        } else if open.self_closing {
            pos = open.end;
        } else if tag_name_eq(open.name, TAG_TEMPLATE) {
            match find_template_end(bytes, open.end) {
                Some(end_pos) => pos = end_pos,
                // Unterminated; rescan its body as text
                None => pos += 1,
            }
        } else if tag_name_eq(open.name, TAG_STYLE) {
            match find_static_end(bytes, open.end, CLOSING_STYLE) {
                Some((_, end_pos)) => pos = end_pos,
                None => pos += 1,
            }
        } else {
            match find_dynamic_end(bytes, open.name, open.end) {
                Some(end_pos) => pos = end_pos,
                None => pos += 1,
            }
        }
    }

    Ok(descriptor)
}

/// Opening tag scanned out of the source.
struct OpenTag<'a> {
    /// Tag name as bytes
    name: &'a [u8],
    /// Attributes with borrowed strings
    attrs: FxHashMap<Cow<'a, str>, Cow<'a, str>>,
    /// Offset just past the closing '>'
    end: usize,
    /// Whether the tag closed itself (`<tag/>`)
    self_closing: bool,
}

/// Scan an opening tag at `start`, which must point at '<'.
///
/// Returns `None` when the bytes do not form an opening tag.
fn scan_open_tag<'a>(bytes: &[u8], source: &'a str, start: usize) -> Option<OpenTag<'a>> {
    let len = bytes.len();
    let mut pos = start + 1;

    let tag_start = pos;
    while pos < len && is_tag_name_char(bytes[pos]) {
        pos += 1;
    }
    if pos == tag_start {
        return None;
    }
    let name = &source.as_bytes()[tag_start..pos];

    // Parse attributes with zero-copy values
    let mut attrs: FxHashMap<Cow<'a, str>, Cow<'a, str>> = FxHashMap::default();

    while pos < len && bytes[pos] != b'>' {
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= len || bytes[pos] == b'>' {
            break;
        }
        if bytes[pos] == b'/' {
            pos += 1;
            continue;
        }

        // Attribute name
        let attr_start = pos;
        while pos < len
            && !matches!(bytes[pos], b'=' | b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        {
            pos += 1;
        }
        if pos == attr_start {
            pos += 1;
            continue;
        }
        let attr_name: Cow<'a, str> = Cow::Borrowed(&source[attr_start..pos]);

        while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
            pos += 1;
        }

        let attr_value: Cow<'a, str> = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
                pos += 1;
            }
            if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let value_start = pos;
                match memchr(quote, &bytes[pos..]) {
                    Some(quote_offset) => {
                        pos += quote_offset;
                        let value = Cow::Borrowed(&source[value_start..pos]);
                        pos += 1; // Skip closing quote
                        value
                    }
                    None => {
                        pos = len;
                        Cow::Borrowed(&source[value_start..pos])
                    }
                }
            } else {
                // Unquoted value
                let value_start = pos;
                while pos < len && !matches!(bytes[pos], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
                {
                    pos += 1;
                }
                Cow::Borrowed(&source[value_start..pos])
            }
        } else {
            // Boolean attribute
            Cow::Borrowed("")
        };

        attrs.insert(attr_name, attr_value);
    }

    if pos >= len {
        return None;
    }

    let self_closing = bytes[pos - 1] == b'/';
    Some(OpenTag {
        name,
        attrs,
        end: pos + 1,
        self_closing,
    })
}

/// Find a statically-known closing tag, returning (content end, offset
/// past the closing tag).
fn find_static_end(bytes: &[u8], from: usize, closing: &[u8]) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < bytes.len() {
        let lt = memchr(b'<', &bytes[pos..])?;
        pos += lt;
        if starts_with_bytes(&bytes[pos..], closing) {
            return Some((pos, pos + closing.len()));
        }
        pos += 1;
    }
    None
}

/// Skip a `<template>` body, tracking nested template tags by depth.
///
/// Returns the offset just past the matching closing tag.
fn find_template_end(bytes: &[u8], from: usize) -> Option<usize> {
    let len = bytes.len();
    let mut depth = 1usize;
    let mut pos = from;

    while pos < len {
        let lt = memchr(b'<', &bytes[pos..])?;
        pos += lt;

        if starts_with_bytes(&bytes[pos..], CLOSING_TEMPLATE) {
            depth -= 1;
            pos += CLOSING_TEMPLATE.len();
            if depth == 0 {
                return Some(pos);
            }
            continue;
        }

        if starts_with_bytes(&bytes[pos + 1..], TAG_TEMPLATE) {
            let after_name = pos + 1 + TAG_TEMPLATE.len();
            if after_name < len
                && matches!(bytes[after_name], b' ' | b'\t' | b'\r' | b'\n' | b'>')
                && !nested_tag_self_closes(bytes, after_name)
            {
                depth += 1;
            }
        }
        pos += 1;
    }
    None
}

/// Whether the tag whose attribute region begins at `from` closes itself.
fn nested_tag_self_closes(bytes: &[u8], from: usize) -> bool {
    let mut pos = from;
    while pos < bytes.len() && bytes[pos] != b'>' {
        if bytes[pos] == b'/' && pos + 1 < bytes.len() && bytes[pos + 1] == b'>' {
            return true;
        }
        pos += 1;
    }
    false
}

/// Find the closing tag of a custom block by name, returning the offset
/// just past it.
fn find_dynamic_end(bytes: &[u8], name: &[u8], from: usize) -> Option<usize> {
    let len = bytes.len();
    let mut pos = from;
    while pos < len {
        let lt = memchr(b'<', &bytes[pos..])?;
        pos += lt;
        if pos + 1 < len && bytes[pos + 1] == b'/' {
            let name_start = pos + 2;
            let name_end = name_start + name.len();
            if name_end < len
                && bytes[name_start..name_end].eq_ignore_ascii_case(name)
                && bytes[name_end] == b'>'
            {
                return Some(name_end + 1);
            }
        }
        pos += 1;
    }
    None
}

/// Apply the configured padding so extracted content maps back to its
/// position in the container.
fn pad_content<'a>(
    source: &'a str,
    content: Cow<'a, str>,
    content_start: usize,
    pad: PadOption,
) -> Cow<'a, str> {
    match pad {
        PadOption::None => content,
        PadOption::Line => {
            let lines = memchr_iter(b'\n', &source.as_bytes()[..content_start]).count();
            if lines == 0 {
                return content;
            }
            let mut padded = String::with_capacity(lines + content.len());
            for _ in 0..lines {
                padded.push('\n');
            }
            padded.push_str(&content);
            Cow::Owned(padded)
        }
        PadOption::Space => {
            let mut padded = String::with_capacity(content_start + content.len());
            for &b in &source.as_bytes()[..content_start] {
                padded.push(match b {
                    b'\n' => '\n',
                    b'\r' => '\r',
                    _ => ' ',
                });
            }
            padded.push_str(&content);
            Cow::Owned(padded)
        }
    }
}

fn block_location(bytes: &[u8], start: usize, end: usize) -> BlockLocation {
    let (start_line, start_column) = line_col_at(bytes, start);
    let (end_line, end_column) = line_col_at(bytes, end);
    BlockLocation {
        start,
        end,
        start_line,
        start_column,
        end_line,
        end_column,
    }
}

/// 1-based line and column of a byte offset.
fn line_col_at(bytes: &[u8], offset: usize) -> (usize, usize) {
    let mut line = 1usize;
    let mut line_start = 0usize;
    for nl in memchr_iter(b'\n', &bytes[..offset]) {
        line += 1;
        line_start = nl + 1;
    }
    (line, offset - line_start + 1)
}

/// Fast tag name comparison using byte slices
#[inline(always)]
fn tag_name_eq(name: &[u8], expected: &[u8]) -> bool {
    name.len() == expected.len() && name.eq_ignore_ascii_case(expected)
}

/// Fast byte slice prefix check
#[inline(always)]
fn starts_with_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

/// Fast tag name character check
#[inline(always)]
fn is_tag_name_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_')
}

/// Fast whitespace check
#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
