use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::cell::RefCell;

use quickcheck::QuickCheck;

use super::arbitrary::{AnyDelimiters, TemplateText};
use crate::{Segment, TokenParser};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Straightforward re-statement of the substitution rules on `&str`, used as
/// an oracle for the segment-based implementation.
fn reference_render(text: &str, open: &str, close: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::new();
    let mut offset = 0;
    while let Some(found) = text[offset..].find(open) {
        let start = offset + found;
        if start > offset && text[..start].ends_with('\\') {
            out.push_str(&text[offset..start - 1]);
            out.push_str(open);
            offset = start + open.len();
            continue;
        }
        out.push_str(&text[offset..start]);

        let mut expression = String::new();
        let mut cursor = start + open.len();
        let mut closed_at = None;
        while let Some(found) = text[cursor..].find(close) {
            let end = cursor + found;
            if end > cursor && text[..end].ends_with('\\') {
                expression.push_str(&text[cursor..end - 1]);
                expression.push_str(close);
                cursor = end + close.len();
            } else {
                expression.push_str(&text[cursor..end]);
                closed_at = Some(end + close.len());
                break;
            }
        }

        if let Some(after) = closed_at {
            out.push_str(&f(&expression));
            offset = after;
        } else {
            out.push_str(&text[start..]);
            offset = text.len();
        }
    }
    out.push_str(&text[offset..]);
    out
}

/// Property: text without an open token comes back unchanged.
#[test]
fn passthrough_without_open_token() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: TemplateText, delims: AnyDelimiters) -> bool {
        let open = delims.0.open().to_string();
        let mut text = text.0;
        while text.contains(open.as_str()) {
            text = text.replace(open.as_str(), "");
        }
        let parser = TokenParser::new(delims.0, |x: &str| format!("<<{x}>>"));
        parser.render(text.as_str()) == text
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(TemplateText, AnyDelimiters) -> bool);
}

/// Property: re-wrapping every expression in its delimiters reproduces input
/// that contains no escape markers.
#[test]
fn wrapping_handler_roundtrips() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: TemplateText, delims: AnyDelimiters) -> bool {
        let text = text.0.replace('\\', "");
        let wrap = delims.0.clone();
        let parser = TokenParser::new(delims.0, move |x: &str| wrap.wrap(x));
        parser.render(text.as_str()) == text
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(TemplateText, AnyDelimiters) -> bool);
}

/// Property: segment sources partition the input, byte for byte.
#[test]
fn segment_sources_partition_input() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: TemplateText, delims: AnyDelimiters) -> bool {
        let parser = TokenParser::new(delims.0, |x: &str| x.to_string());
        let segments: Vec<Segment<'_>> = parser.segments(&text.0).collect();
        let joined: String = segments.iter().map(Segment::source).collect();
        let no_empty_literals = segments
            .iter()
            .all(|s| !matches!(s, Segment::Literal(l) if l.is_empty()));
        joined == text.0 && no_empty_literals
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(TemplateText, AnyDelimiters) -> bool);
}

/// Property: output agrees with the reference rules, and the handler sees
/// exactly the expressions the scanner reports, in order.
#[test]
fn agrees_with_reference() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: TemplateText, delims: AnyDelimiters) -> bool {
        let calls = RefCell::new(Vec::new());
        let open = delims.0.open().to_string();
        let close = delims.0.close().to_string();
        let parser = TokenParser::new(delims.0, |x: &str| {
            calls.borrow_mut().push(x.to_string());
            format!("[{}]", x.len())
        });

        let expected = reference_render(&text.0, &open, &close, |x| format!("[{}]", x.len()));
        let rendered = parser.render(text.0.as_str());
        let expressions: Vec<String> = parser.expressions(&text.0).map(Into::into).collect();

        rendered == expected && *calls.borrow() == expressions
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(TemplateText, AnyDelimiters) -> bool);
}
