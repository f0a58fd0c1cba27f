#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tokensub::{Delimiters, Segment, TokenParser};

#[derive(Debug, Arbitrary)]
struct Input {
    open: String,
    close: String,
    text: String,
}

fn scanner(input: &Input) {
    let Ok(delimiters) = Delimiters::new(input.open.clone(), input.close.clone()) else {
        return;
    };
    let text = input.text.as_str();

    let calls = std::cell::Cell::new(0usize);
    let parser = TokenParser::new(delimiters.clone(), |x: &str| {
        calls.set(calls.get() + 1);
        delimiters.wrap(x)
    });

    // Every byte is classified exactly once.
    let segments: Vec<Segment<'_>> = parser.segments(text).collect();
    let joined: String = segments.iter().map(Segment::source).collect();
    assert_eq!(joined, text);

    // The handler sees exactly the scanned expressions.
    let expressions = segments
        .iter()
        .filter(|s| matches!(s, Segment::Expression { .. }))
        .count();
    let rendered = parser.render(text);
    assert_eq!(calls.get(), expressions);

    // Without escape markers, re-wrapping expressions reproduces the input.
    if !text.contains('\\') && !input.open.contains('\\') && !input.close.contains('\\') {
        assert_eq!(rendered, text);
    }

    // Text without an open token passes through.
    if !text.contains(input.open.as_str()) {
        assert_eq!(rendered, text);
    }
}

fuzz_target!(|input: Input| scanner(&input));
