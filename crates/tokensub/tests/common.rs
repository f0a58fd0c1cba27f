#![allow(dead_code)]

use std::fmt::Write;

use tokensub::{Delimiters, Scanner, Segment};

/// A mapper-style statement exercising every segment kind.
pub const STATEMENT: &str = r"SELECT * FROM users WHERE id = #{id} AND note = '\#{raw}' AND tag = #{tag\}x}#{tail";

/// One line per segment, for snapshots.
pub fn describe_segments(delimiters: &Delimiters, text: &str) -> String {
    let mut out = String::new();
    for segment in Scanner::new(delimiters, text) {
        if !out.is_empty() {
            out.push('\n');
        }
        let written = match segment {
            Segment::Literal(s) => write!(out, "literal      {s:?}"),
            Segment::EscapedDelimiter { token, raw } => {
                write!(out, "escaped      {token:?} from {raw:?}")
            }
            Segment::Expression { expression, raw } => {
                write!(out, "expression   {:?} from {raw:?}", &*expression)
            }
            Segment::Unterminated(s) => write!(out, "unterminated {s:?}"),
        };
        written.unwrap();
    }
    out
}
