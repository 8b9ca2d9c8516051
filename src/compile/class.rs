//! Character-class construction.

use super::escape::decode_one;
use crate::peg::ParsingExpression;

/// Build the expression for the body of a `[...]` class token.
///
/// `a-z` pairs become ranges, everything else a single character. An empty
/// class never matches, and a class of exactly one character is the same
/// as that literal. A `-` with nothing after it is a plain character.
pub fn build_class(token: &str) -> ParsingExpression {
    let mut chars = String::new();
    let mut ranges = String::new();
    let mut single_count = 0usize;

    let mut rest = token;
    while !rest.is_empty() {
        let (low, next) = decode_one(rest);
        rest = next;
        if rest.len() > 1 && rest.starts_with('-') {
            let (high, next) = decode_one(&rest[1..]);
            rest = next;
            // a range with a dropped bound is discarded
            if let (Some(low), Some(high)) = (low, high) {
                ranges.push(low);
                ranges.push(high);
            }
        } else if let Some(c) = low {
            chars.push(c);
            single_count += 1;
        }
    }

    match (single_count, ranges.is_empty()) {
        (0, true) => ParsingExpression::Fail,
        (1, true) => ParsingExpression::Char(chars.into()),
        _ => ParsingExpression::Range {
            chars: chars.into(),
            ranges: ranges.into(),
        },
    }
}
