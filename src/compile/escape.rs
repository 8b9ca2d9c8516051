//! Escape-sequence decoding for literal and class tokens.

/// Decode the first logical character of `text`.
///
/// Returns the decoded character and the unconsumed remainder. The character
/// is `None` when a unicode escape names a code point that is not a valid
/// `char` (a surrogate); such escapes are consumed and dropped. Decoding never
/// fails: an escape that cannot be read as a control, hex, or unicode escape
/// stands for the escaped character itself.
pub fn decode_one(text: &str) -> (Option<char>, &str) {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return (None, text);
    };
    if first != '\\' {
        return (Some(first), chars.as_str());
    }

    let escaped = chars.as_str();
    let mut chars = escaped.chars();
    let Some(kind) = chars.next() else {
        // lone trailing backslash
        return (Some('\\'), escaped);
    };
    let rest = chars.as_str();

    let control = match kind {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'v' => Some('\u{0B}'),
        'f' => Some('\u{0C}'),
        'b' => Some('\u{08}'),
        _ => None,
    };
    if let Some(c) = control {
        return (Some(c), rest);
    }

    let digits = match kind {
        'x' | 'X' => 2,
        'u' | 'U' => 4,
        _ => 0,
    };
    if digits > 0 {
        if let Some((code, rest)) = take_hex(rest, digits) {
            return (char::from_u32(code), rest);
        }
    }

    (Some(kind), rest)
}

/// Decode every character of `text`, dropping unrepresentable escapes.
pub fn decode_all(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let (c, next) = decode_one(rest);
        decoded.extend(c);
        rest = next;
    }
    decoded
}

/// Read exactly `digits` ASCII hex digits from the front of `text`.
fn take_hex(text: &str, digits: usize) -> Option<(u32, &str)> {
    let hex = text.get(..digits)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    Some((code, &text[digits..]))
}
