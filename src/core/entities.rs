//! XML Entity Decoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B; &#X7B;
//!
//! Uses Cow for zero-copy when no entities are present.
//!
//! Decoding stops at the first `&` that has no `;` after it: the rest of the
//! input from the end of the previous entity is copied through untouched, even
//! if it holds further well-formed entities. An input whose first `&` is
//! unterminated comes back unchanged.

use memchr::memchr;
use std::borrow::Cow;

const ENTITY_START: u8 = b'&';
const ENTITY_END: u8 = b';';

/// Find `byte` in `input` at or after `from`
#[inline]
fn find_from(input: &str, byte: u8, from: usize) -> Option<usize> {
    memchr(byte, input.as_bytes().get(from..)?).map(|i| from + i)
}

/// Decode entity references in text content or an attribute value
///
/// Returns Borrowed if nothing was decoded (zero-copy),
/// returns Owned otherwise.
#[inline]
pub fn decode(input: &str) -> Cow<'_, str> {
    // Fast path: no entities at all
    let Some(start) = find_from(input, ENTITY_START, 0) else {
        return Cow::Borrowed(input);
    };
    let Some(end) = find_from(input, ENTITY_END, start + 1) else {
        return Cow::Borrowed(input);
    };
    Cow::Owned(decode_from(input, start, end))
}

/// Process all entities. There is at least one `&`/`;` pair.
fn decode_from(input: &str, mut start: usize, mut end: usize) -> String {
    let mut result = String::with_capacity(input.len());
    result.push_str(&input[..start]);

    loop {
        match decode_entity(&input[start + 1..end]) {
            Some(decoded) => result.push(decoded),
            None => result.push_str(&input[start..=end]),
        }

        let Some(next_start) = find_from(input, ENTITY_START, end + 1) else {
            result.push_str(&input[end + 1..]);
            break;
        };
        let Some(next_end) = find_from(input, ENTITY_END, next_start + 1) else {
            // Unterminated: keep everything after the previous entity verbatim
            result.push_str(&input[end + 1..]);
            break;
        };

        result.push_str(&input[end + 1..next_start]);
        start = next_start;
        end = next_end;
    }

    result
}

/// Decode a single entity body (without & and ;)
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        _ => entity.strip_prefix('#').and_then(decode_numeric_entity),
    }
}

/// Decode a numeric character reference body (after the #)
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = match entity.as_bytes().first()? {
        b'x' | b'X' => parse_digits(&entity[1..], 16)?,
        _ => parse_digits(entity, 10)?,
    };
    char::from_u32(codepoint)
}

fn parse_digits(digits: &str, radix: u32) -> Option<u32> {
    // from_str_radix accepts a leading sign, character references don't
    if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
