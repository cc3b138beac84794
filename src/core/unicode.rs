//! XML 1.0 character classes
//!
//! Three 64Kbit lookup tables cover the Basic Multilingual Plane:
//! - name start characters
//! - name characters (continuation)
//! - whitespace (space, tab, LF, CR)
//!
//! Tables are built once from inclusive code point ranges and are read-only
//! afterwards. Characters above the BMP are classified by range directly.

use std::sync::LazyLock;

const WORDS: usize = 0x10000 >> 5;

/// A bit per BMP code point
pub struct CharBits([u32; WORDS]);

impl CharBits {
    fn from_ranges(ranges: &[(u32, u32)]) -> Self {
        let mut bits = [0u32; WORDS];
        for &(low, high) in ranges {
            for cp in low..=high {
                bits[(cp >> 5) as usize] |= 1 << (cp & 31);
            }
        }
        CharBits(bits)
    }

    /// Test a BMP code point. Anything above the BMP is reported as unset.
    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        cp < 0x10000 && self.0[(cp >> 5) as usize] & (1 << (cp & 31)) != 0
    }
}

// NameStartChar ::= ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] |
//   [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] |
//   [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] |
//   [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
// The surrogate block 0xD800..=0xDFFF is marked too, standing in for the
// supplementary range in UTF-16 terms.
const NAME_START: &[(u32, u32)] = &[
    (':' as u32, ':' as u32),
    ('A' as u32, 'Z' as u32),
    ('_' as u32, '_' as u32),
    ('a' as u32, 'z' as u32),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0x2FF),
    (0x370, 0x37D),
    (0x37F, 0x1FFF),
    (0x200C, 0x200D),
    (0x2070, 0x218F),
    (0x2C00, 0x2FEF),
    (0x3001, 0xDFFF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
];

// NameChar ::= NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] |
//   [#x203F-#x2040]
const NAME_CONTINUE: &[(u32, u32)] = &[
    (':' as u32, ':' as u32),
    ('A' as u32, 'Z' as u32),
    ('_' as u32, '_' as u32),
    ('a' as u32, 'z' as u32),
    ('-' as u32, '-' as u32),
    ('.' as u32, '.' as u32),
    ('0' as u32, '9' as u32),
    (0xB7, 0xB7),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0x37D),
    (0x37F, 0x1FFF),
    (0x200C, 0x200D),
    (0x203F, 0x2040),
    (0x2070, 0x218F),
    (0x2C00, 0x2FEF),
    (0x3001, 0xDFFF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
];

const WHITESPACE: &[(u32, u32)] = &[(0x20, 0x20), (0x09, 0x09), (0x0A, 0x0A), (0x0D, 0x0D)];

static NAME_START_BITS: LazyLock<CharBits> = LazyLock::new(|| CharBits::from_ranges(NAME_START));
static NAME_CONTINUE_BITS: LazyLock<CharBits> =
    LazyLock::new(|| CharBits::from_ranges(NAME_CONTINUE));
static WHITESPACE_BITS: LazyLock<CharBits> = LazyLock::new(|| CharBits::from_ranges(WHITESPACE));

#[inline]
fn is_supplementary_name_char(cp: u32) -> bool {
    (0x10000..=0xEFFFF).contains(&cp)
}

/// Check if a code point can start an element or attribute name
#[inline]
pub fn is_name_start(cp: u32) -> bool {
    NAME_START_BITS.contains(cp) || is_supplementary_name_char(cp)
}

/// Check if a code point can continue an element or attribute name
#[inline]
pub fn is_name_continue(cp: u32) -> bool {
    NAME_CONTINUE_BITS.contains(cp) || is_supplementary_name_char(cp)
}

/// Check if a code point is XML whitespace
#[inline]
pub fn is_whitespace(cp: u32) -> bool {
    WHITESPACE_BITS.contains(cp)
}

/// Whitespace test for a single input byte.
///
/// All XML whitespace is ASCII, so a UTF-8 lead or continuation byte is never
/// whitespace.
#[inline]
pub fn is_whitespace_byte(b: u8) -> bool {
    is_whitespace(b as u32)
}
