//! SIMD-accelerated delimiter search over the document text
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! All positions are byte offsets into the input `&str`. Every delimiter the
//! parser searches for is ASCII, so found positions always sit on a `char`
//! boundary.

use super::unicode::{is_name_continue, is_name_start, is_whitespace_byte};
use memchr::{memchr, memmem};

/// Cursor over an in-memory XML document
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// The whole input
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Check if input has `needle` at `pos`
    #[inline]
    pub fn has_at(&self, pos: usize, needle: &[u8]) -> bool {
        self.input
            .as_bytes()
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(needle))
    }

    /// Skip XML whitespace characters
    #[inline]
    pub fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && is_whitespace_byte(bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// Find the first non-whitespace byte in `start..end`
    pub fn find_non_whitespace(&self, start: usize, end: usize) -> Option<usize> {
        self.input.as_bytes()[start..end]
            .iter()
            .position(|&b| !is_whitespace_byte(b))
            .map(|i| start + i)
    }

    /// Find next occurrence of a byte at or after `from`
    #[inline]
    pub fn find_byte(&self, byte: u8, from: usize) -> Option<usize> {
        let rest = self.input.as_bytes().get(from..)?;
        memchr(byte, rest).map(|i| from + i)
    }

    /// Find next occurrence of a byte sequence at or after `from`
    #[inline]
    pub fn find_seq(&self, needle: &[u8], from: usize) -> Option<usize> {
        let rest = self.input.as_bytes().get(from..)?;
        memmem::find(rest, needle).map(|i| from + i)
    }

    /// Read an XML name: one name start char, then zero or more name chars.
    ///
    /// Returns None without moving if the current char cannot start a name.
    pub fn read_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let rest = self.input.get(start..)?;
        let mut chars = rest.char_indices();

        let (_, first) = chars.next()?;
        if !is_name_start(first as u32) {
            return None;
        }

        let len = chars
            .find(|&(_, c)| !is_name_continue(c as u32))
            .map_or(rest.len(), |(i, _)| i);
        self.pos = start + len;
        Some(&self.input[start..self.pos])
    }
}
