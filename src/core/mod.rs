//! Core XML scanning primitives
//!
//! This module contains the fundamental building blocks for XML scanning:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Parser: single-pass engine driving an event trie
//! - Entities: XML entity decoding with Cow (zero-copy when possible)
//! - Unicode: XML 1.0 name and whitespace character tables

pub mod entities;
pub mod parser;
pub mod scanner;
pub mod unicode;
