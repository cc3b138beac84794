//! Structural analysis
//!
//! Reports every distinct path seen in a document so a targeted trie can be
//! written for it. Markers look like:
//! - `/company/employee`: element path
//! - `/company/employee#content`: non-blank text inside that element
//! - `/company/employee#cdata`, `#comment`, `#pi`: other content
//! - `/company/employee@id`: attribute
//!
//! Markers at document level have an empty path (`#comment`, `#pi`). If
//! `/company/employee/name#content` shows up, registering a text handler on
//! `company/employee/name` will receive it.
//!
//! The analyser runs on a single node that is its own unknown-element
//! fallback, so it follows documents of any depth.

use crate::core::parser::scan;
use crate::error::ScanError;
use crate::events::EventTrie;
use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-document analysis state
#[derive(Debug)]
struct Analysis {
    /// Open element paths; the bottom entry is the document itself
    path: Vec<String>,
    seen: BTreeSet<String>,
}

impl Analysis {
    fn new() -> Self {
        Analysis {
            path: vec![String::new()],
            seen: BTreeSet::new(),
        }
    }

    #[inline]
    fn current(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    fn mark(&mut self, suffix: &str) {
        let marker = format!("{}{}", self.current(), suffix);
        self.seen.insert(marker);
    }
}

fn analyser_trie() -> EventTrie<Analysis> {
    let mut trie = EventTrie::new();
    let root = trie.root();
    trie.root_mut()
        .on_tag_open(|a: &mut Analysis, name| {
            let path = format!("{}/{}", a.current(), name);
            a.seen.insert(path.clone());
            a.path.push(path);
            Ok(())
        })
        .on_tag_close(|a, _| {
            a.path.pop();
            Ok(())
        })
        .on_text(|a, text| {
            if !text.trim().is_empty() {
                a.mark("#content");
            }
            Ok(())
        })
        .on_cdata(|a, _| {
            a.mark("#cdata");
            Ok(())
        })
        .on_processing_instruction(|a, _, _| {
            a.mark("#pi");
            Ok(())
        })
        .on_comment(|a, _| {
            a.mark("#comment");
            Ok(())
        })
        .on_all_attributes(|a, name, _| {
            a.mark(&format!("@{name}"));
            Ok(())
        })
        .set_unknown_element(root);
    trie
}

fn analyse_with(trie: &EventTrie<Analysis>, xml: &str) -> Result<BTreeSet<String>, ScanError> {
    let mut analysis = Analysis::new();
    scan(xml, trie, &mut analysis)?;
    Ok(analysis.seen)
}

/// Sorted, duplicate-free list of every path, content and attribute marker
/// present in `xml`.
pub fn analyse(xml: &str) -> Result<Vec<String>, ScanError> {
    let seen = analyse_with(&analyser_trie(), xml)?;
    tracing::debug!(markers = seen.len(), "document analysed");
    Ok(seen.into_iter().collect())
}

/// Union of [`analyse`] over several documents.
///
/// Documents are scanned concurrently when the `parallel` feature is on. If
/// any document fails, the error of the first failing one (in input order)
/// is returned.
pub fn analyse_all<S: AsRef<str> + Sync>(docs: &[S]) -> Result<Vec<String>, ScanError> {
    let trie = analyser_trie();

    #[cfg(feature = "parallel")]
    let results: Vec<_> = docs
        .par_iter()
        .map(|xml| analyse_with(&trie, xml.as_ref()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = docs
        .iter()
        .map(|xml| analyse_with(&trie, xml.as_ref()))
        .collect();

    let mut all = BTreeSet::new();
    for seen in results {
        all.extend(seen?);
    }
    tracing::debug!(documents = docs.len(), markers = all.len(), "documents analysed");
    Ok(all.into_iter().collect())
}
