//! xmlscan - Single-pass XML scanning with path-indexed event dispatch
//!
//! The scanner walks an in-memory document once and calls the handlers
//! registered on an [`EventTrie`]. No tree is built: only the elements and
//! attributes with registered handlers cost more than a skip.
//!
//! ```
//! use xmlscan::{scan, EventTrie};
//!
//! let mut trie: EventTrie<Vec<String>> = EventTrie::new();
//! let name = trie.add_element(trie.root(), "company/employee/name");
//! trie[name].on_text(|names, text| {
//!     names.push(text.to_owned());
//!     Ok(())
//! });
//!
//! let mut names = Vec::new();
//! scan(
//!     "<company><employee><name>Ann &amp; Bo</name></employee></company>",
//!     &trie,
//!     &mut names,
//! )?;
//! assert_eq!(names, ["Ann & Bo"]);
//! # Ok::<(), xmlscan::ScanError>(())
//! ```
//!
//! Modules:
//! - `core`: character tables, entity decoding, the scanning engine
//! - `events`: the dispatch trie and its builder
//! - `analyser`: path discovery for unknown documents

mod analyser;
mod core;
mod error;
mod events;

pub use analyser::{analyse, analyse_all};
pub use crate::core::entities::decode;
pub use crate::core::parser::scan;
pub use crate::core::unicode::{is_name_continue, is_name_start, is_whitespace};
pub use error::{ErrorKind, HandlerError, HandlerResult, ParsingError, ScanError};
pub use events::node::{
    AllAttributesHandler, AttributeHandler, ProcessingInstructionHandler, TagHandler, TextHandler,
    XmlDeclarationHandler,
};
pub use events::{parse_element_path, DispatchNode, EventTrie, NodeId};
