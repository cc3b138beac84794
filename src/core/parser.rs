//! Single-pass XML scanner
//!
//! Walks the document once, left to right, and dispatches every recognised
//! construct to the active node of an [`EventTrie`]:
//!
//! ```text
//! document ::= xmldecl? misc* element misc*
//! misc     ::= whitespace | comment | processing instruction
//! ```
//!
//! The first violation aborts the scan with a [`ParsingError`]. Events fired
//! before that point are not rolled back. A handler returning `Err` aborts the
//! scan the same way.

use super::entities::decode;
use super::scanner::Scanner;
use super::unicode::is_whitespace_byte;
use crate::error::{ErrorKind, ParsingError, ScanError};
use crate::events::{DispatchNode, EventTrie};

#[inline]
fn fail<T>(kind: ErrorKind, position: usize) -> Result<T, ScanError> {
    Err(ScanError::Parse(ParsingError::new(kind, position)))
}

/// Scan `xml`, dispatching events through `trie` with `ctx` as handler state.
///
/// Returns once the root element and any trailing misc have been consumed.
#[tracing::instrument(level = "debug", skip_all, fields(len = xml.len()))]
pub fn scan<C>(xml: &str, trie: &EventTrie<C>, ctx: &mut C) -> Result<(), ScanError> {
    let mut parser = Parser {
        scanner: Scanner::new(xml),
        trie,
    };
    parser.parse_document(ctx).inspect_err(|e| match e {
        ScanError::Parse(p) => {
            tracing::debug!(kind = p.kind.code(), position = p.position, "scan failed");
        }
        ScanError::Handler(h) => tracing::debug!(error = %h, "scan aborted by handler"),
    })
}

struct Parser<'a, 't, C> {
    scanner: Scanner<'a>,
    trie: &'t EventTrie<C>,
}

enum StartTag<'a, 't, C> {
    /// `<name/>`, offset after it
    Empty(usize),
    /// `<name>`, content follows
    Open {
        name: &'a str,
        node: &'t DispatchNode<C>,
        content_start: usize,
    },
}

impl<'a, 't, C> Parser<'a, 't, C> {
    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.scanner.input().as_bytes().get(pos).copied()
    }

    fn parse_document(&mut self, ctx: &mut C) -> Result<(), ScanError> {
        let trie = self.trie;
        let root = trie.node(trie.root());
        let len = self.scanner.input().len();
        let mut index = 0;
        let mut root_seen = false;

        loop {
            let Some(lt) = self.scanner.find_byte(b'<', index) else {
                if let Some(pos) = self.scanner.find_non_whitespace(index, len) {
                    return fail(ErrorKind::UnexpectedToken, pos);
                }
                if root_seen {
                    return Ok(());
                }
                return fail(ErrorKind::NoRootElementFound, len);
            };

            if let Some(pos) = self.scanner.find_non_whitespace(index, lt) {
                return fail(ErrorKind::UnexpectedToken, pos);
            }

            index = match self.byte_at(lt + 1) {
                Some(b'?') => self.parse_pi_or_declaration(lt, root, ctx)?,
                Some(b'!') => self.parse_comment_doctype_cdata(lt, root, ctx, false)?,
                _ => {
                    if root_seen {
                        return fail(ErrorKind::MultipleRootElements, lt);
                    }
                    root_seen = true;
                    self.parse_element(lt, root, ctx)?
                }
            };
        }
    }

    /// `<?` at `start` is already validated. Returns the offset after `?>`.
    fn parse_pi_or_declaration(
        &mut self,
        start: usize,
        node: &DispatchNode<C>,
        ctx: &mut C,
    ) -> Result<usize, ScanError> {
        let Some(pi_end) = self.scanner.find_seq(b"?>", start + 2) else {
            return fail(ErrorKind::ProcessingInstructionNotClosed, start);
        };

        let mut target_end = start + 2;
        while target_end < pi_end && !self.byte_at(target_end).is_some_and(is_whitespace_byte) {
            target_end += 1;
        }
        let target = self.scanner.slice(start + 2, target_end);
        let body = self.scanner.slice(target_end, pi_end);

        if target.eq_ignore_ascii_case("xml") {
            // Only one declaration can sit at offset 0
            if start != 0 {
                return fail(ErrorKind::XmlDeclarationMustBeFirstToken, start);
            }
            if let Some(handler) = &node.xml_declaration {
                let decl = XmlDeclaration::parse(body);
                handler(ctx, decl.version, decl.encoding, decl.standalone)?;
            }
        } else if let Some(handler) = &node.processing_instruction {
            handler(ctx, target, body.trim())?;
        }

        Ok(pi_end + 2)
    }

    /// `<` at `start` is already validated. Scans the whole element and its
    /// descendants and returns the offset after its end tag.
    ///
    /// Open elements live on an explicit stack, so nesting depth is bounded by
    /// memory rather than by the thread's stack.
    fn parse_element(
        &mut self,
        start: usize,
        parent: &'t DispatchNode<C>,
        ctx: &mut C,
    ) -> Result<usize, ScanError> {
        let mut open: Vec<(&'a str, &'t DispatchNode<C>)> = Vec::new();
        let mut content_start = match self.parse_start_tag(start, parent, ctx)? {
            StartTag::Empty(end) => return Ok(end),
            StartTag::Open { name, node, content_start } => {
                open.push((name, node));
                content_start
            }
        };

        while let Some(&(name, node)) = open.last() {
            let Some(lt) = self.scanner.find_byte(b'<', content_start) else {
                return fail(ErrorKind::NoEndtagFound, content_start);
            };

            if lt > content_start {
                if let Some(handler) = &node.text {
                    handler(ctx, &decode(self.scanner.slice(content_start, lt)))?;
                }
            }

            content_start = match self.byte_at(lt + 1) {
                Some(b'/') => {
                    // </name S? >
                    if !self.scanner.has_at(lt + 2, name.as_bytes()) {
                        return fail(ErrorKind::MismatchedTag, lt);
                    }
                    self.scanner.set_position(lt + 2 + name.len());
                    self.scanner.skip_whitespace();
                    if self.scanner.peek() != Some(b'>') {
                        return fail(ErrorKind::MismatchedTag, lt);
                    }
                    if let Some(handler) = &node.tag_close {
                        handler(ctx, name)?;
                    }
                    open.pop();
                    self.scanner.position() + 1
                }
                Some(b'?') => self.parse_pi_or_declaration(lt, node, ctx)?,
                Some(b'!') => self.parse_comment_doctype_cdata(lt, node, ctx, true)?,
                _ => match self.parse_start_tag(lt, node, ctx)? {
                    StartTag::Empty(end) => end,
                    StartTag::Open { name, node, content_start } => {
                        open.push((name, node));
                        content_start
                    }
                },
            };
        }

        Ok(content_start)
    }

    /// Name and attributes of the element whose `<` is at `start`. Fires
    /// tag open, the attribute handlers, and tag close for `/>`.
    fn parse_start_tag(
        &mut self,
        start: usize,
        parent: &'t DispatchNode<C>,
        ctx: &mut C,
    ) -> Result<StartTag<'a, 't, C>, ScanError> {
        self.scanner.set_position(start + 1);
        let Some(name) = self.scanner.read_name() else {
            return fail(ErrorKind::InvalidElementName, start);
        };

        let trie = self.trie;
        let node = trie.resolve_child(parent, name);
        if let Some(handler) = &node.tag_open {
            handler(ctx, name)?;
        }

        loop {
            self.scanner.skip_whitespace();
            match (self.scanner.peek(), self.scanner.peek_at(1)) {
                (Some(b'>'), _) => {
                    return Ok(StartTag::Open {
                        name,
                        node,
                        content_start: self.scanner.position() + 1,
                    });
                }
                (Some(b'/'), Some(b'>')) => {
                    if let Some(handler) = &node.tag_close {
                        handler(ctx, name)?;
                    }
                    return Ok(StartTag::Empty(self.scanner.position() + 2));
                }
                _ => {}
            }

            let Some(attr_name) = self.scanner.read_name() else {
                return fail(ErrorKind::InvalidAttributeName, start);
            };
            let eq = self.scanner.position();
            if self.scanner.peek() != Some(b'=') {
                return fail(ErrorKind::UnexpectedToken, eq);
            }
            let quote = match self.byte_at(eq + 1) {
                Some(q @ (b'"' | b'\'')) => q,
                _ => return fail(ErrorKind::UnexpectedToken, eq + 1),
            };
            let value_start = eq + 2;
            let Some(value_end) = self.scanner.find_byte(quote, value_start) else {
                return fail(ErrorKind::AttributeValueNotClosed, value_start);
            };

            // Values nobody listens for are never decoded
            if node.wants_attribute(attr_name) {
                let raw = self.scanner.slice(value_start, value_end);
                if let Some(handler) = &node.all_attributes {
                    handler(ctx, attr_name, raw)?;
                }
                if let Some(handler) = node.attributes.get(attr_name) {
                    handler(ctx, &decode(raw))?;
                }
            }

            self.scanner.set_position(value_end + 1);
        }
    }

    /// `<!` at `start` is already validated. CDATA is only legal inside an
    /// element.
    fn parse_comment_doctype_cdata(
        &mut self,
        start: usize,
        node: &DispatchNode<C>,
        ctx: &mut C,
        allow_cdata: bool,
    ) -> Result<usize, ScanError> {
        if self.scanner.has_at(start + 2, b"--") {
            let Some(end) = self.scanner.find_seq(b"-->", start + 4) else {
                return fail(ErrorKind::CommentNotClosed, start);
            };
            if let Some(handler) = &node.comment {
                handler(ctx, self.scanner.slice(start + 4, end).trim())?;
            }
            return Ok(end + 3);
        }

        if self.scanner.has_at(start + 2, b"DOCTYPE") {
            return fail(ErrorKind::DoctypeNotSupported, start);
        }

        if allow_cdata && self.scanner.has_at(start + 2, b"[CDATA[") {
            let Some(end) = self.scanner.find_seq(b"]]>", start + 9) else {
                return fail(ErrorKind::CdataNotClosed, start);
            };
            if let Some(handler) = &node.cdata {
                handler(ctx, self.scanner.slice(start + 9, end))?;
            }
            return Ok(end + 3);
        }

        fail(ErrorKind::UnexpectedToken, start)
    }
}

/// Pseudo-attributes of `<?xml ...?>`, each unquoted, empty when absent
#[derive(Debug, Default, PartialEq, Eq)]
struct XmlDeclaration<'a> {
    version: &'a str,
    encoding: &'a str,
    standalone: &'a str,
}

impl<'a> XmlDeclaration<'a> {
    /// Lenient: split on whitespace, then on `=`; no further validation.
    fn parse(body: &'a str) -> Self {
        let mut decl = XmlDeclaration::default();
        let parts = body
            .split(|c: char| c.is_ascii() && is_whitespace_byte(c as u8))
            .filter(|part| !part.is_empty());

        for part in parts {
            let mut pieces = part.split('=');
            let key = pieces.next().unwrap_or_default();
            let value = unquote(pieces.next().unwrap_or_default());
            match key {
                "version" => decl.version = value,
                "encoding" => decl.encoding = value,
                "standalone" => decl.standalone = value,
                _ => {}
            }
        }
        decl
    }
}

/// Strip one matching pair of surrounding `"` or `'`
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
