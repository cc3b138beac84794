//! Scan errors
//!
//! The engine never recovers: the first violation stops the scan and is
//! reported as an [`ErrorKind`] plus the byte offset where it was detected.

use thiserror::Error;

/// Error returned by a handler to stop the scan
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type of every handler
pub type HandlerResult = Result<(), HandlerError>;

/// Well-formedness violations detected by the scanner
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("Processing instruction or XML declaration not closed")]
    ProcessingInstructionNotClosed,
    #[error("XML declaration must be the first token in the document")]
    XmlDeclarationMustBeFirstToken,
    #[error("No root element found")]
    NoRootElementFound,
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Comment not closed")]
    CommentNotClosed,
    #[error("DOCTYPE is not supported (yet)")]
    DoctypeNotSupported,
    #[error("Multiple root elements found")]
    MultipleRootElements,
    /// Reserved; the scanner rejects every DOCTYPE before a second can appear.
    #[error("Multiple doctype found")]
    MultipleDoctypeFound,
    #[error("CDATA not closed")]
    CdataNotClosed,
    #[error("Invalid element name")]
    InvalidElementName,
    #[error("Invalid attribute name")]
    InvalidAttributeName,
    #[error("Attribute value not closed")]
    AttributeValueNotClosed,
    #[error("No end tag found")]
    NoEndtagFound,
    #[error("Mismatched tag")]
    MismatchedTag,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::ProcessingInstructionNotClosed => "PROCESSING_INSTRUCTION_NOT_CLOSED",
            ErrorKind::XmlDeclarationMustBeFirstToken => "XML_DECLARATION_MUST_BE_FIRST_TOKEN",
            ErrorKind::NoRootElementFound => "NO_ROOT_ELEMENT_FOUND",
            ErrorKind::UnexpectedToken => "UNEXPECTED_TOKEN",
            ErrorKind::CommentNotClosed => "COMMENT_NOT_CLOSED",
            ErrorKind::DoctypeNotSupported => "DOCTYPE_NOT_SUPPORTED",
            ErrorKind::MultipleRootElements => "MULTIPLE_ROOT_ELEMENTS",
            ErrorKind::MultipleDoctypeFound => "MULTIPLE_DOCTYPE_FOUND",
            ErrorKind::CdataNotClosed => "CDATA_NOT_CLOSED",
            ErrorKind::InvalidElementName => "INVALID_ELEMENT_NAME",
            ErrorKind::InvalidAttributeName => "INVALID_ATTRIBUTE_NAME",
            ErrorKind::AttributeValueNotClosed => "ATTRIBUTE_VALUE_NOT_CLOSED",
            ErrorKind::NoEndtagFound => "NO_ENDTAG_FOUND",
            ErrorKind::MismatchedTag => "MISMATCHED_TAG",
        }
    }
}

/// A violation and the byte offset where it was detected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {position}")]
pub struct ParsingError {
    pub kind: ErrorKind,
    /// Byte offset into the scanned text
    pub position: usize,
}

impl ParsingError {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        ParsingError { kind, position }
    }

    /// Translate the offset into a 1-based (line, column) pair.
    ///
    /// Columns count chars, not bytes. `xml` must be the scanned text.
    pub fn line_col(&self, xml: &str) -> (usize, usize) {
        let mut end = self.position.min(xml.len());
        while !xml.is_char_boundary(end) {
            end -= 1;
        }
        let before = &xml[..end];
        let line = memchr::memchr_iter(b'\n', before.as_bytes()).count() + 1;
        let line_start = memchr::memrchr(b'\n', before.as_bytes()).map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Why a scan stopped early
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Parse(#[from] ParsingError),
    #[error("handler aborted scan: {0}")]
    Handler(HandlerError),
}

impl ScanError {
    /// The parsing error, if the document itself was at fault
    pub fn parsing(&self) -> Option<&ParsingError> {
        match self {
            ScanError::Parse(e) => Some(e),
            ScanError::Handler(_) => None,
        }
    }

    /// Shorthand for the parsing error kind
    pub fn kind(&self) -> Option<ErrorKind> {
        self.parsing().map(|e| e.kind)
    }
}

impl From<HandlerError> for ScanError {
    fn from(e: HandlerError) -> Self {
        ScanError::Handler(e)
    }
}
