//! Classified Lexer Events
//!
//! Every character or `&...;` reference seen in a text leaf ends up as
//! exactly one `ClassifiedEvent`:
//! - `Found`: a plain character or a resolved reference
//! - `UnknownName`: a well-formed `&name;` outside the predefined set
//! - `ParseError`: anything that fails the reference grammar

use std::fmt;

/// Outcome of classifying one character or one entity reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEvent {
    /// Directly encoded character, or a resolved reference
    Found {
        /// Exact text consumed (`"A"`, `"&amp;"`, `"&#x41;"`)
        raw_text: String,
        /// Unicode scalar value (logical codepoint, never a surrogate half of a pair)
        codepoint: u32,
    },

    /// Well-formed named reference with no known meaning
    UnknownName {
        raw_text: String,
    },

    /// Malformed or unterminated reference
    ParseError {
        /// Everything consumed up to and including the failing character
        raw_text: String,
        /// Why the grammar rejected it (diagnostics only)
        reason: LexError,
    },
}

impl ClassifiedEvent {
    /// The exact text this event covers
    #[inline]
    pub fn raw_text(&self) -> &str {
        match self {
            ClassifiedEvent::Found { raw_text, .. }
            | ClassifiedEvent::UnknownName { raw_text }
            | ClassifiedEvent::ParseError { raw_text, .. } => raw_text,
        }
    }

    /// Codepoint for `Found` events
    #[inline]
    pub fn codepoint(&self) -> Option<u32> {
        match self {
            ClassifiedEvent::Found { codepoint, .. } => Some(*codepoint),
            _ => None,
        }
    }

    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ClassifiedEvent::ParseError { .. })
    }
}

/// Reason a reference was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexError {
    /// A character not allowed at this point of the reference grammar
    UnexpectedChar,
    /// `&#x;` with no hex digits before the terminator
    EmptyHexDigits,
    /// Input ended before `;`
    Unterminated,
    /// Numeric reference above U+10FFFF (or beyond `u32`)
    CodepointOutOfRange,
}

impl LexError {
    /// Human-readable message for this error
    pub fn message(self) -> &'static str {
        match self {
            LexError::UnexpectedChar => "unexpected character in entity reference",
            LexError::EmptyHexDigits => "hexadecimal reference has no digits",
            LexError::Unterminated => "unterminated entity reference",
            LexError::CodepointOutOfRange => "character reference out of Unicode range",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LexError {}

/// Receiver for classified events
///
/// The scanner pushes events here in document order. Implemented for
/// `Vec<ClassifiedEvent>` (collect everything) and by the corpus analyser
/// (tally straight into a report).
pub trait EventSink {
    fn event(&mut self, event: ClassifiedEvent);
}

impl EventSink for Vec<ClassifiedEvent> {
    #[inline]
    fn event(&mut self, event: ClassifiedEvent) {
        self.push(event);
    }
}
