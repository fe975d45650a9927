//! Entity Reference State Machine
//!
//! Recognizes exactly one `&...;` reference, one character at a time:
//!
//! ```text
//! Init --&--> CharOrNumber --#--> DecOrHex --x--> ParseHex --;--> End
//!                  |                  |              (hex)*
//!                  |                  +--digit--> ParseDigit --;--> End
//!                  |                                 (digit)*
//!                  +--letter--> ParseChar --;--> End
//!                                 (letter)*
//! ```
//!
//! Any other character moves to `ParserError`. On reaching `End` or
//! `ParserError` the machine classifies what it consumed and returns the event
//! in the same call. It never rewinds: the failing character is part of the
//! error text and the caller resumes with the character after it.

use super::entities::{is_valid_codepoint, parse_dec_codepoint, parse_hex_codepoint, predefined_codepoint};
use super::events::{ClassifiedEvent, LexError};

/// Current step of the reference grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerStep {
    /// Expecting `&`
    Init,
    /// After `&`: `#` or a letter
    CharOrNumber,
    /// After `&#`: `x` or a decimal digit
    DecOrHex,
    /// Inside a name
    ParseChar,
    /// Inside decimal digits
    ParseDigit,
    /// Inside hex digits
    ParseHex,
    /// Terminated by `;`
    End,
    /// Grammar violated
    ParserError,
}

impl LexerStep {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, LexerStep::End | LexerStep::ParserError)
    }
}

/// Kind of reference, decided once the first character after `&` is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Undetermined,
    Name,
    Hex,
    Dec,
}

/// Result of feeding one character (or end of input) to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOutcome {
    /// The reference is complete; the machine takes no further input
    pub finished: bool,
    /// Emitted exactly once, on the call that finished the reference
    pub event: Option<ClassifiedEvent>,
}

impl LexerOutcome {
    #[inline]
    fn pending() -> Self {
        LexerOutcome { finished: false, event: None }
    }

    #[inline]
    fn idle() -> Self {
        LexerOutcome { finished: true, event: None }
    }

    #[inline]
    fn emit(event: ClassifiedEvent) -> Self {
        LexerOutcome { finished: true, event: Some(event) }
    }
}

/// Lexer for a single entity reference
#[derive(Debug, Clone)]
pub struct EntityStateMachine {
    step: LexerStep,
    raw: String,
    last: Option<char>,
    entity_type: EntityType,
    /// Digits consumed in a numeric reference
    digits: usize,
    error: Option<LexError>,
}

impl EntityStateMachine {
    pub fn new() -> Self {
        EntityStateMachine {
            step: LexerStep::Init,
            raw: String::with_capacity(8),
            last: None,
            entity_type: EntityType::Undetermined,
            digits: 0,
            error: None,
        }
    }

    #[inline]
    pub fn step(&self) -> LexerStep {
        self.step
    }

    #[inline]
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Text consumed so far
    #[inline]
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// The character consumed by the last `process` call
    #[inline]
    pub fn last_char(&self) -> Option<char> {
        self.last
    }

    /// Consume one character
    ///
    /// `unit` is appended to the accumulated text before the transition is
    /// evaluated. Codepoints that are not scalar values (lone surrogates)
    /// never match the grammar.
    pub fn process(&mut self, codepoint: u32, unit: &str) -> LexerOutcome {
        if self.step.is_terminal() {
            return LexerOutcome::idle();
        }

        self.raw.push_str(unit);
        let c = char::from_u32(codepoint);
        self.last = c;
        self.step = match c {
            Some(c) => self.transition(c),
            None => self.fail(LexError::UnexpectedChar),
        };

        if self.step.is_terminal() {
            LexerOutcome::emit(self.classify())
        } else {
            LexerOutcome::pending()
        }
    }

    /// End of input
    ///
    /// A reference still open at this point is unterminated and is always
    /// reported as a parse error with whatever was consumed.
    pub fn finish(&mut self) -> LexerOutcome {
        if self.step.is_terminal() {
            return LexerOutcome::idle();
        }
        self.step = self.fail(LexError::Unterminated);
        LexerOutcome::emit(self.classify())
    }

    fn transition(&mut self, c: char) -> LexerStep {
        match self.step {
            LexerStep::Init => match c {
                '&' => LexerStep::CharOrNumber,
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::CharOrNumber => match c {
                '#' => LexerStep::DecOrHex,
                c if c.is_ascii_alphabetic() => {
                    self.entity_type = EntityType::Name;
                    LexerStep::ParseChar
                }
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::ParseChar => match c {
                ';' => LexerStep::End,
                c if c.is_ascii_alphabetic() => LexerStep::ParseChar,
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::DecOrHex => match c {
                'x' => {
                    self.entity_type = EntityType::Hex;
                    LexerStep::ParseHex
                }
                c if c.is_ascii_digit() => {
                    self.entity_type = EntityType::Dec;
                    self.digits = 1;
                    LexerStep::ParseDigit
                }
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::ParseDigit => match c {
                ';' => LexerStep::End,
                c if c.is_ascii_digit() => {
                    self.digits += 1;
                    LexerStep::ParseDigit
                }
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::ParseHex => match c {
                ';' if self.digits > 0 => LexerStep::End,
                ';' => self.fail(LexError::EmptyHexDigits),
                c if c.is_ascii_hexdigit() => {
                    self.digits += 1;
                    LexerStep::ParseHex
                }
                _ => self.fail(LexError::UnexpectedChar),
            },
            LexerStep::End | LexerStep::ParserError => self.step,
        }
    }

    #[inline]
    fn fail(&mut self, reason: LexError) -> LexerStep {
        self.error = Some(reason);
        LexerStep::ParserError
    }

    /// Build the event for a terminal state
    fn classify(&self) -> ClassifiedEvent {
        if self.step == LexerStep::End {
            match self.resolve() {
                Ok(Some(codepoint)) => ClassifiedEvent::Found {
                    raw_text: self.raw.clone(),
                    codepoint,
                },
                Ok(None) => ClassifiedEvent::UnknownName { raw_text: self.raw.clone() },
                Err(reason) => ClassifiedEvent::ParseError {
                    raw_text: self.raw.clone(),
                    reason,
                },
            }
        } else {
            ClassifiedEvent::ParseError {
                raw_text: self.raw.clone(),
                reason: self.error.unwrap_or(LexError::UnexpectedChar),
            }
        }
    }

    /// Resolve a terminated reference: `Ok(None)` means an unknown name
    fn resolve(&self) -> Result<Option<u32>, LexError> {
        // All accepted characters are ASCII, so byte slicing is safe here
        let bytes = self.raw.as_bytes();
        let numeric = match self.entity_type {
            EntityType::Name => return Ok(predefined_codepoint(&self.raw)),
            EntityType::Dec => parse_dec_codepoint(&bytes[2..bytes.len() - 1]),
            EntityType::Hex => parse_hex_codepoint(&bytes[3..bytes.len() - 1]),
            EntityType::Undetermined => return Err(LexError::UnexpectedChar),
        };
        match numeric {
            Some(cp) if is_valid_codepoint(cp) => Ok(Some(cp)),
            _ => Err(LexError::CodepointOutOfRange),
        }
    }
}

impl Default for EntityStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a whole string, finishing if the reference never completes
    fn run(input: &str) -> (Vec<ClassifiedEvent>, usize) {
        let mut machine = EntityStateMachine::new();
        let mut events = Vec::new();
        let mut consumed = 0;
        for c in input.chars() {
            let outcome = machine.process(c as u32, c.encode_utf8(&mut [0; 4]));
            consumed += 1;
            if let Some(event) = outcome.event {
                events.push(event);
            }
            if outcome.finished {
                break;
            }
        }
        if let Some(event) = machine.finish().event {
            events.push(event);
        }
        (events, consumed)
    }

    fn found(raw: &str, codepoint: u32) -> ClassifiedEvent {
        ClassifiedEvent::Found { raw_text: raw.to_string(), codepoint }
    }

    fn error(raw: &str, reason: LexError) -> ClassifiedEvent {
        ClassifiedEvent::ParseError { raw_text: raw.to_string(), reason }
    }

    #[test]
    fn test_predefined() {
        assert_eq!(run("&amp;").0, vec![found("&amp;", 38)]);
        assert_eq!(run("&lt;").0, vec![found("&lt;", 60)]);
        assert_eq!(run("&apos;").0, vec![found("&apos;", 39)]);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            run("&unknown;").0,
            vec![ClassifiedEvent::UnknownName { raw_text: "&unknown;".into() }]
        );
    }

    #[test]
    fn test_decimal_and_hex() {
        assert_eq!(run("&#65;").0, vec![found("&#65;", 65)]);
        assert_eq!(run("&#x41;").0, vec![found("&#x41;", 0x41)]);
        assert_eq!(run("&#x1F4A9;").0, vec![found("&#x1F4A9;", 0x1F4A9)]);
        assert_eq!(run("&#xabCD;").0, vec![found("&#xabCD;", 0xABCD)]);
    }

    #[test]
    fn test_stops_at_semicolon() {
        let (events, consumed) = run("&gt;rest");
        assert_eq!(events, vec![found("&gt;", 62)]);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_error_includes_failing_char() {
        assert_eq!(run("& ").0, vec![error("& ", LexError::UnexpectedChar)]);
        assert_eq!(run("&a1;").0, vec![error("&a1", LexError::UnexpectedChar)]);
        assert_eq!(run("&#;").0, vec![error("&#;", LexError::UnexpectedChar)]);
        assert_eq!(run("&#12a;").0, vec![error("&#12a", LexError::UnexpectedChar)]);
        assert_eq!(run("&#X41;").0, vec![error("&#X", LexError::UnexpectedChar)]);
        assert_eq!(run("&#xG;").0, vec![error("&#xG", LexError::UnexpectedChar)]);
    }

    #[test]
    fn test_empty_hex_is_error() {
        assert_eq!(run("&#x;").0, vec![error("&#x;", LexError::EmptyHexDigits)]);
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(run("&invalid").0, vec![error("&invalid", LexError::Unterminated)]);
        assert_eq!(run("&").0, vec![error("&", LexError::Unterminated)]);
        assert_eq!(run("&#x4").0, vec![error("&#x4", LexError::Unterminated)]);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            run("&#x110000;").0,
            vec![error("&#x110000;", LexError::CodepointOutOfRange)]
        );
        assert_eq!(
            run("&#99999999999;").0,
            vec![error("&#99999999999;", LexError::CodepointOutOfRange)]
        );
    }

    #[test]
    fn test_init_requires_ampersand() {
        assert_eq!(run("a").0, vec![error("a", LexError::UnexpectedChar)]);
    }

    #[test]
    fn test_lone_surrogate_is_unexpected() {
        let mut machine = EntityStateMachine::new();
        machine.process('&' as u32, "&");
        let outcome = machine.process(0xD800, "\u{FFFD}");
        assert_eq!(outcome.event, Some(error("&\u{FFFD}", LexError::UnexpectedChar)));
        assert_eq!(machine.last_char(), None);
    }

    #[test]
    fn test_types_and_steps() {
        let mut machine = EntityStateMachine::new();
        assert_eq!(machine.step(), LexerStep::Init);
        machine.process('&' as u32, "&");
        assert_eq!(machine.step(), LexerStep::CharOrNumber);
        assert_eq!(machine.entity_type(), EntityType::Undetermined);
        machine.process('#' as u32, "#");
        machine.process('x' as u32, "x");
        assert_eq!(machine.step(), LexerStep::ParseHex);
        assert_eq!(machine.entity_type(), EntityType::Hex);
        assert_eq!(machine.raw_text(), "&#x");
        assert_eq!(machine.last_char(), Some('x'));
    }

    #[test]
    fn test_terminal_is_idle() {
        let mut machine = EntityStateMachine::new();
        for c in "&lt;".chars() {
            machine.process(c as u32, c.encode_utf8(&mut [0; 4]));
        }
        assert_eq!(machine.step(), LexerStep::End);
        assert_eq!(machine.process('a' as u32, "a"), LexerOutcome { finished: true, event: None });
        assert_eq!(machine.finish(), LexerOutcome { finished: true, event: None });
        assert_eq!(machine.raw_text(), "&lt;");
    }
}
