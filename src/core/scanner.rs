//! Text Scanner
//!
//! Turns the `(codepoint, unit)` stream of a text leaf into classified events:
//! - `&` starts an entity reference, handed to an `EntityStateMachine`
//! - whitespace is skipped and never reported
//! - every other character is `Found` as-is
//!
//! Strings without any `&` take a fast path (memchr) that skips the
//! reference machinery entirely.

use memchr::memchr;

use super::entity_machine::EntityStateMachine;
use super::events::{ClassifiedEvent, EventSink};
use super::walker::{walk, walk_utf16, CharProcessor};

/// Scanner over one text leaf, pushing events into `sink`
///
/// Not restartable: once `finish` has been called, further calls are no-ops
/// that only report the finished flag.
pub struct TextScanner<'s, S: EventSink + ?Sized> {
    sink: &'s mut S,
    entity: Option<EntityStateMachine>,
    finished: bool,
}

impl<'s, S: EventSink + ?Sized> TextScanner<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        TextScanner {
            sink,
            entity: None,
            finished: false,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while an `&...` reference is open
    #[inline]
    pub fn in_entity(&self) -> bool {
        self.entity.is_some()
    }

    /// Forward one character to the active reference
    fn feed_entity(&mut self, codepoint: u32, unit: &str) {
        let Some(machine) = self.entity.as_mut() else {
            return;
        };
        let outcome = machine.process(codepoint, unit);
        if let Some(event) = outcome.event {
            self.emit(event);
        }
        if outcome.finished {
            self.entity = None;
        }
    }

    #[inline]
    fn emit(&mut self, event: ClassifiedEvent) {
        if let ClassifiedEvent::ParseError { raw_text, reason } = &event {
            log::trace!(target: "xmlcensus::scanner", "parse error {raw_text:?}: {reason}");
        }
        self.sink.event(event);
    }
}

impl<S: EventSink + ?Sized> CharProcessor for TextScanner<'_, S> {
    fn process(&mut self, codepoint: u32, unit: &str) -> bool {
        if self.finished {
            return true;
        }

        if self.entity.is_some() {
            self.feed_entity(codepoint, unit);
        } else if unit == "&" {
            self.entity = Some(EntityStateMachine::new());
            self.feed_entity(codepoint, unit);
        } else if is_whitespace_unit(codepoint) {
            // never reported
        } else {
            self.emit(ClassifiedEvent::Found {
                raw_text: unit.to_string(),
                codepoint,
            });
        }
        false
    }

    fn finish(&mut self) -> bool {
        if self.finished {
            return true;
        }
        if let Some(mut machine) = self.entity.take() {
            if let Some(event) = machine.finish().event {
                self.emit(event);
            }
        }
        self.finished = true;
        true
    }
}

/// Single-codepoint whitespace test (Unicode White_Space)
#[inline]
fn is_whitespace_unit(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some_and(char::is_whitespace)
}

/// Scan a string, pushing every classified event into `sink`
pub fn scan_text<S: EventSink + ?Sized>(text: &str, sink: &mut S) {
    if memchr(b'&', text.as_bytes()).is_none() {
        // Fast path: no references, every non-whitespace char is found as-is
        for (offset, c) in text.char_indices() {
            if !c.is_whitespace() {
                sink.event(ClassifiedEvent::Found {
                    raw_text: text[offset..offset + c.len_utf8()].to_string(),
                    codepoint: c as u32,
                });
            }
        }
        return;
    }
    let mut scanner = TextScanner::new(sink);
    walk(text, &mut scanner);
}

/// Scan UTF-16 code units, joining surrogate pairs into one character
pub fn scan_utf16<S: EventSink + ?Sized>(units: &[u16], sink: &mut S) {
    let mut scanner = TextScanner::new(sink);
    walk_utf16(units, &mut scanner);
}

/// Scan a string and collect its events
pub fn classify(text: &str) -> Vec<ClassifiedEvent> {
    let mut events = Vec::new();
    scan_text(text, &mut events);
    events
}
