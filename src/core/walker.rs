//! Codepoint Walker
//!
//! Splits text into `(codepoint, unit)` pairs and drives a `CharProcessor`
//! over them. Two sources are supported:
//! - `&str`: every char is already a scalar value, the unit is its sub-slice
//! - `&[u16]`: UTF-16 code units, surrogate pairs are joined into one item
//!
//! The walk never stops early. A processor returning `true` from `process`
//! only reports that its own sub-task finished; `finish` is always called
//! exactly once after the last item.

const REPLACEMENT: &str = "\u{FFFD}";

/// Consumer of `(codepoint, unit)` pairs
pub trait CharProcessor {
    /// Handle one logical character. Returns true if the processor's current
    /// sub-task completed on this character.
    fn process(&mut self, codepoint: u32, unit: &str) -> bool;

    /// End of input. Called once, after the last `process`.
    fn finish(&mut self) -> bool;
}

/// Lazy iterator over the chars of a string slice
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Codepoints<'a> {
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Codepoints { text, pos: 0 }
    }
}

impl<'a> Iterator for Codepoints<'a> {
    type Item = (u32, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.text[self.pos..].chars().next()?;
        let start = self.pos;
        self.pos += c.len_utf8();
        Some((c as u32, &self.text[start..self.pos]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.pos;
        ((remaining + 3) / 4, Some(remaining))
    }
}

/// Lazy iterator over UTF-16 code units, joining surrogate pairs
///
/// A high surrogate followed by a low surrogate is yielded once, with the
/// combined scalar value and the two-unit slice. An unpaired surrogate is
/// yielded on its own with its raw value as codepoint.
#[derive(Debug, Clone)]
pub struct Utf16Codepoints<'a> {
    units: &'a [u16],
    pos: usize,
}

impl<'a> Utf16Codepoints<'a> {
    #[inline]
    pub fn new(units: &'a [u16]) -> Self {
        Utf16Codepoints { units, pos: 0 }
    }
}

impl<'a> Iterator for Utf16Codepoints<'a> {
    type Item = (u32, &'a [u16]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let first = *self.units.get(start)?;

        if is_high_surrogate(first) {
            if let Some(&second) = self.units.get(start + 1) {
                if is_low_surrogate(second) {
                    self.pos += 2;
                    let cp = 0x10000
                        + (((first as u32) - 0xD800) << 10)
                        + ((second as u32) - 0xDC00);
                    return Some((cp, &self.units[start..start + 2]));
                }
            }
        }

        self.pos += 1;
        Some((first as u32, &self.units[start..start + 1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len() - self.pos;
        ((remaining + 1) / 2, Some(remaining))
    }
}

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Feed every char of `text` to `processor`, then finish it
pub fn walk<P: CharProcessor + ?Sized>(text: &str, processor: &mut P) -> bool {
    for (codepoint, unit) in Codepoints::new(text) {
        processor.process(codepoint, unit);
    }
    processor.finish()
}

/// Feed UTF-16 input to `processor`, then finish it
///
/// The processor sees each item rendered as UTF-8. Lone surrogates have no
/// UTF-8 form and are passed as U+FFFD while keeping their own codepoint.
pub fn walk_utf16<P: CharProcessor + ?Sized>(units: &[u16], processor: &mut P) -> bool {
    let mut buf = [0u8; 4];
    for (codepoint, _) in Utf16Codepoints::new(units) {
        let unit = match char::from_u32(codepoint) {
            Some(c) => &*c.encode_utf8(&mut buf),
            None => REPLACEMENT,
        };
        processor.process(codepoint, unit);
    }
    processor.finish()
}
