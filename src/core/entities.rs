//! XML Entity Tables
//!
//! Resolution rules for references that passed the entity grammar:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Anything else named is left unresolved; no DTD is ever consulted.

/// Highest Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Look up one of the five predefined entities by its full reference text
///
/// Takes the raw reference including `&` and `;` (e.g. `"&amp;"`).
#[inline]
pub fn predefined_codepoint(reference: &str) -> Option<u32> {
    match reference {
        "&lt;" => Some('<' as u32),
        "&gt;" => Some('>' as u32),
        "&amp;" => Some('&' as u32),
        "&quot;" => Some('"' as u32),
        "&apos;" => Some('\'' as u32),
        _ => None,
    }
}

/// Parse hex character reference digits to codepoint
///
/// Returns None on an empty input, a non-hex byte, or `u32` overflow.
pub fn parse_hex_codepoint(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for &d in digits {
        let digit = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => return None,
        };
        result = result.checked_mul(16)?.checked_add(digit as u32)?;
    }
    Some(result)
}

/// Parse decimal character reference digits to codepoint
pub fn parse_dec_codepoint(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add((d - b'0') as u32)?;
    }
    Some(result)
}

/// Check that a numeric reference names a codepoint at all
///
/// Surrogate values are accepted: a reference like `&#xD800;` is tallied as
/// written, it is not validated against the XML Char production.
#[inline]
pub fn is_valid_codepoint(codepoint: u32) -> bool {
    codepoint <= MAX_CODEPOINT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_entities() {
        assert_eq!(predefined_codepoint("&lt;"), Some(60));
        assert_eq!(predefined_codepoint("&gt;"), Some(62));
        assert_eq!(predefined_codepoint("&amp;"), Some(38));
        assert_eq!(predefined_codepoint("&quot;"), Some(34));
        assert_eq!(predefined_codepoint("&apos;"), Some(39));
    }

    #[test]
    fn test_unknown_entity() {
        assert_eq!(predefined_codepoint("&nbsp;"), None);
        // Case matters
        assert_eq!(predefined_codepoint("&AMP;"), None);
        // Bare names are not references
        assert_eq!(predefined_codepoint("amp"), None);
    }

    #[test]
    fn test_numeric_decimal() {
        assert_eq!(parse_dec_codepoint(b"65"), Some(65));
        assert_eq!(parse_dec_codepoint(b"0128169"), Some(128169));
        assert_eq!(parse_dec_codepoint(b""), None);
        assert_eq!(parse_dec_codepoint(b"6a"), None);
    }

    #[test]
    fn test_numeric_hex() {
        assert_eq!(parse_hex_codepoint(b"41"), Some(0x41));
        assert_eq!(parse_hex_codepoint(b"1F4a9"), Some(0x1F4A9));
        assert_eq!(parse_hex_codepoint(b""), None);
        assert_eq!(parse_hex_codepoint(b"g"), None);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(parse_dec_codepoint(b"99999999999"), None);
        assert_eq!(parse_hex_codepoint(b"100000000"), None);
    }

    #[test]
    fn test_codepoint_range() {
        assert!(is_valid_codepoint(0));
        assert!(is_valid_codepoint(0xD800));
        assert!(is_valid_codepoint(MAX_CODEPOINT));
        assert!(!is_valid_codepoint(0x110000));
    }
}
