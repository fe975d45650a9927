//! Decoded Document Values
//!
//! The input side hands over each source file as an already-decoded tree:
//! strings, nulls, and ordered or keyed collections of further values.
//! Markup, CDATA and entity escaping are gone by the time a value lands here.

/// One node of a decoded document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// Missing content; reported as an anomaly, never analysed
    Null,
    /// Decoded text, scanned character by character
    Text(String),
    /// Ordered collection
    Sequence(Vec<DocumentValue>),
    /// Keyed collection in insertion order. Keys are not scanned.
    Map(Vec<(String, DocumentValue)>),
    /// Any other scalar (number, boolean); ignored
    Other,
}

impl DocumentValue {
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        DocumentValue::Text(s.into())
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    /// Child values in document order (empty for leaves)
    pub fn children(&self) -> Box<dyn DoubleEndedIterator<Item = &DocumentValue> + '_> {
        match self {
            DocumentValue::Sequence(items) => Box::new(items.iter()),
            DocumentValue::Map(entries) => Box::new(entries.iter().map(|(_, v)| v)),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl From<&str> for DocumentValue {
    fn from(s: &str) -> Self {
        DocumentValue::Text(s.to_string())
    }
}

impl From<String> for DocumentValue {
    fn from(s: String) -> Self {
        DocumentValue::Text(s)
    }
}

impl<T: Into<DocumentValue>> From<Vec<T>> for DocumentValue {
    fn from(items: Vec<T>) -> Self {
        DocumentValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DocumentValue>> From<Option<T>> for DocumentValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DocumentValue::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => DocumentValue::Null,
            Value::String(s) => DocumentValue::Text(s),
            Value::Array(items) => DocumentValue::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                DocumentValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Bool(_) | Value::Number(_) => DocumentValue::Other,
        }
    }
}

#[cfg(feature = "serde")]
impl DocumentValue {
    /// Decode a JSON rendering of a document tree
    ///
    /// Object member order follows serde_json's map (sorted by key unless its
    /// `preserve_order` feature is on); tallies do not depend on it.
    pub fn from_json_str(json: &str) -> Result<DocumentValue, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(json).map(Into::into)
    }
}

/// A decoded document and the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub file: String,
    pub value: DocumentValue,
}

impl SourceDocument {
    pub fn new(file: impl Into<String>, value: impl Into<DocumentValue>) -> Self {
        SourceDocument {
            file: file.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_order() {
        let doc = DocumentValue::Map(vec![
            ("b".into(), DocumentValue::text("first")),
            ("a".into(), DocumentValue::text("second")),
        ]);
        let texts: Vec<_> = doc
            .children()
            .map(|v| match v {
                DocumentValue::Text(s) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(DocumentValue::Null.children().count(), 0);
    }

    #[test]
    fn test_from_conversions() {
        let doc: DocumentValue = vec![Some("a"), None].into();
        assert_eq!(
            doc,
            DocumentValue::Sequence(vec![DocumentValue::text("a"), DocumentValue::Null])
        );
        let leaves: Vec<bool> = doc.children().map(DocumentValue::is_null).collect();
        assert_eq!(leaves, vec![false, true]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let doc = DocumentValue::from_json_str(r#"{"p": ["x", null, 3, true]}"#).unwrap();
        assert_eq!(
            doc,
            DocumentValue::Map(vec![(
                "p".into(),
                DocumentValue::Sequence(vec![
                    DocumentValue::text("x"),
                    DocumentValue::Null,
                    DocumentValue::Other,
                    DocumentValue::Other,
                ])
            )])
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_invalid() {
        assert!(DocumentValue::from_json_str("{").is_err());
    }
}
