//! Source document types - per-page text and raw document payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extracted plain text for one page of a source document.
///
/// Produced by the external text-extraction collaborator. Pages are
/// unique by number and ordered ascending; page numbers are the
/// citation targets for generated questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageText {
    /// 1-based page number
    pub page_number: u32,

    /// Plain UTF-8 text of the page
    pub text: String,
}

impl PageText {
    /// Create a new page text entry.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Build a page-number lookup map from a slice of pages.
pub fn page_map(pages: &[PageText]) -> HashMap<u32, &str> {
    pages
        .iter()
        .map(|p| (p.page_number, p.text.as_str()))
        .collect()
}

/// A raw document handed to the generation service as an opaque
/// artifact when no extracted page text is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBlob {
    /// Raw document bytes
    pub bytes: Vec<u8>,

    /// MIME type, e.g. `application/pdf`
    pub mime: String,
}

impl DocumentBlob {
    /// Create a new document blob.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_map_keys_by_number() {
        let pages = vec![PageText::new(1, "alpha"), PageText::new(3, "gamma")];
        let map = page_map(&pages);
        assert_eq!(map.get(&1), Some(&"alpha"));
        assert_eq!(map.get(&3), Some(&"gamma"));
        assert!(map.get(&2).is_none());
    }
}
