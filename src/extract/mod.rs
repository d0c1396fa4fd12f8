//! Text extraction: backend abstraction and result shaping.
//!
//! The concrete decoding of document bytes is delegated to a backend behind
//! the [`TextExtractor`] trait, isolating the PDF library from the rest of
//! the pipeline. Backends report flat text plus best-effort metadata; word
//! counts are always recomputed here rather than trusted from the backend.

mod pdf;

pub use pdf::PdfTextExtractor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of characters in a text preview.
pub const PREVIEW_CHARS: usize = 1000;

/// Metadata reported by an extraction backend.
///
/// All fields are best-effort and may be absent without the extraction
/// being treated as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title, if declared.
    pub title: Option<String>,
    /// Document author, if declared.
    pub author: Option<String>,
    /// Creation date, if declared and parseable.
    pub creation_date: Option<DateTime<Utc>>,
}

/// Raw payload produced by an extraction backend.
#[derive(Debug, Clone, Default)]
pub struct RawExtraction {
    /// Flat text content of the document.
    pub text: String,
    /// Number of pages, 0 if unknown.
    pub page_count: u32,
    /// Best-effort document metadata.
    pub info: DocumentInfo,
}

/// Abstract interface for text extraction backends.
///
/// Implementations turn document bytes into flat text plus metadata.
/// Extraction must be idempotent: the same bytes yield the same result.
/// Failures are reported as [`crate::Error::ExtractionFailed`]; no backend
/// error type crosses this boundary.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text and metadata from document bytes.
    async fn extract(&self, bytes: &[u8]) -> Result<RawExtraction>;
}

/// Count non-empty whitespace-delimited tokens.
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Truncate text to at most [`PREVIEW_CHARS`] characters, appending `...`
/// only when the original is longer.
///
/// # Example
/// ```
/// use docmap::extract::preview;
///
/// assert_eq!(preview("short"), "short");
/// let long = "x".repeat(1500);
/// let p = preview(&long);
/// assert_eq!(p.len(), 1003);
/// assert!(p.ends_with("..."));
/// ```
pub fn preview(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Extraction output with locally computed statistics and defaulted metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Flat text content.
    pub text: String,
    /// Number of pages, 0 if unknown.
    pub page_count: u32,
    /// Non-empty whitespace-delimited token count, recomputed locally.
    pub word_count: u32,
    /// Non-whitespace character count.
    pub char_count: u32,
    /// Document title; falls back to the declared filename.
    pub title: String,
    /// Document author; falls back to "Unknown".
    pub author: String,
    /// Creation date, if the backend reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl ExtractionResult {
    /// Shape a backend payload into the final result.
    ///
    /// The word count is always recomputed from the text, never trusted
    /// from the backend. Missing title falls back to `filename`, missing
    /// author to `"Unknown"`.
    pub fn from_raw(raw: RawExtraction, filename: &str) -> Self {
        let word_count = count_words(&raw.text);
        let char_count = raw.text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        let title = raw
            .info
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| filename.to_string());
        let author = raw
            .info
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            text: raw.text,
            page_count: raw.page_count,
            word_count,
            char_count,
            title,
            author,
            creation_date: raw.info.creation_date,
        }
    }

    /// Preview of the text content, truncated to [`PREVIEW_CHARS`].
    pub fn preview(&self) -> String {
        preview(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hello, world! This is a test."), 6);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t  "), 0);
        assert_eq!(count_words("one\n two\t\tthree"), 3);
    }

    #[test]
    fn test_count_words_idempotent() {
        let text = "alpha beta  gamma\ndelta";
        assert_eq!(count_words(text), count_words(text));
        assert_eq!(count_words(text), 4);
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        let text = "y".repeat(500);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_preview_exact_length_unchanged() {
        let text = "y".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "z".repeat(1500);
        let p = preview(&text);
        assert_eq!(&p[..PREVIEW_CHARS], &text[..PREVIEW_CHARS]);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_preview_multibyte_boundary() {
        let text = "é".repeat(1200);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_from_raw_recomputes_word_count() {
        let raw = RawExtraction {
            text: "three word line".to_string(),
            page_count: 2,
            info: DocumentInfo::default(),
        };
        let result = ExtractionResult::from_raw(raw, "upload.pdf");
        assert_eq!(result.word_count, 3);
        assert_eq!(result.char_count, 13);
        assert_eq!(result.page_count, 2);
    }

    #[test]
    fn test_from_raw_metadata_defaults() {
        let raw = RawExtraction {
            text: String::new(),
            page_count: 0,
            info: DocumentInfo::default(),
        };
        let result = ExtractionResult::from_raw(raw, "upload.pdf");
        assert_eq!(result.title, "upload.pdf");
        assert_eq!(result.author, "Unknown");
        assert!(result.creation_date.is_none());
    }

    #[test]
    fn test_from_raw_keeps_declared_metadata() {
        let raw = RawExtraction {
            text: String::new(),
            page_count: 1,
            info: DocumentInfo {
                title: Some("Quarterly Report".to_string()),
                author: Some("J. Doe".to_string()),
                creation_date: None,
            },
        };
        let result = ExtractionResult::from_raw(raw, "upload.pdf");
        assert_eq!(result.title, "Quarterly Report");
        assert_eq!(result.author, "J. Doe");
    }

    #[test]
    fn test_from_raw_blank_title_falls_back() {
        let raw = RawExtraction {
            text: String::new(),
            page_count: 0,
            info: DocumentInfo {
                title: Some("   ".to_string()),
                author: None,
                creation_date: None,
            },
        };
        let result = ExtractionResult::from_raw(raw, "notes.pdf");
        assert_eq!(result.title, "notes.pdf");
    }
}
