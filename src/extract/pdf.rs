//! Default extraction backend built on lopdf.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lopdf::{Dictionary, Document, Object};

use super::{DocumentInfo, RawExtraction, TextExtractor};
use crate::error::{Error, Result};

/// Concrete [`TextExtractor`] backed by `lopdf`.
///
/// Extracts per-page text in page order and reads the Info dictionary for
/// title, author, and creation date. Any lopdf fault is translated into
/// [`Error::ExtractionFailed`].
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor {
    _private: (),
}

impl PdfTextExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<RawExtraction> {
        let doc =
            Document::load_mem(bytes).map_err(|e| Error::ExtractionFailed(e.to_string()))?;

        let mut pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        pages.sort_unstable();

        let mut text = String::new();
        for page in &pages {
            let page_text = doc.extract_text(&[*page]).unwrap_or_default();
            text.push_str(&page_text);
            if !page_text.is_empty() && !page_text.ends_with('\n') {
                text.push('\n');
            }
        }

        let info = read_info(&doc);
        log::debug!(
            "extracted {} chars from {} pages",
            text.len(),
            pages.len()
        );

        Ok(RawExtraction {
            text,
            page_count: pages.len() as u32,
            info,
        })
    }
}

/// Read the Info dictionary, best-effort. Absent or malformed entries
/// yield `None`, never an error.
fn read_info(doc: &Document) -> DocumentInfo {
    let dict = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => match doc.get_dictionary(*id) {
            Ok(d) => d,
            Err(_) => return DocumentInfo::default(),
        },
        Ok(Object::Dictionary(d)) => d,
        _ => return DocumentInfo::default(),
    };

    DocumentInfo {
        title: string_entry(dict, b"Title"),
        author: string_entry(dict, b"Author"),
        creation_date: string_entry(dict, b"CreationDate").and_then(|s| parse_pdf_date(&s)),
    }
}

/// Read a string entry from a dictionary, decoding its bytes.
fn string_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => {
            let text = decode_text_simple(bytes);
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        }
        _ => None,
    }
}

/// Simple text decoding for Info-dictionary strings.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Parse a PDF date of the form `D:YYYYMMDDHHmmSS` (trailing timezone
/// markers ignored). Shorter date-only forms are accepted.
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let digits: String = s
        .trim_start_matches("D:")
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.len() >= 14 {
        NaiveDateTime::parse_from_str(&digits[..14], "%Y%m%d%H%M%S")
            .ok()
            .map(|dt| Utc.from_utc_datetime(&dt))
    } else if digits.len() >= 8 {
        NaiveDate::parse_from_str(&digits[..8], "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt))
    } else {
        None
    }
}
