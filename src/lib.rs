//! # docmap
//!
//! Document ingestion and structure analysis for Rust.
//!
//! This library validates uploaded documents, extracts their text, infers a
//! leveled outline from line markers and indentation, and builds a laid-out
//! mind-map graph for presentation.
//!
//! ## Quick Start
//!
//! ```
//! use docmap::pipeline::Analyzer;
//!
//! fn main() -> docmap::Result<()> {
//!     let analyzer = Analyzer::new().with_seed(7);
//!     let outline = analyzer.outline_text("Topic\n1. Sub A\n- detail")?;
//!     let map = analyzer.build_map(&outline);
//!     println!("{} nodes, {} links", map.nodes.len(), map.links.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Upload Validator → Text Extractor → Hierarchy Segmenter → Structure
//! Builder → Response Assembler. Text-only input skips the first two stages
//! and enters at the segmenter. Every entity is created fresh per call and
//! discarded afterwards; nothing is shared across concurrent calls.
//!
//! ## Features
//!
//! - **Upload validation**: media type, size ceiling, optional `%PDF-`
//!   magic-byte check, selected by policy
//! - **Pluggable extraction**: `lopdf`-backed default behind an async trait
//! - **Marker-aware outlining**: numbered, bullet, roman, and lettered list
//!   detection with an indentation fallback
//! - **Mind-map layout**: central/ring/leaf placement with seedable
//!   randomness
//! - **Model enrichment**: opaque generative-model port with explicit,
//!   marked fallback

pub mod error;
pub mod extract;
pub mod generate;
pub mod graph;
pub mod outline;
pub mod pipeline;
pub mod response;
pub mod validate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{
    count_words, preview, DocumentInfo, ExtractionResult, PdfTextExtractor, RawExtraction,
    TextExtractor, PREVIEW_CHARS,
};
pub use generate::{MapAnalysis, TextGenerator};
pub use graph::{
    assign_positions, LayoutOptions, MapLink, MapNode, MindMap, NodeKind, Point,
};
pub use outline::{Outline, OutlineLine, Segmenter};
pub use pipeline::{Analyzer, DocumentInput, IngestOutput};
pub use response::{ApiResponse, JsonFormat};
pub use validate::{
    is_pdf_bytes, UploadedDocument, ValidationPolicy, MAX_UPLOAD_BYTES, PDF_MEDIA_TYPE,
};

/// Segment raw text into a leveled outline.
///
/// # Example
///
/// ```
/// let outline = docmap::outline_text("Topic\n- detail").unwrap();
/// assert_eq!(outline.lines[1].level, 1);
/// ```
pub fn outline_text(text: &str) -> Result<Outline> {
    Analyzer::new().outline_text(text)
}

/// Build a positioned heuristic mind map from raw text.
///
/// Leaf angles come from a thread RNG; use [`Analyzer::with_seed`] for a
/// reproducible layout.
///
/// # Example
///
/// ```
/// let map = docmap::map_text("Topic\n  sub\n    detail").unwrap();
/// assert_eq!(map.nodes.len(), 3);
/// ```
pub fn map_text(text: &str) -> Result<MindMap> {
    let analyzer = Analyzer::new();
    let outline = analyzer.outline_text(text)?;
    Ok(analyzer.build_map(&outline))
}

/// Validate, extract, and outline PDF bytes with the default backend.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> docmap::Result<()> {
/// let bytes = std::fs::read("notes.pdf")?;
/// let upload = docmap::UploadedDocument::new(bytes, "application/pdf", "notes.pdf");
/// let output = docmap::ingest(upload).await?;
/// println!("{} words", output.extraction.word_count);
/// # Ok(())
/// # }
/// ```
pub async fn ingest(upload: UploadedDocument) -> Result<IngestOutput> {
    Analyzer::new().ingest(Some(upload)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_text_convenience() {
        let outline = outline_text("Topic\n1. Sub A").unwrap();
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_outline_text_rejects_empty() {
        assert!(matches!(
            outline_text("   "),
            Err(Error::NoContentProvided)
        ));
    }

    #[test]
    fn test_map_text_convenience() {
        let map = map_text("Topic\n  one\n  two").unwrap();
        assert_eq!(map.nodes.len(), 3);
        assert_eq!(map.links.len(), 2);
        // Layout ran: main and subs are positioned.
        assert!(map.nodes.iter().all(|n| n.position.is_some()));
    }
}
