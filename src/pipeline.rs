//! End-to-end analysis pipeline.
//!
//! Wires validation, extraction, segmentation, and map construction into
//! per-call operations. The [`Analyzer`] holds only injected capabilities
//! and configuration; every call runs independently with no shared mutable
//! state and no retries.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::{ExtractionResult, PdfTextExtractor, TextExtractor};
use crate::generate::{map_prompt, parse_model_map, MapAnalysis, TextGenerator};
use crate::graph::{assign_positions, LayoutOptions, MindMap};
use crate::outline::{segment, Outline};
use crate::validate::{validate, UploadedDocument, ValidationPolicy};

/// Input to one analysis call: a file or raw text, never both.
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// An uploaded file to validate and extract.
    File(UploadedDocument),
    /// Raw text entering the pipeline at the segmenter.
    Text(String),
}

/// Everything produced by ingesting one uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutput {
    /// Extraction payload with recomputed statistics.
    pub extraction: ExtractionResult,
    /// Leveled outline inferred from the extracted text.
    pub outline: Outline,
}

/// Stateless per-call analyzer over injected capabilities.
///
/// # Example
/// ```
/// use docmap::pipeline::Analyzer;
/// use docmap::validate::ValidationPolicy;
///
/// let analyzer = Analyzer::new()
///     .with_policy(ValidationPolicy::TypeSizeAndSignature)
///     .with_seed(7);
/// let outline = analyzer.outline_text("Topic\n- detail").unwrap();
/// assert_eq!(outline.len(), 2);
/// ```
pub struct Analyzer {
    extractor: Arc<dyn TextExtractor>,
    generator: Option<Arc<dyn TextGenerator>>,
    policy: ValidationPolicy,
    layout: LayoutOptions,
    seed: Option<u64>,
}

impl Analyzer {
    /// Create an analyzer with the default PDF extraction backend and no
    /// generator.
    pub fn new() -> Self {
        Self::with_extractor(Arc::new(PdfTextExtractor::new()))
    }

    /// Create an analyzer over a custom extraction backend.
    pub fn with_extractor(extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            extractor,
            generator: None,
            policy: ValidationPolicy::default(),
            layout: LayoutOptions::default(),
            seed: None,
        }
    }

    /// Attach a generative-model capability.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the upload validation policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the layout geometry.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Seed the leaf-placement randomness for reproducible layout.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate an upload, extract its text, and segment it.
    ///
    /// `None` reports [`Error::NoFileProvided`]; validation failures are
    /// reported without attempting extraction.
    pub async fn ingest(&self, upload: Option<UploadedDocument>) -> Result<IngestOutput> {
        let upload = upload.ok_or(Error::NoFileProvided)?;
        validate(&upload, self.policy)?;

        let raw = self.extractor.extract(&upload.bytes).await?;
        let extraction = ExtractionResult::from_raw(raw, &upload.filename);
        let outline = segment(&extraction.text);

        log::debug!(
            "ingested {:?}: {} pages, {} words, {} outline lines",
            upload.filename,
            extraction.page_count,
            extraction.word_count,
            outline.len()
        );

        Ok(IngestOutput {
            extraction,
            outline,
        })
    }

    /// Segment raw text, skipping validation and extraction.
    pub fn outline_text(&self, text: &str) -> Result<Outline> {
        if text.trim().is_empty() {
            return Err(Error::NoContentProvided);
        }
        Ok(segment(text))
    }

    /// Outline from either input kind.
    pub async fn outline(&self, input: DocumentInput) -> Result<Outline> {
        match input {
            DocumentInput::File(upload) => Ok(self.ingest(Some(upload)).await?.outline),
            DocumentInput::Text(text) => self.outline_text(&text),
        }
    }

    /// Build a positioned heuristic mind map from an outline.
    pub fn build_map(&self, outline: &Outline) -> MindMap {
        let mut map = MindMap::from_outline(outline);
        self.apply_layout(&mut map);
        map
    }

    /// Build a positioned map via the generative model.
    ///
    /// With `fallback` set, a model failure degrades to the heuristic map,
    /// explicitly marked as such; otherwise the failure surfaces as
    /// [`Error::ModelCallFailed`]. Nothing is retried.
    pub async fn build_map_with_model(
        &self,
        outline: &Outline,
        fallback: bool,
    ) -> Result<MapAnalysis> {
        let result = self.model_map(outline).await;
        match result {
            Ok(mut map) => {
                self.apply_layout(&mut map);
                Ok(MapAnalysis {
                    map,
                    fallback: false,
                })
            }
            Err(err) if fallback => {
                log::warn!("model path failed, serving heuristic map: {}", err);
                Ok(MapAnalysis {
                    map: self.build_map(outline),
                    fallback: true,
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn model_map(&self, outline: &Outline) -> Result<MindMap> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| Error::ModelCallFailed("no generator configured".into()))?;

        let reply = generator
            .generate(&map_prompt(outline), None)
            .await
            .map_err(|err| match err {
                Error::ModelCallFailed(_) => err,
                other => Error::ModelCallFailed(other.to_string()),
            })?;

        parse_model_map(&reply)
    }

    fn apply_layout(&self, map: &mut MindMap) {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                assign_positions(map, &self.layout, &mut rng);
            }
            None => assign_positions(map, &self.layout, &mut rand::rng()),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
