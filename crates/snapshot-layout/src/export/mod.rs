//! Export pipeline - from dashboard sections to document and deck
//!
//! This module orchestrates an export request:
//! 1. Await each section's capture, strictly in input order
//! 2. Lay out a slide per section as soon as its snapshot arrives
//! 3. Paginate the document once every capture is in
//! 4. Encode only when every section was produced
//!
//! A failed capture stops the export at that section. Sections before it
//! stay valid in the returned report; it and everything after are marked
//! as not produced.

mod reorder;

pub use reorder::ReorderBuffer;

use crate::assemble::{Deck, DeckBuilder, Document, DocumentAssembler};
use crate::capture::{CaptureError, CaptureFailure, Capturer, capture_with_timeout};
use crate::encode::{DeckEncoder, DocumentEncoder};
use crate::options::{LayoutConfig, ReportMetadata};
use crate::types::*;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// One section to capture
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRequest<S> {
    pub label: String,
    pub surface: S,
}

impl<S> SectionRequest<S> {
    pub fn new(label: impl Into<String>, surface: S) -> Self {
        Self {
            label: label.into(),
            surface,
        }
    }
}

/// Everything needed for one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest<S> {
    pub metadata: ReportMetadata,
    pub sections: Vec<SectionRequest<S>>,
    /// Summary slide bullets; no summary slide when empty
    pub bullets: Vec<String>,
    pub document_source: DocumentSource,
    pub capture_timeout: Option<Duration>,
}

impl<S> ExportRequest<S> {
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            sections: Vec::new(),
            bullets: Vec::new(),
            document_source: DocumentSource::default(),
            capture_timeout: None,
        }
    }

    pub fn section(mut self, label: impl Into<String>, surface: S) -> Self {
        self.sections.push(SectionRequest::new(label, surface));
        self
    }

    pub fn bullets(mut self, bullets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn document_source(mut self, source: DocumentSource) -> Self {
        self.document_source = source;
        self
    }

    pub fn capture_timeout(mut self, limit: Duration) -> Self {
        self.capture_timeout = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionStatus {
    Produced,
    /// This section's capture failed; it halted the export
    Failed(CaptureError),
    /// Skipped because an earlier section failed
    NotProduced,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutcome {
    pub label: String,
    pub status: SectionStatus,
}

impl SectionOutcome {
    pub fn is_produced(&self) -> bool {
        self.status == SectionStatus::Produced
    }
}

/// Result of an export: whatever was assembled, plus per-section status
#[derive(Debug)]
pub struct ExportReport {
    /// `None` when no section feeding the document was produced
    pub document: Option<Document>,
    /// Title slide plus every produced section. The summary slide is only
    /// added when the export is complete.
    pub deck: Deck,
    pub sections: Vec<SectionOutcome>,
}

/// Encoded deliverables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifacts {
    pub document: Vec<u8>,
    pub deck: Vec<u8>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.sections.iter().all(SectionOutcome::is_produced)
    }

    pub fn produced_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_produced()).count()
    }

    /// The section whose capture halted the export, as a 1-based position
    pub fn failure(&self) -> Option<(usize, &SectionOutcome, &CaptureError)> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(index, outcome)| match &outcome.status {
                SectionStatus::Failed(error) => Some((index + 1, outcome, error)),
                _ => None,
            })
    }

    /// Both deliverables, or the capture error that prevented them
    pub fn into_complete(self) -> Result<(Document, Deck)> {
        if let Some((section, outcome, error)) = self.failure() {
            return Err(ExportError::Capture {
                section,
                label: outcome.label.clone(),
                source: error.clone(),
            });
        }
        let document = self.document.ok_or(ExportError::NoSections)?;
        Ok((document, self.deck))
    }

    /// Encode both deliverables. Encoders never see a partial export.
    pub fn encode<D, K>(self, document_encoder: &D, deck_encoder: &K) -> Result<EncodedArtifacts>
    where
        D: DocumentEncoder,
        K: DeckEncoder,
    {
        let (document, deck) = self.into_complete()?;
        let document = document_encoder.encode_document(document)?;
        let deck = deck_encoder.encode_deck(deck)?;
        Ok(EncodedArtifacts { document, deck })
    }
}

/// A capture finished by the host, possibly out of order
#[derive(Debug)]
pub struct CaptureCompletion {
    /// Position of the section in the request
    pub index: usize,
    pub result: std::result::Result<RasterImage, CaptureError>,
}

/// Capture every section of `request` in order and assemble both deliverables.
///
/// Returns `Err` only for configuration or geometry problems; capture
/// failures are reported per section in the `ExportReport`.
pub async fn export<C: Capturer>(
    capturer: &C,
    request: ExportRequest<C::Surface>,
    config: &LayoutConfig,
) -> Result<ExportReport> {
    config.validate()?;
    if request.sections.is_empty() {
        return Err(ExportError::NoSections);
    }

    let ExportRequest {
        metadata,
        sections,
        bullets,
        document_source,
        capture_timeout,
    } = request;

    let total = sections.len();
    let mut consumer = SectionConsumer::new(config, &metadata, document_source, total);

    for (index, SectionRequest { label, surface }) in sections.into_iter().enumerate() {
        if consumer.has_failed() {
            consumer.skip(label);
            continue;
        }
        log::info!("Capturing section {}/{} \"{}\"", index + 1, total, label);
        let result = capture_with_timeout(capturer, &surface, capture_timeout).await;
        consumer.accept(label, result)?;
    }

    consumer.finish(&bullets)
}

/// Assemble already-captured sections without going through a capturer
pub fn export_sections(
    sections: Vec<Section>,
    metadata: &ReportMetadata,
    bullets: &[String],
    document_source: DocumentSource,
    config: &LayoutConfig,
) -> Result<ExportReport> {
    config.validate()?;
    if sections.is_empty() {
        return Err(ExportError::NoSections);
    }

    let mut consumer = SectionConsumer::new(config, metadata, document_source, sections.len());
    for Section { label, image } in sections {
        consumer.accept(label, Ok(image))?;
    }
    consumer.finish(bullets)
}

/// Assemble from captures the host runs in parallel.
///
/// Completions may arrive in any order; they are buffered and consumed in
/// request order. The request's surfaces are not used, the host has
/// already dispatched them. If the channel closes before a section
/// arrives, that section fails as `Unavailable`. With a capture timeout
/// set, a section that does not arrive within the limit (counted from
/// when it became the next one due) fails as `Timeout`.
pub async fn export_completions<S>(
    request: ExportRequest<S>,
    completions: &mut mpsc::UnboundedReceiver<CaptureCompletion>,
    config: &LayoutConfig,
) -> Result<ExportReport> {
    config.validate()?;
    if request.sections.is_empty() {
        return Err(ExportError::NoSections);
    }

    let ExportRequest {
        metadata,
        sections,
        bullets,
        document_source,
        capture_timeout,
    } = request;

    let total = sections.len();
    let mut labels = sections.into_iter().map(|section| section.label);
    let mut consumer = SectionConsumer::new(config, &metadata, document_source, total);
    let mut buffer = ReorderBuffer::new();
    let mut deadline = capture_timeout.map(|limit| Instant::now() + limit);
    let mut missing = CaptureError::new(CaptureFailure::Unavailable, "capture never completed");

    while buffer.next_index() < total && !consumer.has_failed() {
        let received = match deadline {
            Some(at) => match tokio::time::timeout_at(at, completions.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    let limit = capture_timeout.unwrap_or_default();
                    log::warn!(
                        "Section {} not captured within {:?}",
                        buffer.next_index() + 1,
                        limit
                    );
                    missing = CaptureError::new(
                        CaptureFailure::Timeout,
                        format!("no snapshot after {:?}", limit),
                    );
                    break;
                }
            },
            None => completions.recv().await,
        };
        let Some(CaptureCompletion { index, result }) = received else {
            break;
        };
        if index >= total {
            log::warn!("Ignoring capture for unknown section {}", index);
            continue;
        }
        if buffer.insert(index, result).is_err() {
            log::warn!("Ignoring duplicate capture for section {}", index);
            continue;
        }
        if buffer.pending() > 1 {
            log::debug!(
                "Holding {} out-of-order capture(s) until section {} arrives",
                buffer.pending() - 1,
                buffer.next_index()
            );
        }

        let mut advanced = false;
        for (_, result) in buffer.drain_ready() {
            advanced = true;
            let label = labels.next().unwrap_or_default();
            if consumer.has_failed() {
                consumer.skip(label);
            } else {
                consumer.accept(label, result)?;
            }
        }
        if advanced {
            deadline = capture_timeout.map(|limit| Instant::now() + limit);
        }
    }

    for label in labels {
        if consumer.has_failed() {
            consumer.skip(label);
        } else {
            consumer.accept(label, Err(missing.clone()))?;
        }
    }

    consumer.finish(&bullets)
}

/// Consumes capture results in order, feeding both assemblers
struct SectionConsumer<'a> {
    config: &'a LayoutConfig,
    metadata: &'a ReportMetadata,
    document_source: DocumentSource,
    deck: DeckBuilder<'a>,
    document_sections: Vec<Section>,
    outcomes: Vec<SectionOutcome>,
    failed: bool,
}

impl<'a> SectionConsumer<'a> {
    fn new(
        config: &'a LayoutConfig,
        metadata: &'a ReportMetadata,
        document_source: DocumentSource,
        capacity: usize,
    ) -> Self {
        Self {
            config,
            metadata,
            document_source,
            deck: DeckBuilder::new(config, metadata),
            document_sections: Vec::new(),
            outcomes: Vec::with_capacity(capacity),
            failed: false,
        }
    }

    fn has_failed(&self) -> bool {
        self.failed
    }

    fn skip(&mut self, label: String) {
        self.outcomes.push(SectionOutcome {
            label,
            status: SectionStatus::NotProduced,
        });
    }

    fn accept(
        &mut self,
        label: String,
        result: std::result::Result<RasterImage, CaptureError>,
    ) -> Result<()> {
        let image = match result {
            Ok(image) => image,
            Err(error) => {
                log::warn!(
                    "Capture failed for section {} \"{}\": {}",
                    self.outcomes.len() + 1,
                    label,
                    error
                );
                self.failed = true;
                self.outcomes.push(SectionOutcome {
                    label,
                    status: SectionStatus::Failed(error),
                });
                return Ok(());
            }
        };

        let section = Section::new(label.clone(), image);
        let feeds_document = match self.document_source {
            DocumentSource::First => self.document_sections.is_empty(),
            DocumentSource::Concatenated => true,
        };
        if feeds_document {
            self.document_sections.push(section.clone());
        }
        self.deck.push_section(section)?;

        self.outcomes.push(SectionOutcome {
            label,
            status: SectionStatus::Produced,
        });
        Ok(())
    }

    fn finish(self, bullets: &[String]) -> Result<ExportReport> {
        let document = if self.document_sections.is_empty() {
            None
        } else {
            let assembler = DocumentAssembler::new(self.config, self.metadata);
            Some(assembler.assemble_from(self.document_sections, self.document_source)?)
        };

        let bullets = if self.failed { &[][..] } else { bullets };
        let deck = self.deck.finish(bullets);

        Ok(ExportReport {
            document,
            deck,
            sections: self.outcomes,
        })
    }
}
