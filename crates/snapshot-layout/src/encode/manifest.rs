//! JSON layout manifests
//!
//! A manifest is the hand-off format for encoders living in another
//! process: every page crop, slide placement and text region, with
//! coordinates rounded to the configured precision. Pixels are not
//! embedded; each image is described by its dimensions.
//!
//! Edges are rounded, not extents, so spans that meet before rounding
//! still meet after it and the last crop ends on the rounded scaled height.

use super::{DeckEncoder, DocumentEncoder, EncodingError};
use crate::assemble::{Deck, Document};
use crate::layout::{PlacementRect, Rect, SlideKind, TextBlock, round_to};
use crate::options::LayoutConfig;
use crate::types::RasterImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentManifest {
    pub page_width: f64,
    pub page_height: f64,
    pub scaled_height: f64,
    pub segments: Vec<SegmentManifest>,
    pub pages: Vec<PageManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentManifest {
    pub label: String,
    pub image: ImageManifest,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    pub index: usize,
    pub header_text: String,
    pub footer_text: String,
    pub drawable_height: f64,
    pub crop_top: f64,
    pub crop_height: f64,
    pub placement: Rect,
    pub header_rect: Rect,
    pub footer_rect: Rect,
    pub sources: Vec<SourceRowsManifest>,
}

/// Pixel rows of one segment drawn on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRowsManifest {
    /// Index into `DocumentManifest::segments`
    pub segment: usize,
    pub top_px: f64,
    pub height_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckManifest {
    pub aspect: (f64, f64),
    pub slides: Vec<SlideManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideManifest {
    pub kind: SlideKind,
    pub title: Option<String>,
    pub placement: Option<PlacementRect>,
    pub bullets: Option<Vec<String>>,
    pub text_blocks: Vec<TextBlock>,
    pub image: Option<ImageManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageManifest {
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

impl From<&RasterImage> for ImageManifest {
    fn from(image: &RasterImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            bytes: image.pixels().len(),
        }
    }
}

/// Encodes documents and decks as pretty-printed JSON manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEncoder {
    precision: u32,
}

impl Default for ManifestEncoder {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl ManifestEncoder {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.encoder_precision)
    }

    fn round(&self, value: f64) -> f64 {
        round_to(value, self.precision)
    }

    /// Round both edges of `[start, start + len)`, returning `(start, len)`
    fn round_span(&self, start: f64, len: f64) -> (f64, f64) {
        let first = self.round(start);
        let last = self.round(start + len);
        (first, self.round(last - first))
    }

    fn round_rect(&self, rect: Rect) -> Rect {
        let (x, width) = self.round_span(rect.x, rect.width);
        let (y, height) = self.round_span(rect.y, rect.height);
        Rect::new(x, y, width, height)
    }

    fn round_placement(&self, rect: PlacementRect) -> PlacementRect {
        // Fractions keep two more digits than page units
        let digits = self.precision + 2;
        PlacementRect::new(
            round_to(rect.x, digits),
            round_to(rect.y, digits),
            round_to(rect.w, digits),
            round_to(rect.h, digits),
        )
    }

    pub fn document_manifest(&self, document: &Document) -> DocumentManifest {
        let segments = document
            .strip
            .segments
            .iter()
            .map(|segment| {
                let (top, height) = self.round_span(segment.top, segment.height);
                SegmentManifest {
                    label: segment.label.clone(),
                    image: ImageManifest::from(&segment.image),
                    top,
                    height,
                }
            })
            .collect();

        let pages = document
            .pages
            .iter()
            .map(|page| {
                let sources = document
                    .strip
                    .segments
                    .iter()
                    .enumerate()
                    .filter_map(|(index, segment)| {
                        let (top_px, height_px) =
                            segment.source_rows(page.image_crop_top, page.image_crop_height)?;
                        let (top_px, height_px) = self.round_span(top_px, height_px);
                        Some(SourceRowsManifest {
                            segment: index,
                            top_px,
                            height_px,
                        })
                    })
                    .collect();

                let (crop_top, crop_height) =
                    self.round_span(page.image_crop_top, page.image_crop_height);
                PageManifest {
                    index: page.index,
                    header_text: page.header_text.clone(),
                    footer_text: page.footer_text.clone(),
                    drawable_height: self.round(page.drawable_height),
                    crop_top,
                    crop_height,
                    placement: self.round_rect(page.placement),
                    header_rect: self.round_rect(page.header_rect),
                    footer_rect: self.round_rect(page.footer_rect),
                    sources,
                }
            })
            .collect();

        let (page_width, page_height) = document.page_size;
        DocumentManifest {
            page_width: self.round(page_width),
            page_height: self.round(page_height),
            scaled_height: self.round(document.scaled_height()),
            segments,
            pages,
        }
    }

    pub fn deck_manifest(&self, deck: &Deck) -> DeckManifest {
        let slides = deck
            .slides
            .iter()
            .map(|slide| SlideManifest {
                kind: slide.kind,
                title: slide.title.clone(),
                placement: slide.placement.map(|rect| self.round_placement(rect)),
                bullets: slide.bullets.clone(),
                text_blocks: slide
                    .text_blocks
                    .iter()
                    .map(|block| TextBlock {
                        region: self.round_placement(block.region),
                        ..block.clone()
                    })
                    .collect(),
                image: slide.image.as_ref().map(ImageManifest::from),
            })
            .collect();

        DeckManifest {
            aspect: deck.aspect,
            slides,
        }
    }
}

impl DocumentEncoder for ManifestEncoder {
    fn encode_document(&self, document: Document) -> Result<Vec<u8>, EncodingError> {
        serde_json::to_vec_pretty(&self.document_manifest(&document))
            .map_err(|e| EncodingError::with_source("Failed to serialize document manifest", e))
    }
}

impl DeckEncoder for ManifestEncoder {
    fn encode_deck(&self, deck: Deck) -> Result<Vec<u8>, EncodingError> {
        serde_json::to_vec_pretty(&self.deck_manifest(&deck))
            .map_err(|e| EncodingError::with_source("Failed to serialize deck manifest", e))
    }
}
