//! Vertical strips of snapshots
//!
//! A strip stacks one or more sections, each scaled to a common width,
//! into one logical tall image. Pagination works on the strip's total
//! height; each page crop is mapped back to source pixel rows per segment.

use crate::types::{ExportError, RasterImage, Result, Section};

use super::geometry::scale_to_width;

/// One section's band inside a strip
#[derive(Debug, Clone, PartialEq)]
pub struct StripSegment {
    pub label: String,
    pub image: RasterImage,
    /// Top of the band in strip units
    pub top: f64,
    /// Height of the band in strip units
    pub height: f64,
    /// Strip units per source pixel
    pub scale: f64,
}

impl StripSegment {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Source pixel rows covered by the strip band `[band_top, band_top + band_height)`.
    ///
    /// Returns `(top_px, height_px)` in unrounded source pixels, or `None`
    /// when the band misses this segment.
    pub fn source_rows(&self, band_top: f64, band_height: f64) -> Option<(f64, f64)> {
        let start = band_top.max(self.top);
        let end = (band_top + band_height).min(self.bottom());
        if end <= start {
            return None;
        }
        Some(((start - self.top) / self.scale, (end - start) / self.scale))
    }
}

/// Sections stacked top to bottom at a common width
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotStrip {
    pub width: f64,
    pub segments: Vec<StripSegment>,
}

impl SnapshotStrip {
    /// Stack `sections` in input order, scaling each to `width`.
    pub fn stack(sections: Vec<Section>, width: f64) -> Result<Self> {
        if sections.is_empty() {
            return Err(ExportError::NoSections);
        }

        let mut segments = Vec::with_capacity(sections.len());
        let mut top = 0.0;
        for Section { label, image } in sections {
            let height = scale_to_width(image.width() as f64, image.height() as f64, width)?;
            let scale = width / image.width() as f64;
            segments.push(StripSegment {
                label,
                image,
                top,
                height,
                scale,
            });
            top += height;
        }

        Ok(Self { width, segments })
    }

    /// A strip holding a single snapshot
    pub fn single(section: Section, width: f64) -> Result<Self> {
        Self::stack(vec![section], width)
    }

    pub fn total_height(&self) -> f64 {
        self.segments
            .last()
            .map(StripSegment::bottom)
            .unwrap_or(0.0)
    }

    /// Segments intersecting a band, paired with their source pixel rows
    pub fn segments_in_band(
        &self,
        band_top: f64,
        band_height: f64,
    ) -> impl Iterator<Item = (&StripSegment, (f64, f64))> {
        self.segments.iter().filter_map(move |segment| {
            segment
                .source_rows(band_top, band_height)
                .map(|rows| (segment, rows))
        })
    }
}
