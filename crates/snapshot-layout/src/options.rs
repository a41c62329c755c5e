use crate::constants::*;
use crate::layout::{PlacementRect, Rect};
use crate::types::*;
use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical page geometry for the paginated document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageGeometry {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Margin on every side
    pub margin_mm: f64,
    /// Header band on page 1
    pub first_header_mm: f64,
    /// Header band on pages 2..N
    pub subsequent_header_mm: f64,
    /// Footer band above the bottom margin
    pub footer_band_mm: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: PAGE_MARGIN_MM,
            first_header_mm: FIRST_PAGE_HEADER_MM,
            subsequent_header_mm: SUBSEQUENT_PAGE_HEADER_MM,
            footer_band_mm: FOOTER_BAND_MM,
        }
    }
}

impl PageGeometry {
    /// Sheet size (width, height) with orientation applied
    pub fn dimensions_mm(&self) -> (f64, f64) {
        self.paper_size
            .dimensions_with_orientation(self.orientation)
    }

    /// Width every snapshot is scaled to
    pub fn content_width(&self) -> f64 {
        let (width, _) = self.dimensions_mm();
        width - 2.0 * self.margin_mm
    }

    /// Header band height for a 1-based page number
    pub fn header_height(&self, page_index: usize) -> f64 {
        if page_index <= 1 {
            self.first_header_mm
        } else {
            self.subsequent_header_mm
        }
    }

    /// Height left for the image on a 1-based page number
    pub fn drawable_height(&self, page_index: usize) -> f64 {
        let (_, height) = self.dimensions_mm();
        height - self.header_height(page_index) - self.footer_band_mm - self.margin_mm
    }

    pub fn drawable_height_first(&self) -> f64 {
        self.drawable_height(1)
    }

    pub fn drawable_height_other(&self) -> f64 {
        self.drawable_height(2)
    }

    /// Band reserved for the footer text, directly above the bottom margin
    pub fn footer_rect(&self) -> Rect {
        let (width, height) = self.dimensions_mm();
        Rect::new(
            self.margin_mm,
            height - self.margin_mm - self.footer_band_mm,
            width - 2.0 * self.margin_mm,
            self.footer_band_mm,
        )
    }

    /// Band reserved for the header text on a 1-based page number
    pub fn header_rect(&self, page_index: usize) -> Rect {
        let (width, _) = self.dimensions_mm();
        Rect::new(
            self.margin_mm,
            self.margin_mm,
            width - 2.0 * self.margin_mm,
            self.header_height(page_index) - self.margin_mm,
        )
    }
}

/// Fixed-aspect slide container and its named regions, in fractions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlideGeometry {
    /// Slide aspect ratio as (width, height), e.g. (16, 9)
    pub aspect: (f64, f64),
    /// Section title band
    pub title_region: PlacementRect,
    /// Area section images are fitted into
    pub content_region: PlacementRect,
    /// Tops of the title slide rows (title, company, date)
    pub title_slide_rows: [f64; 3],
    /// Size (w, h) of each title slide text block
    pub title_slide_block: (f64, f64),
    pub summary_title_region: PlacementRect,
    pub summary_body_region: PlacementRect,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        let (summary_x0, summary_x1) = SUMMARY_BODY_X;
        let (summary_y0, summary_y1) = SUMMARY_BODY_Y;
        let (summary_title_top, summary_title_height) = SUMMARY_TITLE_BAND;
        Self {
            aspect: SLIDE_ASPECT,
            title_region: PlacementRect::new(
                (1.0 - CONTENT_AREA_WIDTH) / 2.0,
                0.0,
                CONTENT_AREA_WIDTH,
                TITLE_REGION_HEIGHT,
            ),
            content_region: PlacementRect::new(
                (1.0 - CONTENT_AREA_WIDTH) / 2.0,
                CONTENT_AREA_TOP,
                CONTENT_AREA_WIDTH,
                CONTENT_AREA_HEIGHT,
            ),
            title_slide_rows: TITLE_SLIDE_ROWS,
            title_slide_block: TITLE_SLIDE_BLOCK,
            summary_title_region: PlacementRect::new(
                summary_x0,
                summary_title_top,
                summary_x1 - summary_x0,
                summary_title_height,
            ),
            summary_body_region: PlacementRect::new(
                summary_x0,
                summary_y0,
                summary_x1 - summary_x0,
                summary_y1 - summary_y0,
            ),
        }
    }
}

/// Layout configuration shared by the pagination and slide engines
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub page: PageGeometry,
    pub slide: SlideGeometry,
    /// Prefix for every summary bullet paragraph
    pub bullet_glyph: String,
    /// Decimal places kept for coordinates handed to an encoder
    pub encoder_precision: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            slide: SlideGeometry::default(),
            bullet_glyph: DEFAULT_BULLET_GLYPH.to_string(),
            encoder_precision: DEFAULT_ENCODER_PRECISION,
        }
    }
}

impl LayoutConfig {
    /// Load a config from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ExportError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        self.validate_page()?;
        self.validate_slide()?;

        if self.encoder_precision > 9 {
            return Err(ExportError::Config(format!(
                "Encoder precision of {} decimals is beyond f64 page coordinates",
                self.encoder_precision
            )));
        }

        Ok(())
    }

    fn validate_page(&self) -> Result<()> {
        let page = &self.page;
        let (width, height) = page.dimensions_mm();
        if !(width > 0.0 && height > 0.0) {
            return Err(ExportError::Config(format!(
                "Paper size must be positive, got {} x {}",
                width, height
            )));
        }

        let bands = [
            ("margin", page.margin_mm),
            ("first page header", page.first_header_mm),
            ("page header", page.subsequent_header_mm),
            ("footer band", page.footer_band_mm),
        ];
        for (name, value) in bands {
            if !(value >= 0.0) {
                return Err(ExportError::Config(format!(
                    "The {} cannot be negative ({})",
                    name, value
                )));
            }
        }

        if page.content_width() <= 0.0 {
            return Err(ExportError::Config(format!(
                "Margins of {}mm leave no content width on a {}mm wide page",
                page.margin_mm, width
            )));
        }

        if page.drawable_height_first() <= 0.0 || page.drawable_height_other() <= 0.0 {
            return Err(ExportError::Config(format!(
                "Header, footer and margin bands leave no drawable height on a {}mm tall page",
                height
            )));
        }

        Ok(())
    }

    fn validate_slide(&self) -> Result<()> {
        let slide = &self.slide;
        if !(slide.aspect.0 > 0.0 && slide.aspect.1 > 0.0) {
            return Err(ExportError::Config(format!(
                "Slide aspect must be positive, got {}:{}",
                slide.aspect.0, slide.aspect.1
            )));
        }

        let regions = [
            ("title region", slide.title_region),
            ("content region", slide.content_region),
            ("summary title region", slide.summary_title_region),
            ("summary body region", slide.summary_body_region),
        ];
        for (name, region) in regions {
            if !(region.w > 0.0 && region.h > 0.0) || !region.is_within_unit(0.0) {
                return Err(ExportError::Config(format!(
                    "The {} must be a non-empty rectangle inside the slide, got {:?}",
                    name, region
                )));
            }
        }

        if slide.title_region.bottom() > slide.content_region.y {
            return Err(ExportError::Config(
                "The title region overlaps the content region".to_string(),
            ));
        }

        let (block_w, block_h) = slide.title_slide_block;
        if !(block_w > 0.0 && block_w <= 1.0 && block_h > 0.0) {
            return Err(ExportError::Config(format!(
                "Title slide blocks must fit the slide width, got {} x {}",
                block_w, block_h
            )));
        }
        if slide
            .title_slide_rows
            .iter()
            .any(|&row| !(row >= 0.0 && row + block_h <= 1.0))
        {
            return Err(ExportError::Config(format!(
                "Title slide rows {:?} push blocks off the slide",
                slide.title_slide_rows
            )));
        }

        Ok(())
    }
}

/// Report-level text attached to page headers, footers and the title slide
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportMetadata {
    pub title: String,
    /// Header for pages 2..N; falls back to `title`
    pub short_title: Option<String>,
    pub company: Option<String>,
    pub date: Option<NaiveDate>,
    /// Footer on every page. `{page}` and `{pages}` are substituted.
    pub footer: String,
    /// Heading of the closing bullet slide
    pub summary_title: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            title: "Report".to_string(),
            short_title: None,
            company: None,
            date: None,
            footer: "Confidential".to_string(),
            summary_title: "Summary".to_string(),
        }
    }
}

impl ReportMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn short_title(&self) -> &str {
        self.short_title.as_deref().unwrap_or(&self.title)
    }

    pub fn formatted_date(&self) -> Option<String> {
        self.date.map(|date| date.format("%B %-d, %Y").to_string())
    }
}
