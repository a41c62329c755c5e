//! Document assembly: page crops plus header/footer chrome

use crate::layout::{Page, PageCrop, Rect, SnapshotStrip, StripSegment, paginate_height};
use crate::options::{LayoutConfig, ReportMetadata};
use crate::types::*;

/// A paginated document ready for a `DocumentEncoder`
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Sheet size (width, height) in page units
    pub page_size: (f64, f64),
    pub pages: Vec<Page>,
    /// The snapshot(s) the page crops are cut from
    pub strip: SnapshotStrip,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Height of the scaled snapshot strip the pages slice up
    pub fn scaled_height(&self) -> f64 {
        self.strip.total_height()
    }

    /// Source images drawn on `page`, with the pixel rows each contributes
    pub fn sources_for(&self, page: &Page) -> Vec<(&StripSegment, (f64, f64))> {
        self.strip
            .segments_in_band(page.image_crop_top, page.image_crop_height)
            .collect()
    }
}

/// Builds a `Document` from captured sections
pub struct DocumentAssembler<'a> {
    config: &'a LayoutConfig,
    metadata: &'a ReportMetadata,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a LayoutConfig, metadata: &'a ReportMetadata) -> Self {
        Self { config, metadata }
    }

    /// Paginate a single snapshot
    pub fn assemble(&self, section: Section) -> Result<Document> {
        let strip = SnapshotStrip::single(section, self.config.page.content_width())?;
        self.assemble_strip(strip)
    }

    /// Paginate the sections selected by `source`
    pub fn assemble_from(&self, sections: Vec<Section>, source: DocumentSource) -> Result<Document> {
        let sections = match source {
            DocumentSource::First => sections.into_iter().take(1).collect(),
            DocumentSource::Concatenated => sections,
        };
        let strip = SnapshotStrip::stack(sections, self.config.page.content_width())?;
        self.assemble_strip(strip)
    }

    /// Paginate an already-stacked strip
    pub fn assemble_strip(&self, strip: SnapshotStrip) -> Result<Document> {
        let crops = paginate_height(strip.total_height(), &self.config.page)?;
        let total = crops.len();

        let pages: Vec<Page> = crops
            .into_iter()
            .map(|crop| self.build_page(crop, total))
            .collect();

        log::info!(
            "Assembled document: {} page(s) from {} section(s)",
            pages.len(),
            strip.segments.len()
        );

        Ok(Document {
            page_size: self.config.page.dimensions_mm(),
            pages,
            strip,
        })
    }

    fn build_page(&self, crop: PageCrop, total: usize) -> Page {
        let page = &self.config.page;
        let placement = Rect::new(
            page.margin_mm,
            page.header_height(crop.page_index),
            page.content_width(),
            crop.crop_height,
        );

        log::debug!(
            "Page {}/{}: crop {:.2}..{:.2}",
            crop.page_index,
            total,
            crop.crop_top,
            crop.crop_top + crop.crop_height
        );

        Page {
            index: crop.page_index,
            header_text: self.header_text(crop.page_index),
            drawable_height: crop.drawable_height,
            image_crop_top: crop.crop_top,
            image_crop_height: crop.crop_height,
            footer_text: footer_text(&self.metadata.footer, crop.page_index, total),
            placement,
            header_rect: page.header_rect(crop.page_index),
            footer_rect: page.footer_rect(),
        }
    }

    fn header_text(&self, page_index: usize) -> String {
        if page_index > 1 {
            return self.metadata.short_title().to_string();
        }

        let byline: Vec<String> = self
            .metadata
            .company
            .iter()
            .filter(|company| !company.is_empty())
            .cloned()
            .chain(self.metadata.formatted_date())
            .collect();

        if byline.is_empty() {
            self.metadata.title.clone()
        } else {
            format!("{}\n{}", self.metadata.title, byline.join(" | "))
        }
    }
}

/// Expand `{page}` and `{pages}` in a footer template
fn footer_text(template: &str, page_index: usize, total: usize) -> String {
    if !template.contains('{') {
        return template.to_string();
    }
    template
        .replace("{pages}", &total.to_string())
        .replace("{page}", &page_index.to_string())
}
