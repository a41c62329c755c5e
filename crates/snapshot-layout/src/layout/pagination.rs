//! Pagination of a tall snapshot into page-sized crops
//!
//! The snapshot is scaled to the page content width, then sliced top to
//! bottom. Page 1 has a taller header than the rest, so it gets less room.
//! Slicing is a fold over a `{ offset, page_index }` cursor; each step
//! yields one immutable `PageCrop`.

use crate::constants::MAX_PAGES;
use crate::options::PageGeometry;
use crate::types::{ExportError, RasterImage, Result};

use super::geometry::scale_to_width;

/// One page's slice of the scaled snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCrop {
    /// 1-based page number
    pub page_index: usize,
    /// Height available for the image on this page
    pub drawable_height: f64,
    pub crop_top: f64,
    pub crop_height: f64,
}

/// A snapshot scaled to content width and sliced into pages
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Factor applied to source pixels to reach page units
    pub scale: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub crops: Vec<PageCrop>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    offset: f64,
    page_index: usize,
}

/// Iterator over the page crops of a scaled height.
///
/// Terminates because every step advances the offset by a strictly positive
/// amount bounded below by `min(drawable_other, remaining)`.
#[derive(Debug, Clone)]
pub struct PageCrops {
    scaled_height: f64,
    drawable_first: f64,
    drawable_other: f64,
    cursor: Cursor,
}

impl Iterator for PageCrops {
    type Item = PageCrop;

    fn next(&mut self) -> Option<PageCrop> {
        let Cursor { offset, page_index } = self.cursor;
        if offset >= self.scaled_height {
            return None;
        }

        let drawable_height = if page_index == 1 {
            self.drawable_first
        } else {
            self.drawable_other
        };
        let remaining = self.scaled_height - offset;
        let (crop_height, next_offset) = if remaining <= drawable_height {
            // Last page ends exactly at the snapshot bottom
            (remaining, self.scaled_height)
        } else {
            (drawable_height, offset + drawable_height)
        };

        self.cursor = Cursor {
            offset: next_offset,
            page_index: page_index + 1,
        };

        Some(PageCrop {
            page_index,
            drawable_height,
            crop_top: offset,
            crop_height,
        })
    }
}

/// Lazily slice `scaled_height` page units into crops.
pub fn page_crops(scaled_height: f64, page: &PageGeometry) -> Result<PageCrops> {
    if scaled_height.is_nan() || scaled_height <= 0.0 {
        return Err(ExportError::EmptySnapshot { scaled_height });
    }
    if scaled_height.is_infinite() {
        return Err(ExportError::InvalidDimension {
            what: "scaled snapshot",
            width: page.content_width(),
            height: scaled_height,
        });
    }

    let drawable_first = page.drawable_height_first();
    let drawable_other = page.drawable_height_other();
    if !(drawable_first > 0.0 && drawable_other > 0.0) {
        return Err(ExportError::Config(format!(
            "Page leaves no drawable height (first page {}, other pages {})",
            drawable_first, drawable_other
        )));
    }

    let pages = page_count(scaled_height, page);
    if pages > MAX_PAGES {
        return Err(ExportError::TooManyPages {
            pages,
            limit: MAX_PAGES,
        });
    }

    Ok(PageCrops {
        scaled_height,
        drawable_first,
        drawable_other,
        cursor: Cursor {
            offset: 0.0,
            page_index: 1,
        },
    })
}

/// Slice a height that is already in page units.
pub fn paginate_height(scaled_height: f64, page: &PageGeometry) -> Result<Vec<PageCrop>> {
    Ok(page_crops(scaled_height, page)?.collect())
}

/// Scale `image` to the page content width and slice it into crops.
pub fn paginate(image: &RasterImage, page: &PageGeometry) -> Result<Pagination> {
    let source_w = image.width() as f64;
    let source_h = image.height() as f64;
    let scaled_width = page.content_width();
    let scaled_height = scale_to_width(source_w, source_h, scaled_width)?;

    let crops = paginate_height(scaled_height, page)?;
    log::debug!(
        "Paginated {}x{} snapshot: {:.2} units tall over {} page(s)",
        image.width(),
        image.height(),
        scaled_height,
        crops.len()
    );

    Ok(Pagination {
        scale: scaled_width / source_w,
        scaled_width,
        scaled_height,
        crops,
    })
}

/// Number of pages `scaled_height` needs. Zero for non-paginable heights.
pub fn page_count(scaled_height: f64, page: &PageGeometry) -> usize {
    let first = page.drawable_height_first();
    let other = page.drawable_height_other();
    if !(scaled_height > 0.0 && scaled_height.is_finite() && first > 0.0 && other > 0.0) {
        return 0;
    }
    if scaled_height <= first {
        return 1;
    }
    1 + ((scaled_height - first) / other).ceil() as usize
}
