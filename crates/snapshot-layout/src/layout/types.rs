//! Layout data types
//!
//! These are the descriptors handed to encoders: they carry geometry and
//! text, never pixels (pixels ride along in the owning `RasterImage`).

use crate::types::RasterImage;

/// A rectangle in page units (millimetres).
///
/// Page coordinates have their origin at the top-left corner of the sheet
/// and grow downwards, matching the order in which a tall snapshot is read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Whether `other` lies inside this rectangle, allowing `epsilon` slack
    pub fn contains(&self, other: &Rect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// A rectangle in fractional container coordinates (0.0..=1.0 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PlacementRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.w / self.h
    }

    /// Whether `other` lies inside this rectangle, allowing `epsilon` slack
    pub fn contains(&self, other: &PlacementRect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }

    /// Whether the rectangle lies inside the unit square
    pub fn is_within_unit(&self, epsilon: f64) -> bool {
        PlacementRect::new(0.0, 0.0, 1.0, 1.0).contains(self, epsilon)
    }
}

/// One sheet of the paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub index: usize,
    pub header_text: String,
    /// Height available for the image on this page
    pub drawable_height: f64,
    /// Top of the crop, measured in the scaled snapshot
    pub image_crop_top: f64,
    pub image_crop_height: f64,
    pub footer_text: String,
    /// Where the crop is drawn on the sheet
    pub placement: Rect,
    /// Band the header text is drawn in
    pub header_rect: Rect,
    /// Band the footer text is drawn in
    pub footer_rect: Rect,
}

impl Page {
    pub fn image_crop_bottom(&self) -> f64 {
        self.image_crop_top + self.image_crop_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlideKind {
    Title,
    Section,
    Summary,
}

/// What a fixed text region on a slide holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextRole {
    Title,
    Subtitle,
    Date,
    Heading,
    Bullets,
}

/// A fixed text region on a slide. Each paragraph is rendered on its own line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBlock {
    pub role: TextRole,
    pub paragraphs: Vec<String>,
    pub region: PlacementRect,
}

/// One frame of the slide deck
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub kind: SlideKind,
    pub title: Option<String>,
    /// Image placement (section slides only)
    pub placement: Option<PlacementRect>,
    /// Raw bullet text (summary slides only)
    pub bullets: Option<Vec<String>>,
    pub text_blocks: Vec<TextBlock>,
    /// The snapshot drawn at `placement`
    pub image: Option<RasterImage>,
}

impl Slide {
    pub fn is_kind(&self, kind: SlideKind) -> bool {
        self.kind == kind
    }

    /// Find the text block with the given role
    pub fn text_block(&self, role: TextRole) -> Option<&TextBlock> {
        self.text_blocks.iter().find(|block| block.role == role)
    }
}
