use crate::capture::CaptureError;
use crate::encode::EncodingError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid dimension for {what}: {width} x {height}")]
    InvalidDimension {
        what: &'static str,
        width: f64,
        height: f64,
    },
    #[error("Snapshot has nothing to paginate (scaled height {scaled_height})")]
    EmptySnapshot { scaled_height: f64 },
    #[error("Snapshot would need {pages} pages, more than the limit of {limit}")]
    TooManyPages { pages: usize, limit: usize },
    #[error("Capture failed for section {section} ({label}): {source}")]
    Capture {
        section: usize,
        label: String,
        #[source]
        source: CaptureError,
    },
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No sections to export")]
    NoSections,
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes for the paginated document
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Opaque pixel payload of a captured snapshot.
///
/// The layout engine never looks inside; it only travels with the image so
/// an encoder can draw it. Cloning shares the underlying buffer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Pixels(Arc<[u8]>);

impl Pixels {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pixels({} bytes)", self.0.len())
    }
}

/// A captured snapshot: pixel dimensions plus an opaque pixel handle.
///
/// Immutable once built. Both dimensions are guaranteed non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Pixels,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, pixels: Pixels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidDimension {
                what: "raster image",
                width: width as f64,
                height: height as f64,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image with known dimensions but no pixel payload (layout-only use)
    pub fn without_pixels(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, Pixels::default())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }
}

/// A labelled snapshot of one dashboard view section
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: String,
    pub image: RasterImage,
}

impl Section {
    pub fn new(label: impl Into<String>, image: RasterImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}

/// Which snapshot(s) the paginated document is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentSource {
    /// Paginate only the first section
    #[default]
    First,
    /// Stack every section into one tall strip and paginate that
    Concatenated,
}

/// Statistics about an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportStatistics {
    /// Sections requested
    pub sections: usize,
    /// Sections captured and laid out
    pub sections_produced: usize,
    /// Document page count (0 when no document was assembled)
    pub pages: usize,
    /// Deck slide count, title and summary included
    pub slides: usize,
    /// Height of the scaled snapshot strip in page units
    pub scaled_height: f64,
    /// Unused drawable height on the last page
    pub blank_tail: f64,
}
