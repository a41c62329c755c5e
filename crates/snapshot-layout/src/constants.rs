//! Shared constants for snapshot layout
//!
//! Defaults for `LayoutConfig`. The engines never read these directly;
//! they always go through the config that was passed in. The one exception
//! is `MAX_PAGES`, a hard limit rather than a default.

// =============================================================================
// Page Geometry (millimetres)
// =============================================================================

/// Margin on every side of a document page
pub const PAGE_MARGIN_MM: f64 = 10.0;

/// Header band on the first page (title, company, date)
pub const FIRST_PAGE_HEADER_MM: f64 = 30.0;

/// Header band on every following page (short title)
pub const SUBSEQUENT_PAGE_HEADER_MM: f64 = 20.0;

/// Footer band, reserved just above the bottom margin
pub const FOOTER_BAND_MM: f64 = 10.0;

// =============================================================================
// Slide Geometry (fractions of the slide)
// =============================================================================

/// Default slide aspect ratio (16:9)
pub const SLIDE_ASPECT: (f64, f64) = (16.0, 9.0);

/// Width of the image content area
pub const CONTENT_AREA_WIDTH: f64 = 0.9;

/// Height of the image content area
pub const CONTENT_AREA_HEIGHT: f64 = 0.7;

/// Top of the image content area (bottom of the title band)
pub const CONTENT_AREA_TOP: f64 = 0.2;

/// Height of the section title region at the top of the slide
pub const TITLE_REGION_HEIGHT: f64 = 0.15;

/// Tops of the title slide's text rows (title, company, date)
pub const TITLE_SLIDE_ROWS: [f64; 3] = [0.4, 0.6, 0.8];

/// Size of each title slide text block
pub const TITLE_SLIDE_BLOCK: (f64, f64) = (0.8, 0.1);

/// Summary slide title band: top and height
pub const SUMMARY_TITLE_BAND: (f64, f64) = (0.05, 0.10);

/// Summary slide bullet block: x range and y range
pub const SUMMARY_BODY_X: (f64, f64) = (0.10, 0.90);
pub const SUMMARY_BODY_Y: (f64, f64) = (0.25, 0.85);

// =============================================================================
// Text & Encoding
// =============================================================================

/// Glyph prefixed to every summary bullet paragraph
pub const DEFAULT_BULLET_GLYPH: &str = "\u{2022}";

/// Decimal places kept when coordinates are handed to an encoder
pub const DEFAULT_ENCODER_PRECISION: u32 = 2;

/// Tolerance for aspect ratio comparisons
pub const ASPECT_EPSILON: f64 = 1e-6;

// =============================================================================
// Limits
// =============================================================================

/// Most pages a single document may paginate into
pub const MAX_PAGES: usize = 100_000;
