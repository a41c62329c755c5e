//! Slide placement
//!
//! Section images are fitted into the slide's content region without
//! distortion and centred in it. Title and summary slides use fixed text
//! regions and carry no image.
//!
//! All coordinates are fractions of the slide. Aspect is preserved in
//! fraction space: `w / h` of the placement equals the image's `w / h`.

use crate::options::{LayoutConfig, SlideGeometry};
use crate::types::Result;

use super::geometry::{center, fit_preserving_aspect};
use super::{PlacementRect, TextBlock, TextRole};

/// Which bound limited a section image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Image is relatively wide: fills the content width, centred vertically
    Width,
    /// Image is relatively tall: fills the content height, flush under the title
    Height,
}

/// Placement of one section image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPlacement {
    pub rect: PlacementRect,
    pub constraint: Constraint,
}

/// Fit a `image_w x image_h` image into the content region and centre it.
pub fn place_section_image(
    image_w: f64,
    image_h: f64,
    slide: &SlideGeometry,
) -> Result<SectionPlacement> {
    let content = slide.content_region;
    let (w, h) = fit_preserving_aspect(image_w, image_h, content.w, content.h)?;
    let (dx, dy) = center(content.w, content.h, w, h);

    let constraint = if w == content.w {
        Constraint::Width
    } else {
        Constraint::Height
    };

    Ok(SectionPlacement {
        rect: PlacementRect::new(content.x + dx, content.y + dy, w, h),
        constraint,
    })
}

/// Heading block for a section slide
pub fn section_heading(label: &str, slide: &SlideGeometry) -> TextBlock {
    TextBlock {
        role: TextRole::Heading,
        paragraphs: vec![label.to_string()],
        region: slide.title_region,
    }
}

/// Centred text rows for the title slide: title, then company, then date.
///
/// Rows keep their fixed positions; a missing line leaves its row empty.
pub fn title_slide_blocks(
    title: &str,
    company: Option<&str>,
    date: Option<&str>,
    slide: &SlideGeometry,
) -> Vec<TextBlock> {
    let (block_w, block_h) = slide.title_slide_block;
    let (x, _) = center(1.0, 1.0, block_w, block_h);

    let rows = [
        (TextRole::Title, Some(title)),
        (TextRole::Subtitle, company),
        (TextRole::Date, date),
    ];

    rows.into_iter()
        .zip(slide.title_slide_rows)
        .filter_map(|((role, text), top)| {
            let text = text.filter(|t| !t.is_empty())?;
            Some(TextBlock {
                role,
                paragraphs: vec![text.to_string()],
                region: PlacementRect::new(x, top, block_w, block_h),
            })
        })
        .collect()
}

/// Title and bullet blocks for the summary slide
pub fn summary_blocks(title: &str, bullets: &[String], config: &LayoutConfig) -> Vec<TextBlock> {
    vec![
        TextBlock {
            role: TextRole::Title,
            paragraphs: vec![title.to_string()],
            region: config.slide.summary_title_region,
        },
        TextBlock {
            role: TextRole::Bullets,
            paragraphs: bullet_paragraphs(bullets, &config.bullet_glyph),
            region: config.slide.summary_body_region,
        },
    ]
}

/// One paragraph per bullet, prefixed with the glyph
pub fn bullet_paragraphs(bullets: &[String], glyph: &str) -> Vec<String> {
    bullets
        .iter()
        .map(|bullet| {
            if glyph.is_empty() {
                bullet.clone()
            } else {
                format!("{} {}", glyph, bullet)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_image_is_vertically_centred() {
        let slide = SlideGeometry::default();
        let placement = place_section_image(3000.0, 1000.0, &slide).unwrap();
        assert_eq!(placement.constraint, Constraint::Width);
        assert_eq!(placement.rect.w, 0.9);
        assert!((placement.rect.h - 0.3).abs() < 1e-12);
        assert!((placement.rect.y - (0.2 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_tall_image_is_flush_under_title() {
        let slide = SlideGeometry::default();
        let placement = place_section_image(100.0, 1000.0, &slide).unwrap();
        assert_eq!(placement.constraint, Constraint::Height);
        assert_eq!(placement.rect.h, 0.7);
        assert_eq!(placement.rect.y, 0.2);
    }

    #[test]
    fn test_title_slide_rows() {
        let slide = SlideGeometry::default();
        let blocks = title_slide_blocks("Q3", Some("Acme"), Some("May 1, 2026"), &slide);
        let tops: Vec<f64> = blocks.iter().map(|b| b.region.y).collect();
        assert_eq!(tops, vec![0.4, 0.6, 0.8]);
        assert!(blocks.iter().all(|b| (b.region.x - 0.1).abs() < 1e-12));
    }

    #[test]
    fn test_title_slide_skips_missing_lines() {
        let slide = SlideGeometry::default();
        let blocks = title_slide_blocks("Q3", None, Some("May 1, 2026"), &slide);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].role, TextRole::Title);
        assert_eq!(blocks[1].role, TextRole::Date);
        assert_eq!(blocks[1].region.y, 0.8);
    }

    #[test]
    fn test_bullet_paragraphs() {
        let bullets = vec!["Traffic up".to_string(), "Spend flat".to_string()];
        assert_eq!(
            bullet_paragraphs(&bullets, "\u{2022}"),
            vec!["\u{2022} Traffic up", "\u{2022} Spend flat"]
        );
        assert_eq!(bullet_paragraphs(&bullets, ""), bullets);
    }
}
