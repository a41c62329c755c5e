//! Deck assembly: title slide, one slide per section, optional summary

use crate::layout::{
    Slide, SlideKind, place_section_image, section_heading, summary_blocks, title_slide_blocks,
};
use crate::options::{LayoutConfig, ReportMetadata};
use crate::types::*;

/// An ordered slide deck ready for a `DeckEncoder`
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Slide aspect as (width, height)
    pub aspect: (f64, f64),
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn section_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides
            .iter()
            .filter(|slide| slide.is_kind(SlideKind::Section))
    }

    pub fn has_summary(&self) -> bool {
        self.slides
            .last()
            .is_some_and(|slide| slide.is_kind(SlideKind::Summary))
    }
}

/// Incrementally builds a deck as sections arrive, strictly in call order.
///
/// The title slide exists from the start; a section slide is appended only
/// after its placement has been computed.
pub struct DeckBuilder<'a> {
    config: &'a LayoutConfig,
    metadata: &'a ReportMetadata,
    slides: Vec<Slide>,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(config: &'a LayoutConfig, metadata: &'a ReportMetadata) -> Self {
        let date = metadata.formatted_date();
        let title = Slide {
            kind: SlideKind::Title,
            title: Some(metadata.title.clone()),
            placement: None,
            bullets: None,
            text_blocks: title_slide_blocks(
                &metadata.title,
                metadata.company.as_deref(),
                date.as_deref(),
                &config.slide,
            ),
            image: None,
        };

        Self {
            config,
            metadata,
            slides: vec![title],
        }
    }

    /// Lay out one section and append its slide
    pub fn push_section(&mut self, section: Section) -> Result<()> {
        let Section { label, image } = section;
        let placement = place_section_image(
            image.width() as f64,
            image.height() as f64,
            &self.config.slide,
        )?;

        log::debug!(
            "Slide {} \"{}\": {:?}-constrained at ({:.3}, {:.3}) {:.3} x {:.3}",
            self.slides.len() + 1,
            label,
            placement.constraint,
            placement.rect.x,
            placement.rect.y,
            placement.rect.w,
            placement.rect.h
        );

        self.slides.push(Slide {
            kind: SlideKind::Section,
            text_blocks: vec![section_heading(&label, &self.config.slide)],
            title: Some(label),
            placement: Some(placement.rect),
            bullets: None,
            image: Some(image),
        });
        Ok(())
    }

    /// Number of section slides so far
    pub fn section_count(&self) -> usize {
        self.slides.len() - 1
    }

    /// Close the deck, adding a summary slide when there are bullets
    pub fn finish(mut self, bullets: &[String]) -> Deck {
        let sections = self.section_count();
        if !bullets.is_empty() {
            let title = &self.metadata.summary_title;
            self.slides.push(Slide {
                kind: SlideKind::Summary,
                title: Some(title.clone()),
                placement: None,
                bullets: Some(bullets.to_vec()),
                text_blocks: summary_blocks(title, bullets, self.config),
                image: None,
            });
        }

        log::info!(
            "Assembled deck: {} slide(s), {} section(s)",
            self.slides.len(),
            sections
        );

        Deck {
            aspect: self.config.slide.aspect,
            slides: self.slides,
        }
    }
}

/// Build a complete deck from captured sections in input order
pub fn assemble_deck(
    sections: Vec<Section>,
    bullets: &[String],
    metadata: &ReportMetadata,
    config: &LayoutConfig,
) -> Result<Deck> {
    let mut builder = DeckBuilder::new(config, metadata);
    for section in sections {
        builder.push_section(section)?;
    }
    Ok(builder.finish(bullets))
}
