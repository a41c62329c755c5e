use chrono::NaiveDate;
use snapshot_layout::*;

fn section(label: &str, width: u32, height: u32) -> Section {
    Section::new(label, RasterImage::without_pixels(width, height).unwrap())
}

fn sample_sections() -> Vec<Section> {
    vec![
        section("Traffic", 1920, 1080),
        section("Conversions", 500, 2000),
        section("Revenue", 1200, 900),
    ]
}

fn metadata() -> ReportMetadata {
    ReportMetadata {
        company: Some("Acme".to_string()),
        date: NaiveDate::from_ymd_opt(2026, 3, 4),
        short_title: Some("Q1".to_string()),
        footer: "Page {page} of {pages}".to_string(),
        ..ReportMetadata::new("Q1 Marketing Report")
    }
}

#[test]
fn test_deck_without_bullets_has_no_summary() {
    let config = LayoutConfig::default();
    let deck = assemble_deck(sample_sections(), &[], &metadata(), &config).unwrap();

    assert_eq!(deck.slide_count(), 1 + 3);
    assert!(!deck.has_summary());
    assert!(deck.slides[0].is_kind(SlideKind::Title));
    assert_eq!(deck.section_slides().count(), 3);
}

#[test]
fn test_deck_builder_appends_only_placed_slides() {
    let config = LayoutConfig::default();
    let meta = metadata();
    let mut builder = DeckBuilder::new(&config, &meta);
    builder.push_section(section("Traffic", 1920, 1080)).unwrap();
    assert_eq!(builder.section_count(), 1);

    let mut broken = LayoutConfig::default();
    broken.slide.content_region.w = 0.0;
    let mut broken_builder = DeckBuilder::new(&broken, &meta);
    assert!(matches!(
        broken_builder.push_section(section("Traffic", 1920, 1080)),
        Err(ExportError::InvalidDimension { .. })
    ));
    assert_eq!(broken_builder.section_count(), 0);

    let deck = builder.finish(&[]);
    assert_eq!(deck.slides[1].title.as_deref(), Some("Traffic"));
}

#[test]
fn test_deck_with_bullets_ends_in_summary() {
    let config = LayoutConfig::default();
    let bullets = vec!["Traffic up 12%".to_string(), "CPA down".to_string()];
    let deck = assemble_deck(sample_sections(), &bullets, &metadata(), &config).unwrap();

    assert_eq!(deck.slide_count(), 5);
    assert!(deck.has_summary());

    let summary = deck.slides.last().unwrap();
    assert_eq!(summary.bullets.as_deref(), Some(&bullets[..]));
    let body = summary.text_block(TextRole::Bullets).unwrap();
    assert_eq!(body.paragraphs[0], "\u{2022} Traffic up 12%");
}

#[test]
fn test_section_slides_follow_input_order() {
    let config = LayoutConfig::default();
    let deck = assemble_deck(sample_sections(), &[], &metadata(), &config).unwrap();

    let titles: Vec<&str> = deck
        .section_slides()
        .filter_map(|slide| slide.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["Traffic", "Conversions", "Revenue"]);

    for slide in deck.section_slides() {
        assert!(slide.placement.is_some());
        assert!(slide.image.is_some());
        assert_eq!(
            slide.text_block(TextRole::Heading).map(|b| b.region),
            Some(config.slide.title_region)
        );
    }
}

#[test]
fn test_assembly_is_deterministic() {
    let config = LayoutConfig::default();
    let meta = metadata();

    let first = assemble_deck(sample_sections(), &[], &meta, &config).unwrap();
    let second = assemble_deck(sample_sections(), &[], &meta, &config).unwrap();
    assert_eq!(first, second);

    let assembler = DocumentAssembler::new(&config, &meta);
    let a = assembler
        .assemble_from(sample_sections(), DocumentSource::Concatenated)
        .unwrap();
    let b = assembler
        .assemble_from(sample_sections(), DocumentSource::Concatenated)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_title_slide_text() {
    let config = LayoutConfig::default();
    let deck = assemble_deck(sample_sections(), &[], &metadata(), &config).unwrap();
    let title = &deck.slides[0];

    assert_eq!(
        title.text_block(TextRole::Title).unwrap().paragraphs,
        vec!["Q1 Marketing Report".to_string()]
    );
    assert_eq!(
        title.text_block(TextRole::Subtitle).unwrap().paragraphs,
        vec!["Acme".to_string()]
    );
    assert_eq!(
        title.text_block(TextRole::Date).unwrap().paragraphs,
        vec!["March 4, 2026".to_string()]
    );
}

#[test]
fn test_document_pages_carry_chrome() {
    let config = LayoutConfig::default();
    let meta = metadata();
    let assembler = DocumentAssembler::new(&config, &meta);
    let document = assembler.assemble(section("Overview", 1000, 4000)).unwrap();

    assert_eq!(document.page_size, (210.0, 297.0));
    assert_eq!(document.page_count(), 3);

    let headers: Vec<&str> = document.pages.iter().map(|p| p.header_text.as_str()).collect();
    assert_eq!(
        headers,
        vec!["Q1 Marketing Report\nAcme | March 4, 2026", "Q1", "Q1"]
    );

    let footers: Vec<&str> = document.pages.iter().map(|p| p.footer_text.as_str()).collect();
    assert_eq!(footers, vec!["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);

    assert_eq!(document.pages[0].placement, Rect::new(10.0, 30.0, 190.0, 247.0));
    assert_eq!(document.pages[1].placement, Rect::new(10.0, 20.0, 190.0, 257.0));
    assert_eq!(document.pages[2].placement, Rect::new(10.0, 20.0, 190.0, 256.0));
}

#[test]
fn test_pages_stay_inside_the_sheet() {
    let config = LayoutConfig::default();
    let meta = metadata();
    let assembler = DocumentAssembler::new(&config, &meta);
    let document = assembler.assemble(section("Overview", 800, 9000)).unwrap();

    let (width, height) = document.page_size;
    let footer = config.page.footer_rect();
    for page in &document.pages {
        assert!(page.placement.right() <= width - config.page.margin_mm + 1e-9);
        assert!(page.placement.bottom() <= footer.y + 1e-9);
        assert!(footer.bottom() <= height - config.page.margin_mm + 1e-9);
    }
}

#[test]
fn test_first_source_ignores_later_sections() {
    let config = LayoutConfig::default();
    let meta = metadata();
    let document = DocumentAssembler::new(&config, &meta)
        .assemble_from(sample_sections(), DocumentSource::First)
        .unwrap();

    assert_eq!(document.strip.segments.len(), 1);
    assert_eq!(document.strip.segments[0].label, "Traffic");
    // 1920 x 1080 scaled to 190 wide
    assert!((document.scaled_height() - 106.875).abs() < 1e-9);
    assert_eq!(document.page_count(), 1);
}

#[test]
fn test_concatenated_page_draws_from_two_sections() {
    let config = LayoutConfig::default();
    let meta = metadata();
    let document = DocumentAssembler::new(&config, &meta)
        .assemble_from(
            vec![section("Top", 1000, 2000), section("Bottom", 1000, 2000)],
            DocumentSource::Concatenated,
        )
        .unwrap();

    // Each section is 380 units tall; page 2 covers 247..504
    assert!((document.scaled_height() - 760.0).abs() < 1e-9);
    assert_eq!(document.page_count(), 3);

    let sources = document.sources_for(&document.pages[1]);
    assert_eq!(sources.len(), 2);

    let (top, (top_px, top_rows)) = sources[0];
    assert_eq!(top.label, "Top");
    assert!((top_px - 1300.0).abs() < 1e-6);
    assert!((top_rows - 700.0).abs() < 1e-6);

    let (bottom, (bottom_px, bottom_rows)) = sources[1];
    assert_eq!(bottom.label, "Bottom");
    assert!(bottom_px.abs() < 1e-6);
    assert!((bottom_rows - 12400.0 / 19.0).abs() < 1e-6);
}
