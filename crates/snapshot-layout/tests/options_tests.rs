use snapshot_layout::*;

fn expect_config_error(config: &LayoutConfig, needle: &str) {
    match config.validate() {
        Err(ExportError::Config(msg)) => {
            assert!(msg.contains(needle), "message {:?} lacks {:?}", msg, needle);
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_default_config_is_valid() {
    assert!(LayoutConfig::default().validate().is_ok());
}

#[test]
fn test_validation_margins_too_wide() {
    let mut config = LayoutConfig::default();
    config.page.margin_mm = 120.0;
    expect_config_error(&config, "no content width");
}

#[test]
fn test_validation_negative_band() {
    let mut config = LayoutConfig::default();
    config.page.footer_band_mm = -1.0;
    expect_config_error(&config, "footer band");
}

#[test]
fn test_validation_region_outside_slide() {
    let mut config = LayoutConfig::default();
    config.slide.content_region = PlacementRect::new(0.2, 0.2, 0.9, 0.7);
    expect_config_error(&config, "content region");
}

#[test]
fn test_validation_title_overlaps_content() {
    let mut config = LayoutConfig::default();
    config.slide.title_region = PlacementRect::new(0.05, 0.1, 0.9, 0.15);
    expect_config_error(&config, "overlaps");
}

#[test]
fn test_validation_precision() {
    let config = LayoutConfig {
        encoder_precision: 12,
        ..Default::default()
    };
    expect_config_error(&config, "precision");
}

#[test]
fn test_paper_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(
        PaperSize::Letter.dimensions_with_orientation(Orientation::Landscape),
        (279.4, 215.9)
    );
}

#[test]
fn test_metadata_defaults() {
    let metadata = ReportMetadata::new("Ops Review");
    assert_eq!(metadata.short_title(), "Ops Review");
    assert_eq!(metadata.footer, "Confidential");
    assert_eq!(metadata.summary_title, "Summary");
    assert!(metadata.formatted_date().is_none());

    let dated = ReportMetadata {
        date: chrono::NaiveDate::from_ymd_opt(2026, 10, 19),
        ..metadata
    };
    assert_eq!(dated.formatted_date().as_deref(), Some("October 19, 2026"));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let mut config = LayoutConfig::default();
    config.page.paper_size = PaperSize::Letter;
    config.page.orientation = Orientation::Landscape;
    config.slide.aspect = (4.0, 3.0);
    config.bullet_glyph = "-".to_string();
    config.encoder_precision = 3;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    config.save(path).await.unwrap();
    let loaded = LayoutConfig::load(path).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_fills_missing_fields_with_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();
    tokio::fs::write(path, r#"{ "page": { "paper_size": "A3" } }"#)
        .await
        .unwrap();

    let loaded = LayoutConfig::load(path).await.unwrap();
    assert_eq!(loaded.page.paper_size, PaperSize::A3);
    assert_eq!(loaded.page.margin_mm, 10.0);
    assert_eq!(loaded.slide, SlideGeometry::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    tokio::fs::write(path, r#"{ "encoder_precision": 15 }"#)
        .await
        .unwrap();
    assert!(matches!(
        LayoutConfig::load(path).await,
        Err(ExportError::Config(_))
    ));

    tokio::fs::write(path, "not json").await.unwrap();
    match LayoutConfig::load(path).await {
        Err(ExportError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
