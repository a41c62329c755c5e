use proptest::prelude::*;
use snapshot_layout::layout::*;
use snapshot_layout::*;

fn a4() -> PageGeometry {
    PageGeometry::default()
}

#[test]
fn test_tall_snapshot_spans_three_pages() {
    let image = RasterImage::without_pixels(1000, 4000).unwrap();
    let pagination = paginate(&image, &a4()).unwrap();

    assert_eq!(pagination.scaled_height, 760.0);
    let heights: Vec<f64> = pagination.crops.iter().map(|c| c.crop_height).collect();
    assert_eq!(heights, vec![247.0, 257.0, 256.0]);

    let tops: Vec<f64> = pagination.crops.iter().map(|c| c.crop_top).collect();
    assert_eq!(tops, vec![0.0, 247.0, 504.0]);

    let indices: Vec<usize> = pagination.crops.iter().map(|c| c.page_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn test_landscape_pages_are_shorter() {
    let page = PageGeometry {
        orientation: Orientation::Landscape,
        ..a4()
    };
    assert_eq!(page.content_width(), 277.0);
    assert_eq!(page.drawable_height_first(), 160.0);
    assert_eq!(page.drawable_height_other(), 170.0);

    let crops = paginate_height(500.0, &page).unwrap();
    let heights: Vec<f64> = crops.iter().map(|c| c.crop_height).collect();
    assert_eq!(heights, vec![160.0, 170.0, 170.0]);
}

#[test]
fn test_custom_paper_size() {
    let page = PageGeometry {
        paper_size: PaperSize::Custom {
            width_mm: 100.0,
            height_mm: 150.0,
        },
        ..a4()
    };
    assert_eq!(page.content_width(), 80.0);
    assert_eq!(page.drawable_height_first(), 100.0);
    assert_eq!(page.drawable_height_other(), 110.0);
}

#[test]
fn test_page_crops_is_lazy_and_restartable() {
    let crops = page_crops(760.0, &a4()).unwrap();
    let first_two: Vec<PageCrop> = crops.clone().take(2).collect();
    assert_eq!(first_two.len(), 2);
    assert_eq!(crops.count(), 3);
}

#[test]
fn test_unusable_page_geometry_is_rejected() {
    let page = PageGeometry {
        first_header_mm: 400.0,
        ..a4()
    };
    assert!(matches!(
        paginate_height(100.0, &page),
        Err(ExportError::Config(_))
    ));
}

#[test]
fn test_infinite_height_is_rejected() {
    assert!(matches!(
        paginate_height(f64::INFINITY, &a4()),
        Err(ExportError::InvalidDimension { .. })
    ));
}

proptest! {
    /// Every source row lands on exactly one page
    #[test]
    fn pagination_is_complete(width in 1u32..5000, height in 1u32..40000) {
        let image = RasterImage::without_pixels(width, height).unwrap();
        let pagination = paginate(&image, &a4()).unwrap();
        let crops = &pagination.crops;

        prop_assert!(!crops.is_empty());
        prop_assert_eq!(crops[0].crop_top, 0.0);
        for pair in crops.windows(2) {
            prop_assert_eq!(pair[0].crop_top + pair[0].crop_height, pair[1].crop_top);
        }
        for crop in crops {
            prop_assert!(crop.crop_height > 0.0);
            prop_assert!(crop.crop_height <= crop.drawable_height);
        }

        let last = crops.last().unwrap();
        prop_assert_eq!(last.crop_top + last.crop_height, pagination.scaled_height);

        let total: f64 = crops.iter().map(|c| c.crop_height).sum();
        prop_assert!((total - pagination.scaled_height).abs() <= 1e-9 * pagination.scaled_height);
    }

    /// Closed-form page count agrees with the fold for whole-unit heights
    #[test]
    fn page_count_matches_fold(height in 1u32..100_000) {
        let height = height as f64;
        let crops = paginate_height(height, &a4()).unwrap();
        prop_assert_eq!(crops.len(), page_count(height, &a4()));
    }
}
