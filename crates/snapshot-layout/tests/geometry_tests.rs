use proptest::prelude::*;
use snapshot_layout::layout::*;
use snapshot_layout::*;

#[test]
fn test_rect_helpers() {
    let outer = Rect::new(10.0, 30.0, 190.0, 247.0);
    assert_eq!(outer.right(), 200.0);
    assert_eq!(outer.bottom(), 277.0);
    assert_eq!(outer.center_x(), 105.0);
    assert!(outer.contains(&Rect::new(10.0, 30.0, 190.0, 100.0), 0.0));
    assert!(!outer.contains(&Rect::new(5.0, 30.0, 190.0, 100.0), 0.0));
}

#[test]
fn test_round_to_precision() {
    assert_eq!(round_to(0.296875, 4), 0.2969);
    assert_eq!(round_to(246.999_999, 2), 247.0);
}

proptest! {
    #[test]
    fn fit_preserves_aspect_within_bounds(
        source_w in 0.01f64..1e6,
        source_h in 0.01f64..1e6,
        max_w in 0.01f64..1e4,
        max_h in 0.01f64..1e4,
    ) {
        let (w, h) = fit_preserving_aspect(source_w, source_h, max_w, max_h).unwrap();

        prop_assert!(w <= max_w * (1.0 + 1e-12));
        prop_assert!(h <= max_h * (1.0 + 1e-12));

        let aspect = source_w / source_h;
        prop_assert!(((w / h) - aspect).abs() / aspect < 1e-6);
    }

    #[test]
    fn centering_is_symmetric(outer in 1.0f64..1000.0, inner_frac in 0.0f64..1.0) {
        let inner = outer * inner_frac;
        let (x, y) = center(outer, outer, inner, inner);
        prop_assert!((x + inner + x - outer).abs() < 1e-9);
        prop_assert_eq!(x, y);
    }
}
