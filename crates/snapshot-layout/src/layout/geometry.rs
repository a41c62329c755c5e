//! Pure geometry helpers
//!
//! Aspect-preserving fit, centering and scaling. No state, no allocation.

use crate::types::{ExportError, Result};

/// Relative slack used when deciding whether the width-constrained candidate
/// still fits the height bound. Keeps exact ties on the width branch when the
/// division lands one ulp above the bound.
const TIE_TOLERANCE: f64 = 1e-12;

/// Largest `(w, h)` with `w <= max_w`, `h <= max_h` and `w / h == source_w / source_h`.
///
/// When both the width-constrained and height-constrained candidates fit,
/// the width-constrained one wins.
pub fn fit_preserving_aspect(
    source_w: f64,
    source_h: f64,
    max_w: f64,
    max_h: f64,
) -> Result<(f64, f64)> {
    ensure_positive("source", source_w, source_h)?;
    ensure_positive("bounds", max_w, max_h)?;

    let aspect = source_w / source_h;

    let height_at_max_width = max_w / aspect;
    if height_at_max_width <= max_h * (1.0 + TIE_TOLERANCE) {
        return Ok((max_w, height_at_max_width.min(max_h)));
    }

    Ok((max_h * aspect, max_h))
}

/// Offsets that center an inner rectangle inside an outer one
pub fn center(outer_w: f64, outer_h: f64, inner_w: f64, inner_h: f64) -> (f64, f64) {
    ((outer_w - inner_w) / 2.0, (outer_h - inner_h) / 2.0)
}

/// Height of a `source_w x source_h` image once scaled to `target_w` wide
pub fn scale_to_width(source_w: f64, source_h: f64, target_w: f64) -> Result<f64> {
    ensure_positive("source", source_w, source_h)?;
    if !(target_w > 0.0 && target_w.is_finite()) {
        return Err(ExportError::InvalidDimension {
            what: "target width",
            width: target_w,
            height: source_h,
        });
    }
    Ok(source_h * (target_w / source_w))
}

/// Round a coordinate to the encoder's precision
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn ensure_positive(what: &'static str, width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v > 0.0 && v.is_finite();
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ExportError::InvalidDimension {
            what,
            width,
            height,
        })
    }
}
