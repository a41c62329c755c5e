//! Snapshot files standing in for live dashboard surfaces

use snapshot_layout::{CaptureError, CaptureFailure, Capturer, Pixels, RasterImage};
use std::future::Future;
use std::path::{Path, PathBuf};

/// "Captures" a section by decoding a PNG or JPEG screenshot from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCapturer;

impl Capturer for FileCapturer {
    type Surface = PathBuf;

    fn capture(
        &self,
        surface: &Self::Surface,
    ) -> impl Future<Output = Result<RasterImage, CaptureError>> + Send {
        let path = surface.clone();
        async move { read_snapshot(&path).await }
    }
}

async fn read_snapshot(path: &Path) -> Result<RasterImage, CaptureError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        CaptureError::new(
            CaptureFailure::Unavailable,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;

    let image = tokio::task::spawn_blocking(move || decode_snapshot(&bytes))
        .await
        .map_err(|e| CaptureError::new(CaptureFailure::Unavailable, e.to_string()))??;

    log::debug!(
        "Read {}x{} snapshot from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Decode into RGBA8 pixels
fn decode_snapshot(bytes: &[u8]) -> Result<RasterImage, CaptureError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| {
        CaptureError::new(
            CaptureFailure::UnsupportedStyle,
            format!("Failed to decode snapshot: {}", e),
        )
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::new(width, height, Pixels::new(rgba.into_raw()))
        .map_err(|e| CaptureError::new(CaptureFailure::UnsupportedStyle, e.to_string()))
}
