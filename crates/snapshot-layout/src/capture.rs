//! Snapshot capture contract
//!
//! Rasterizing a dashboard surface is the host's job. The pipeline only
//! awaits a `Capturer` one section at a time.

use crate::types::RasterImage;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a capture failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFailure {
    /// The surface pulled in cross-origin content and cannot be read back
    Tainted,
    /// The surface uses styling the capturer cannot rasterize
    UnsupportedStyle,
    /// The capture did not finish in time
    Timeout,
    /// The surface (or its backing file) could not be reached at all
    Unavailable,
}

impl fmt::Display for CaptureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureFailure::Tainted => "tainted surface",
            CaptureFailure::UnsupportedStyle => "unsupported style",
            CaptureFailure::Timeout => "timed out",
            CaptureFailure::Unavailable => "surface unavailable",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}: {detail}")]
pub struct CaptureError {
    pub reason: CaptureFailure,
    pub detail: String,
}

impl CaptureError {
    pub fn new(reason: CaptureFailure, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

/// Rasterizes a surface into a `RasterImage`
pub trait Capturer {
    /// Whatever identifies a capturable surface for this host
    type Surface;

    fn capture(
        &self,
        surface: &Self::Surface,
    ) -> impl Future<Output = Result<RasterImage, CaptureError>> + Send;
}

/// Run a capture, failing with `CaptureFailure::Timeout` after `limit`
pub async fn capture_with_timeout<C: Capturer>(
    capturer: &C,
    surface: &C::Surface,
    limit: Option<Duration>,
) -> Result<RasterImage, CaptureError> {
    match limit {
        None => capturer.capture(surface).await,
        Some(limit) => tokio::time::timeout(limit, capturer.capture(surface))
            .await
            .unwrap_or_else(|_| {
                Err(CaptureError::new(
                    CaptureFailure::Timeout,
                    format!("no snapshot after {:?}", limit),
                ))
            }),
    }
}
