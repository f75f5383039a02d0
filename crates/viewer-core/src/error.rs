use thiserror::Error;

/// Failures surfaced by the viewer core.
///
/// Per-frame variants (`NonFiniteProjection`) are expected to be logged and
/// skipped by the caller; they never stop the render loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("hotspot {index} projected to a non-finite screen position")]
    NonFiniteProjection { index: usize },

    #[error("viewport has no drawable area ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },

    #[error("asset {url} failed to load: {reason}")]
    AssetFailed { url: String, reason: String },

    #[error("asset {url} was never registered with the loader")]
    UnknownAsset { url: String },

    #[error("hotspot index {index} is out of range (have {count})")]
    HotspotOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
