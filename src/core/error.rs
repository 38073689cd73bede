use thiserror::Error;

/// Failures surfaced by the card visualizer.
///
/// Only `ResourceAcquisition` can abort construction. `Render` is produced per
/// frame and is logged by the render loop rather than propagated.
#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("could not acquire {0}")]
    ResourceAcquisition(String),
    #[error("invalid card options: {0}")]
    InvalidOptions(String),
    #[error("frame render failed: {0}")]
    Render(String),
}

impl VisualizerError {
    pub fn acquisition(what: impl Into<String>) -> Self {
        Self::ResourceAcquisition(what.into())
    }
}
