use planetshine_core::SampleError;
use thiserror::Error;

/// Failures reported by a [`crate::camera::Renderer`] implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Failed to create {dimension}x{dimension} offscreen target: {reason}")]
    TargetCreation { dimension: u32, reason: String },

    #[error("Render call failed: {0}")]
    RenderFailed(String),

    #[error("Readback returned {actual} pixels, expected {expected}")]
    ReadbackSize { expected: usize, actual: usize },
}

/// Errors raised while determining a body's albedo color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlbedoError {
    #[error("albedo render failed: {0}")]
    Render(#[from] RenderError),

    #[error("albedo sampling failed: {0}")]
    Sample(#[from] SampleError),
}
