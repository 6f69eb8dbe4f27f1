//! Error taxonomy for the scene-generation pipeline.
//!
//! Configuration problems are fatal and abort before any scene object is
//! created. Per-element problems (placement, rasterization) stay inside the
//! generator loop and are surfaced through the log, never as errors.

use thiserror::Error;

/// Fatal configuration problems detected before scene assembly.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `generator` option names a strategy the registry does not know.
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),

    /// The `rasterizer` option names a strategy the registry does not know.
    #[error("unknown rasterizer `{0}`")]
    UnknownRasterizer(String),

    /// A selector string failed to compile.
    #[error("invalid selector `{0}`")]
    BadSelector(String),

    /// The container selector matched no element in the document.
    #[error("container `{0}` matched no element")]
    NoContainer(String),

    /// A merged option value is structurally wrong or numerically unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal whole-pipeline errors returned from the top-level entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fetching the source document failed.
    #[error("[fetch] {0}")]
    Fetch(String),
}

/// Recoverable failure while painting one element's content.
///
/// The affected element is rendered with a fallback swatch; the batch
/// continues.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("element has no image source")]
    NoSource,

    #[error("image load failed for `{0}`")]
    ImageLoad(String),
}
