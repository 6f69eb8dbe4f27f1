//! diorama: project HTML documents into interactive 3D scenes.
//!
//! Pipeline: Parse → Layout → Select → Merge Options → Generate → Scene.
//! Rendering and rigid-body simulation stay behind the collaborator traits
//! in [`engine`]; this crate decides *where* every element goes and *what*
//! its surfaces look like.

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod generator;
pub mod net;
pub mod rasterizer;
pub mod scene;

pub use engine::pipeline::Engine;
pub use engine::{Callbacks, RecordingBackend, RenderBackend};
pub use error::{ConfigError, EngineError, RasterError};
