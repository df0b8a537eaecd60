//! Dynamic 2D draw-call batching on top of OpenGL.
//!
//! A [`Batcher`](rendering::batch_renderer::Batcher) packs colored shapes, textured quads,
//! lines, ellipses and text into one shared vertex/index array and issues a single draw call
//! per batch. Batches are flushed automatically when the arrays or the texture units run out.

pub mod config;
pub mod error;
pub mod rendering;
pub mod utils;

pub use env_logger;
pub use gl;
pub use itertools;
pub use log;
pub use nalgebra_glm as glm;

/// All features that are very common to use.
pub mod prelude {
    pub use crate::config::BatchConfig;
    pub use crate::error::RenderError;
    pub use crate::glm;
    pub use crate::glm::vec2;
    pub use crate::glm::vec4;
    pub use crate::glm::Vec2;
    pub use crate::glm::Vec4;
    pub use crate::log;
    pub use crate::rendering::batch_renderer::*;
    pub use crate::rendering::buffer::{GlBuffer, GpuBuffer};
    pub use crate::rendering::data::Vertex;
    pub use crate::rendering::font::*;
    pub use crate::rendering::renderer::{GlRenderer, Renderer};
    pub use crate::rendering::texture::{GlTexture, Texture};
    pub use crate::utils::constants::*;
}
