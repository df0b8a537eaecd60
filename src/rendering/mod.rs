pub mod batch_renderer;
pub mod buffer;
pub mod data;
pub mod font;
pub mod renderer;
pub mod texture;
