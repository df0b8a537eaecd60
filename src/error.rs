use gl::types::GLenum;
use thiserror::Error;

/// all errors that can occur while batching and submitting geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid batch config: {0}")]
    InvalidConfig(String),
    #[error("failed to upload to the {buffer} buffer: {reason}")]
    Upload { buffer: &'static str, reason: String },
    #[error("draw call failed: {0}")]
    Draw(String),
    #[error("failed to bind texture '{name}' to slot {slot}: {reason}")]
    TextureBind {
        name: String,
        slot: u32,
        reason: String,
    },
    #[error("invalid pixel data for texture '{name}': {reason}")]
    InvalidTextureData { name: String, reason: String },
    #[error("OpenGL error 0x{code:04X} after {call}")]
    Gl { call: &'static str, code: GLenum },
    #[error("invalid text alignment '{0}' (expected e.g. 'start-center')")]
    InvalidAlignment(String),
}

/// checks the OpenGL error flag and maps it to a ``RenderError``
pub(crate) fn check_gl(call: &'static str) -> Result<(), RenderError> {
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        Ok(())
    } else {
        Err(RenderError::Gl { call, code })
    }
}
