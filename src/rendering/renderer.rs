use super::buffer::GlBuffer;
use super::data::Vertex;
use crate::error::{check_gl, RenderError};
use gl::types::*;
use std::ptr;

/// issues the draw call of a flushed batch
pub trait Renderer {
    /// draws ``index_count`` indices from the currently uploaded index buffer as triangles
    fn draw(&mut self, index_count: usize) -> Result<(), RenderError>;
}

/// attribute locations of the batch vertex layout
pub mod attrib {
    use gl::types::GLuint;

    pub const POSITION: GLuint = 0;
    pub const COLOR: GLuint = 1;
    pub const UV: GLuint = 2;
    pub const TEX_INDEX: GLuint = 3;
    pub const SCALE: GLuint = 4;
}

/// OpenGL draw submission for the batch vertex/index buffers
#[derive(Debug)]
pub struct GlRenderer {
    vao: GLuint,
}

impl GlRenderer {
    /// creates the vertex array that ties the batch buffers to the vertex layout
    pub fn new(
        vertex_buffer: &GlBuffer<Vertex>,
        index_buffer: &GlBuffer<GLuint>,
    ) -> Result<Self, RenderError> {
        let mut vao = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            vertex_buffer.bind();
            bind_batch_attribs();
            index_buffer.bind();
            gl::BindVertexArray(0);
        }
        check_gl("glVertexAttribPointer")?;

        Ok(Self { vao })
    }
}

impl Renderer for GlRenderer {
    fn draw(&mut self, index_count: usize) -> Result<(), RenderError> {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                index_count as GLsizei,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
            gl::BindVertexArray(0);
        }
        check_gl("glDrawElements").map_err(|e| RenderError::Draw(e.to_string()))
    }
}

impl Drop for GlRenderer {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.vao) };
    }
}

/// binds the attribute pointers of ``Vertex`` for the currently bound vertex array and buffer
unsafe fn bind_batch_attribs() {
    let stride = size_of::<Vertex>() as GLsizei;
    let attribs: [(GLuint, GLint, usize); 5] = [
        (attrib::POSITION, 3, std::mem::offset_of!(Vertex, position)),
        (attrib::COLOR, 4, std::mem::offset_of!(Vertex, color)),
        (attrib::UV, 2, std::mem::offset_of!(Vertex, uv_coords)),
        (attrib::TEX_INDEX, 1, std::mem::offset_of!(Vertex, tex_index)),
        (attrib::SCALE, 1, std::mem::offset_of!(Vertex, scale)),
    ];
    for (location, size, offset) in attribs {
        gl::EnableVertexAttribArray(location);
        gl::VertexAttribPointer(
            location,
            size,
            gl::FLOAT,
            gl::FALSE as GLboolean,
            stride,
            offset as *const GLvoid,
        );
    }
}
