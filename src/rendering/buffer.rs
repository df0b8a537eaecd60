use crate::error::{check_gl, RenderError};
use gl::types::*;
use std::marker::PhantomData;
use std::ptr;

/// GPU-side storage that receives the populated prefix of a batch on every flush
pub trait GpuBuffer<T> {
    /// uploads the first ``count`` elements of ``data``
    fn partial_write(&mut self, data: &[T], count: usize) -> Result<(), RenderError>;
}

/// a preallocated OpenGL buffer object that is overwritten from the start on every upload
#[derive(Debug)]
pub struct GlBuffer<T> {
    pub id: GLuint,
    target: GLenum,
    capacity: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T> GlBuffer<T> {
    /// creates a dynamic vertex buffer that holds up to ``capacity`` elements
    pub fn vertex_buffer(capacity: usize) -> Result<Self, RenderError> {
        Self::new(gl::ARRAY_BUFFER, capacity, "vertex")
    }

    /// creates a dynamic index buffer that holds up to ``capacity`` elements
    pub fn index_buffer(capacity: usize) -> Result<Self, RenderError> {
        Self::new(gl::ELEMENT_ARRAY_BUFFER, capacity, "index")
    }

    fn new(target: GLenum, capacity: usize, label: &'static str) -> Result<Self, RenderError> {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(target, id);
            gl::BufferData(
                target,
                (capacity * size_of::<T>()) as GLsizeiptr,
                ptr::null(),
                gl::DYNAMIC_DRAW,
            );
        }
        check_gl("glBufferData")?;
        log::debug!("allocated {label} buffer for {capacity} elements");

        Ok(Self {
            id,
            target,
            capacity,
            label,
            _marker: PhantomData,
        })
    }

    /// binds the buffer to its target
    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.target, self.id) };
    }
}

impl<T> GpuBuffer<T> for GlBuffer<T> {
    fn partial_write(&mut self, data: &[T], count: usize) -> Result<(), RenderError> {
        if count > data.len() || count > self.capacity {
            return Err(RenderError::Upload {
                buffer: self.label,
                reason: format!(
                    "{count} elements exceed the available data ({}) or capacity ({})",
                    data.len(),
                    self.capacity
                ),
            });
        }
        if count == 0 {
            return Ok(());
        }
        unsafe {
            gl::BindBuffer(self.target, self.id);
            gl::BufferSubData(
                self.target,
                0,
                (count * size_of::<T>()) as GLsizeiptr,
                data.as_ptr() as *const GLvoid,
            );
        }
        check_gl("glBufferSubData").map_err(|e| RenderError::Upload {
            buffer: self.label,
            reason: e.to_string(),
        })
    }
}

impl<T> Drop for GlBuffer<T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}
