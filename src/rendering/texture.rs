use crate::error::{check_gl, RenderError};
use crate::utils::constants::FIRST_TEXTURE_SLOT;
use gl::types::*;

/// a texture resource that can be attached to a numbered texture unit
pub trait Texture {
    /// identity used to share a slot between all quads of a batch that use this texture
    fn name(&self) -> &str;

    /// associates the resource with the texture unit ``slot`` for the next draw call
    fn bind(&self, slot: u32) -> Result<(), RenderError>;
}

/// maps texture identities to texture units for the lifetime of one batch
///
/// Holds at most ``texture_units - 1`` entries, entry ``i`` owns slot ``i + 1``.
/// Clearing only resets the fill count, the name buffers are reused by later inserts.
#[derive(Debug)]
pub(crate) struct TextureSlots {
    names: Vec<String>,
    len: usize,
    texture_units: usize,
}

impl TextureSlots {
    /// creates an empty slot table for the given number of texture units
    pub(crate) fn new(texture_units: usize) -> Self {
        Self {
            names: vec![String::new(); texture_units - 1],
            len: 0,
            texture_units,
        }
    }

    /// looks up the slot that is already assigned to a texture identity
    pub(crate) fn get(&self, name: &str) -> Option<u32> {
        self.names[..self.len]
            .iter()
            .position(|cached| cached == name)
            .map(|i| i as u32 + FIRST_TEXTURE_SLOT)
    }

    /// the slot the next inserted texture will receive
    pub(crate) fn next_slot(&self) -> u32 {
        self.len as u32 + FIRST_TEXTURE_SLOT
    }

    /// whether assigning another slot requires a flush first
    pub(crate) fn is_exhausted(&self) -> bool {
        self.next_slot() as usize + 1 >= self.texture_units
    }

    /// records a new identity and yields its slot (caller checks ``is_exhausted`` first)
    pub(crate) fn insert(&mut self, name: &str) -> u32 {
        debug_assert!(!self.is_exhausted());
        let slot = self.next_slot();
        let entry = &mut self.names[self.len];
        entry.clear();
        entry.push_str(name);
        self.len += 1;
        slot
    }

    /// number of textures currently holding a slot
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// forgets all assignments
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

/// an OpenGL 2D texture
#[derive(Debug)]
pub struct GlTexture {
    pub id: GLuint,
    name: String,
    pub width: usize,
    pub height: usize,
}

impl GlTexture {
    /// uploads already decoded RGBA8 pixel data into a new texture
    pub fn from_rgba(
        name: &str,
        width: usize,
        height: usize,
        pixels: &[u8],
    ) -> Result<Self, RenderError> {
        if pixels.len() != width * height * 4 {
            return Err(RenderError::InvalidTextureData {
                name: name.to_string(),
                reason: format!(
                    "expected {} bytes of RGBA data, got {}",
                    width * height * 4,
                    pixels.len()
                ),
            });
        }
        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as GLint,
                width as GLint,
                height as GLint,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const GLvoid,
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
        }
        check_gl("glTexImage2D")?;
        log::debug!("created texture '{name}' ({width}x{height})");

        Ok(Self {
            id,
            name: name.to_string(),
            width,
            height,
        })
    }

    /// generates the white circle alpha mask that is used to draw ellipses
    pub fn circle_mask(name: &str, resolution: usize) -> Result<Self, RenderError> {
        Self::from_rgba(name, resolution, resolution, &circle_mask_pixels(resolution))
    }
}

impl Texture for GlTexture {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, slot: u32) -> Result<(), RenderError> {
        unsafe { gl::BindTextureUnit(slot, self.id) };
        check_gl("glBindTextureUnit").map_err(|e| RenderError::TextureBind {
            name: self.name.clone(),
            slot,
            reason: e.to_string(),
        })
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

/// RGBA8 pixels of a white disc on a transparent background with a one pixel soft edge
pub fn circle_mask_pixels(resolution: usize) -> Vec<u8> {
    let radius = resolution as f32 / 2.0;
    let mut pixels = Vec::with_capacity(resolution * resolution * 4);
    for y in 0..resolution {
        for x in 0..resolution {
            let dx = x as f32 + 0.5 - radius;
            let dy = y as f32 + 0.5 - radius;
            let distance = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
            pixels.extend_from_slice(&[255, 255, 255, (coverage * 255.0).round() as u8]);
        }
    }
    pixels
}
