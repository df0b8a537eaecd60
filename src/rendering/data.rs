use crate::glm;
use gl::types::*;

/// data for a single batched vertex
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: glm::Vec3,
    pub color: glm::Vec4,
    pub uv_coords: glm::Vec2,
    /// texture unit to sample from (0 means solid color)
    pub tex_index: GLfloat,
    /// glyph scale factor (only used by text, 0 otherwise)
    pub scale: GLfloat,
}

impl Vertex {
    /// number of scalar attributes per vertex
    pub const STRIDE: usize = 11;

    /// creates a flat 2D vertex
    pub(crate) fn new(
        position: glm::Vec2,
        color: glm::Vec4,
        uv_coords: glm::Vec2,
        tex_index: u32,
        scale: f32,
    ) -> Self {
        Self {
            position: glm::vec3(position.x, position.y, 0.0),
            color,
            uv_coords,
            tex_index: tex_index as GLfloat,
            scale,
        }
    }
}

/// uv coordinates of a full quad in corner order (top-left, top-right, bottom-right, bottom-left)
pub const QUAD_UVS: [glm::Vec2; 4] = [
    glm::Vec2::new(0.0, 0.0),
    glm::Vec2::new(1.0, 0.0),
    glm::Vec2::new(1.0, 1.0),
    glm::Vec2::new(0.0, 1.0),
];

/// uv coordinates for the three vertices of a polygon fan triangle (center, edge start, edge end)
pub const FAN_UVS: [glm::Vec2; 3] = [
    glm::Vec2::new(0.0, 1.0),
    glm::Vec2::new(0.5, 0.5),
    glm::Vec2::new(1.0, 1.0),
];

/// triangle winding of a quad relative to its first vertex
pub const QUAD_INDICES: [GLuint; 6] = [0, 1, 2, 2, 3, 0];

/// opaque white, the tint of plain textured quads
pub const WHITE: glm::Vec4 = glm::Vec4::new(1.0, 1.0, 1.0, 1.0);
