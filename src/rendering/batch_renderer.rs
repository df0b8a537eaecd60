use super::buffer::{GlBuffer, GpuBuffer};
use super::data::{Vertex, FAN_UVS, QUAD_INDICES, QUAD_UVS, WHITE};
use super::font::{Font, TextAlign};
use super::renderer::{GlRenderer, Renderer};
use super::texture::{GlTexture, Texture, TextureSlots};
use crate::config::BatchConfig;
use crate::error::RenderError;
use crate::glm;
use crate::utils::constants::*;
use crate::utils::math::{line_normal_offset, rect_corners, rotated_rect_corners};
use gl::types::*;
use itertools::Itertools;
use std::rc::Rc;

/// the GPU side a batcher submits its data to
pub struct BatchTargets {
    pub renderer: Box<dyn Renderer>,
    pub vertex_buffer: Box<dyn GpuBuffer<Vertex>>,
    pub index_buffer: Box<dyn GpuBuffer<GLuint>>,
}

impl BatchTargets {
    /// creates OpenGL buffers sized for the config and the vertex array drawing from them
    /// (needs a current GL context)
    pub fn gl(config: &BatchConfig) -> Result<Self, RenderError> {
        let vertex_buffer = GlBuffer::<Vertex>::vertex_buffer(config.max_vertex_count)?;
        let index_buffer = GlBuffer::<GLuint>::index_buffer(config.max_index_count)?;
        let renderer = GlRenderer::new(&vertex_buffer, &index_buffer)?;

        Ok(Self {
            renderer: Box::new(renderer),
            vertex_buffer: Box::new(vertex_buffer),
            index_buffer: Box::new(index_buffer),
        })
    }
}

/// fill state of the current batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Empty,
    Accumulating,
}

/// what caused a batch to be flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    /// the next primitive would not fit into the vertex or index arrays
    Capacity,
    /// all texture slots of the batch are taken
    TextureSlots,
    /// the caller ended the batch
    End,
}

/// counters accumulated over all flushes since creation or the last ``reset_stats``
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub draw_calls: u32,
    pub vertices: usize,
    pub indices: usize,
    pub capacity_flushes: u32,
    pub texture_flushes: u32,
}

/// packs 2D primitives into shared vertex/index arrays and submits them in as few draw calls as possible
///
/// Call ``begin``, then any number of ``draw_*`` functions, then ``end``.
/// Every draw function flushes the batch first if the primitive would not fit,
/// so a primitive never spans two draw calls.
pub struct Batcher {
    config: BatchConfig,
    vertices: Vec<Vertex>,
    indices: Vec<GLuint>,
    vertex_count: usize,
    index_count: usize,
    slots: TextureSlots,
    targets: BatchTargets,
    font: Rc<Font>,
    circle_mask: Rc<dyn Texture>,
    stats: BatchStats,
}

impl Batcher {
    /// creates a new batcher (the scratch arrays are allocated once here)
    pub fn new(
        config: BatchConfig,
        targets: BatchTargets,
        font: Rc<Font>,
        circle_mask: Rc<dyn Texture>,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        log::debug!(
            "created batcher ({} vertices, {} indices, {} texture units)",
            config.max_vertex_count,
            config.max_index_count,
            config.texture_units
        );

        Ok(Self {
            vertices: vec![Vertex::default(); config.max_vertex_count],
            indices: vec![0; config.max_index_count],
            vertex_count: 0,
            index_count: 0,
            slots: TextureSlots::new(config.texture_units),
            targets,
            font,
            circle_mask,
            stats: BatchStats::default(),
            config,
        })
    }

    /// creates a batcher drawing with OpenGL, including the generated circle mask (needs a current GL context)
    pub fn with_gl(config: BatchConfig, font: Rc<Font>) -> Result<Self, RenderError> {
        let targets = BatchTargets::gl(&config)?;
        let circle_mask = GlTexture::circle_mask(CIRCLE_TEXTURE_NAME, CIRCLE_MASK_RESOLUTION)?;
        Self::new(config, targets, font, Rc::new(circle_mask))
    }

    /// starts a new batch and discards everything that was not flushed
    pub fn begin(&mut self) {
        self.reset();
    }

    /// flushes the current batch
    pub fn end(&mut self) -> Result<(), RenderError> {
        self.flush(FlushReason::End)
    }

    pub fn state(&self) -> BatchState {
        if self.vertex_count == 0 && self.index_count == 0 {
            BatchState::Empty
        } else {
            BatchState::Accumulating
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = BatchStats::default();
    }

    pub fn font(&self) -> &Rc<Font> {
        &self.font
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// the vertices of the current batch that are not flushed yet
    pub fn pending_vertices(&self) -> &[Vertex] {
        &self.vertices[..self.vertex_count]
    }

    /// the indices of the current batch that are not flushed yet
    pub fn pending_indices(&self) -> &[GLuint] {
        &self.indices[..self.index_count]
    }

    /// number of textures holding a slot in the current batch
    pub fn bound_texture_count(&self) -> usize {
        self.slots.len()
    }

    /// draws a small square centered on ``pos`` (use ``DEFAULT_POINT_SIZE`` for the default size)
    pub fn draw_colored_point(
        &mut self,
        pos: glm::Vec2,
        size: f32,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        let half = size / 4.0;
        self.draw_colored_rect(
            glm::vec2(pos.x - half, pos.y - half),
            glm::vec2(size / 2.0, size / 2.0),
            color,
        )
    }

    /// draws a triangle fan around ``points[center]``
    ///
    /// One triangle is emitted per consecutive point pair, except the pair starting at ``center``.
    /// The last point never starts a pair, so a closed outline needs its first point repeated at the end.
    pub fn draw_colored_polygon(
        &mut self,
        points: &[glm::Vec2],
        color: glm::Vec4,
        center: usize,
    ) -> Result<(), RenderError> {
        if points.len() < 3 {
            return Ok(());
        }
        let Some(&hub) = points.get(center) else {
            log::warn!(
                "polygon center {center} out of range for {} points",
                points.len()
            );
            return Ok(());
        };
        for (i, (start, end)) in points.iter().tuple_windows().enumerate() {
            if i == center {
                continue;
            }
            self.reserve(TRIANGLE_NUM_VERTICES, TRIANGLE_NUM_VERTICES)?;
            let corners = [hub, *start, *end];
            let vertices =
                [0, 1, 2].map(|k| Vertex::new(corners[k], color, FAN_UVS[k], NO_TEXTURE_SLOT, 0.0));
            self.push_primitive(&vertices, &[0, 1, 2]);
        }
        Ok(())
    }

    /// draws the axis-aligned rectangle ``(pos, pos + size)`` in a solid color
    pub fn draw_colored_rect(
        &mut self,
        pos: glm::Vec2,
        size: glm::Vec2,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        self.push_quad(rect_corners(&pos, &size), QUAD_UVS, color, NO_TEXTURE_SLOT, 0.0);
        Ok(())
    }

    /// draws a solid colored rectangle rotated by ``angle`` degrees around its center
    pub fn draw_colored_rect_with_rotation(
        &mut self,
        pos: glm::Vec2,
        size: glm::Vec2,
        angle: f32,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        let corners = rotated_rect_corners(&pos, &size, angle);
        self.push_quad(corners, QUAD_UVS, color, NO_TEXTURE_SLOT, 0.0);
        Ok(())
    }

    /// draws the axis-aligned rectangle ``(pos, pos + size)`` with a texture
    pub fn draw_textured_rect(
        &mut self,
        pos: glm::Vec2,
        size: glm::Vec2,
        texture: &dyn Texture,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        let slot = self.texture_slot(texture)?;
        self.push_quad(rect_corners(&pos, &size), QUAD_UVS, WHITE, slot, 0.0);
        Ok(())
    }

    /// draws a textured rectangle rotated by ``angle`` degrees around its center
    pub fn draw_textured_rect_with_rotation(
        &mut self,
        pos: glm::Vec2,
        size: glm::Vec2,
        angle: f32,
        texture: &dyn Texture,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        let slot = self.texture_slot(texture)?;
        let corners = rotated_rect_corners(&pos, &size, angle);
        self.push_quad(corners, QUAD_UVS, WHITE, slot, 0.0);
        Ok(())
    }

    /// draws the segment ``a -> b`` as a quad of the given thickness
    pub fn draw_colored_line(
        &mut self,
        a: glm::Vec2,
        b: glm::Vec2,
        thickness: f32,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        let offset = line_normal_offset(&a, &b, thickness);
        let corners = [a - offset, a + offset, b + offset, b - offset];
        self.push_quad(corners, QUAD_UVS, color, NO_TEXTURE_SLOT, 0.0);
        Ok(())
    }

    /// draws an ellipse filling ``(pos, pos + size)`` using the circle mask tinted with ``color``
    pub fn draw_colored_ellipse(
        &mut self,
        pos: glm::Vec2,
        size: glm::Vec2,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
        let circle_mask = Rc::clone(&self.circle_mask);
        let slot = self.texture_slot(circle_mask.as_ref())?;
        self.push_quad(rect_corners(&pos, &size), QUAD_UVS, color, slot, 0.0);
        Ok(())
    }

    /// draws a string with the batcher's font
    /// (defaults: ``DEFAULT_TEXT_SIZE`` and ``TextAlign::default()`` which is ``"start-start"``)
    pub fn draw_colored_text(
        &mut self,
        text: &str,
        pos: glm::Vec2,
        size: f32,
        align: TextAlign,
        color: glm::Vec4,
    ) -> Result<(), RenderError> {
        let font = Rc::clone(&self.font);
        self.texture_slot(font.as_ref())?;

        let layout = font.data.layout(text, size, align);
        for placed in layout.glyphs.iter() {
            self.reserve(QUAD_NUM_VERTICES, QUAD_NUM_INDICES)?;
            // a capacity flush clears the slot table, so the atlas may need a new slot
            let slot = self.texture_slot(font.as_ref())?;
            let corners = layout.corners(placed, &pos);
            self.push_quad(corners, layout.uvs(placed), color, slot, layout.scale);
        }
        Ok(())
    }

    /// flushes first if the requested amount of vertices or indices would not fit
    fn reserve(&mut self, vertices: usize, indices: usize) -> Result<(), RenderError> {
        if self.vertex_count + vertices >= self.config.max_vertex_count
            || self.index_count + indices >= self.config.max_index_count
        {
            self.flush(FlushReason::Capacity)?;
        }
        Ok(())
    }

    /// yields the slot of a texture, binding it to a new slot if it is not used in this batch yet
    fn texture_slot(&mut self, texture: &dyn Texture) -> Result<u32, RenderError> {
        if let Some(slot) = self.slots.get(texture.name()) {
            return Ok(slot);
        }
        if self.slots.is_exhausted() {
            self.flush(FlushReason::TextureSlots)?;
        }
        let slot = self.slots.next_slot();
        texture.bind(slot)?;
        self.slots.insert(texture.name());
        log::trace!("bound texture '{}' to slot {slot}", texture.name());
        Ok(slot)
    }

    fn push_quad(
        &mut self,
        corners: [glm::Vec2; 4],
        uvs: [glm::Vec2; 4],
        color: glm::Vec4,
        tex_index: u32,
        scale: f32,
    ) {
        let vertices =
            [0, 1, 2, 3].map(|i| Vertex::new(corners[i], color, uvs[i], tex_index, scale));
        self.push_primitive(&vertices, &QUAD_INDICES);
    }

    /// appends vertices and their indices (relative to the first appended vertex) at the cursors
    fn push_primitive(&mut self, vertices: &[Vertex], indices: &[GLuint]) {
        let base = self.vertex_count;
        self.vertices[base..base + vertices.len()].copy_from_slice(vertices);
        for (dst, offset) in self.indices[self.index_count..self.index_count + indices.len()]
            .iter_mut()
            .zip(indices)
        {
            *dst = base as GLuint + offset;
        }
        self.vertex_count += vertices.len();
        self.index_count += indices.len();
    }

    /// uploads the batch, draws it and starts a new one
    fn flush(&mut self, reason: FlushReason) -> Result<(), RenderError> {
        if self.index_count > 0 {
            let targets = &mut self.targets;
            targets
                .vertex_buffer
                .partial_write(&self.vertices, self.vertex_count)?;
            targets
                .index_buffer
                .partial_write(&self.indices, self.index_count)?;
            targets.renderer.draw(self.index_count)?;

            log::debug!(
                "flushed batch ({reason:?}): {} vertices, {} indices, {} textures",
                self.vertex_count,
                self.index_count,
                self.slots.len()
            );
            self.stats.draw_calls += 1;
            self.stats.vertices += self.vertex_count;
            self.stats.indices += self.index_count;
            match reason {
                FlushReason::Capacity => self.stats.capacity_flushes += 1,
                FlushReason::TextureSlots => self.stats.texture_flushes += 1,
                FlushReason::End => {}
            }
        }
        self.reset();
        Ok(())
    }

    /// resets the cursors and the texture slots together
    fn reset(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
        self.slots.clear();
    }
}
