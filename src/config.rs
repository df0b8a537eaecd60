use crate::error::RenderError;
use crate::utils::constants::*;

/// capacity limits of a ``Batcher`` (default: 4000 vertices, 6000 indices, 16 texture units)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub(crate) max_vertex_count: usize,
    pub(crate) max_index_count: usize,
    pub(crate) texture_units: usize,
}

impl BatchConfig {
    /// changes the number of vertices that fit in one batch
    pub fn with_max_vertex_count(mut self, count: usize) -> Self {
        self.max_vertex_count = count;
        self
    }

    /// changes the number of indices that fit in one batch
    pub fn with_max_index_count(mut self, count: usize) -> Self {
        self.max_index_count = count;
        self
    }

    /// changes the number of texture units one draw call may sample from (including unit 0)
    pub fn with_texture_units(mut self, units: usize) -> Self {
        self.texture_units = units;
        self
    }

    pub fn max_vertex_count(&self) -> usize {
        self.max_vertex_count
    }

    pub fn max_index_count(&self) -> usize {
        self.max_index_count
    }

    pub fn texture_units(&self) -> usize {
        self.texture_units
    }

    /// checks that a batch can hold at least one quad and one texture
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_vertex_count <= QUAD_NUM_VERTICES {
            return Err(RenderError::InvalidConfig(format!(
                "max_vertex_count must exceed {QUAD_NUM_VERTICES}, got {}",
                self.max_vertex_count
            )));
        }
        if self.max_index_count <= QUAD_NUM_INDICES {
            return Err(RenderError::InvalidConfig(format!(
                "max_index_count must exceed {QUAD_NUM_INDICES}, got {}",
                self.max_index_count
            )));
        }
        if self.texture_units < 3 {
            return Err(RenderError::InvalidConfig(format!(
                "at least 3 texture units are required, got {}",
                self.texture_units
            )));
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_vertex_count: MAX_VERTEX_COUNT,
            max_index_count: MAX_INDEX_COUNT,
            texture_units: MAX_TEXTURE_UNITS,
        }
    }
}
