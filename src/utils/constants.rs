/// number of vertices one batch can hold before it gets flushed
pub const MAX_VERTEX_COUNT: usize = 4000;
/// number of indices one batch can hold before it gets flushed
pub const MAX_INDEX_COUNT: usize = 6000;
/// number of texture units available to one draw call (unit 0 means "no texture")
pub const MAX_TEXTURE_UNITS: usize = 16;

/// texture slot used by solid colored geometry
pub const NO_TEXTURE_SLOT: u32 = 0;
/// first slot that gets assigned to a real texture
pub const FIRST_TEXTURE_SLOT: u32 = 1;

/// cache identity of the built-in circle alpha mask used for ellipses
pub const CIRCLE_TEXTURE_NAME: &str = "Hummingbird_Circle";
/// default resolution of the generated circle mask in pixels
pub const CIRCLE_MASK_RESOLUTION: usize = 128;

/// default size of a drawn point
pub const DEFAULT_POINT_SIZE: f32 = 1.0;
/// default text size in pixels
pub const DEFAULT_TEXT_SIZE: f32 = 12.0;

pub(crate) const QUAD_NUM_VERTICES: usize = 4;
pub(crate) const QUAD_NUM_INDICES: usize = 6;
pub(crate) const TRIANGLE_NUM_VERTICES: usize = 3;
