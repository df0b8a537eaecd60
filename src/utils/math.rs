use crate::glm;
use std::f32::consts::FRAC_PI_2;

/// angle in radians of the direction pointing from ``a`` to ``b``
pub fn angle_between(a: &glm::Vec2, b: &glm::Vec2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// vector with the given length pointing in the direction of ``angle`` (radians)
pub fn from_angle(angle: f32, length: f32) -> glm::Vec2 {
    glm::vec2(angle.cos() * length, angle.sin() * length)
}

/// half-thickness offset perpendicular to the segment ``a -> b``
pub fn line_normal_offset(a: &glm::Vec2, b: &glm::Vec2, thickness: f32) -> glm::Vec2 {
    from_angle(angle_between(a, b) - FRAC_PI_2, thickness / 2.0)
}

/// corners of the rectangle ``(pos, pos + size)`` rotated by ``angle`` degrees around its center
/// (order: top-left, top-right, bottom-right, bottom-left)
pub fn rotated_rect_corners(pos: &glm::Vec2, size: &glm::Vec2, angle: f32) -> [glm::Vec2; 4] {
    let radians = angle.to_radians();
    let center = pos + size / 2.0;
    let half = size / 2.0;
    [
        glm::vec2(-half.x, -half.y),
        glm::vec2(half.x, -half.y),
        glm::vec2(half.x, half.y),
        glm::vec2(-half.x, half.y),
    ]
    .map(|offset| glm::rotate_vec2(&offset, radians) + center)
}

/// corners of the axis-aligned rectangle ``(pos, pos + size)``
/// (order: top-left, top-right, bottom-right, bottom-left)
pub fn rect_corners(pos: &glm::Vec2, size: &glm::Vec2) -> [glm::Vec2; 4] {
    [
        *pos,
        glm::vec2(pos.x + size.x, pos.y),
        pos + size,
        glm::vec2(pos.x, pos.y + size.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_test() {
        let origin = glm::vec2(0.0, 0.0);
        assert_relative_eq!(angle_between(&origin, &glm::vec2(1.0, 0.0)), 0.0);
        assert_relative_eq!(angle_between(&origin, &glm::vec2(0.0, 2.0)), FRAC_PI_2);
        let v = from_angle(FRAC_PI_2, 3.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn line_offset_test() {
        let offset = line_normal_offset(&glm::vec2(0.0, 0.0), &glm::vec2(10.0, 0.0), 4.0);
        assert_relative_eq!(offset.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(offset.y, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn rotated_corners_test() {
        let pos = glm::vec2(0.0, 0.0);
        let size = glm::vec2(10.0, 20.0);
        let unrotated = rotated_rect_corners(&pos, &size, 0.0);
        for (a, b) in unrotated.iter().zip(rect_corners(&pos, &size).iter()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        }
        // a quarter turn swaps the extents around the center (5, 10)
        let quarter = rotated_rect_corners(&pos, &size, 90.0);
        assert_relative_eq!(quarter[0].x, 15.0, epsilon = 1e-4);
        assert_relative_eq!(quarter[0].y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(quarter[2].x, -5.0, epsilon = 1e-4);
        assert_relative_eq!(quarter[2].y, 15.0, epsilon = 1e-4);
    }
}
