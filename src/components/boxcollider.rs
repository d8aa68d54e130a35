use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

/// Axis-aligned rectangle attached to an entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching edges do not overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_the_box() {
        let c = BoxCollider::new(8.0, 8.0).with_offset(Vec2::new(4.0, 4.0));
        let (min, max) = c.aabb(Vec2::new(10.0, 0.0));
        assert_eq!(min, Vec2::new(14.0, 4.0));
        assert_eq!(max, Vec2::new(22.0, 12.0));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = BoxCollider::new(32.0, 32.0);
        assert!(!a.overlaps(Vec2::ZERO, &a, Vec2::new(32.0, 0.0)));
        assert!(a.overlaps(Vec2::ZERO, &a, Vec2::new(31.0, 31.0)));
    }

    #[test]
    fn negative_size_is_normalized() {
        let c = BoxCollider::new(-4.0, 4.0);
        let (min, max) = c.aabb(Vec2::ZERO);
        assert_eq!(min, Vec2::new(-4.0, 0.0));
        assert_eq!(max, Vec2::new(0.0, 4.0));
    }
}
