use bevy_ecs::prelude::Component;

use crate::components::mapposition::MapPosition;

/// Axis-aligned bounding box anchored at the entity's [`MapPosition`].
///
/// The size follows the frame size of the clip currently playing, so it is
/// rewritten whenever the animation system switches clips.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub width: f32,
    pub height: f32,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width and height as whole pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    /// AABB overlap on rounded pixel coordinates.
    ///
    /// Positions are rounded (not truncated) before comparing; edge contact
    /// does not count as overlap.
    pub fn overlaps(&self, position: &MapPosition, other: &Self, other_position: &MapPosition) -> bool {
        let (ax, ay) = position.rounded();
        let (bx, by) = other_position.rounded();
        let (aw, ah) = self.pixel_size();
        let (bw, bh) = other.pixel_size();
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(5.0, 5.0)));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(10.0, 0.0)));
    }

    #[test]
    fn test_rounding_changes_edge_contact() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        // 9.6 rounds to 10: touching, not overlapping
        assert!(!a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(9.6, 0.0)));
        assert!(a.overlaps(&MapPosition::new(0.0, 0.0), &b, &MapPosition::new(9.4, 0.0)));
        // truncation would put `a` at 0 and report overlap here
        assert!(!a.overlaps(&MapPosition::new(-0.6, 0.0), &b, &MapPosition::new(9.0, 0.0)));
    }
}
