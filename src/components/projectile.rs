//! Player shots.
//!
//! A projectile flies in a straight line at the speed it was launched with;
//! its velocity lives in the entity's [`RigidBody`] and is never touched by
//! gravity or tile collision.

use bevy_ecs::prelude::Component;

use crate::components::creature::Facing;
use crate::components::rigidbody::RigidBody;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Margin in pixels used when testing whether the shot left the view.
    pub radius: f32,
}

impl Projectile {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Body for a shot launched at `angle_deg` (0 is right, 180 is left).
    pub fn launch(angle_deg: f32, speed: f32) -> RigidBody {
        let rad = angle_deg.to_radians();
        let mut vx = rad.cos() * speed;
        let mut vy = rad.sin() * speed;
        // keep axis-aligned shots exactly on their axis
        if vx.abs() < 1e-6 {
            vx = 0.0;
        }
        if vy.abs() < 1e-6 {
            vy = 0.0;
        }
        RigidBody::with_velocity(vx, vy)
    }

    pub fn angle_for(facing: Facing) -> f32 {
        match facing {
            Facing::Left => 180.0,
            Facing::Right => 0.0,
        }
    }

    pub fn clip_key(facing: Facing) -> &'static str {
        match facing {
            Facing::Left => "bullet/left",
            Facing::Right => "bullet/right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_directions() {
        let right = Projectile::launch(Projectile::angle_for(Facing::Right), 0.4);
        assert_eq!(right.vx, 0.4);
        assert_eq!(right.vy, 0.0);

        let left = Projectile::launch(Projectile::angle_for(Facing::Left), 0.4);
        assert!((left.vx + 0.4).abs() < 1e-6);
        assert_eq!(left.vy, 0.0);
    }
}
