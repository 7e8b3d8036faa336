use bevy::prelude::*;

use super::state::{JumpKind, LocomotionController};

/// Launch speed needed to rise `height` meters against `gravity_y`.
///
/// Zero when gravity does not point down.
#[inline]
pub fn jump_speed(gravity_y: f32, height: f32) -> f32 {
    (-2.0 * gravity_y * height).max(0.0).sqrt()
}

impl LocomotionController {
    /// Applies a jump if one is allowed from the current state and returns
    /// its kind and the speed actually added.
    ///
    /// Ground jumps push off the contact normal. Jumping off a steep wall
    /// pushes off the wall and restores the air-jump budget. Air jumps reuse
    /// the last contact normal (world up when airborne).
    pub fn compose_jump(&mut self, gravity: Vec3) -> Option<(JumpKind, f32)> {
        let (kind, direction) = if self.on_ground() {
            (JumpKind::Ground, self.contact_normal)
        } else if self.on_steep() {
            self.jump_phase = 0;
            (JumpKind::Wall, self.steep_normal)
        } else if self.config.max_air_jumps > 0 && self.jump_phase <= self.config.max_air_jumps {
            // Walking off a ledge spends the ground jump
            if self.jump_phase == 0 {
                self.jump_phase = 1;
            }
            (JumpKind::Air, self.contact_normal)
        } else {
            return None;
        };

        self.steps_since_last_jump = 0;
        self.jump_phase += 1;

        // Bias toward up so wall jumps still gain height
        let direction = (direction + Vec3::Y).normalize_or_zero();
        let mut speed = jump_speed(gravity.y, self.config.jump_height);
        let aligned_speed = self.velocity.dot(direction);
        if aligned_speed > 0.0 {
            speed = (speed - aligned_speed).max(0.0);
        }
        self.velocity += direction * speed;

        debug!(
            "{kind:?} jump: +{speed:.2} m/s, phase {}",
            self.jump_phase
        );
        Some((kind, speed))
    }
}
