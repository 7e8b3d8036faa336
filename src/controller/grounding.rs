use bevy::prelude::*;

use super::state::{BodyState, Grounding, LocomotionController};
use crate::physics::GroundProbe;

impl LocomotionController {
    /// Decides whether the body is grounded this step and prepares the
    /// contact normal used for steering and jumping.
    ///
    /// Direct contacts win, then snapping, then steep promotion. Airborne
    /// bodies get a world-up contact normal.
    pub fn resolve_ground_state(
        &mut self,
        body: BodyState,
        probe: &impl GroundProbe,
    ) -> Option<Grounding> {
        self.steps_since_last_grounded = self.steps_since_last_grounded.saturating_add(1);
        self.steps_since_last_jump = self.steps_since_last_jump.saturating_add(1);
        self.velocity = body.velocity;

        let grounding = if self.on_ground() {
            Some(Grounding::Contact)
        } else if self.snap_to_ground(body.position, probe) {
            Some(Grounding::Snapped)
        } else if self.promote_steep_contacts() {
            Some(Grounding::SteepPromoted)
        } else {
            None
        };

        if grounding.is_some() {
            self.steps_since_last_grounded = 0;
            if self.steps_since_last_jump > 1 {
                self.jump_phase = 0;
            }
            // A single contact normal is already unit length
            if self.ground_contact_count > 1 {
                self.contact_normal = self.contact_normal.normalize_or_zero();
            }
        } else {
            self.contact_normal = Vec3::Y;
        }

        grounding
    }

    /// Keeps the body on the ground when it briefly loses contact, e.g. when
    /// cresting a ramp. Only runs within one step of being grounded and not
    /// right after a jump.
    pub(crate) fn snap_to_ground(&mut self, position: Vec3, probe: &impl GroundProbe) -> bool {
        if self.steps_since_last_grounded > 1 || self.steps_since_last_jump <= 2 {
            return false;
        }

        let speed = self.velocity.length();
        if speed > self.config.max_snap_speed {
            trace!("snap skipped: speed {speed:.2} above limit");
            return false;
        }

        let Some(hit) = probe.cast_down(position, self.config.probe_distance) else {
            trace!("snap skipped: nothing below");
            return false;
        };

        if hit.normal.y < self.thresholds.min_dot(hit.surface) {
            trace!("snap skipped: {:?} surface too steep", hit.surface);
            return false;
        }

        self.ground_contact_count = 1;
        self.contact_normal = hit.normal;

        // Drop the part moving away from the surface, keep the speed
        let dot = self.velocity.dot(hit.normal);
        if dot > 0.0 {
            self.velocity = (self.velocity - hit.normal * dot).normalize_or_zero() * speed;
        }
        true
    }

    /// Treats several steep contacts as ground when their combined normal is
    /// walkable, e.g. at the bottom of a narrow V-shaped gap.
    pub(crate) fn promote_steep_contacts(&mut self) -> bool {
        if self.steep_contact_count <= 1 {
            return false;
        }

        self.steep_normal = self.steep_normal.normalize_or_zero();
        if self.steep_normal.y < self.thresholds.min_ground_dot {
            return false;
        }

        trace!("{} steep contacts promoted to ground", self.steep_contact_count);
        self.ground_contact_count = 1;
        self.contact_normal = self.steep_normal;
        true
    }
}
