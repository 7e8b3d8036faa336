use avian3d::prelude::*;
use bevy::prelude::*;

use super::state::LocomotionController;
use crate::physics::SurfaceClass;

/// Up-components at or below this are overhangs and ceilings
const MIN_STEEP_DOT: f32 = -0.01;

impl LocomotionController {
    /// Classifies one contact normal and adds it to this step's totals.
    ///
    /// Each contact point counts separately, so a surface touching at several
    /// points contributes once per point.
    pub fn accumulate_contact(&mut self, normal: Vec3, surface: SurfaceClass) {
        let min_dot = self.thresholds.min_dot(surface);
        if normal.y >= min_dot {
            self.ground_contact_count += 1;
            self.contact_normal += normal;
        } else if normal.y > MIN_STEEP_DOT {
            self.steep_contact_count += 1;
            self.steep_normal += normal;
        }
    }
}

/// Feeds every touching contact point of each controlled body into its
/// controller, with normals oriented toward the body.
pub fn accumulate_contacts(
    collisions: Collisions,
    mut bodies: Query<(Entity, &mut LocomotionController)>,
    layers: Query<&CollisionLayers>,
) {
    for (entity, mut controller) in &mut bodies {
        let classifier = controller.config().surface_classifier();

        for pair in collisions.collisions_with(entity) {
            if !pair.is_touching() {
                continue;
            }

            let is_first = pair.collider1 == entity || pair.body1 == Some(entity);
            let other = if is_first { pair.collider2 } else { pair.collider1 };
            let surface = classifier.classify(layers.get(other).ok());

            for manifold in &pair.manifolds {
                // Manifold normals point from the first collider to the second
                let normal = if is_first { -manifold.normal } else { manifold.normal };
                for _ in &manifold.points {
                    controller.accumulate_contact(normal, surface);
                }
            }
        }
    }
}
