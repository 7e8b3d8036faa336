use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Controlled body
    Player,
    /// Static world geometry
    World,
    /// Stair geometry, walkable at steeper angles than plain ground
    Stairs,
}

/// Walkability class of a surface, looked up from its collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceClass {
    #[default]
    Ground,
    Stairs,
}

/// Maps a collider's layer memberships to a [`SurfaceClass`].
#[derive(Debug, Clone, Copy)]
pub struct SurfaceClassifier {
    pub stairs_mask: LayerMask,
}

impl SurfaceClassifier {
    pub fn new(stairs_mask: LayerMask) -> Self {
        Self { stairs_mask }
    }

    /// Surfaces without layer information count as plain ground.
    pub fn classify(&self, layers: Option<&CollisionLayers>) -> SurfaceClass {
        match layers {
            Some(layers) if (layers.memberships & self.stairs_mask) != LayerMask::NONE => {
                SurfaceClass::Stairs
            }
            _ => SurfaceClass::Ground,
        }
    }
}

impl Default for SurfaceClassifier {
    fn default() -> Self {
        Self::new(GameLayer::Stairs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stairs_membership_classifies_as_stairs() {
        let classifier = SurfaceClassifier::default();
        let stairs = CollisionLayers::new(GameLayer::Stairs, [GameLayer::Player]);
        assert_eq!(classifier.classify(Some(&stairs)), SurfaceClass::Stairs);
    }

    #[test]
    fn world_and_unlayered_surfaces_are_ground() {
        let classifier = SurfaceClassifier::default();
        let world = CollisionLayers::new(GameLayer::World, [GameLayer::Player]);
        assert_eq!(classifier.classify(Some(&world)), SurfaceClass::Ground);
        assert_eq!(classifier.classify(None), SurfaceClass::Ground);
    }

    #[test]
    fn mixed_membership_counts_as_stairs() {
        let classifier = SurfaceClassifier::default();
        let both = CollisionLayers::new([GameLayer::World, GameLayer::Stairs], [GameLayer::Player]);
        assert_eq!(classifier.classify(Some(&both)), SurfaceClass::Stairs);
    }
}
