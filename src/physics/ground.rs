use avian3d::prelude::*;
use bevy::prelude::*;

use super::layers::SurfaceClass;

/// Result of a downward ground probe
#[derive(Debug, Clone, Copy)]
pub struct ProbeHit {
    pub normal: Vec3,
    pub distance: f32,
    pub surface: SurfaceClass,
}

/// Ray-cast collaborator used for ground snapping.
pub trait GroundProbe {
    /// Casts a ray straight down from `origin` and returns the nearest hit
    /// within `max_distance`.
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<ProbeHit>;
}

/// Never hits anything. Useful for bodies that should not snap.
pub struct NoProbe;

impl GroundProbe for NoProbe {
    fn cast_down(&self, _origin: Vec3, _max_distance: f32) -> Option<ProbeHit> {
        None
    }
}

/// [`GroundProbe`] backed by Avian's spatial query pipeline.
///
/// `classify` resolves the hit collider to its surface class, usually by
/// looking up its `CollisionLayers`.
pub struct SpatialProbe<'a, 'w, 's, C>
where
    C: Fn(Entity) -> SurfaceClass,
{
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
    classify: C,
}

impl<'a, 'w, 's, C> SpatialProbe<'a, 'w, 's, C>
where
    C: Fn(Entity) -> SurfaceClass,
{
    /// Probe that only sees `mask` layers and ignores the body itself.
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        body: Entity,
        mask: LayerMask,
        classify: C,
    ) -> Self {
        let filter = SpatialQueryFilter::default()
            .with_mask(mask)
            .with_excluded_entities([body]);
        Self {
            spatial_query,
            filter,
            classify,
        }
    }
}

impl<C> GroundProbe for SpatialProbe<'_, '_, '_, C>
where
    C: Fn(Entity) -> SurfaceClass,
{
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<ProbeHit> {
        let hit = self
            .spatial_query
            .cast_ray(origin, Dir3::NEG_Y, max_distance, true, &self.filter)?;

        Some(ProbeHit {
            normal: hit.normal,
            distance: hit.distance,
            surface: (self.classify)(hit.entity),
        })
    }
}
