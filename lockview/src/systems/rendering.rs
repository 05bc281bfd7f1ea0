use glam::{Affine3A, Vec2};

use crate::{
    components::{video_surface::QuadMesh, GlobalTransform, VideoSurface},
    hecs::{Entity, World},
};

/// Everything the renderer needs to draw one video surface this frame
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSubmission {
    /// The surface entity
    pub entity: Entity,
    /// Transform from the surface's local space to global space
    pub transform: Affine3A,
    /// Width and height of the surface, in metres
    pub world_size: Vec2,
    /// The surface's geometry, in local space
    pub quad: QuadMesh,
    /// The media element's current source, for texture lookup
    pub source: String,
    /// Whether the video should be tone mapped
    pub tone_mapped: bool,
}

/// The renderer: composites submitted surfaces into the view.
///
/// Lockview never rasterises anything itself. The host's renderer (three.js over WebXR, a Vulkan
/// compositor, or a logger in the simulator) implements this trait.
pub trait Compositor {
    /// Called once per surface, per frame
    fn submit(&mut self, submission: &SurfaceSubmission);
}

/// Rendering system
/// Walks through each [`VideoSurface`] and submits it, with its global transform and the current
/// media source, to the compositor. Returns the number of surfaces submitted.
pub fn rendering_system(
    world: &mut World,
    source: &str,
    compositor: &mut impl Compositor,
) -> usize {
    let mut submitted = 0;
    for (entity, (surface, global_transform)) in
        world.query_mut::<(&VideoSurface, &GlobalTransform)>()
    {
        compositor.submit(&SurfaceSubmission {
            entity,
            transform: global_transform.0,
            world_size: surface.world_size,
            quad: surface.quad(),
            source: source.to_string(),
            tone_mapped: surface.tone_mapped,
        });
        submitted += 1;
    }
    submitted
}

impl<F: FnMut(&SurfaceSubmission)> Compositor for F {
    fn submit(&mut self, submission: &SurfaceSubmission) {
        self(submission)
    }
}
