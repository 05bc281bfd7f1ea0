use glam::{Vec2, Vec3};

use crate::DEFAULT_SURFACE_SIZE;

/// A flat rectangle, facing +Z in its own space, textured with the live frame of the active media
/// source.
///
/// The surface's size lives here rather than in the entity's scale, so moving the surface around
/// never changes how big it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoSurface {
    /// The world-size of the surface, in metres
    pub world_size: Vec2,
    /// Whether the renderer should tone map the video. Video frames are already display referred,
    /// so this is off by default.
    pub tone_mapped: bool,
}

impl Default for VideoSurface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_SIZE.into())
    }
}

/// Geometry for a [`VideoSurface`], ready to be uploaded by a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    /// Vertex positions, in the surface's local space
    pub positions: [Vec3; 4],
    /// Texture coordinates, with (0, 0) at the top left of the video frame
    pub tex_coords: [Vec2; 4],
    /// Two counter-clockwise triangles
    pub indices: [u32; 6],
}

impl VideoSurface {
    /// Create a surface with the given size and tone mapping disabled
    pub fn new(world_size: Vec2) -> Self {
        Self {
            world_size,
            tone_mapped: false,
        }
    }

    /// Build the quad for this surface, centred on the origin
    pub fn quad(&self) -> QuadMesh {
        let (half_width, half_height) = (self.world_size.x / 2., self.world_size.y / 2.);

        let positions = [
            Vec3::new(-half_width, half_height, 0.),  // v0
            Vec3::new(half_width, -half_height, 0.),  // v1
            Vec3::new(half_width, half_height, 0.),   // v2
            Vec3::new(-half_width, -half_height, 0.), // v3
        ];
        let tex_coords = [
            Vec2::new(0., 0.), // v0
            Vec2::new(1., 1.), // v1
            Vec2::new(1., 0.), // v2
            Vec2::new(0., 1.), // v3
        ];

        QuadMesh {
            positions,
            tex_coords,
            indices: [0, 3, 1, 0, 1, 2],
        }
    }
}
