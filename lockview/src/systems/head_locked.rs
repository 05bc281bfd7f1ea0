use glam::Vec2;

use crate::{
    components::{GlobalTransform, HeadLocked, Info, LocalTransform, VideoSurface},
    compute_billboard_pose,
    hecs::{Entity, World},
};

use super::stage::get_camera_pose;

/// Head locked system
/// Places every [`HeadLocked`] entity `offset` metres in front of the player's head, facing it.
///
/// Reads the [`crate::components::HMD`]'s [`GlobalTransform`], so it must run after the global
/// transforms have been updated for this frame. Writes both the [`LocalTransform`] and the
/// [`GlobalTransform`] of the head locked entities; their scale is left alone. Does nothing if
/// there is no HMD or nothing is head locked yet.
pub fn head_locked_system(world: &mut World) {
    let Some(camera) = get_camera_pose(world) else {
        return;
    };

    for (_, (head_locked, local_transform, global_transform)) in world
        .query_mut::<(&HeadLocked, &mut LocalTransform, &mut GlobalTransform)>()
    {
        let pose = compute_billboard_pose(&camera, head_locked.offset);
        local_transform.update_from_pose(&pose);
        global_transform.0 = local_transform.to_affine();
    }
}

/// Add the head locked video surface to the world
pub fn add_video_surface(world: &mut World, world_size: Vec2, offset: f32) -> Entity {
    world.spawn((
        Info::new("Video Surface"),
        VideoSurface::new(world_size),
        HeadLocked { offset },
        LocalTransform::default(),
        GlobalTransform::default(),
    ))
}
