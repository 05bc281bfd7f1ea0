use crate::{
    components::{GlobalTransform, Info, LocalTransform, Parent, Stage, HMD},
    hecs::{Entity, World},
    Pose,
};

/// Setup the Stage and HMD entities that track the player's frame of reference and head.
/// Returns `(stage_entity, hmd_entity)`.
pub fn add_tracking_entities(world: &mut World) -> (Entity, Entity) {
    let stage_entity = world.spawn((
        Stage {},
        Info::new("Stage"),
        LocalTransform::default(),
        GlobalTransform::default(),
    ));
    let hmd_entity = world.spawn((
        HMD {},
        Info::new("HMD"),
        Parent(stage_entity),
        LocalTransform::default(),
        GlobalTransform::default(),
    ));
    (stage_entity, hmd_entity)
}

/// Get the pose of the player's head in global space, ie. the camera pose. `None` if there is no
/// HMD in the world.
pub fn get_camera_pose(world: &mut World) -> Option<Pose> {
    world
        .query_mut::<&GlobalTransform>()
        .with::<&HMD>()
        .into_iter()
        .next()
        .map(|(_, global_transform)| global_transform.pose())
}

/// Since the HMD is parented to the Stage, its [`LocalTransform`] is its pose in stage space.
pub fn set_hmd_in_stage(world: &mut World, hmd_entity: Entity, hmd_in_stage: &Pose) {
    match world.get::<&mut LocalTransform>(hmd_entity) {
        Ok(mut local_transform) => local_transform.update_from_pose(hmd_in_stage),
        Err(e) => log::warn!("[LOCKVIEW_STAGE] Unable to update HMD {hmd_entity:?}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    use super::*;
    use crate::systems::{
        update_global_transform_system, update_global_transform_with_parent_system,
    };

    #[test]
    pub fn test_camera_pose_follows_stage() {
        let mut world = World::new();
        assert!(get_camera_pose(&mut world).is_none());

        let (stage, hmd) = add_tracking_entities(&mut world);
        world.get::<&mut LocalTransform>(stage).unwrap().translation = Vec3::new(0., 0., 5.);
        let hmd_in_stage = Pose::new(Vec3::new(0., 1.6, 0.), Quat::from_rotation_y(0.5));
        set_hmd_in_stage(&mut world, hmd, &hmd_in_stage);

        update_global_transform_system(&mut world);
        update_global_transform_with_parent_system(&mut world);

        let camera = get_camera_pose(&mut world).unwrap();
        assert_relative_eq!(camera.position, Vec3::new(0., 1.6, 5.), epsilon = 1e-6);
        assert_relative_eq!(camera.orientation, hmd_in_stage.orientation, epsilon = 1e-6);
    }
}
