use hecs::World;

use crate::components::{GlobalTransform, LocalTransform, Parent};

/// Update global transform with parent transform system
/// Walks through each entity that has a [`Parent`] and composes its [`LocalTransform`] with its
/// ancestors' transforms. Must run after [`super::update_global_transform_system`].
pub fn update_global_transform_with_parent_system(world: &mut World) {
    // Views allow dynamic borrow checking and component storage look-up to be done once rather
    // than per-entity.
    let mut parents = world.query::<(&Parent, &LocalTransform)>();
    let parents = parents.view();

    // Roots of the hierarchy: entities with a global transform and no parent.
    let mut roots = world.query::<&GlobalTransform>().without::<&Parent>();
    let roots = roots.view();

    // Including `&Parent` here and excluding it from `roots` guarantees the `GlobalTransform`
    // borrows never overlap.
    for (_, (parent, local_transform, global_transform)) in world
        .query::<(&Parent, &LocalTransform, &mut GlobalTransform)>()
        .iter()
    {
        // Walk up to the root, accumulating the transform.
        let mut relative = local_transform.to_affine();
        let mut ancestor = parent.0;
        while let Some((next, ancestor_local)) = parents.get(ancestor) {
            relative = ancestor_local.to_affine() * relative;
            ancestor = next.0;
        }

        match roots.get(ancestor) {
            Some(root) => global_transform.0 = root.0 * relative,
            None => log::warn!(
                "[LOCKVIEW_TRANSFORM] Root {ancestor:?} has no GlobalTransform, leaving child untouched"
            ),
        }
    }
}
