/// A marker component used to indicate the player's headset, or Head Mounted Display.
///
/// The entity marked with this component has its [`super::LocalTransform`] updated each frame by
/// the [`crate::Engine`] with the pose the XR runtime reports in stage space. Since this entity is
/// parented to the [`super::Stage`] entity, its [`super::GlobalTransform`] is the camera pose that
/// [`crate::systems::head_locked_system`] follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HMD {}
