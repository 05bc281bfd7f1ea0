use crate::DEFAULT_OFFSET;

/// Marks an entity that should stay rigidly in front of the player's headset.
///
/// Every frame [`crate::systems::head_locked_system`] recomputes the entity's pose from the
/// [`super::HMD`]'s global pose. There is no smoothing: the entity is exactly `offset` metres along
/// the headset's forward vector, with the headset's orientation.
///
/// Head locked entities must not have a [`super::Parent`]. Nothing else should write to their
/// transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadLocked {
    /// Distance along the headset's forward vector, in metres
    pub offset: f32,
}

impl Default for HeadLocked {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
        }
    }
}
