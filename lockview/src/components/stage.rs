/// Marker component for the player's frame of reference
#[derive(Debug, Clone, Copy, Default)]
pub struct Stage;
