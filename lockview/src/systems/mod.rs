#![allow(missing_docs)]
pub mod head_locked;
pub mod rendering;
pub mod stage;
pub mod update_global_transform;
pub mod update_global_transform_with_parent;

pub use head_locked::head_locked_system;
pub use rendering::rendering_system;
pub use update_global_transform::update_global_transform_system;
pub use update_global_transform_with_parent::update_global_transform_with_parent_system;
