pub mod global_transform;
pub mod head_locked;
pub mod hmd;
pub mod info;
pub mod local_transform;
pub mod parent;
pub mod stage;
pub mod video_surface;

pub use global_transform::GlobalTransform;
pub use head_locked::HeadLocked;
pub use hmd::HMD;
pub use info::Info;
pub use local_transform::LocalTransform;
pub use parent::Parent;
pub use stage::Stage;
pub use video_surface::VideoSurface;
