#![warn(missing_docs)]

//! G'day! Lockview puts a video in front of your face and keeps it there. 📺
//!
//! Lockview renders a single flat video surface that is *head-locked*: every frame the surface is
//! placed a fixed distance directly in front of the viewer's headset and turned to face it. The
//! video comes from either a bundled default asset or a local file the user picks.
//!
//! # Moving parts
//! - The scene is a [`hecs::World`]. The headset is the [`components::HMD`] entity, parented to the
//!   [`components::Stage`]. The video surface is a [`components::VideoSurface`] marked
//!   [`components::HeadLocked`].
//! - [`systems::head_locked_system`] recomputes the surface pose from the headset pose each frame,
//!   using the pure function [`compute_billboard_pose`].
//! - [`contexts::MediaContext`] owns the media element and the lifecycle of transient object
//!   references for user-selected files.
//! - [`Engine`] wires these together with an [`contexts::XrRuntime`] (the immersive session and
//!   head tracking) and a [`systems::rendering::Compositor`] (the renderer).

pub use engine::{Engine, EngineBuilder, TickData};
pub use glam;
pub use hecs;
pub use lockview_error::LockviewError;
pub use pose::{compute_billboard_pose, Pose};

/// Components are data attached to entities in the scene
pub mod components;
/// Configuration, loaded from JSON and the environment
pub mod config;
/// Contexts are wrappers around state the engine shares with the outside world
pub mod contexts;
mod engine;
mod lockview_error;
/// Media backends for the hosts Lockview runs on
pub mod media;
mod pose;
/// Systems are functions called each frame to update the scene
pub mod systems;
/// Kitchen sink utility functions
pub mod util;

/// Lockview result type
pub type LockviewResult<T> = std::result::Result<T, LockviewError>;

/// Distance, in metres, from the headset to the video surface
pub const DEFAULT_OFFSET: f32 = 1.5;

/// Width and height, in metres, of the video surface
pub const DEFAULT_SURFACE_SIZE: [f32; 2] = [3.2, 1.8];

/// Path of the video bundled with the application
pub const DEFAULT_VIDEO_SOURCE: &str = "./video.mp4";

/// Prefix every selectable file's content type must carry
pub const VIDEO_CONTENT_TYPE_PREFIX: &str = "video/";
