use crate::{LockviewResult, Pose};

/// The host's XR runtime: immersive session negotiation and head tracking.
///
/// In a browser this is WebXR; on the desktop it is an emulated headset. Lockview only ever asks
/// to enter a session and where the viewer's head is. Pausing, resuming and exiting are left to the
/// runtime.
pub trait XrRuntime {
    /// Ask the runtime to start an immersive session
    fn request_session(&mut self) -> LockviewResult<()>;

    /// The pose of the viewer's head in stage space, or `None` if tracking is lost
    fn locate_view(&mut self) -> Option<Pose>;
}

/// Where we are in the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Rendering to the page, with the "enter VR" overlay showing
    #[default]
    Inline,
    /// Rendering to the headset
    Immersive,
}

/// Wrapper around the immersive session state
#[derive(Debug, Default)]
pub struct SessionContext {
    state: SessionState,
    last_pose: Pose,
    tracking_lost: bool,
}

impl SessionContext {
    /// The current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Are we rendering to the headset?
    pub fn is_immersive(&self) -> bool {
        self.state == SessionState::Immersive
    }

    /// Ask `runtime` for an immersive session. On failure the error is logged and we stay inline;
    /// recovery is up to the runtime.
    pub fn enter_immersive(&mut self, runtime: &mut impl XrRuntime) -> SessionState {
        if self.is_immersive() {
            return self.state;
        }

        match runtime.request_session() {
            Ok(()) => {
                log::info!("[LOCKVIEW_SESSION] Entered immersive session");
                self.state = SessionState::Immersive;
            }
            Err(e) => {
                log::warn!("[LOCKVIEW_SESSION] {e}");
            }
        }

        self.state
    }

    /// Ask `runtime` where the viewer's head is. If tracking is lost the last known pose is used.
    pub fn locate_view(&mut self, runtime: &mut impl XrRuntime) -> Pose {
        match runtime.locate_view() {
            Some(pose) => {
                if self.tracking_lost {
                    log::info!("[LOCKVIEW_SESSION] Tracking regained");
                    self.tracking_lost = false;
                }
                self.last_pose = pose;
            }
            None => {
                if !self.tracking_lost {
                    log::warn!("[LOCKVIEW_SESSION] Tracking lost, holding last known pose");
                    self.tracking_lost = true;
                }
            }
        }
        self.last_pose
    }
}
