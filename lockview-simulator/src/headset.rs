use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec3;
use lockview::{contexts::XrRuntime, util::yaw_pitch, LockviewResult, Pose};

/// Standing eye height, in metres
const EYE_HEIGHT: f32 = 1.6;

/// Seconds for one full look left, right and back again
const SWEEP_PERIOD: f32 = 8.0;

/// A headset that stands still and slowly looks left and right, with a slight nod.
pub struct EmulatedHeadset {
    fps: u32,
    frame: u64,
    session_running: bool,
}

impl EmulatedHeadset {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frame: 0,
            session_running: false,
        }
    }

    fn pose_at(&self, seconds: f32) -> Pose {
        let phase = TAU * seconds / SWEEP_PERIOD;
        let yaw = FRAC_PI_4 * phase.sin();
        let pitch = 0.1 * (2. * phase).sin();
        Pose::new(Vec3::new(0., EYE_HEIGHT, 0.), yaw_pitch(yaw, pitch))
    }
}

impl XrRuntime for EmulatedHeadset {
    fn request_session(&mut self) -> LockviewResult<()> {
        self.session_running = true;
        Ok(())
    }

    fn locate_view(&mut self) -> Option<Pose> {
        let seconds = self.frame as f32 / self.fps as f32;
        self.frame += 1;

        // Until the session starts, the inline view just looks straight ahead.
        if !self.session_running {
            return Some(Pose::new(Vec3::new(0., EYE_HEIGHT, 0.), Default::default()));
        }
        Some(self.pose_at(seconds))
    }
}
