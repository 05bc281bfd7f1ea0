use glam::Quat;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::VIDEO_CONTENT_TYPE_PREFIX;

/// Does this content type describe a video? MIME types are case insensitive, so `Video/MP4`
/// counts.
pub fn is_video_content_type(content_type: &str) -> bool {
    content_type
        .get(..VIDEO_CONTENT_TYPE_PREFIX.len())
        .map_or(false, |prefix| {
            prefix.eq_ignore_ascii_case(VIDEO_CONTENT_TYPE_PREFIX)
        })
}

/// Pull the last path component out of a path or URL, for display
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\'])
        .find(|s| !s.is_empty())
        .unwrap_or(path)
}

/// Rotation of `yaw` radians to the left of -Z, followed by `pitch` radians up
pub fn yaw_pitch(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

#[derive(Debug)]
/// A timer to track how long each tick takes. Does nothing on the web, where there is no
/// monotonic clock in `std`.
pub struct PerformanceTimer {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    name: String,
    #[cfg(not(target_arch = "wasm32"))]
    frame_start: Instant,
    #[cfg(not(target_arch = "wasm32"))]
    last_update: Instant,
    #[cfg(not(target_arch = "wasm32"))]
    timings: Vec<usize>,
}

impl PerformanceTimer {
    /// Create a new performance timer
    pub fn new(name: &'static str) -> Self {
        Self {
            name: name.to_string(),
            #[cfg(not(target_arch = "wasm32"))]
            frame_start: Instant::now(),
            #[cfg(not(target_arch = "wasm32"))]
            last_update: Instant::now(),
            #[cfg(not(target_arch = "wasm32"))]
            timings: Default::default(),
        }
    }

    /// Start tracking
    pub fn start(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.frame_start = Instant::now();
        }
    }

    /// Stop tracking. Reports the average about once a second.
    pub fn end(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let now = Instant::now();
            let tic_time = now - self.frame_start;
            self.timings.push(tic_time.as_millis() as usize);

            if (now - self.last_update).as_secs_f32() >= 1.0 {
                let average = self.timings.iter().sum::<usize>() / self.timings.len();
                let name = &self.name;
                log::debug!("[LOCKVIEW_PERF] Average {name} tick time: {average}ms");
                self.last_update = now;
                self.timings.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    pub fn test_is_video_content_type() {
        assert!(is_video_content_type("video/mp4"));
        assert!(is_video_content_type("video/webm; codecs=vp9"));
        assert!(is_video_content_type("Video/QuickTime"));
        assert!(!is_video_content_type("audio/mpeg"));
        assert!(!is_video_content_type("image/png"));
        assert!(!is_video_content_type("video"));
        assert!(!is_video_content_type(""));
        assert!(!is_video_content_type("application/video/mp4"));
    }

    #[test]
    pub fn test_file_name_from_path() {
        assert_eq!(file_name_from_path("./video.mp4"), "video.mp4");
        assert_eq!(file_name_from_path("C:\\clips\\clip.mp4"), "clip.mp4");
        assert_eq!(file_name_from_path("clip.mp4"), "clip.mp4");
        assert_eq!(file_name_from_path("videos/"), "videos");
    }

    #[test]
    pub fn test_yaw_pitch() {
        let forward = yaw_pitch(0., 0.) * Vec3::NEG_Z;
        assert_relative_eq!(forward, Vec3::NEG_Z);
        let up = yaw_pitch(0., std::f32::consts::FRAC_PI_2) * Vec3::NEG_Z;
        assert_relative_eq!(up, Vec3::Y, epsilon = 1e-6);
    }
}
