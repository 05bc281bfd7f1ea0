use std::f32::consts::FRAC_PI_4;

use approx::assert_relative_eq;
use lockview::{
    contexts::{MediaSource, SessionState, XrRuntime},
    glam::{Quat, Vec3},
    media::{AutoplayPolicy, LocalFile, NativeMediaBackend, ObjectUrl},
    systems::rendering::SurfaceSubmission,
    Engine, EngineBuilder, LockviewResult, Pose,
};

struct Headset {
    yaw: f32,
}

impl XrRuntime for Headset {
    fn request_session(&mut self) -> LockviewResult<()> {
        Ok(())
    }

    fn locate_view(&mut self) -> Option<Pose> {
        Some(Pose::new(
            Vec3::new(0., 1.6, 0.),
            Quat::from_rotation_y(self.yaw),
        ))
    }
}

fn engine() -> Engine<Headset, NativeMediaBackend> {
    EngineBuilder::new()
        .config(Default::default())
        .build(
            Headset { yaw: 0. },
            NativeMediaBackend::new(AutoplayPolicy::Allowed),
        )
        .unwrap()
}

fn render(engine: &mut Engine<Headset, NativeMediaBackend>) -> Vec<SurfaceSubmission> {
    let mut submissions = Vec::new();
    engine.update().unwrap();
    engine.finish(&mut |s: &SurfaceSubmission| submissions.push(s.clone()));
    submissions
}

#[test]
fn default_then_user_selected_clip() {
    let mut engine = engine();

    // Default load: the bundled asset.
    assert_eq!(
        engine.media_context.source(),
        &MediaSource::Default {
            path: "./video.mp4".to_string()
        }
    );
    assert_eq!(
        engine.media_context.backend().element.src.as_deref(),
        Some("./video.mp4")
    );
    assert!(engine.ui_context.selected_label.is_none());
    assert_eq!(render(&mut engine)[0].source, "./video.mp4");

    assert_eq!(engine.tap_overlay(), SessionState::Immersive);

    // The user picks clip.mp4.
    let bytes = b"\x00\x00\x00\x18ftypmp42 clip".to_vec();
    let clip = LocalFile::new("clip.mp4", "video/mp4", bytes.clone());
    assert!(engine.select_file(&clip));

    let src = engine
        .media_context
        .backend()
        .element
        .src
        .clone()
        .unwrap();
    assert!(src.starts_with("blob:"));
    assert_eq!(
        engine.media_context.backend().resolve_src().as_deref(),
        Some(&bytes[..])
    );
    assert_eq!(
        engine.ui_context.selected_label.as_deref(),
        Some("Selected: clip.mp4")
    );

    // The surface now shows the clip, still in front of the viewer.
    engine.runtime.yaw = FRAC_PI_4;
    let submissions = render(&mut engine);
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].source, src);
    let (_, rotation, translation) = submissions[0].transform.to_scale_rotation_translation();
    let forward = Quat::from_rotation_y(FRAC_PI_4) * Vec3::NEG_Z;
    assert_relative_eq!(
        translation,
        Vec3::new(0., 1.6, 0.) + forward * 1.5,
        epsilon = 1e-5
    );
    assert_relative_eq!(rotation, Quat::from_rotation_y(FRAC_PI_4), epsilon = 1e-5);

    // A second clip replaces the first, whose reference no longer resolves.
    let second = LocalFile::new("second.webm", "video/webm", b"webm".to_vec());
    assert!(engine.select_file(&second));
    let first_url = ObjectUrl::new(src);
    assert!(engine
        .media_context
        .backend()
        .object_urls
        .resolve(&first_url)
        .is_none());
    assert_eq!(
        engine.ui_context.selected_label.as_deref(),
        Some("Selected: second.webm")
    );

    // Not a video: nothing changes.
    let photo = LocalFile::new("photo.png", "image/png", b"png".to_vec());
    assert!(!engine.select_file(&photo));
    assert_eq!(engine.media_context.selected_file_name(), Some("second.webm"));
}

#[test]
fn teardown_releases_the_active_reference() {
    let mut engine = engine();
    engine.select_file(&LocalFile::new("clip.mp4", "video/mp4", b"clip".to_vec()));
    assert_eq!(engine.media_context.backend().object_urls.len(), 1);

    engine.media_context.teardown();
    let object_urls = &engine.media_context.backend().object_urls;
    assert!(object_urls.is_empty());
    assert_eq!(object_urls.revoked_count(), 1);

    // Tearing down again, or shutting down, must not release anything twice.
    engine.media_context.teardown();
    assert_eq!(
        engine.media_context.backend().object_urls.revoked_count(),
        1
    );
    engine.shutdown();
}
