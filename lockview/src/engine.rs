use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    config::LockviewConfig,
    contexts::{MediaContext, SessionContext, SessionState, UiContext, XrRuntime},
    media::MediaBackend,
    systems::{
        head_locked::add_video_surface,
        head_locked_system,
        rendering::Compositor,
        rendering_system,
        stage::{add_tracking_entities, set_hmd_in_stage},
        update_global_transform_system, update_global_transform_with_parent_system,
    },
    util::PerformanceTimer,
    LockviewError, LockviewResult,
};

/// Builder for [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    config: Option<LockviewConfig>,
    default_source: Option<String>,
    should_quit: Option<Arc<AtomicBool>>,
    mount_surface: Option<bool>,
}

impl EngineBuilder {
    /// Create an `EngineBuilder`
    pub fn new() -> Self {
        Default::default()
    }

    /// Use this configuration rather than the defaults
    pub fn config(&mut self, config: LockviewConfig) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// Override the bundled video the media element starts on
    pub fn default_source(&mut self, default_source: impl Into<String>) -> &mut Self {
        self.default_source = Some(default_source.into());
        self
    }

    /// Share a flag that makes [`Engine::update`] return [`LockviewError::ShuttingDown`] once set,
    /// eg. from a Ctrl-C handler
    pub fn should_quit(&mut self, should_quit: Arc<AtomicBool>) -> &mut Self {
        self.should_quit = Some(should_quit);
        self
    }

    /// Whether to add the video surface straight away. Defaults to `true`; if `false`, call
    /// [`Engine::mount_surface`] later.
    pub fn mount_surface(&mut self, mount_surface: bool) -> &mut Self {
        self.mount_surface = Some(mount_surface);
        self
    }

    /// Build the `Engine`
    pub fn build<R: XrRuntime, B: MediaBackend>(
        &mut self,
        runtime: R,
        backend: B,
    ) -> LockviewResult<Engine<R, B>> {
        let mut config = self.config.take().unwrap_or_else(LockviewConfig::from_env);
        if let Some(default_source) = self.default_source.take() {
            config.media.default_source = default_source;
        }
        config.validate()?;

        // Initialize the world with our "tracking" entities, the stage and the HMD.
        let mut world = hecs::World::default();
        let (stage_entity, hmd_entity) = add_tracking_entities(&mut world);

        let media_context = MediaContext::new(
            backend,
            config.media.default_source.clone(),
            config.media.playback.clone(),
        );
        let ui_context = UiContext::new(&config.ui);

        let mut engine = Engine {
            world,
            runtime,
            should_quit: self.should_quit.take().unwrap_or_default(),
            session_context: Default::default(),
            media_context,
            ui_context,
            stage_entity,
            hmd_entity,
            surface_entity: None,
            frame_index: 0,
            performance_timer: PerformanceTimer::new("frame"),
            config,
        };

        if self.mount_surface.unwrap_or(true) {
            engine.mount_surface();
        }

        Ok(engine)
    }
}

/// The result of calling [`Engine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickData {
    /// Frames started since the engine was built, starting at 1
    pub frame_index: u64,
    /// The session state for this frame
    pub session_state: SessionState,
}

/// The Lockview Engine
/// A wrapper around the "external world" from the perspective of the scene: the XR runtime, the
/// media element and the page's UI.
/// **IMPORTANT**: make sure you call `update` then `finish` each tick
pub struct Engine<R: XrRuntime, B: MediaBackend> {
    should_quit: Arc<AtomicBool>,
    /// World
    pub world: hecs::World,
    /// The XR runtime, supplying head poses
    pub runtime: R,
    /// Immersive session state
    pub session_context: SessionContext,
    /// The media element and its source
    pub media_context: MediaContext<B>,
    /// The page around the immersive view
    pub ui_context: UiContext,
    /// Stage entity
    pub stage_entity: hecs::Entity,
    /// HMD entity
    pub hmd_entity: hecs::Entity,
    /// The video surface, once mounted
    pub surface_entity: Option<hecs::Entity>,
    frame_index: u64,
    performance_timer: PerformanceTimer,
    config: LockviewConfig,
}

impl<R: XrRuntime, B: MediaBackend> Engine<R, B> {
    /// Create a new engine with the default configuration
    pub fn new(runtime: R, backend: B) -> LockviewResult<Self> {
        EngineBuilder::new().build(runtime, backend)
    }

    /// The configuration the engine was built with
    pub fn config(&self) -> &LockviewConfig {
        &self.config
    }

    /// Add the head locked video surface, if it isn't there already.
    ///
    /// The surface is placed in front of the head straight away, so a surface mounted between
    /// [`Engine::update`] and [`Engine::finish`] is drawn at this frame's pose.
    pub fn mount_surface(&mut self) -> hecs::Entity {
        if let Some(surface_entity) = self.surface_entity {
            return surface_entity;
        }

        let billboard = &self.config.billboard;
        let surface_entity = add_video_surface(
            &mut self.world,
            billboard.world_size.into(),
            billboard.offset,
        );
        head_locked_system(&mut self.world);
        log::debug!("[LOCKVIEW_ENGINE] Mounted video surface {surface_entity:?}");
        self.surface_entity = Some(surface_entity);
        surface_entity
    }

    /// The user tapped the overlay: ask for an immersive session
    pub fn tap_overlay(&mut self) -> SessionState {
        let state = self.session_context.enter_immersive(&mut self.runtime);
        self.refresh_ui();
        state
    }

    /// The user picked a file. Returns whether the media source changed.
    ///
    /// Nothing here is fatal: a file that isn't a video is ignored, and a host error is logged and
    /// leaves the current source playing.
    pub fn select_file(&mut self, file: &B::File) -> bool {
        let changed = match self.media_context.select_file(file) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("[LOCKVIEW_ENGINE] Unable to use selected file: {e}");
                false
            }
        };
        self.refresh_ui();
        changed
    }

    /// IMPORTANT: Call this function each tick to update the head pose and everything that follows
    /// it
    pub fn update(&mut self) -> LockviewResult<TickData> {
        if self.should_quit.load(Ordering::Acquire) {
            log::info!("[LOCKVIEW_ENGINE] Lockview is now exiting!");
            return Err(LockviewError::ShuttingDown);
        }

        self.performance_timer.start();
        self.frame_index += 1;

        let hmd_in_stage = self.session_context.locate_view(&mut self.runtime);
        set_hmd_in_stage(&mut self.world, self.hmd_entity, &hmd_in_stage);

        update_global_transform_system(&mut self.world);
        update_global_transform_with_parent_system(&mut self.world);
        head_locked_system(&mut self.world);

        Ok(TickData {
            frame_index: self.frame_index,
            session_state: self.session_context.state(),
        })
    }

    /// Call this after update, to hand this frame's surfaces to the compositor
    pub fn finish(&mut self, compositor: &mut impl Compositor) {
        rendering_system(&mut self.world, self.media_context.src(), compositor);
        self.performance_timer.end();
    }

    /// Ask the engine to stop. The next call to [`Engine::update`] fails with
    /// [`LockviewError::ShuttingDown`].
    pub fn quit(&self) {
        self.should_quit.store(true, Ordering::Release);
    }

    /// Tear down: release any transient media reference
    pub fn shutdown(mut self) {
        self.media_context.teardown();
        log::info!(
            "[LOCKVIEW_ENGINE] Shut down after {} frames",
            self.frame_index
        );
    }

    fn refresh_ui(&mut self) {
        self.ui_context.update(
            self.session_context.state(),
            self.media_context.selected_label(),
        );
    }
}
