use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::sleep,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use lockview::{
    config::LockviewConfig,
    media::{AutoplayPolicy, LocalFile, NativeMediaBackend},
    systems::rendering::{Compositor, SurfaceSubmission},
    EngineBuilder, LockviewError,
};

mod headset;

use headset::EmulatedHeadset;

/// Run Lockview against an emulated headset
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file (JSON)
    #[arg(long, env = "LOCKVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Video to select once the first frame has rendered
    #[arg(long)]
    video: Option<PathBuf>,

    /// Number of frames to run, or 0 to run until Ctrl-C
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Frames per second of the emulated display
    #[arg(long, default_value_t = 72)]
    fps: u32,

    /// Refuse to start playback, as a browser does without a user gesture
    #[arg(long)]
    block_autoplay: bool,
}

/// Logs what a real compositor would draw
#[derive(Debug, Default)]
struct LogCompositor {
    last_source: Option<String>,
}

impl Compositor for LogCompositor {
    fn submit(&mut self, submission: &SurfaceSubmission) {
        if self.last_source.as_deref() != Some(submission.source.as_str()) {
            log::info!(
                "[LOCKVIEW_SIMULATOR] Surface {:?} now showing {}",
                submission.entity,
                submission.source
            );
            self.last_source = Some(submission.source.clone());
        }

        let (_, rotation, translation) = submission.transform.to_scale_rotation_translation();
        log::trace!(
            "[LOCKVIEW_SIMULATOR] Surface at {translation:?} facing {rotation:?}, {:?}m",
            submission.world_size
        );
    }
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("[LOCKVIEW_SIMULATOR] MAIN!");
    if let Err(e) = real_main() {
        log::error!("[LOCKVIEW_SIMULATOR] Error running simulator: {e:?}");
        std::process::exit(1);
    }
    log::info!("[LOCKVIEW_SIMULATOR] FINISHED! Goodbye!");
}

fn real_main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LockviewConfig::load(path)
            .with_context(|| format!("Unable to load configuration from {path:?}"))?,
        None => LockviewConfig::from_env(),
    };

    let should_quit = Arc::new(AtomicBool::new(false));
    {
        let should_quit = should_quit.clone();
        ctrlc::set_handler(move || should_quit.store(true, Ordering::Release))
            .context("Unable to register Ctrl-C handler")?;
    }

    let autoplay_policy = if args.block_autoplay {
        AutoplayPolicy::Blocked
    } else {
        AutoplayPolicy::Allowed
    };
    let fps = args.fps.max(1);
    let mut engine = EngineBuilder::new()
        .config(config)
        .should_quit(should_quit)
        .build(
            EmulatedHeadset::new(fps),
            NativeMediaBackend::new(autoplay_policy),
        )?;

    log::info!(
        "[LOCKVIEW_SIMULATOR] {} (press Ctrl-C to quit)",
        engine.ui_context.overlay_prompt
    );
    engine.tap_overlay();

    let video = args
        .video
        .as_ref()
        .map(LocalFile::open)
        .transpose()
        .context("Unable to open video")?;

    let mut compositor = LogCompositor::default();
    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);

    loop {
        let tick_data = match engine.update() {
            Ok(tick_data) => tick_data,
            Err(LockviewError::ShuttingDown) => break,
            Err(e) => return Err(e.into()),
        };
        engine.finish(&mut compositor);

        if tick_data.frame_index == 1 {
            if let Some(video) = &video {
                engine.select_file(video);
                if let Some(label) = &engine.ui_context.selected_label {
                    log::info!("[LOCKVIEW_SIMULATOR] {label}");
                }
            }
        }

        if args.frames != 0 && tick_data.frame_index >= args.frames {
            engine.quit();
        }
        sleep(frame_time);
    }

    engine.shutdown();
    Ok(())
}
