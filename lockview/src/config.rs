use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    media::PlaybackOptions, LockviewError, LockviewResult, DEFAULT_OFFSET, DEFAULT_SURFACE_SIZE,
    DEFAULT_VIDEO_SOURCE,
};

/// Environment variable that overrides [`MediaConfig::default_source`]
pub const DEFAULT_VIDEO_ENV_VAR: &str = "LOCKVIEW_DEFAULT_VIDEO";

/// Top level configuration. Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LockviewConfig {
    /// Placement of the video surface
    pub billboard: BillboardConfig,
    /// Where the video comes from and how it plays
    pub media: MediaConfig,
    /// Text shown to the user outside of the immersive session
    pub ui: UiConfig,
}

/// Placement of the video surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillboardConfig {
    /// Distance in front of the headset, in metres
    pub offset: f32,
    /// Width and height of the surface, in metres
    pub world_size: [f32; 2],
}

impl Default for BillboardConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            world_size: DEFAULT_SURFACE_SIZE,
        }
    }
}

/// Where the video comes from and how it plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Path to the bundled video, used until the user picks a file
    pub default_source: String,
    /// How the media element is configured on every load
    pub playback: PlaybackOptions,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            default_source: DEFAULT_VIDEO_SOURCE.to_string(),
            playback: Default::default(),
        }
    }
}

/// Text shown to the user outside of the immersive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Text on the full-viewport overlay that enters the immersive session
    pub overlay_prompt: String,
    /// Label on the file picker
    pub file_picker_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            overlay_prompt: "Tap to Enter VR".to_string(),
            file_picker_label: "Choose a video".to_string(),
        }
    }
}

impl LockviewConfig {
    /// Parse and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> LockviewResult<Self> {
        let config: LockviewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, then apply any overrides from the environment
    pub fn load(path: impl AsRef<Path>) -> LockviewResult<Self> {
        let path = path.as_ref();
        log::info!("[LOCKVIEW_CONFIG] Loading configuration from {path:?}");
        let json = fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&json)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// The default configuration with any overrides from the environment applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Replace settings with those set in the environment, if any
    pub fn apply_env_overrides(&mut self) {
        if let Ok(source) = env::var(DEFAULT_VIDEO_ENV_VAR) {
            if !source.is_empty() {
                log::debug!("[LOCKVIEW_CONFIG] {DEFAULT_VIDEO_ENV_VAR} overrides default source with {source}");
                self.media.default_source = source;
            }
        }
    }

    /// Check that the configuration describes something we can render
    pub fn validate(&self) -> LockviewResult<()> {
        let offset = self.billboard.offset;
        if !offset.is_finite() || offset <= 0. {
            return Err(LockviewError::InvalidConfigError(format!(
                "billboard.offset must be a positive number, got {offset}"
            )));
        }

        let [width, height] = self.billboard.world_size;
        if !(width.is_finite() && height.is_finite() && width > 0. && height > 0.) {
            return Err(LockviewError::InvalidConfigError(format!(
                "billboard.world_size must be two positive numbers, got [{width}, {height}]"
            )));
        }

        if self.media.default_source.is_empty() {
            return Err(LockviewError::InvalidConfigError(
                "media.default_source must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
