use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{util, LockviewResult};

pub mod native;
pub mod object_urls;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use native::{AutoplayPolicy, LocalFile, NativeMediaBackend, VideoElement};
pub use object_urls::ObjectUrlStore;

/// A transient, revocable reference to a file the user picked, such as a `blob:` URL.
///
/// Unlike the path to a bundled asset, an `ObjectUrl` pins the file's contents in memory until it
/// is revoked with [`MediaBackend::revoke_object_url`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wrap a URL the host created
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL, suitable for a media element's `src`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file the user picked
pub trait MediaFile {
    /// The file's name, without any directories
    fn name(&self) -> &str;
    /// The file's declared MIME type, eg. `video/mp4`
    fn content_type(&self) -> &str;

    /// Whether this file declares itself to be a video
    fn is_video(&self) -> bool {
        util::is_video_content_type(self.content_type())
    }
}

/// How the media element is configured every time its source changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Play without sound. Browsers only allow unprompted autoplay for muted media.
    pub muted: bool,
    /// Start playing as soon as enough data has loaded
    pub autoplay: bool,
    /// Go back to the start when the end is reached
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Decode inline rather than handing off to a fullscreen player
    pub plays_inline: bool,
    /// CORS mode for the source. Frames from a tainted source cannot be uploaded as a texture.
    pub cross_origin: Option<String>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            muted: true,
            autoplay: true,
            looping: true,
            plays_inline: true,
            cross_origin: Some("anonymous".to_string()),
        }
    }
}

/// Identifies one attempt to start playback. Each load gets a new ticket, so a completion that
/// arrives after the source has changed can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayTicket(pub u64);

/// What happened when playback was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayStatus {
    /// Playback started straight away
    Started,
    /// The host will report the outcome later, via [`crate::contexts::MediaContext::play_settled`]
    Pending,
    /// The host refused, eg. because of an autoplay policy
    Rejected(String),
}

/// The host's media facilities: a single media element and a way to make transient references to
/// files the user picked.
///
/// In a browser these are an `HTMLVideoElement` and `URL.createObjectURL`. Only
/// [`crate::contexts::MediaContext`] should drive a backend.
pub trait MediaBackend {
    /// The kind of file this host's file picker produces
    type File: MediaFile;

    /// Create a transient reference to the contents of `file`
    fn create_object_url(&mut self, file: &Self::File) -> LockviewResult<ObjectUrl>;

    /// Release a transient reference. After this, the URL no longer resolves.
    fn revoke_object_url(&mut self, url: &ObjectUrl);

    /// Apply playback options to the media element
    fn configure(&mut self, options: &PlaybackOptions);

    /// Point the media element at a new source
    fn set_src(&mut self, src: &str);

    /// Start loading the current source from scratch
    fn load(&mut self);

    /// Try to start playback of the current source
    fn play(&mut self, ticket: PlayTicket) -> PlayStatus;
}
