use std::{fs, path::Path, sync::Arc};

use super::{
    MediaBackend, MediaFile, ObjectUrl, ObjectUrlStore, PlayStatus, PlayTicket, PlaybackOptions,
};
use crate::{util, LockviewResult};

/// A file read from the local filesystem
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl LocalFile {
    /// Create a file from its parts
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its content type from its extension
    pub fn open(path: impl AsRef<Path>) -> LockviewResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| util::file_name_from_path(&path.to_string_lossy()).to_string());

        Ok(Self::new(name, content_type_for_path(path), bytes))
    }

    /// The file's contents
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }
}

impl MediaFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Guess a MIME type from a file extension, the way a browser's file picker does
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "ogv" => "video/ogg",
        "avi" => "video/x-msvideo",
        "mp3" => "audio/mpeg",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// How the host responds to a request to start playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    /// Playback starts straight away
    #[default]
    Allowed,
    /// Playback is refused, as a browser does without a user gesture
    Blocked,
    /// The outcome is reported later
    Deferred,
}

/// A headless stand-in for a browser's video element. Records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct VideoElement {
    /// The current source, if one has been set
    pub src: Option<String>,
    /// The options last applied
    pub options: Option<PlaybackOptions>,
    /// How many times the element has been (re)loaded
    pub load_count: usize,
    /// Every playback request, in order
    pub play_requests: Vec<PlayTicket>,
    /// Whether playback is currently running
    pub playing: bool,
    /// How play requests are answered
    pub autoplay_policy: AutoplayPolicy,
}

/// A media backend for desktop hosts and tests
#[derive(Debug, Default)]
pub struct NativeMediaBackend {
    /// Transient references to selected files
    pub object_urls: ObjectUrlStore,
    /// The media element
    pub element: VideoElement,
}

impl NativeMediaBackend {
    /// Create a backend whose element answers play requests with `autoplay_policy`
    pub fn new(autoplay_policy: AutoplayPolicy) -> Self {
        Self {
            object_urls: Default::default(),
            element: VideoElement {
                autoplay_policy,
                ..Default::default()
            },
        }
    }

    /// The bytes the element's current source resolves to, if it is a live object URL
    pub fn resolve_src(&self) -> Option<Arc<[u8]>> {
        let src = self.element.src.as_deref()?;
        self.object_urls.resolve(&ObjectUrl::new(src))
    }
}

impl MediaBackend for NativeMediaBackend {
    type File = LocalFile;

    fn create_object_url(&mut self, file: &LocalFile) -> LockviewResult<ObjectUrl> {
        Ok(self.object_urls.create(file.bytes.clone()))
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        if !self.object_urls.revoke(url) {
            log::warn!("[LOCKVIEW_MEDIA] Attempted to revoke {url}, which is not live");
        }
    }

    fn configure(&mut self, options: &PlaybackOptions) {
        self.element.options = Some(options.clone());
    }

    fn set_src(&mut self, src: &str) {
        self.element.src = Some(src.to_string());
        self.element.playing = false;
    }

    fn load(&mut self) {
        self.element.load_count += 1;
        self.element.playing = false;
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStatus {
        self.element.play_requests.push(ticket);
        match self.element.autoplay_policy {
            AutoplayPolicy::Allowed => {
                self.element.playing = true;
                PlayStatus::Started
            }
            AutoplayPolicy::Blocked => PlayStatus::Rejected(
                "NotAllowedError: play() can only be initiated by a user gesture".to_string(),
            ),
            AutoplayPolicy::Deferred => PlayStatus::Pending,
        }
    }
}
