use crate::{
    media::{MediaBackend, MediaFile, ObjectUrl, PlayStatus, PlayTicket, PlaybackOptions},
    LockviewResult,
};

/// Where the media element's frames are coming from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// The video bundled with the application
    Default {
        /// Path to the bundled asset
        path: String,
    },
    /// A file the user picked, behind a transient reference owned by the [`MediaContext`]
    UserSelected {
        /// The live reference to the file
        url: ObjectUrl,
        /// The name of the file, for display
        file_name: String,
    },
}

impl MediaSource {
    /// The value for the media element's `src`
    pub fn src(&self) -> &str {
        match self {
            MediaSource::Default { path } => path,
            MediaSource::UserSelected { url, .. } => url.as_str(),
        }
    }
}

/// Owns the single media element that textures the video surface, and the lifecycle of the
/// transient reference behind it.
///
/// Starts on the bundled default source. Each valid selection creates a new reference and releases
/// the one it replaces. There is no way back to the default. Dropping the context (or calling
/// [`MediaContext::teardown`]) releases whatever reference is active; a reference is never released
/// twice because it is moved out of the context when it is released.
pub struct MediaContext<B: MediaBackend> {
    backend: B,
    source: MediaSource,
    default_source: String,
    options: PlaybackOptions,
    current_ticket: PlayTicket,
    torn_down: bool,
}

impl<B: MediaBackend> MediaContext<B> {
    /// Take ownership of `backend`, point it at `default_source` and start playing
    pub fn new(backend: B, default_source: impl Into<String>, options: PlaybackOptions) -> Self {
        let default_source = default_source.into();
        let mut media_context = Self {
            backend,
            source: MediaSource::Default {
                path: default_source.clone(),
            },
            default_source,
            options,
            current_ticket: PlayTicket(0),
            torn_down: false,
        };
        log::info!(
            "[LOCKVIEW_MEDIA] Using default source {}",
            media_context.source.src()
        );
        media_context.reload();
        media_context
    }

    /// The active source
    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// The active source's `src` string
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Is a user-selected file active?
    pub fn is_user_selected(&self) -> bool {
        matches!(self.source, MediaSource::UserSelected { .. })
    }

    /// The name of the active user-selected file, if any
    pub fn selected_file_name(&self) -> Option<&str> {
        match &self.source {
            MediaSource::UserSelected { file_name, .. } => Some(file_name),
            MediaSource::Default { .. } => None,
        }
    }

    /// Text for the label next to the file picker. Only shown when a user file is active.
    pub fn selected_label(&self) -> Option<String> {
        self.selected_file_name()
            .map(|name| format!("Selected: {name}"))
    }

    /// The ticket of the most recent play request
    pub fn current_ticket(&self) -> PlayTicket {
        self.current_ticket
    }

    /// The backend, eg. to hand its video element to a renderer
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Make `file` the active source.
    ///
    /// Files that don't declare a `video/` content type are ignored and `Ok(false)` is returned.
    /// Picking the same file again is treated as a fresh selection. If the host can't create a
    /// reference for the file, the error is returned and the current source stays active.
    pub fn select_file(&mut self, file: &B::File) -> LockviewResult<bool> {
        if self.torn_down {
            log::debug!("[LOCKVIEW_MEDIA] Ignoring selection of {} after teardown", file.name());
            return Ok(false);
        }

        if !file.is_video() {
            log::debug!(
                "[LOCKVIEW_MEDIA] Ignoring {} with content type {:?}",
                file.name(),
                file.content_type()
            );
            return Ok(false);
        }

        let url = self.backend.create_object_url(file)?;
        log::info!("[LOCKVIEW_MEDIA] Selected {} as {url}", file.name());

        let previous = std::mem::replace(
            &mut self.source,
            MediaSource::UserSelected {
                url,
                file_name: file.name().to_string(),
            },
        );
        self.release(previous);
        self.reload();

        Ok(true)
    }

    /// Report the outcome of a play request that returned [`PlayStatus::Pending`].
    ///
    /// Outcomes for a ticket other than the current one belong to a source that has since been
    /// replaced and are ignored. A rejection is logged; nothing else changes.
    pub fn play_settled(&mut self, ticket: PlayTicket, result: Result<(), String>) {
        if ticket != self.current_ticket {
            log::debug!(
                "[LOCKVIEW_MEDIA] Ignoring stale play result for {ticket:?}, current is {:?}",
                self.current_ticket
            );
            return;
        }

        match result {
            Ok(()) => log::debug!("[LOCKVIEW_MEDIA] Playback started for {}", self.src()),
            Err(reason) => log::warn!(
                "[LOCKVIEW_MEDIA] Unable to start playback of {}: {reason}",
                self.src()
            ),
        }
    }

    /// Release the active transient reference, if any. Safe to call more than once.
    ///
    /// The element is pointed back at the default source so it never holds a released reference,
    /// but it is not reloaded.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let path = self.default_source.clone();
        let active = std::mem::replace(&mut self.source, MediaSource::Default { path });
        if matches!(active, MediaSource::UserSelected { .. }) {
            self.backend.set_src(&self.default_source);
        }
        self.release(active);
        log::debug!("[LOCKVIEW_MEDIA] Torn down");
    }

    fn release(&mut self, source: MediaSource) {
        if let MediaSource::UserSelected { url, file_name } = source {
            log::debug!("[LOCKVIEW_MEDIA] Releasing {url} ({file_name})");
            self.backend.revoke_object_url(&url);
        }
    }

    fn reload(&mut self) {
        self.current_ticket = PlayTicket(self.current_ticket.0 + 1);
        let src = self.source.src().to_string();

        self.backend.set_src(&src);
        self.backend.configure(&self.options);
        self.backend.load();

        match self.backend.play(self.current_ticket) {
            PlayStatus::Started => {
                log::debug!("[LOCKVIEW_MEDIA] Playback started for {src}");
            }
            PlayStatus::Pending => {}
            PlayStatus::Rejected(reason) => {
                log::warn!("[LOCKVIEW_MEDIA] Unable to start playback of {src}: {reason}");
            }
        }
    }
}

impl<B: MediaBackend> Drop for MediaContext<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap, rc::Rc, sync::Arc};

    use super::*;
    use crate::{
        media::{AutoplayPolicy, LocalFile, NativeMediaBackend},
        LockviewError,
    };

    fn clip(name: &str, content_type: &str) -> LocalFile {
        LocalFile::new(name, content_type, name.as_bytes().to_vec())
    }

    fn media_context(policy: AutoplayPolicy) -> MediaContext<NativeMediaBackend> {
        MediaContext::new(
            NativeMediaBackend::new(policy),
            "./video.mp4",
            Default::default(),
        )
    }

    #[test]
    pub fn test_default_source_is_loaded_and_played() {
        let media_context = media_context(AutoplayPolicy::Allowed);
        let element = &media_context.backend().element;

        assert_eq!(media_context.source(), &MediaSource::Default { path: "./video.mp4".into() });
        assert_eq!(element.src.as_deref(), Some("./video.mp4"));
        assert_eq!(element.options, Some(PlaybackOptions::default()));
        assert_eq!(element.load_count, 1);
        assert_eq!(element.play_requests, vec![PlayTicket(1)]);
        assert!(element.playing);
        assert!(media_context.selected_label().is_none());
    }

    #[test]
    pub fn test_non_video_files_are_ignored() {
        let mut media_context = media_context(AutoplayPolicy::Allowed);
        assert!(!media_context.select_file(&clip("song.mp3", "audio/mpeg")).unwrap());
        assert!(!media_context.select_file(&clip("notes", "")).unwrap());
        assert_eq!(media_context.src(), "./video.mp4");
        assert!(media_context.backend().object_urls.is_empty());
        assert_eq!(media_context.backend().element.load_count, 1);

        // Still ignored once a video is active.
        assert!(media_context.select_file(&clip("clip.mp4", "video/mp4")).unwrap());
        let src = media_context.src().to_string();
        assert!(!media_context.select_file(&clip("photo.png", "image/png")).unwrap());
        assert_eq!(media_context.src(), src);
        assert_eq!(media_context.selected_label().as_deref(), Some("Selected: clip.mp4"));
        assert_eq!(media_context.backend().element.load_count, 2);
    }

    #[test]
    pub fn test_second_selection_releases_first() {
        let mut media_context = media_context(AutoplayPolicy::Allowed);
        media_context.select_file(&clip("first.mp4", "video/mp4")).unwrap();
        let first = ObjectUrl::new(media_context.src());
        assert_eq!(
            media_context.backend().object_urls.resolve(&first).as_deref(),
            Some(&b"first.mp4"[..])
        );

        media_context.select_file(&clip("second.webm", "video/webm")).unwrap();
        let backend = media_context.backend();
        assert!(backend.object_urls.resolve(&first).is_none());
        assert_eq!(backend.object_urls.len(), 1);
        assert_eq!(backend.resolve_src().as_deref(), Some(&b"second.webm"[..]));
        assert_eq!(backend.element.load_count, 3);
        assert_eq!(media_context.selected_file_name(), Some("second.webm"));
    }

    #[test]
    pub fn test_same_file_twice_is_a_fresh_selection() {
        let mut media_context = media_context(AutoplayPolicy::Allowed);
        let file = clip("clip.mp4", "video/mp4");
        media_context.select_file(&file).unwrap();
        let first = ObjectUrl::new(media_context.src());
        media_context.select_file(&file).unwrap();

        assert_ne!(media_context.src(), first.as_str());
        assert!(media_context.backend().object_urls.resolve(&first).is_none());
        assert_eq!(media_context.backend().object_urls.len(), 1);
    }

    #[test]
    pub fn test_rejected_playback_is_not_fatal() {
        let mut media_context = media_context(AutoplayPolicy::Blocked);
        assert!(media_context.select_file(&clip("clip.mp4", "video/mp4")).unwrap());

        let element = &media_context.backend().element;
        assert!(!element.playing);
        assert_eq!(element.load_count, 2);
        assert!(media_context.is_user_selected());
    }

    #[test]
    pub fn test_teardown_points_element_at_default() {
        let mut media_context = media_context(AutoplayPolicy::Allowed);
        media_context.select_file(&clip("clip.mp4", "video/mp4")).unwrap();
        let selected = ObjectUrl::new(media_context.src());

        media_context.teardown();
        let backend = media_context.backend();
        assert_eq!(media_context.src(), "./video.mp4");
        assert_eq!(backend.element.src.as_deref(), Some("./video.mp4"));
        assert!(backend.object_urls.resolve(&selected).is_none());
        assert!(backend.resolve_src().is_none());
        // Not reloaded.
        assert_eq!(backend.element.load_count, 2);
    }

    #[test]
    pub fn test_stale_play_results_are_ignored() {
        let mut media_context = media_context(AutoplayPolicy::Deferred);
        let stale = media_context.current_ticket();
        media_context.select_file(&clip("clip.mp4", "video/mp4")).unwrap();
        let current = media_context.current_ticket();
        assert!(current > stale);

        let src = media_context.src().to_string();
        media_context.play_settled(stale, Err("AbortError".to_string()));
        media_context.play_settled(current, Err("NotAllowedError".to_string()));
        media_context.play_settled(current, Ok(()));
        assert_eq!(media_context.src(), src);
        assert_eq!(media_context.current_ticket(), current);
    }

    /// Counts revocations per URL, so double releases show up.
    #[derive(Default)]
    struct CountingBackend {
        next_url: usize,
        revocations: Rc<RefCell<HashMap<String, usize>>>,
        fail_next: bool,
    }

    impl MediaBackend for CountingBackend {
        type File = LocalFile;

        fn create_object_url(&mut self, file: &LocalFile) -> LockviewResult<ObjectUrl> {
            if std::mem::take(&mut self.fail_next) {
                return Err(LockviewError::ObjectUrlError {
                    file_name: file.name().to_string(),
                    reason: "out of memory".to_string(),
                });
            }
            self.next_url += 1;
            Ok(ObjectUrl::new(format!("blob:test/{}", self.next_url)))
        }

        fn revoke_object_url(&mut self, url: &ObjectUrl) {
            *self
                .revocations
                .borrow_mut()
                .entry(url.to_string())
                .or_default() += 1;
        }

        fn configure(&mut self, _: &PlaybackOptions) {}
        fn set_src(&mut self, _: &str) {}
        fn load(&mut self) {}
        fn play(&mut self, _: PlayTicket) -> PlayStatus {
            PlayStatus::Started
        }
    }

    #[test]
    pub fn test_teardown_releases_exactly_once() {
        let revocations = Rc::new(RefCell::new(HashMap::new()));
        let backend = CountingBackend {
            revocations: revocations.clone(),
            ..Default::default()
        };
        let mut media_context = MediaContext::new(backend, "./video.mp4", Default::default());
        media_context.select_file(&clip("first.mp4", "video/mp4")).unwrap();
        media_context.select_file(&clip("second.mp4", "video/mp4")).unwrap();

        media_context.teardown();
        media_context.teardown();
        assert!(!media_context.select_file(&clip("third.mp4", "video/mp4")).unwrap());
        drop(media_context);

        let revocations = revocations.borrow();
        assert_eq!(revocations.len(), 2);
        assert_eq!(revocations["blob:test/1"], 1);
        assert_eq!(revocations["blob:test/2"], 1);
    }

    #[test]
    pub fn test_drop_releases_active_reference() {
        let revocations = Rc::new(RefCell::new(HashMap::new()));
        {
            let backend = CountingBackend {
                revocations: revocations.clone(),
                ..Default::default()
            };
            let mut media_context = MediaContext::new(backend, "./video.mp4", Default::default());
            media_context.select_file(&clip("clip.mp4", "video/mp4")).unwrap();
        }
        assert_eq!(revocations.borrow()["blob:test/1"], 1);

        // Nothing to release when the default was never replaced.
        let revocations = Rc::new(RefCell::new(HashMap::new()));
        drop(MediaContext::new(
            CountingBackend {
                revocations: revocations.clone(),
                ..Default::default()
            },
            "./video.mp4",
            Default::default(),
        ));
        assert!(revocations.borrow().is_empty());
    }

    #[test]
    pub fn test_failed_reference_keeps_current_source() {
        let mut media_context =
            MediaContext::new(CountingBackend::default(), "./video.mp4", Default::default());
        media_context.select_file(&clip("first.mp4", "video/mp4")).unwrap();
        media_context.backend_mut().fail_next = true;

        let result = media_context.select_file(&clip("second.mp4", "video/mp4"));
        assert!(matches!(result, Err(LockviewError::ObjectUrlError { .. })));
        assert_eq!(media_context.src(), "blob:test/1");
        assert_eq!(media_context.selected_file_name(), Some("first.mp4"));
        assert!(media_context.backend().revocations.borrow().is_empty());
    }

    #[test]
    pub fn test_local_file_bytes_are_shared() {
        let file = LocalFile::new("clip.mp4", "video/mp4", vec![1, 2, 3]);
        let mut backend = NativeMediaBackend::default();
        let url = backend.create_object_url(&file).unwrap();
        assert!(Arc::ptr_eq(
            &backend.object_urls.resolve(&url).unwrap(),
            file.bytes()
        ));
    }
}
