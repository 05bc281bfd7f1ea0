//! Browser media backend, built on the DOM's `HTMLVideoElement` and `URL.createObjectURL`.
//!
//! The browser decodes the video and the renderer uploads frames from [`WebMediaBackend::video_element`]
//! as a texture. `play()` returns a promise; its outcome is queued and must be handed back to
//! [`crate::contexts::MediaContext::play_settled`] by the host, usually at the top of each frame:
//!
//! ```ignore
//! for (ticket, result) in engine.media_context.backend().take_settled() {
//!     engine.media_context.play_settled(ticket, result);
//! }
//! ```

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Event, File, HtmlInputElement, HtmlVideoElement, Url};

use super::{MediaBackend, MediaFile, ObjectUrl, PlayStatus, PlayTicket, PlaybackOptions};
use crate::{LockviewError, LockviewResult};

type SettledQueue = Rc<RefCell<Vec<(PlayTicket, Result<(), String>)>>>;

/// A file chosen with an `<input type="file">`
#[derive(Debug, Clone)]
pub struct WebFile {
    file: File,
    name: String,
    content_type: String,
}

impl WebFile {
    /// Wrap a DOM `File`
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            content_type: file.type_(),
            file,
        }
    }

    /// The first file selected by the input that fired `event`, if any
    pub fn from_change_event(event: &Event) -> Option<Self> {
        let input: HtmlInputElement = event.target()?.dyn_into().ok()?;
        let file = input.files()?.get(0)?;
        Some(Self::new(file))
    }
}

impl MediaFile for WebFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Media backend for browsers
pub struct WebMediaBackend {
    video: HtmlVideoElement,
    settled: SettledQueue,
}

impl WebMediaBackend {
    /// Create a detached video element to play into
    pub fn new() -> LockviewResult<Self> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| LockviewError::MediaError("No document available".to_string()))?;

        let video: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| {
                LockviewError::MediaError(format!("Failed to create video element: {e:?}"))
            })?
            .dyn_into()
            .map_err(|_| LockviewError::MediaError("Element is not a video".to_string()))?;

        Ok(Self {
            video,
            settled: Default::default(),
        })
    }

    /// The underlying video element, for texture upload
    pub fn video_element(&self) -> &HtmlVideoElement {
        &self.video
    }

    /// Drain the outcomes of play requests that have settled since the last call
    pub fn take_settled(&self) -> Vec<(PlayTicket, Result<(), String>)> {
        self.settled.borrow_mut().drain(..).collect()
    }
}

impl MediaBackend for WebMediaBackend {
    type File = WebFile;

    fn create_object_url(&mut self, file: &WebFile) -> LockviewResult<ObjectUrl> {
        Url::create_object_url_with_blob(&file.file)
            .map(ObjectUrl::new)
            .map_err(|e| LockviewError::ObjectUrlError {
                file_name: file.name.clone(),
                reason: format!("{e:?}"),
            })
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        if let Err(e) = Url::revoke_object_url(url.as_str()) {
            log::warn!("[LOCKVIEW_MEDIA] Unable to revoke {url}: {e:?}");
        }
    }

    fn configure(&mut self, options: &PlaybackOptions) {
        self.video.set_cross_origin(options.cross_origin.as_deref());
        self.video.set_muted(options.muted);
        self.video.set_autoplay(options.autoplay);
        self.video.set_loop(options.looping);
        let result = if options.plays_inline {
            self.video.set_attribute("playsinline", "")
        } else {
            self.video.remove_attribute("playsinline")
        };
        if let Err(e) = result {
            log::warn!("[LOCKVIEW_MEDIA] Unable to set playsinline: {e:?}");
        }
    }

    fn set_src(&mut self, src: &str) {
        self.video.set_src(src);
    }

    fn load(&mut self) {
        self.video.load();
    }

    fn play(&mut self, ticket: PlayTicket) -> PlayStatus {
        let promise: js_sys::Promise = match self.video.play() {
            Ok(promise) => promise,
            Err(e) => return PlayStatus::Rejected(format!("{e:?}")),
        };

        let settled = self.settled.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| format!("{e:?}"));
            settled.borrow_mut().push((ticket, result));
        });

        PlayStatus::Pending
    }
}
