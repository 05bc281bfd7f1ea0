#![allow(missing_docs)]
pub mod media_context;
pub mod session_context;
pub mod ui_context;

pub use media_context::{MediaContext, MediaSource};
pub use session_context::{SessionContext, SessionState, XrRuntime};
pub use ui_context::UiContext;
