use thiserror::Error;

/// Everything that can go wrong in Lockview.
///
/// Very little of it is fatal: media and session failures are logged by the [`crate::Engine`] and
/// the frame loop carries on.
#[derive(Error, Debug)]
pub enum LockviewError {
    /// The engine has been asked to quit
    #[error("Lockview is shutting down")]
    ShuttingDown,
    /// The XR runtime refused to start an immersive session
    #[error("Unable to enter the immersive session: {0}")]
    SessionError(String),
    /// The host could not create a transient reference for a file
    #[error("Unable to create an object URL for {file_name}: {reason}")]
    ObjectUrlError {
        /// Name of the file that was selected
        file_name: String,
        /// What the host reported
        reason: String,
    },
    /// The media element rejected an operation
    #[error("There was a problem with the media element: {0}")]
    MediaError(String),
    /// The configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    #[error(transparent)]
    #[allow(missing_docs)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    #[allow(missing_docs)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    #[allow(missing_docs)]
    Other(#[from] anyhow::Error),
}
