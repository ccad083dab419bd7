pub type BannerResult<T> = Result<T, BannerError>;

#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization failed (tainted canvas, detached root, unsupported styling).
    #[error("capture error: {0}")]
    Capture(String),

    /// Assembling the final artifact failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Another export run is already in flight against the same visual root.
    #[error("export already in progress")]
    Busy,

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Short message suitable for a toast or status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Capture(_) => "There was an error capturing your header.",
            Self::Encode(_) => "There was an error creating your animated GIF.",
            Self::Busy => "An export is already running.",
            Self::Validation(_) | Self::Serde(_) => "Your header configuration is invalid.",
            Self::Other(_) => "There was an error exporting your header.",
        }
    }
}

impl From<serde_json::Error> for BannerError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}
