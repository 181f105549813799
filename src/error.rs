use thiserror::Error;

pub type LadderResult<T> = Result<T, LadderError>;

#[derive(Debug, Error)]
pub enum LadderError {
    #[error("surface `{0}` not found")]
    SurfaceNotFound(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to spawn render worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

impl LadderError {
    /// Returns `true` for failures caused by the construction target or options.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SurfaceNotFound(_) | Self::UnsupportedPlatform(_) | Self::InvalidConfig(_)
        )
    }
}
