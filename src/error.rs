use thiserror::Error;

pub type Result<T> = std::result::Result<T, OceanError>;

#[derive(Debug, Error)]
pub enum OceanError {
    #[error("invalid grid size {size}: resolution must be a power of two, at least 2, with N*N vertex indices fitting in u32")]
    InvalidGridSize { size: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The random generator never produced a point inside the unit disc.
    ///
    /// This is not a configuration error: a working generator lands inside with
    /// probability ~0.785 per draw, so hitting the attempt cap means the
    /// generator itself is broken.
    #[error("gaussian sampling gave up after {attempts} rejected draws; the random source is degenerate")]
    GaussianSamplingExhausted { attempts: u32 },

    #[error("export error: {0}")]
    Export(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OceanError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        OceanError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
