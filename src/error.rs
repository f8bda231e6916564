use std::path::PathBuf;

/// Configuration problems. None of these reach the user: the carousel substitutes a default or
/// renders nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("autoplay interval must be positive, got {0}ms")]
    InvalidInterval(i64),

    #[error("transition duration must be positive, got {0}ms")]
    InvalidTransition(i64),

    #[error("slide list is empty")]
    EmptySlides,
}

/// The transition engine could not be built because the layout is not measurable yet.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EngineInitError {
    #[error("viewport width {0} is not measurable")]
    Unmeasurable(f32),
}

/// Errors building a slide registry from disk.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
