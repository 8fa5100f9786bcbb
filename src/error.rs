use thiserror::Error;

/// Library error type for screensaver sessions.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured mode index has no matching effect strategy.
    #[error("unknown screensaver mode: {0}")]
    UnknownMode(String),

    /// The configured source index has no matching image source.
    #[error("unknown image source: {0}")]
    UnknownSource(String),

    /// A required add-on setting is absent.
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    /// A setting is present but cannot be interpreted.
    #[error("invalid value {value:?} for setting {key}")]
    InvalidSetting { key: &'static str, value: String },

    /// `image-folder` was selected without a folder to read from.
    #[error("image folder source selected but no image path configured")]
    MissingImagePath,

    /// A session operation was requested in a state that does not allow it.
    #[error("cannot {action} while session is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    /// The configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file is not a valid YAML configuration.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
