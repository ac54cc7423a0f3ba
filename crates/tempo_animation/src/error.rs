use thiserror::Error;

/// Errors from loading or saving animation presets
///
/// The numeric core never fails; only the configuration boundary reports
/// errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error("curve `{key}`: unknown timing curve `{name}`")]
    UnknownCurve { key: String, name: String },

    #[error("spring `{name}`: {reason}")]
    InvalidSpring { name: String, reason: &'static str },
}
