use crate::force_field::FieldId;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by configuration loading and world management.
///
/// The tick itself never fails: every invalid input is rejected before it reaches the
/// simulation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A configuration value failed validation.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending value, e.g. `particle.lifespan`.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// No force field with this id exists in the world.
    #[error("unknown force field {0}")]
    UnknownField(FieldId),

    /// The configuration text is not valid TOML for [`Config`](crate::config::Config).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
