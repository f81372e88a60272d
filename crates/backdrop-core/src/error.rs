use thiserror::Error;

/// Errors surfaced by configuration parsing and host wiring.
///
/// Nothing in the per-frame path returns an error; numeric degeneracies are
/// absorbed where they occur.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackdropError {
    #[error("invalid value {value:?} for `{key}`: {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: &'static str,
    },
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("failed to subscribe to {event} events: {reason}")]
    Subscribe { event: &'static str, reason: String },
    #[error("failed to start frame scheduler: {0}")]
    Scheduler(String),
}

impl BackdropError {
    pub(crate) fn invalid(key: &str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T, E = BackdropError> = std::result::Result<T, E>;
