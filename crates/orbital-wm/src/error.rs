//! Error types for the window manager
//!
//! Window operations themselves never fail: unknown ids are ignored and
//! constraint violations are clamped. These errors cover the remaining
//! fallible edges: decoding host strings, loading configuration, and
//! checking store invariants.

/// Errors that can occur in window manager operations
#[derive(Debug, Clone, PartialEq)]
pub enum WmError {
    /// A resize handle name was not one of the eight known handles
    UnknownResizeHandle(String),

    /// A snap zone name was not recognized
    UnknownSnapZone(String),

    /// A key chord string could not be parsed
    InvalidKeyChord(String),

    /// A configuration value is out of range
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A store invariant does not hold
    InvariantViolated(String),

    /// JSON serialization or deserialization failed
    SerializationError(String),
}

impl std::fmt::Display for WmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownResizeHandle(name) => write!(f, "unknown resize handle: {:?}", name),
            Self::UnknownSnapZone(name) => write!(f, "unknown snap zone: {:?}", name),
            Self::InvalidKeyChord(chord) => write!(f, "invalid key chord: {:?}", chord),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config '{}': {}", field, reason)
            }
            Self::InvariantViolated(msg) => write!(f, "invariant violated: {}", msg),
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for WmError {}

impl From<serde_json::Error> for WmError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type alias for window manager operations
pub type WmResult<T> = Result<T, WmError>;
