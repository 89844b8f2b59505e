/// Convenience result type used across lumamix.
pub type LumaResult<T> = Result<T, LumaError>;

/// Top-level error taxonomy.
///
/// `Config` and `Patch` errors come from static wiring and are fatal. `State`
/// errors come from live remote-control commands and are reported separately so
/// a running show can drop the command and keep going.
#[derive(thiserror::Error, Debug)]
pub enum LumaError {
    /// Invalid construction or configuration: bad indices, fade timings,
    /// mismatched buffer sizes, an unpatched mixer.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed patch records or an inconsistent device universe.
    #[error("patch error: {0}")]
    Patch(String),

    /// A remote-control payload of the wrong shape.
    #[error("state error: {0}")]
    State(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumaError {
    /// Build a [`LumaError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`LumaError::Patch`] value.
    pub fn patch(msg: impl Into<String>) -> Self {
        Self::Patch(msg.into())
    }

    /// Build a [`LumaError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`LumaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LumaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
