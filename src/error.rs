use core::fmt;

/// Failure reported by a measurement oracle.
///
/// Neither variant is fatal: the controller keeps the previous cut list and
/// retries on the next edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeasureError {
    /// The measurement surface is not mounted (or already torn down).
    Unavailable,
    /// The backend could not produce a measurement.
    Failed {
        /// Human-readable reason.
        reason: Box<str>,
    },
}

impl MeasureError {
    /// Build a `Failed` error from any message.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into().into_boxed_str(),
        }
    }
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "measurement surface unavailable"),
            Self::Failed { reason } => write!(f, "measurement failed: {}", reason),
        }
    }
}

impl std::error::Error for MeasureError {}
