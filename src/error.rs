use thiserror::Error;

/// Every variant is recoverable by the caller; "no good match" is an
/// expected outcome, not a fault.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("section text is empty after normalization")]
    NoTokens,
    #[error("no window matched above salvage confidence {salvage:.2}")]
    NoMatch { salvage: f64 },
    #[error("match confidence {confidence:.2} below required {required:.2}")]
    LowConfidence { confidence: f64, required: f64 },
    #[error("playback clock has no readable position")]
    ClockUnavailable,
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl SyncError {
    pub(crate) fn no_match(salvage: f64) -> Self {
        Self::NoMatch { salvage }
    }

    pub(crate) fn low_confidence(confidence: f64, required: f64) -> Self {
        Self::LowConfidence {
            confidence,
            required,
        }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
