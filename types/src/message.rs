//! The celebration message and how a generation outcome becomes one.

use thiserror::Error;

/// Shown while the message has not resolved yet.
pub const MESSAGE_PLACEHOLDER: &str = "Carregant paraules d'amor...";

/// Used when the generator answers but with no usable text.
pub const NO_ANSWER_FALLBACK: &str = "Ets la millor, Gina! Sabia que no podries resistir-te als meus encants (i al fet que el botó NO es tornés invisible). T'estimo!";

/// Used when the generator fails outright.
pub const FAILURE_FALLBACK: &str = "Gina, em fas el noi més feliç del món! El destí ja ho tenia escrit (i jo havia encollit el botó No). T'estimo moltíssim!";

/// Coarse classification of a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkOrAuth,
    MalformedOrEmpty,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkOrAuth => "network_or_auth",
            Self::MalformedOrEmpty => "malformed_or_empty",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("generation task ended without a result")]
    TaskLost,
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingApiKey | Self::Transport(_) | Self::Status { .. } | Self::TaskLost => {
                FailureKind::NetworkOrAuth
            }
            Self::Malformed(_) => FailureKind::MalformedOrEmpty,
        }
    }

    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::Status {
                status: 401 | 403,
                ..
            }
        )
    }
}

/// What the generator produced: text (possibly absent), or an error.
pub type GenerationOutcome = Result<Option<String>, GenerationError>;

/// Map a generation outcome to the message shown on the celebration screen.
///
/// Non-blank text is shown trimmed. Blank or absent text gets
/// [`NO_ANSWER_FALLBACK`]; any error gets [`FAILURE_FALLBACK`].
#[must_use]
pub fn resolve_message(outcome: GenerationOutcome) -> String {
    match outcome {
        Ok(Some(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => NO_ANSWER_FALLBACK.to_string(),
        Err(_) => FAILURE_FALLBACK.to_string(),
    }
}
