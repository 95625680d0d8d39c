use thiserror::Error;

/// Why a fetch settled unsuccessfully.
///
/// Every variant renders a human-readable message, which is what the
/// presentation layer shows for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Unable to find \"{name}\"")]
    NotFound { name: String },

    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("Request timeout after {secs}s")]
    Timeout { secs: u64 },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Message(String),
}

impl FetchError {
    /// An error carrying only `message`.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Violations of the request state machine contract.
///
/// These indicate a programming error; callers are expected to abort rather
/// than recover. The state is never changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Unrecognized action tag '{tag}'")]
    UnknownAction { tag: String },

    #[error("Action '{tag}' requires a {field}")]
    MissingPayload {
        tag: &'static str,
        field: &'static str,
    },

    #[error("Inconsistent request state ({status}): {reason}")]
    InvariantViolation {
        status: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_error_displays_verbatim() {
        assert_eq!(FetchError::msg("not found").message(), "not found");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = FetchError::NotFound {
            name: "missingno".into(),
        };
        assert_eq!(err.message(), "Unable to find \"missingno\"");
    }

    #[test]
    fn unknown_action_mentions_tag() {
        let err = LifecycleError::UnknownAction {
            tag: "BOGUS".into(),
        };
        assert!(err.to_string().contains("BOGUS"));
    }
}
