use crate::model::ProviderId;

/// Round-trip failures reported by a `CompletionTransport`.
///
/// `CompletionClient` never rewrites these; callers see the transport's value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Non-success answer from the service (auth, quota, bad request).
    #[error("provider error ({provider}): {message}")]
    Provider {
        provider: ProviderId,
        message: String,
        status_code: Option<u16>,
    },
    /// Connection or body read failed.
    #[error("transport error ({provider}): {message}")]
    Transport {
        provider: ProviderId,
        message: String,
    },
    /// Body was not a decodable completion.
    #[error("protocol error ({provider}): {message}")]
    Protocol {
        provider: ProviderId,
        message: String,
    },
}

impl TransportError {
    pub fn provider(
        provider: impl Into<ProviderId>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn transport(provider: impl Into<ProviderId>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn protocol(provider: impl Into<ProviderId>, message: impl Into<String>) -> Self {
        Self::Protocol {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider_id(&self) -> &ProviderId {
        match self {
            Self::Provider { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Protocol { provider, .. } => provider,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Provider { message, .. }
            | Self::Transport { message, .. }
            | Self::Protocol { message, .. } => message,
        }
    }

    /// HTTP status, present only when the service answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status_code, .. } => *status_code,
            Self::Transport { .. } | Self::Protocol { .. } => None,
        }
    }
}

/// Top-level error type for the completion API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The service answered successfully but returned zero candidates.
    #[error("the remote service produced no usable output ({provider}, model {model})")]
    NoOutput { provider: ProviderId, model: String },
    /// Round-trip failure raised by the transport, passed through as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Invalid caller input detected while building a request.
    #[error("validation error: {0}")]
    Validation(String),
    /// Invalid transport configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl CompletionError {
    /// Returns `true` for the empty-candidates condition.
    pub fn is_no_output(&self) -> bool {
        matches!(self, Self::NoOutput { .. })
    }

    /// Returns the transport error when this failure came from the round-trip.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_variant_displays_inner_error_unchanged() {
        let inner = TransportError::provider("openai", "invalid api key", Some(401));
        let err = CompletionError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.as_transport(), Some(&inner));
        assert_eq!(inner.status_code(), Some(401));
    }

    #[test]
    fn accessors_cover_every_variant() {
        let errors = [
            TransportError::provider("p", "a", None),
            TransportError::transport("p", "b"),
            TransportError::protocol("p", "c"),
        ];
        let messages: Vec<&str> = errors.iter().map(TransportError::message).collect();
        assert_eq!(messages, ["a", "b", "c"]);
        assert!(errors.iter().all(|e| e.provider_id().as_str() == "p"));
        assert!(errors.iter().all(|e| e.status_code().is_none()));
    }

    #[test]
    fn no_output_is_classified() {
        let err = CompletionError::NoOutput {
            provider: ProviderId::new("openai"),
            model: "gpt-3.5-turbo".into(),
        };
        assert!(err.is_no_output());
        assert!(err.as_transport().is_none());
        assert!(err.to_string().contains("no usable output"));
    }
}
