use thiserror::Error;

/// Unified error type for the entire tickerchart-core library.
/// Every public function returns `Result<T, ClientError>`.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    // ── Authentication ──────────────────────────────────────────────
    #[error("Authentication failed: no token obtained from the login API")]
    AuthenticationFailed,

    #[error("Not authenticated: log in before requesting data")]
    NotAuthenticated,

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Browser automation ──────────────────────────────────────────
    #[error("Browser error: {0}")]
    Browser(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // credential leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        ClientError::Network(sanitized)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Deserialization(e.to_string())
    }
}

impl From<fantoccini::error::CmdError> for ClientError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        ClientError::Browser(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for ClientError {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        ClientError::Browser(format!("Failed to start browser session: {e}"))
    }
}
