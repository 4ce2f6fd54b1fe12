use std::env;

use crate::errors::ClientError;

/// Environment variable holding the TickerChart account username.
pub const USERNAME_ENV: &str = "TICKERCHART_USERNAME";

/// Environment variable holding the TickerChart account password.
pub const PASSWORD_ENV: &str = "TICKERCHART_PASSWORD";

/// A username/password pair, immutable once supplied.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from `TICKERCHART_USERNAME` / `TICKERCHART_PASSWORD`.
    ///
    /// A missing or empty variable is a hard [`ClientError::MissingConfig`]
    /// naming the variable, so a misconfigured environment fails at startup
    /// instead of surfacing later as a rejected login.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(env::var(USERNAME_ENV).ok(), env::var(PASSWORD_ENV).ok())
    }

    /// Build credentials from optional values, validating both are present
    /// and non-empty. `from_env` delegates here; tests use it directly to
    /// avoid mutating process-global environment state.
    pub fn from_vars(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ClientError> {
        let username = username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ClientError::MissingConfig(USERNAME_ENV.to_string()))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ClientError::MissingConfig(PASSWORD_ENV.to_string()))?;
        Ok(Self { username, password })
    }
}

// Manual Debug so the password never ends up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
