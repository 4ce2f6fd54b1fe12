use async_trait::async_trait;

use crate::models::credentials::Credentials;
use crate::session::Session;

/// Trait abstraction over the ways of logging in to TickerChart.
///
/// The service sometimes rejects non-browser clients, so two independent
/// strategies exist: a direct API login and a browser-automation fallback
/// that simulates a real user. Only one of them has to succeed for the
/// session to be considered authenticated.
#[async_trait]
pub trait LoginStrategy: Send + Sync {
    /// Human-readable name of this strategy (for logs).
    fn name(&self) -> &str;

    /// Attempt a login, storing whatever auth material was obtained
    /// (token, cookies) on `session`.
    ///
    /// Returns the token on success and `None` on any failure. Failures are
    /// logged and recovered here; they never propagate as errors. Callers
    /// must treat `None` as "not authenticated".
    async fn try_login(&self, credentials: &Credentials, session: &mut Session)
        -> Option<String>;
}
