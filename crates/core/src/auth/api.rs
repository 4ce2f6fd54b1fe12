use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::traits::LoginStrategy;
use crate::models::credentials::Credentials;
use crate::session::Session;

/// Login endpoint, relative to the session's base URL.
const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Direct API login.
///
/// Sends the credentials as a JSON body to the login endpoint and expects a
/// JSON object with a `token` field back. On success the token is stored on
/// the session as a bearer header.
#[derive(Debug, Default)]
pub struct ApiLogin;

impl ApiLogin {
    pub fn new() -> Self {
        Self
    }
}

// ── Login endpoint request/response types ───────────────────────────

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[async_trait]
impl LoginStrategy for ApiLogin {
    fn name(&self) -> &str {
        "API"
    }

    async fn try_login(
        &self,
        credentials: &Credentials,
        session: &mut Session,
    ) -> Option<String> {
        let payload = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };

        let response = match session.post_json(LOGIN_PATH, &payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!("API login failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("API login rejected: HTTP {status}");
            return None;
        }

        let body: LoginResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("API login returned an undecodable body: {e}");
                return None;
            }
        };

        match body.token {
            Some(token) => {
                session.set_token(&token);
                info!("API login succeeded for {}", credentials.username);
                Some(token)
            }
            None => {
                warn!("API login response carried no token field");
                None
            }
        }
    }
}
