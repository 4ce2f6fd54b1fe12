use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;

/// An HTTP session against the TickerChart service.
///
/// Holds whatever a successful login produced: a bearer token (sent as an
/// `Authorization` header) and/or a set of cookies. Either login strategy
/// may populate it; after login the session is read-only in practice.
///
/// No retries, no backoff, no per-request timeout overrides. The only
/// resilience is the client-wide 30 second timeout.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    http: Client,
    token: Option<String>,
    // Sorted so the Cookie header is deterministic.
    cookies: BTreeMap<String, String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url: base_url.into(),
            http,
            token: None,
            cookies: BTreeMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token, if a login strategy stored one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a login strategy has produced a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store a bearer token. Subsequent requests carry
    /// `Authorization: Bearer <token>`.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Store a cookie. Subsequent requests carry it in the `Cookie` header.
    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn cookie_count(&self) -> usize {
        self.cookies.len()
    }

    /// Issue an authenticated GET and decode the response as JSON.
    ///
    /// A non-2xx status is a [`ClientError::Api`]; an undecodable body is a
    /// [`ClientError::Deserialization`]. The payload itself is passed through
    /// untouched.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }

        debug!("GET {path}");
        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                endpoint: path.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        response.json().await.map_err(|e| {
            ClientError::Deserialization(format!("Response from {path} is not JSON: {e}"))
        })
    }

    /// Issue an authenticated POST with a JSON body.
    ///
    /// Only transport failures are errors here; status handling stays with
    /// the caller (the login strategy inspects it itself).
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ClientError> {
        let request = self
            .http
            .post(self.url(path))
            .header(ACCEPT, "application/json")
            .json(body);

        debug!("POST {path}");
        Ok(self.apply_auth(request).send().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request = request.header(COOKIE, header);
        }
        request
    }
}
