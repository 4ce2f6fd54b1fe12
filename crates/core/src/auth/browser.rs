use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use super::traits::LoginStrategy;
use super::webdriver::WebDriverConnector;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::models::credentials::Credentials;
use crate::session::Session;

// Fixed identifiers on the login page.
const USERNAME_FIELD: &str = "input[name='username']";
const PASSWORD_FIELD: &str = "input[name='password']";
const LOGIN_BUTTON: &str = ".login-button";
const PROFILE_MARKER: &str = ".user-profile";

/// Local-storage key the site keeps its token under after a UI login.
const TOKEN_STORAGE_KEY: &str = "TC_TOKEN";

/// Minimal browser surface the login flow needs.
///
/// The real implementation drives a WebDriver endpoint; tests substitute a
/// scripted fake so no browser process is ever booted.
#[async_trait]
pub trait Browser: Send {
    async fn goto(&mut self, url: &str) -> Result<(), ClientError>;

    /// Wait (bounded by `timeout`) for an element matching `css` to appear.
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), ClientError>;

    /// Type `text` into the element matching `css`.
    async fn fill(&mut self, css: &str, text: &str) -> Result<(), ClientError>;

    async fn click(&mut self, css: &str) -> Result<(), ClientError>;

    /// All cookies currently held by the browser, as (name, value) pairs.
    async fn cookies(&mut self) -> Result<Vec<(String, String)>, ClientError>;

    /// Read a local-storage entry; `None` when the key is absent.
    async fn local_storage_item(&mut self, key: &str) -> Result<Option<String>, ClientError>;

    /// End the browser session. Must be called on every exit path.
    async fn close(self: Box<Self>) -> Result<(), ClientError>;
}

/// Opens fresh [`Browser`] sessions. One connector per strategy; one browser
/// per login attempt.
#[async_trait]
pub trait BrowserConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Browser>, ClientError>;
}

/// What a completed browser login leaves behind.
struct BrowserAuth {
    cookies: Vec<(String, String)>,
    token: Option<String>,
}

/// Browser-automation login fallback.
///
/// Drives a real browser through the login page: fills the credential
/// fields, clicks the login button and waits for the post-login profile
/// marker. On success all browser cookies are copied into the session and
/// the token is read from local storage.
pub struct BrowserLogin {
    login_url: String,
    wait: Duration,
    connector: Box<dyn BrowserConnector>,
}

impl BrowserLogin {
    /// Strategy driving the WebDriver endpoint named by `config`.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_connector(config, Box::new(WebDriverConnector::new(&config.webdriver_url)))
    }

    /// Strategy with a custom browser source (used by tests).
    pub fn with_connector(config: &ClientConfig, connector: Box<dyn BrowserConnector>) -> Self {
        Self {
            login_url: config.login_page_url(),
            wait: config.login_wait,
            connector,
        }
    }

    /// The login flow proper. Separated from `try_login` so the browser is
    /// closed in exactly one place no matter where this returns.
    async fn run(
        &self,
        browser: &mut dyn Browser,
        credentials: &Credentials,
    ) -> Result<BrowserAuth, ClientError> {
        browser.goto(&self.login_url).await?;

        browser.wait_for(USERNAME_FIELD, self.wait).await?;
        browser.fill(USERNAME_FIELD, &credentials.username).await?;
        browser.fill(PASSWORD_FIELD, &credentials.password).await?;
        browser.click(LOGIN_BUTTON).await?;

        browser.wait_for(PROFILE_MARKER, self.wait).await?;

        let cookies = browser.cookies().await?;
        let token = browser.local_storage_item(TOKEN_STORAGE_KEY).await?;
        Ok(BrowserAuth { cookies, token })
    }
}

#[async_trait]
impl LoginStrategy for BrowserLogin {
    fn name(&self) -> &str {
        "browser"
    }

    async fn try_login(
        &self,
        credentials: &Credentials,
        session: &mut Session,
    ) -> Option<String> {
        let mut browser = match self.connector.connect().await {
            Ok(browser) => browser,
            Err(e) => {
                warn!("Browser login failed to start a browser: {e}");
                return None;
            }
        };

        let outcome = self.run(&mut *browser, credentials).await;

        // Release the browser on every path, success or failure.
        if let Err(e) = browser.close().await {
            warn!("Failed to close browser session: {e}");
        }

        match outcome {
            Ok(auth) => {
                for (name, value) in auth.cookies {
                    session.set_cookie(name, value);
                }
                match auth.token {
                    Some(token) => {
                        session.set_token(&token);
                        info!("Browser login succeeded for {}", credentials.username);
                        Some(token)
                    }
                    None => {
                        warn!("Browser login reached the profile page but found no stored token");
                        None
                    }
                }
            }
            Err(e) => {
                warn!("Browser login failed: {e}");
                None
            }
        }
    }
}
