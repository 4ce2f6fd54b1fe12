use std::time::Duration;

/// Default TickerChart service URL. All API paths are relative to this.
const DEFAULT_BASE_URL: &str = "https://www.tickerchart.net";

/// Default WebDriver endpoint for the browser login fallback (chromedriver).
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// How long the browser login waits for page elements to appear.
const DEFAULT_LOGIN_WAIT: Duration = Duration::from_secs(10);

/// Connection settings for the TickerChart client.
///
/// Credentials are kept out of this struct; they come from
/// [`crate::models::credentials::Credentials`] and are passed to the login
/// strategies explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the TickerChart service (no trailing slash).
    pub base_url: String,

    /// WebDriver endpoint used by the browser login fallback.
    pub webdriver_url: String,

    /// Upper bound for each element wait during browser login.
    pub login_wait: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            login_wait: DEFAULT_LOGIN_WAIT,
        }
    }
}

impl ClientConfig {
    /// Config pointing at a non-default service URL (e.g. a test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the WebDriver endpoint.
    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Override the browser login wait bound.
    pub fn login_wait(mut self, wait: Duration) -> Self {
        self.login_wait = wait;
        self
    }

    /// Full URL of the interactive login page.
    pub fn login_page_url(&self) -> String {
        format!("{}/ar/login", self.base_url)
    }
}
