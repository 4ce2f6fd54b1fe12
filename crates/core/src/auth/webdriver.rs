use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{ClientBuilder, Locator};
use serde_json::Value;

use super::browser::{Browser, BrowserConnector};
use crate::errors::ClientError;

/// Opens [`WebDriverBrowser`] sessions against a WebDriver endpoint
/// (chromedriver, geckodriver, a Selenium grid).
pub struct WebDriverConnector {
    webdriver_url: String,
}

impl WebDriverConnector {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }
}

#[async_trait]
impl BrowserConnector for WebDriverConnector {
    async fn connect(&self) -> Result<Box<dyn Browser>, ClientError> {
        let client = ClientBuilder::native()
            .connect(&self.webdriver_url)
            .await?;
        Ok(Box::new(WebDriverBrowser { client }))
    }
}

/// [`Browser`] implementation backed by fantoccini.
pub struct WebDriverBrowser {
    client: fantoccini::Client,
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&mut self, url: &str) -> Result<(), ClientError> {
        Ok(self.client.goto(url).await?)
    }

    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), ClientError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await?;
        Ok(())
    }

    async fn fill(&mut self, css: &str, text: &str) -> Result<(), ClientError> {
        let element = self.client.find(Locator::Css(css)).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn click(&mut self, css: &str) -> Result<(), ClientError> {
        let element = self.client.find(Locator::Css(css)).await?;
        element.click().await?;
        Ok(())
    }

    async fn cookies(&mut self) -> Result<Vec<(String, String)>, ClientError> {
        let cookies = self.client.get_all_cookies().await?;
        Ok(cookies
            .iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect())
    }

    async fn local_storage_item(&mut self, key: &str) -> Result<Option<String>, ClientError> {
        let value = self
            .client
            .execute(
                "return window.localStorage.getItem(arguments[0]);",
                vec![Value::String(key.to_string())],
            )
            .await?;
        match value {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), ClientError> {
        Ok(self.client.close().await?)
    }
}
