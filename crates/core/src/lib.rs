pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

use serde_json::Value;

use auth::api::ApiLogin;
use auth::traits::LoginStrategy;
use config::ClientConfig;
use errors::ClientError;
use models::chart::CandlestickChart;
use models::credentials::Credentials;
use services::chart_service::ChartService;
use services::feed::DataFeed;
use session::Session;

const MARKET_DATA_PATH: &str = "/api/v1/market/data";
const PORTFOLIO_PATH: &str = "/api/v1/portfolio";
const SYMBOLS_PATH: &str = "/api/v1/symbols";

/// Main entry point for the TickerChart core library.
///
/// Binds the fixed data endpoints to an authenticated [`Session`]. The
/// client is either unauthenticated (no session, every data call fails
/// with [`ClientError::NotAuthenticated`]) or authenticated; the
/// transition is one-way and happens at construction via [`connect`] or
/// by adopting a session from a login strategy via [`from_session`].
///
/// [`connect`]: TickerChartClient::connect
/// [`from_session`]: TickerChartClient::from_session
#[must_use]
pub struct TickerChartClient {
    config: ClientConfig,
    session: Option<Session>,
    chart_service: ChartService,
}

impl std::fmt::Debug for TickerChartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerChartClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.session.is_some())
            .finish()
    }
}

impl TickerChartClient {
    /// An unauthenticated client. Data calls fail until a session is adopted.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            chart_service: ChartService::new(),
        }
    }

    /// Log in through the API and return an authenticated client.
    ///
    /// Only the API strategy is tried here; if it yields no token this
    /// fails with [`ClientError::AuthenticationFailed`] without touching
    /// any data endpoint. For the browser fallback, run
    /// [`auth::browser::BrowserLogin`] yourself and hand the session to
    /// [`from_session`](Self::from_session).
    pub async fn connect(
        config: ClientConfig,
        credentials: &Credentials,
    ) -> Result<Self, ClientError> {
        let mut session = Session::new(&config.base_url);

        match ApiLogin::new().try_login(credentials, &mut session).await {
            Some(_) => {
                let mut client = Self::new(config);
                client.session = Some(session);
                Ok(client)
            }
            None => Err(ClientError::AuthenticationFailed),
        }
    }

    /// Adopt a session produced by any login strategy.
    ///
    /// The session must carry a token; an unauthenticated one is rejected
    /// so the invariant "client with a session can make data calls" holds.
    pub fn from_session(config: ClientConfig, session: Session) -> Result<Self, ClientError> {
        if !session.is_authenticated() {
            return Err(ClientError::AuthenticationFailed);
        }
        let mut client = Self::new(config);
        client.session = Some(session);
        Ok(client)
    }

    /// Whether this client holds an authenticated session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    // ── Data retrieval ──────────────────────────────────────────────

    /// Market data for a symbol, e.g. `"1010.TAD"`.
    ///
    /// The payload is returned exactly as the service sent it; no schema
    /// is imposed on it.
    pub async fn get_market_data(&self, symbol: &str) -> Result<Value, ClientError> {
        let session = self.require_session()?;
        session.get(MARKET_DATA_PATH, &[("symbol", symbol)]).await
    }

    /// The authenticated user's portfolio, as opaque JSON.
    pub async fn get_portfolio(&self) -> Result<Value, ClientError> {
        let session = self.require_session()?;
        session.get(PORTFOLIO_PATH, &[]).await
    }

    /// The list of symbols available on the service, as opaque JSON.
    pub async fn get_symbols(&self) -> Result<Value, ClientError> {
        let session = self.require_session()?;
        session.get(SYMBOLS_PATH, &[]).await
    }

    /// Fetch market data for a symbol and turn it into a candlestick chart.
    pub async fn get_candlestick_chart(
        &self,
        symbol: &str,
    ) -> Result<CandlestickChart, ClientError> {
        let market_data = self.get_market_data(symbol).await?;
        self.chart_service.candlestick_chart(&market_data)
    }

    /// A TTL-cached, display-facing feed over this client's session.
    pub fn data_feed(&self) -> Result<DataFeed, ClientError> {
        let session = self.require_session()?;
        Ok(DataFeed::new(session.clone()))
    }

    fn require_session(&self) -> Result<&Session, ClientError> {
        self.session.as_ref().ok_or(ClientError::NotAuthenticated)
    }
}
