// ═══════════════════════════════════════════════════════════════════
// Client Tests — TickerChartClient façade and Session over wiremock
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tickerchart_core::config::ClientConfig;
use tickerchart_core::errors::ClientError;
use tickerchart_core::models::credentials::Credentials;
use tickerchart_core::session::Session;
use tickerchart_core::TickerChartClient;

const LOGIN_PATH: &str = "/api/v1/auth/login";

fn credentials() -> Credentials {
    Credentials::new("trader", "hunter2")
}

async fn mount_login_ok(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
        .mount(server)
        .await;
}

async fn connected_client(server: &MockServer, token: &str) -> TickerChartClient {
    mount_login_ok(server, token).await;
    TickerChartClient::connect(ClientConfig::with_base_url(server.uri()), &credentials())
        .await
        .unwrap()
}

// ── Construction ────────────────────────────────────────────────────

mod construction {
    use super::*;

    #[tokio::test]
    async fn connect_succeeds_when_the_api_returns_a_token() {
        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-1").await;
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn connect_fails_without_a_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let result =
            TickerChartClient::connect(ClientConfig::with_base_url(server.uri()), &credentials())
                .await;

        assert!(matches!(result, Err(ClientError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn connect_fails_on_rejected_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result =
            TickerChartClient::connect(ClientConfig::with_base_url(server.uri()), &credentials())
                .await;

        assert!(matches!(result, Err(ClientError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn failed_connect_touches_no_data_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let _ =
            TickerChartClient::connect(ClientConfig::with_base_url(server.uri()), &credentials())
                .await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), LOGIN_PATH);
    }

    #[tokio::test]
    async fn from_session_accepts_an_authenticated_session() {
        let mut session = Session::new("https://www.tickerchart.net");
        session.set_token("tok-2");

        let client = TickerChartClient::from_session(ClientConfig::default(), session).unwrap();
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn from_session_rejects_a_tokenless_session() {
        let session = Session::new("https://www.tickerchart.net");
        let result = TickerChartClient::from_session(ClientConfig::default(), session);
        assert!(matches!(result, Err(ClientError::AuthenticationFailed)));
    }
}

// ── Unauthenticated clients make no requests ────────────────────────

mod unauthenticated {
    use super::*;

    #[tokio::test]
    async fn market_data_fails_fast() {
        let client = TickerChartClient::new(ClientConfig::default());
        let result = client.get_market_data("1010.TAD").await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn portfolio_fails_fast() {
        let client = TickerChartClient::new(ClientConfig::default());
        let result = client.get_portfolio().await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn symbols_fails_fast() {
        let client = TickerChartClient::new(ClientConfig::default());
        let result = client.get_symbols().await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn data_feed_is_refused() {
        let client = TickerChartClient::new(ClientConfig::default());
        assert!(matches!(
            client.data_feed(),
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn no_request_leaves_the_process() {
        // A client pointed at a live mock server still must not call out.
        let server = MockServer::start().await;
        let client = TickerChartClient::new(ClientConfig::with_base_url(server.uri()));

        let _ = client.get_market_data("1010.TAD").await;
        let _ = client.get_portfolio().await;

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

// ── Data retrieval ──────────────────────────────────────────────────

mod data_retrieval {
    use super::*;

    #[tokio::test]
    async fn market_data_payload_is_passed_through_unchanged() {
        let payload = json!({
            "date": ["2024-01-02", "2024-01-03", "2024-01-04"],
            "open": [10.0, 10.4, 10.2],
            "high": [10.6, 10.8, 10.5],
            "low": [9.8, 10.1, 9.9],
            "close": [10.4, 10.2, 10.3],
        });

        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-md").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/market/data"))
            .and(query_param("symbol", "1010.TAD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let data = client.get_market_data("1010.TAD").await.unwrap();
        assert_eq!(data, payload);
    }

    #[tokio::test]
    async fn market_data_carries_the_bearer_header() {
        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-hdr").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/market/data"))
            .and(header("authorization", "Bearer tok-hdr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client.get_market_data("1010.TAD").await.unwrap();
    }

    #[tokio::test]
    async fn portfolio_is_fetched_from_the_fixed_endpoint() {
        let payload = json!({"cash": 2500.0, "positions": [{"symbol": "1010.TAD", "qty": 10}]});

        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-pf").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let portfolio = client.get_portfolio().await.unwrap();
        assert_eq!(portfolio, payload);
    }

    #[tokio::test]
    async fn symbols_are_fetched_from_the_fixed_endpoint() {
        let payload = json!([{"symbol": "1010.TAD", "name": "Riyad"}]);

        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-sym").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let symbols = client.get_symbols().await.unwrap();
        assert_eq!(symbols, payload);
    }

    #[tokio::test]
    async fn candlestick_chart_is_built_from_market_data() {
        let payload = json!({
            "date": ["2024-01-02", "2024-01-03"],
            "open": [10.0, 10.4],
            "high": [10.6, 10.8],
            "low": [9.8, 10.1],
            "close": [10.4, 10.2],
        });

        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-chart").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/market/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let chart = client.get_candlestick_chart("1010.TAD").await.unwrap();
        assert_eq!(chart.candles.len(), 2);
        assert_eq!(chart.candles[0].open, 10.0);
        assert_eq!(chart.candles[1].close, 10.2);
    }
}

// ── Session error propagation ───────────────────────────────────────

mod session_errors {
    use super::*;

    #[tokio::test]
    async fn non_2xx_data_response_is_an_api_error() {
        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-err").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let result = client.get_portfolio().await;
        match result {
            Err(ClientError::Api { endpoint, message }) => {
                assert_eq!(endpoint, "/api/v1/portfolio");
                assert!(message.contains("502"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_data_response_is_a_deserialization_error() {
        let server = MockServer::start().await;
        let client = connected_client(&server, "tok-err").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = client.get_portfolio().await;
        assert!(matches!(result, Err(ClientError::Deserialization(_))));
    }

    #[tokio::test]
    async fn session_cookies_are_sent_sorted_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio"))
            .and(header("cookie", "locale=ar; session_id=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = Session::new(server.uri());
        session.set_token("t");
        session.set_cookie("session_id", "abc123");
        session.set_cookie("locale", "ar");

        session.get("/api/v1/portfolio", &[]).await.unwrap();
    }
}
