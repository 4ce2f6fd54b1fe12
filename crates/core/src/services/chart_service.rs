use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::ClientError;
use crate::models::chart::{Candle, CandlestickChart};

const CHART_TITLE: &str = "Stock Price Chart";
const X_AXIS_LABEL: &str = "Date";
const Y_AXIS_LABEL: &str = "Price";

/// Builds chart-ready candlestick series from raw market data.
///
/// The service returns market data as an object of parallel arrays
/// (`date`, `open`, `high`, `low`, `close`). This is the one place that
/// shape is interpreted; everywhere else the payload stays opaque JSON.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Convert a market-data payload into a candlestick chart.
    ///
    /// Missing columns, non-array columns, length mismatches and
    /// unparseable cells are all typed errors. This is a pure transform,
    /// not a display-path helper, so nothing is silently dropped.
    pub fn candlestick_chart(&self, market_data: &Value) -> Result<CandlestickChart, ClientError> {
        let dates = column(market_data, "date")?;
        let opens = column(market_data, "open")?;
        let highs = column(market_data, "high")?;
        let lows = column(market_data, "low")?;
        let closes = column(market_data, "close")?;

        let len = dates.len();
        for (field, values) in [
            ("open", opens),
            ("high", highs),
            ("low", lows),
            ("close", closes),
        ] {
            if values.len() != len {
                return Err(ClientError::Deserialization(format!(
                    "Market data column '{field}' has {} entries, expected {len}",
                    values.len()
                )));
            }
        }

        let mut candles = Vec::with_capacity(len);
        for i in 0..len {
            candles.push(Candle {
                date: date_cell(&dates[i], i)?,
                open: number_cell(&opens[i], "open", i)?,
                high: number_cell(&highs[i], "high", i)?,
                low: number_cell(&lows[i], "low", i)?,
                close: number_cell(&closes[i], "close", i)?,
            });
        }

        Ok(CandlestickChart {
            title: CHART_TITLE.to_string(),
            x_axis_label: X_AXIS_LABEL.to_string(),
            y_axis_label: Y_AXIS_LABEL.to_string(),
            candles,
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

fn column<'a>(data: &'a Value, field: &str) -> Result<&'a Vec<Value>, ClientError> {
    data.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ClientError::Deserialization(format!("Market data is missing a '{field}' array"))
        })
}

fn date_cell(value: &Value, index: usize) -> Result<NaiveDate, ClientError> {
    let text = value.as_str().ok_or_else(|| {
        ClientError::Deserialization(format!("Market data date at index {index} is not a string"))
    })?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
        ClientError::Deserialization(format!("Invalid date '{text}' at index {index}: {e}"))
    })
}

fn number_cell(value: &Value, field: &str, index: usize) -> Result<f64, ClientError> {
    value.as_f64().ok_or_else(|| {
        ClientError::Deserialization(format!(
            "Market data '{field}' at index {index} is not a number"
        ))
    })
}
