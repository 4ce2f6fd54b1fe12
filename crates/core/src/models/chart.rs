use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One candle of a candlestick chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A chart-ready candlestick series.
///
/// The core computes the candles; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickChart {
    /// Chart title shown above the plot area.
    pub title: String,

    /// X axis label.
    pub x_axis_label: String,

    /// Y axis label.
    pub y_axis_label: String,

    /// Candles sorted in the order the service returned them.
    pub candles: Vec<Candle>,
}
