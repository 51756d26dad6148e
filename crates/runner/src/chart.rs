//! Chart feed
//!
//! Turns the price history into a plottable series. Drawing is left to the
//! front-end; the terminal front-end uses [`ChartSeries::sparkline`].

use market_sim::PriceHistory;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tradesim_core::Price;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One plotted point: x is the tick index, y the price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: u64,
    pub y: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub label: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Build a series from history, keeping at most `window` recent points
    pub fn from_history(history: &PriceHistory, symbol: &str, window: Option<usize>) -> Self {
        let slice = match window {
            Some(n) => history.last_n(n),
            None => history.points(),
        };

        Self {
            title: "Stock Price History".to_string(),
            label: format!("{symbol} Stock Price"),
            x_label: "Time (in 2-second intervals)".to_string(),
            y_label: "Price ($)".to_string(),
            points: slice
                .iter()
                .map(|p| ChartPoint {
                    x: p.seq,
                    y: p.price,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest and highest y in the series
    pub fn bounds(&self) -> Option<(Price, Price)> {
        bounds_of(&self.points)
    }

    /// Render the last `width` points as a one-line sparkline
    pub fn sparkline(&self, width: usize) -> String {
        let start = self.points.len().saturating_sub(width);
        let points = &self.points[start..];
        let Some((lo, hi)) = bounds_of(points) else {
            return String::new();
        };

        let lo = lo.to_f64().unwrap_or(0.0);
        let span = hi.to_f64().unwrap_or(0.0) - lo;
        let top = (SPARK_LEVELS.len() - 1) as f64;

        points
            .iter()
            .map(|p| {
                if span <= 0.0 {
                    return SPARK_LEVELS[0];
                }
                let ratio = (p.y.to_f64().unwrap_or(lo) - lo) / span;
                SPARK_LEVELS[(ratio * top).round().clamp(0.0, top) as usize]
            })
            .collect()
    }

    /// Multi-part text rendering: title, sparkline and bounds
    pub fn render_text(&self, width: usize) -> String {
        match self.bounds() {
            Some((lo, hi)) => format!(
                "{} - {}\n{}\nlow ${:.2}  high ${:.2}  points {}",
                self.title,
                self.label,
                self.sparkline(width),
                lo,
                hi,
                self.len()
            ),
            None => format!("{} - {}\n(no data)", self.title, self.label),
        }
    }
}

fn bounds_of(points: &[ChartPoint]) -> Option<(Price, Price)> {
    let first = points.first()?.y;
    Some(
        points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))),
    )
}
