// =============================================================================
// Price series — ordered OHLCV history for one instrument and interval
// =============================================================================
//
// A `PriceSeries` is the single source of truth for every indicator. Bars are
// immutable once loaded and must arrive oldest-first with strictly increasing
// timestamps; construction rejects anything else so the numeric pipeline never
// has to re-check ordering.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Timeframe;

/// A single OHLCV bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered sequence of bars for one instrument at one sampling interval.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    timeframe: Timeframe,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from oldest-first bars.
    ///
    /// Fails when timestamps are not strictly increasing (out-of-order or
    /// duplicate bars), which indicates a broken upstream feed rather than a
    /// short history. An empty bar list is a valid, empty series.
    pub fn new(timeframe: Timeframe, bars: Vec<PriceBar>) -> Result<Self> {
        for pair in bars.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                bail!(
                    "{timeframe} series has non-increasing timestamps: {} then {}",
                    pair[0].timestamp,
                    pair[1].timestamp
                );
            }
        }
        Ok(Self { timeframe, bars })
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close of the most recent bar.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Close prices, oldest-first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// High prices, oldest-first.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Low prices, oldest-first.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// The most recent `count` bars (all bars when fewer exist).
    pub fn tail(&self, count: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(count);
        &self.bars[start..]
    }
}
