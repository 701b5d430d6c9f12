use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64, ensure_finite};
use crate::core::{AxisId, LineDash, LineStyle};
use crate::error::{FigureError, FigureResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    #[default]
    Scatter,
    Bar,
    Candlestick,
    Ohlc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceMode {
    #[default]
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "none")]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Marker {
    #[must_use]
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none() && self.symbol.is_none()
    }
}

/// Open/high/low/close columns for candlestick and OHLC traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OhlcColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcColumns {
    fn len(&self) -> FigureResult<usize> {
        let len = self.open.len();
        if self.high.len() != len || self.low.len() != len || self.close.len() != len {
            return Err(FigureError::InvalidData(
                "ohlc columns must have equal length".to_owned(),
            ));
        }
        Ok(len)
    }
}

/// One renderable data series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trace {
    pub kind: TraceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ohlc: Option<OhlcColumns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TraceMode>,
    #[serde(default)]
    pub marker: Marker,
    #[serde(default)]
    pub line: LineStyle,
    #[serde(default)]
    pub xaxis: AxisId,
    #[serde(default)]
    pub yaxis: AxisId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_rank: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
}

impl Trace {
    #[must_use]
    pub fn scatter(name: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bar(name: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Bar,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn candlestick(
        name: impl Into<String>,
        x: Vec<f64>,
        ohlc: OhlcColumns,
    ) -> FigureResult<Self> {
        if ohlc.len()? != x.len() {
            return Err(FigureError::InvalidData(
                "candlestick x and ohlc columns must have equal length".to_owned(),
            ));
        }
        Ok(Self {
            kind: TraceKind::Candlestick,
            name: Some(name.into()),
            x,
            ohlc: Some(ohlc),
            ..Self::default()
        })
    }

    /// Builds a line trace from provider-native timestamps and decimal prices.
    pub fn line_from_decimal_series(
        name: impl Into<String>,
        samples: &[(DateTime<Utc>, Decimal)],
    ) -> FigureResult<Self> {
        let mut x = Vec::with_capacity(samples.len());
        let mut y = Vec::with_capacity(samples.len());
        for (time, price) in samples {
            x.push(datetime_to_unix_seconds(*time));
            y.push(decimal_to_f64(*price, "price")?);
        }
        Ok(Self::scatter(name)
            .with_points(x, y)?
            .with_mode(TraceMode::Lines))
    }

    pub fn with_points(mut self, x: Vec<f64>, y: Vec<f64>) -> FigureResult<Self> {
        if x.len() != y.len() {
            return Err(FigureError::InvalidData(format!(
                "trace x/y length mismatch: {} != {}",
                x.len(),
                y.len()
            )));
        }
        self.x = x;
        self.y = y;
        Ok(self)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TraceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn with_line_dash(mut self, dash: LineDash) -> Self {
        self.line.dash = Some(dash);
        self
    }

    #[must_use]
    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_axes(mut self, xaxis: AxisId, yaxis: AxisId) -> Self {
        self.xaxis = xaxis;
        self.yaxis = yaxis;
        self
    }

    #[must_use]
    pub fn with_legend_rank(mut self, rank: f64) -> Self {
        self.legend_rank = Some(rank);
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of data points carried by the trace.
    #[must_use]
    pub fn data_len(&self) -> usize {
        let ohlc_len = self.ohlc.as_ref().map_or(0, |ohlc| ohlc.open.len());
        self.x.len().max(self.y.len()).max(ohlc_len)
    }

    /// A trace with no data points exists only to produce a legend entry.
    #[must_use]
    pub fn is_legend_label(&self) -> bool {
        self.data_len() == 0
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.is_legend_label() && self.name().is_none_or(str::is_empty) {
            return Err(FigureError::InvalidData(
                "legend label trace must carry a non-empty name".to_owned(),
            ));
        }
        if !self.y.is_empty() && self.x.len() != self.y.len() {
            return Err(FigureError::InvalidData(format!(
                "trace x/y length mismatch: {} != {}",
                self.x.len(),
                self.y.len()
            )));
        }
        if let Some(ohlc) = &self.ohlc {
            if ohlc.len()? != self.x.len() {
                return Err(FigureError::InvalidData(
                    "ohlc columns must match x length".to_owned(),
                ));
            }
        }
        for value in self.x.iter().chain(self.y.iter()) {
            ensure_finite(*value, "trace sample")?;
        }
        if let Some(rank) = self.legend_rank {
            ensure_finite(rank, "legend rank")?;
        }
        self.xaxis.validate()?;
        self.yaxis.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{OhlcColumns, Trace, TraceMode};

    #[test]
    fn decimal_series_converts_to_unix_seconds() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("time");
        let t1 = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).single().expect("time");
        let trace = Trace::line_from_decimal_series(
            "close",
            &[(t0, Decimal::new(10025, 2)), (t1, Decimal::new(10150, 2))],
        )
        .expect("series");

        assert_eq!(trace.x, vec![1_704_153_600.0, 1_704_240_000.0]);
        assert_eq!(trace.y, vec![100.25, 101.5]);
        assert_eq!(trace.mode, Some(TraceMode::Lines));
        assert_eq!(trace.data_len(), 2);
    }

    #[test]
    fn mismatched_points_are_rejected() {
        assert!(
            Trace::scatter("s")
                .with_points(vec![1.0, 2.0], vec![1.0])
                .is_err()
        );
    }

    #[test]
    fn candlestick_requires_aligned_columns() {
        let ohlc = OhlcColumns {
            open: vec![1.0, 2.0],
            high: vec![2.0, 3.0],
            low: vec![0.5, 1.5],
            close: vec![1.5],
        };
        assert!(Trace::candlestick("c", vec![0.0, 1.0], ohlc).is_err());
    }

    #[test]
    fn unnamed_empty_trace_fails_validation() {
        let trace = Trace::default();
        assert!(trace.is_legend_label());
        assert!(trace.validate().is_err());
    }
}
