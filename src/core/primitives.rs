use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{FigureError, FigureResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> FigureResult<f64> {
    value.to_f64().ok_or_else(|| {
        FigureError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

pub fn ensure_finite(value: f64, field_name: &str) -> FigureResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FigureError::InvalidData(format!(
            "{field_name} must be finite"
        )))
    }
}

/// Pixel dimension check shared by figure sizing and layout validation.
pub fn ensure_positive_size(value: f64, field_name: &str) -> FigureResult<f64> {
    ensure_finite(value, field_name)?;
    if value <= 0.0 {
        return Err(FigureError::InvalidData(format!("{field_name} must be > 0")));
    }
    Ok(value)
}
