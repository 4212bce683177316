use thiserror::Error;

/// Rejected field values when building a [`crate::ForecastSample`] or
/// [`crate::CombinedRecord`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Field '{field}' is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Temperature range is inverted: low {low} > high {high}")]
    InvertedRange { low: f64, high: f64 },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::NonFinite { field, value })
    }
}

pub(crate) fn ensure_range(low: f64, high: f64) -> Result<(), RecordError> {
    ensure_finite("temp_low", low)?;
    ensure_finite("temp_high", high)?;
    if low > high {
        return Err(RecordError::InvertedRange { low, high });
    }
    Ok(())
}
