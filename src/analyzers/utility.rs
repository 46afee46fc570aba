use crate::error::{Result, TripError};

/// `part / whole`, or `DivisionUndefined(what)` when `whole` is zero.
pub fn share(part: u64, whole: u64, what: &'static str) -> Result<f64> {
    if whole == 0 {
        return Err(TripError::DivisionUndefined(what));
    }
    Ok(part as f64 / whole as f64)
}

/// Arithmetic mean of a pre-summed series, or `DivisionUndefined(what)` for
/// an empty one.
pub fn mean(sum: f64, count: u64, what: &'static str) -> Result<f64> {
    if count == 0 {
        return Err(TripError::DivisionUndefined(what));
    }
    Ok(sum / count as f64)
}
