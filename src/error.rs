//! Error types shared by the adapter, condenser and aggregator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    /// A row is missing a required field or a field fails to parse.
    /// `line` is the 1-based data line within the file, when known.
    #[error("malformed record{}: {}", .line.map(|l| format!(" at line {l}")).unwrap_or_default(), .reason)]
    MalformedRecord { line: Option<u64>, reason: String },

    /// A statistic needs to divide by a count that is zero.
    #[error("division undefined: no {0}")]
    DivisionUndefined(&'static str),

    /// Histogram bin edges that cannot form bins.
    #[error("invalid histogram bins: {0}")]
    InvalidBins(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TripError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        TripError::MalformedRecord {
            line: None,
            reason: reason.into(),
        }
    }

    /// Attaches a line number to a `MalformedRecord`; other variants pass through.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            TripError::MalformedRecord { reason, .. } => TripError::MalformedRecord {
                line: Some(line),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_without_line() {
        let err = TripError::malformed("missing field `usertype`");
        assert_eq!(err.to_string(), "malformed record: missing field `usertype`");
    }

    #[test]
    fn test_at_line_sets_line_number() {
        let err = TripError::malformed("bad duration").at_line(7);
        assert_eq!(err.to_string(), "malformed record at line 7: bad duration");
    }

    #[test]
    fn test_at_line_ignores_other_variants() {
        let err = TripError::DivisionUndefined("customer trips").at_line(3);
        assert!(matches!(err, TripError::DivisionUndefined("customer trips")));
    }
}
