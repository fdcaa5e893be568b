use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid threshold {0}: must not be negative")]
    InvalidThreshold(i64),

    #[error("threshold {threshold} cannot sample {len} points: need 0 or at least 3")]
    UnderspecifiedThreshold { threshold: usize, len: usize },

    #[error("bucket {bucket} has no look-ahead points to average")]
    DegenerateBucket { bucket: usize },

    #[error("invalid window [{start}, {end}]")]
    InvalidWindow { start: f64, end: f64 },
}

/// Converts a caller-supplied signed threshold into a sample count.
pub fn threshold(value: i64) -> Result<usize, Error> {
    usize::try_from(value).map_err(|_| Error::InvalidThreshold(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_threshold_is_rejected() {
        assert_eq!(threshold(-1), Err(Error::InvalidThreshold(-1)));
        assert_eq!(threshold(0), Ok(0));
        assert_eq!(threshold(100), Ok(100));
    }
}
