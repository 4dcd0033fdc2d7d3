//! Seek range validation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekError {
    #[error("{minutes} minutes is outside the seek range 0..={max}")]
    OutOfRange { minutes: u32, max: u32 },
}

/// Range of minute values the seek control can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRange {
    max: u32,
}

impl SeekRange {
    pub fn new(max: u32) -> Self {
        Self { max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Accept `minutes` if the seek control could have produced it
    pub fn check(&self, minutes: u32) -> Result<u32, SeekError> {
        if minutes > self.max {
            return Err(SeekError::OutOfRange {
                minutes,
                max: self.max,
            });
        }
        Ok(minutes)
    }
}

impl Default for SeekRange {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_rejects_above_max() {
        let range = SeekRange::new(60);
        assert_eq!(range.check(0), Ok(0));
        assert_eq!(range.check(60), Ok(60));

        let err = range.check(61).unwrap_err();
        assert_eq!(err, SeekError::OutOfRange { minutes: 61, max: 60 });
        assert_eq!(err.to_string(), "61 minutes is outside the seek range 0..=60");
    }
}
