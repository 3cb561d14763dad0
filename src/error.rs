//! Error types for the multi-ring component.

use thiserror::Error;

/// Result type returned by the fallible setters of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported when a caller passes values outside the documented domain.
///
/// Rejected calls never start an animation and leave the component state
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The overall progress must lie within `0..=100`.
    #[error("progress {0} is outside the range 0..=100")]
    ProgressOutOfRange(i32),
    /// The value shown by the centre readout must lie within `0..=100`.
    #[error("indicator value {0} is outside the range 0..=100")]
    ValueOutOfRange(i32),
}

/// Checks that `progress` lies within `0..=100`.
pub(crate) fn check_progress(progress: i32) -> Result<i32> {
    if (0..=100).contains(&progress) {
        Ok(progress)
    } else {
        Err(Error::ProgressOutOfRange(progress))
    }
}

/// Checks that `value` lies within `0..=100`.
pub(crate) fn check_value(value: i32) -> Result<i32> {
    if (0..=100).contains(&value) {
        Ok(value)
    } else {
        Err(Error::ValueOutOfRange(value))
    }
}
