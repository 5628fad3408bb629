//! Scalar validation for layering inputs.
//!
//! Every public discretization entry point validates its scalars here
//! before computing anything. Malformed numbers (NaN, infinity) and
//! out-of-domain values are reported as distinct [`LayeringError`]
//! variants so callers can tell a malformed argument from a merely
//! out-of-range one.

use thiserror::Error;

/// Error type for layering validation and discretization.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayeringError {
    /// Argument is NaN or infinite.
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Argument is finite but not greater than zero.
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A layering ratio of one or less cannot produce geometric growth.
    #[error("layering ratio must be greater than 1, got {0}")]
    RatioNotGrowing(f64),

    /// An increasing factor of one or less cannot grow layer thicknesses.
    #[error("increasing factor must be greater than 1, got {0}")]
    FactorNotGrowing(f64),

    /// At least one layer is required.
    #[error("layer count must be at least 1")]
    ZeroLayerCount,

    /// The depth factor pushes the maximum resolvable depth above the
    /// first boundary, leaving no room for any layer.
    #[error(
        "wmax/depth_factor = {dmax} must lie below the first boundary depth {first}"
    )]
    DepthRangeTooShallow { dmax: f64, first: f64 },
}

/// Check that `value` is a finite number.
pub fn check_finite(name: &'static str, value: f64) -> Result<f64, LayeringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayeringError::NonFinite { name, value })
    }
}

/// Check that `value` is finite and strictly positive.
pub fn check_positive(name: &'static str, value: f64) -> Result<f64, LayeringError> {
    let value = check_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(LayeringError::NonPositive { name, value })
    }
}

/// Check a pair of wavelengths, returning them in ascending order.
///
/// Both values must be finite and strictly positive; the order in which
/// they are supplied does not matter.
pub fn check_wavelengths(wmin: f64, wmax: f64) -> Result<(f64, f64), LayeringError> {
    let a = check_positive("wmin", wmin)?;
    let b = check_positive("wmax", wmax)?;
    if a <= b {
        Ok((a, b))
    } else {
        Ok((b, a))
    }
}

/// Check a depth factor (divisor applied to the maximum wavelength).
/// Non-positive factors would invert or unbound the profile.
pub fn check_depth_factor(depth_factor: f64) -> Result<f64, LayeringError> {
    check_positive("depth_factor", depth_factor)
}

/// Check a layer count.
pub fn check_nlayers(nlayers: usize) -> Result<usize, LayeringError> {
    if nlayers >= 1 {
        Ok(nlayers)
    } else {
        Err(LayeringError::ZeroLayerCount)
    }
}

/// Check a layering ratio (geometric growth factor between boundaries).
pub fn check_ratio(ratio: f64) -> Result<f64, LayeringError> {
    let ratio = check_finite("layering ratio", ratio)?;
    if ratio > 1.0 {
        Ok(ratio)
    } else {
        Err(LayeringError::RatioNotGrowing(ratio))
    }
}

/// Check an increasing factor (growth applied to successive layer
/// thickness bounds).
pub fn check_increasing_factor(factor: f64) -> Result<f64, LayeringError> {
    let factor = check_finite("increasing factor", factor)?;
    if factor > 1.0 {
        Ok(factor)
    } else {
        Err(LayeringError::FactorNotGrowing(factor))
    }
}
