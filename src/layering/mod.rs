//! Layer discretization: layering strategies and their input validation.
//!
//! This module turns a small declarative layering choice (number of
//! layers, layering ratio, depth factor, wavelength range) into explicit
//! per-layer bound arrays:
//!
//! - **Validators** reject malformed scalars before anything is computed
//!   ([`check_wavelengths`], [`check_nlayers`], [`check_ratio`], ...).
//! - **Strategies** produce [`LayerBounds`]: [`fixed_thickness`],
//!   [`by_number_thickness`], [`by_number_depth`], [`layering_ratio`].
//!
//! All functions are stateless and side-effect free; failures are
//! deterministic input-validation errors, never transient conditions.

mod discretize;
mod validate;

pub use discretize::{
    by_number_depth, by_number_thickness, by_number_thickness_increasing, fixed_thickness,
    layering_ratio, LayerBounds, DEFAULT_DEPTH_FACTOR,
};
pub use validate::{
    check_depth_factor, check_finite, check_increasing_factor, check_nlayers, check_positive,
    check_ratio, check_wavelengths, LayeringError,
};
