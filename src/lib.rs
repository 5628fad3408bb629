//! # swipp-rs
//!
//! Surface-wave inversion pre-processing: build and serialize the model
//! parameterization that drives an external surface-wave inversion.
//!
//! This crate provides the core building blocks:
//! - Layering strategies turning a wavelength range and a few scalars
//!   into validated per-layer bound arrays ([`layering`])
//! - A single physical quantity's per-layer search space ([`parameter`])
//! - The four-parameter model specification (Vp, Poisson's ratio, Vs,
//!   density) and its gzipped-tar `.param` serialization consumed by
//!   Geopsy/dinver ([`parameterization`], [`io`])
//!
//! # Example
//!
//! ```no_run
//! use swipp_rs::{ParamSpec, Parameterization};
//!
//! let par = Parameterization::from_min_max(
//!     ParamSpec::Lr { ratio: 3.0, par_min: 200.0, par_max: 600.0, par_rev: true },
//!     ParamSpec::Ln { nlayers: 3, par_min: 0.2, par_max: 0.5, par_rev: false },
//!     ParamSpec::Lr { ratio: 3.0, par_min: 100.0, par_max: 350.0, par_rev: true },
//!     ParamSpec::Fx { value: 2000.0 },
//!     (2.0, 120.0),
//! )?;
//! par.to_file("model.param", "3.4.2")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod io;
pub mod layering;
pub mod parameter;
pub mod parameterization;

// Re-export main types for convenience
pub use io::{write_param_file, ParamFileError, SchemaVersion};
pub use layering::{
    by_number_depth, by_number_thickness, by_number_thickness_increasing, check_wavelengths,
    fixed_thickness, layering_ratio, LayerBounds, LayeringError,
};
pub use parameter::{ParType, Parameter, ParameterError};
pub use parameterization::{ParamSpec, Parameterization};
