//! A complete four-parameter model specification.
//!
//! A [`Parameterization`] binds the four physical parameters a
//! surface-wave inversion searches over: compression-wave velocity
//! (`vp`), Poisson's ratio (`pr`), shear-wave velocity (`vs`), and mass
//! density (`rh`). It can be assembled from four ready-made
//! [`Parameter`]s, or from four compact [`ParamSpec`]s sharing one
//! wavelength range via [`Parameterization::from_min_max`].
//!
//! # Example
//!
//! ```no_run
//! use swipp_rs::parameterization::{ParamSpec, Parameterization};
//!
//! let par = Parameterization::from_min_max(
//!     ParamSpec::Lni { nlayers: 4, depth_factor: 2.0, par_min: 200.0, par_max: 400.0, par_rev: true },
//!     ParamSpec::Ln { nlayers: 3, par_min: 0.2, par_max: 0.5, par_rev: false },
//!     ParamSpec::Ftl { nlayers: 3, thickness: 3.0, par_min: 100.0, par_max: 200.0, par_rev: true },
//!     ParamSpec::Fx { value: 2000.0 },
//!     (1.0, 100.0),
//! )?;
//! par.to_file("model.param", "2.10.1")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::path::Path;

use crate::io::{write_param_file, ParamFileError};
use crate::layering::DEFAULT_DEPTH_FACTOR;
use crate::parameter::{Parameter, ParameterError};

/// Compact, strategy-tagged specification of one parameter.
///
/// Each variant carries exactly the fields its layering strategy needs,
/// so an inapplicable scalar (say, a depth factor for the thickness form)
/// cannot be supplied at all. The shared wavelength range is provided
/// when the spec is resolved, not stored here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamSpec {
    /// Fixed value, constant with depth.
    Fx { value: f64 },
    /// Fixed-thickness layers.
    Ftl {
        nlayers: usize,
        thickness: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    },
    /// Layering by number, thickness form.
    Ln {
        nlayers: usize,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    },
    /// Layering by number, depth form.
    Lni {
        nlayers: usize,
        depth_factor: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    },
    /// Layering ratio; the layer count is derived. Uses the default
    /// depth factor of 2.
    Lr {
        ratio: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    },
}

impl ParamSpec {
    /// Resolve this spec against a wavelength range, producing a fully
    /// populated [`Parameter`].
    pub fn resolve(self, wmin: f64, wmax: f64) -> Result<Parameter, ParameterError> {
        match self {
            ParamSpec::Fx { value } => Parameter::from_fx(value),
            ParamSpec::Ftl {
                nlayers,
                thickness,
                par_min,
                par_max,
                par_rev,
            } => Parameter::from_ftl(nlayers, thickness, par_min, par_max, par_rev),
            ParamSpec::Ln {
                nlayers,
                par_min,
                par_max,
                par_rev,
            } => Parameter::from_ln_thickness(wmin, wmax, nlayers, par_min, par_max, par_rev),
            ParamSpec::Lni {
                nlayers,
                depth_factor,
                par_min,
                par_max,
                par_rev,
            } => Parameter::from_ln_depth(
                wmin,
                wmax,
                nlayers,
                depth_factor,
                par_min,
                par_max,
                par_rev,
            ),
            ParamSpec::Lr {
                ratio,
                par_min,
                par_max,
                par_rev,
            } => Parameter::from_lr(
                wmin,
                wmax,
                ratio,
                DEFAULT_DEPTH_FACTOR,
                par_min,
                par_max,
                par_rev,
            ),
        }
    }
}

/// A complete model parameterization: the four physical parameters
/// submitted to the external inversion tool.
///
/// Constructed once and immutable thereafter; writing to disk is an
/// explicit [`Parameterization::to_file`] call, never automatic.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameterization {
    /// Compression-wave velocity.
    pub vp: Parameter,
    /// Poisson's ratio.
    pub pr: Parameter,
    /// Shear-wave velocity.
    pub vs: Parameter,
    /// Mass density.
    pub rh: Parameter,
}

impl Parameterization {
    /// Assemble a parameterization from four ready-made parameters.
    pub fn new(vp: Parameter, pr: Parameter, vs: Parameter, rh: Parameter) -> Self {
        Self { vp, pr, vs, rh }
    }

    /// Build all four parameters from compact specs sharing one
    /// wavelength range.
    ///
    /// The four resolutions are pure and order-independent; each
    /// delegates to the matching layering strategy.
    pub fn from_min_max(
        vp: ParamSpec,
        pr: ParamSpec,
        vs: ParamSpec,
        rh: ParamSpec,
        wavelengths: (f64, f64),
    ) -> Result<Self, ParameterError> {
        let (wmin, wmax) = wavelengths;
        Ok(Self {
            vp: vp.resolve(wmin, wmax)?,
            pr: pr.resolve(wmin, wmax)?,
            vs: vs.resolve(wmin, wmax)?,
            rh: rh.resolve(wmin, wmax)?,
        })
    }

    /// Serialize to the external consumer's `.param` format: a gzipped
    /// tar archive holding one `contents.xml` document whose schema is
    /// selected by `version`.
    ///
    /// Any existing file at `path` is replaced atomically; on failure the
    /// target is left untouched.
    pub fn to_file(&self, path: impl AsRef<Path>, version: &str) -> Result<(), ParamFileError> {
        write_param_file(self, path, version)
    }
}

impl fmt::Display for Parameterization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameterization (vp: {}, pr: {}, vs: {}, rh: {})",
            self.vp, self.pr, self.vs, self.rh
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layering::layering_ratio;
    use crate::parameter::ParType;

    fn demo_specs() -> (ParamSpec, ParamSpec, ParamSpec, ParamSpec) {
        (
            ParamSpec::Lni {
                nlayers: 2,
                depth_factor: 1.2,
                par_min: 200.0,
                par_max: 400.0,
                par_rev: true,
            },
            ParamSpec::Ln {
                nlayers: 3,
                par_min: 0.2,
                par_max: 0.5,
                par_rev: false,
            },
            ParamSpec::Ftl {
                nlayers: 5,
                thickness: 2.0,
                par_min: 100.0,
                par_max: 200.0,
                par_rev: true,
            },
            ParamSpec::Fx { value: 2000.0 },
        )
    }

    #[test]
    fn test_from_min_max() {
        let (vp, pr, vs, rh) = demo_specs();
        let param = Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).unwrap();

        // Fixed value.
        assert_eq!(param.rh.par_type(), ParType::Fx);
        assert_eq!(param.rh.par_value(), Some(2000.0));
        assert_eq!(param.rh.par_min(), &[2000.0]);

        // Fixed thickness layers.
        assert_eq!(param.vs.par_type(), ParType::Ftl);
        assert_eq!(param.vs.par_add_value(), Some(2.0));
        assert_eq!(param.vs.lay_min(), &[2.0; 5]);
        assert_eq!(param.vs.lay_max(), &[2.0; 5]);
        assert_eq!(param.vs.par_min(), &[100.0; 5]);
        assert_eq!(param.vs.par_max(), &[200.0; 5]);
        assert_eq!(param.vs.par_rev(), &[true; 5]);

        // Layering by number, thickness form.
        assert_eq!(param.pr.par_type(), ParType::Ln);
        assert_eq!(param.pr.lay_min(), &[1.0 / 3.0; 3]);
        assert_eq!(param.pr.lay_max(), &[100.0 / 6.0; 3]);
        assert_eq!(param.pr.par_rev(), &[false; 3]);

        // Layering by number, depth form.
        assert_eq!(param.vp.par_type(), ParType::Lni);
        assert_eq!(param.vp.lay_min(), &[1.0 / 3.0, 2.0 / 3.0]);
        assert_eq!(param.vp.lay_max(), &[100.0 / 1.2; 2]);
        assert_eq!(param.vp.par_rev(), &[true; 2]);
    }

    #[test]
    fn test_from_min_max_lr_delegates_to_layering_ratio() {
        let (vp, _, vs, rh) = demo_specs();
        let pr = ParamSpec::Lr {
            ratio: 3.0,
            par_min: 0.2,
            par_max: 0.5,
            par_rev: false,
        };
        let param = Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).unwrap();
        let bounds = layering_ratio(1.0, 100.0, 3.0, 2.0).unwrap();

        assert_eq!(param.pr.par_type(), ParType::Lr);
        assert_eq!(param.pr.lay_min(), &bounds.lay_min[..]);
        assert_eq!(param.pr.lay_max(), &bounds.lay_max[..]);
        assert_eq!(param.pr.par_min(), &vec![0.2; bounds.nlayers()][..]);
        assert_eq!(param.pr.par_max(), &vec![0.5; bounds.nlayers()][..]);
        assert_eq!(param.pr.par_rev(), &vec![false; bounds.nlayers()][..]);
    }

    #[test]
    fn test_from_min_max_propagates_validation_errors() {
        let (vp, pr, vs, _) = demo_specs();
        let rh = ParamSpec::Fx { value: -1.0 };
        assert!(Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).is_err());

        let (vp, pr, _, rh) = demo_specs();
        let vs = ParamSpec::Ftl {
            nlayers: 0,
            thickness: 1.0,
            par_min: 100.0,
            par_max: 200.0,
            par_rev: false,
        };
        assert!(Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).is_err());
    }

    #[test]
    fn test_equality() {
        let (vp, pr, vs, rh) = demo_specs();
        let a = Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).unwrap();
        let b = Parameterization::from_min_max(vp, pr, vs, rh, (1.0, 100.0)).unwrap();
        assert_eq!(a, b);

        // Differing any single bound breaks equality.
        let rh2 = ParamSpec::Fx { value: 2001.0 };
        let c = Parameterization::from_min_max(vp, pr, vs, rh2, (1.0, 100.0)).unwrap();
        assert_ne!(a, c);

        let vs2 = ParamSpec::Ftl {
            nlayers: 5,
            thickness: 2.0,
            par_min: 100.0,
            par_max: 200.0,
            par_rev: false,
        };
        let d = Parameterization::from_min_max(vp, pr, vs2, rh, (1.0, 100.0)).unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn test_new_from_parameters() {
        let vp = Parameter::from_depths(
            vec![1.0, 5.0],
            vec![3.0, 16.0],
            vec![200.0, 400.0],
            vec![400.0, 600.0],
            vec![true, false],
        )
        .unwrap();
        let pr = Parameter::from_depths(
            vec![0.0],
            vec![100.0],
            vec![0.2],
            vec![0.5],
            vec![false],
        )
        .unwrap();
        let vs = Parameter::from_depths(
            vec![1.0, 2.0],
            vec![2.0, 3.0],
            vec![100.0, 200.0],
            vec![200.0, 300.0],
            vec![true, false],
        )
        .unwrap();
        let rh = Parameter::from_depths(
            vec![0.0],
            vec![100.0],
            vec![2000.0],
            vec![2000.0],
            vec![false],
        )
        .unwrap();
        let param = Parameterization::new(vp.clone(), pr, vs, rh);
        assert_eq!(param.vp, vp);
    }
}
