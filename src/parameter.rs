//! One physical quantity's per-layer search-space specification.
//!
//! A [`Parameter`] binds a layering strategy's resolved bounds to the
//! physical value range searched in each layer, plus a per-layer reversal
//! flag that permits velocity inversions (a value non-monotonic relative
//! to the layer above).
//!
//! One constructor exists per layering strategy; each delegates scalar
//! validation to [`crate::layering`] and broadcasts scalar value bounds
//! across the generated (or, for the layering-ratio strategy, derived)
//! layer count.
//!
//! # Example
//!
//! ```
//! use swipp_rs::parameter::Parameter;
//!
//! // Shear-wave velocity between 100 and 350 m/s across a
//! // layering-ratio profile, reversals permitted.
//! let vs = Parameter::from_lr(1.0, 100.0, 3.0, 2.0, 100.0, 350.0, true).unwrap();
//! assert_eq!(vs.nlayers(), 6);
//! assert_eq!(vs.par_min(), &[100.0; 6]);
//! ```

use std::fmt;

use thiserror::Error;

use crate::layering::{
    by_number_depth, by_number_thickness, by_number_thickness_increasing, check_positive,
    fixed_thickness, layering_ratio, LayerBounds, LayeringError,
};

/// Error type for parameter construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// A layering input failed validation.
    #[error(transparent)]
    Layering(#[from] LayeringError),

    /// Explicitly supplied layer arrays disagree on length.
    #[error(
        "layer arrays must share one length, got lay_min={lay_min}, lay_max={lay_max}, \
         par_min={par_min}, par_max={par_max}, par_rev={par_rev}"
    )]
    LengthMismatch {
        lay_min: usize,
        lay_max: usize,
        par_min: usize,
        par_max: usize,
        par_rev: usize,
    },

    /// Explicitly supplied layer arrays are empty.
    #[error("at least one layer is required")]
    Empty,

    /// A strategy tag not known to this crate.
    #[error("unsupported parameter type tag: {0}")]
    UnsupportedTag(String),
}

/// Layering-strategy tag carried by a [`Parameter`].
///
/// The string forms are the tags the external inversion tool expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParType {
    /// Fixed value, constant with depth.
    Fx,
    /// Fixed-thickness layers.
    Ftl,
    /// Layering by number, thickness form.
    Ln,
    /// Layering by number, depth form (increasing minimum depth).
    Lni,
    /// Layering ratio (geometric growth, derived layer count).
    Lr,
    /// Custom depth-based layering.
    Cd,
    /// Custom thickness-based layering.
    Ct,
}

impl ParType {
    /// The consumer's string tag for this strategy.
    pub fn tag(self) -> &'static str {
        match self {
            ParType::Fx => "FX",
            ParType::Ftl => "FTL",
            ParType::Ln => "LN",
            ParType::Lni => "LNI",
            ParType::Lr => "LR",
            ParType::Cd => "CD",
            ParType::Ct => "CT",
        }
    }

    /// Parse a strategy tag. Unknown tags are an unsupported operation.
    pub fn from_tag(tag: &str) -> Result<Self, ParameterError> {
        match tag {
            "FX" => Ok(ParType::Fx),
            "FTL" => Ok(ParType::Ftl),
            "LN" => Ok(ParType::Ln),
            "LNI" => Ok(ParType::Lni),
            "LR" => Ok(ParType::Lr),
            "CD" => Ok(ParType::Cd),
            "CT" => Ok(ParType::Ct),
            other => Err(ParameterError::UnsupportedTag(other.to_string())),
        }
    }

    /// Whether this strategy's layer bounds are cumulative depths
    /// (as opposed to per-layer thicknesses).
    pub fn is_depth(self) -> bool {
        matches!(self, ParType::Lni | ParType::Lr | ParType::Cd)
    }
}

impl fmt::Display for ParType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One physical quantity's full per-layer bound specification.
///
/// The five per-layer vectors share one length (zero for a fixed-value
/// parameter, whose value bounds collapse to `[value]`), with
/// `lay_min[i] <= lay_max[i]` and `par_min[i] <= par_max[i]` for every
/// layer. Instances are immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    par_type: ParType,
    lay_min: Vec<f64>,
    lay_max: Vec<f64>,
    par_min: Vec<f64>,
    par_max: Vec<f64>,
    par_rev: Vec<bool>,
    par_value: Option<f64>,
    par_add_value: Option<f64>,
}

impl Parameter {
    /// Fixed-value parameter: one constant value with depth, no layer
    /// bounds (used e.g. for density).
    pub fn from_fx(value: f64) -> Result<Self, ParameterError> {
        let value = check_positive("value", value)?;
        Ok(Self {
            par_type: ParType::Fx,
            lay_min: Vec::new(),
            lay_max: Vec::new(),
            par_min: vec![value],
            par_max: vec![value],
            par_rev: vec![false],
            par_value: Some(value),
            par_add_value: None,
        })
    }

    /// Fixed-thickness layers: `nlayers` layers of exactly `thickness`.
    pub fn from_ftl(
        nlayers: usize,
        thickness: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Result<Self, ParameterError> {
        let bounds = fixed_thickness(nlayers, thickness)?;
        let mut par = Self::broadcast(ParType::Ftl, bounds, par_min, par_max, par_rev);
        par.par_add_value = Some(thickness);
        Ok(par)
    }

    /// Layering by number, thickness form.
    pub fn from_ln_thickness(
        wmin: f64,
        wmax: f64,
        nlayers: usize,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Result<Self, ParameterError> {
        let bounds = by_number_thickness(wmin, wmax, nlayers)?;
        Ok(Self::broadcast(ParType::Ln, bounds, par_min, par_max, par_rev))
    }

    /// Layering by number, increasing thickness form: successive layers'
    /// maximum thickness grows by `increasing_factor`. The factor is kept
    /// on the parameter for serialization.
    pub fn from_ln_thickness_increasing(
        wmin: f64,
        wmax: f64,
        nlayers: usize,
        increasing_factor: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Result<Self, ParameterError> {
        let bounds = by_number_thickness_increasing(wmin, wmax, nlayers, increasing_factor)?;
        let mut par = Self::broadcast(ParType::Ln, bounds, par_min, par_max, par_rev);
        par.par_add_value = Some(increasing_factor);
        Ok(par)
    }

    /// Layering by number, depth form: minimum depth increases with layer
    /// index, maximum depth is anchored at `wmax/depth_factor`.
    pub fn from_ln_depth(
        wmin: f64,
        wmax: f64,
        nlayers: usize,
        depth_factor: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Result<Self, ParameterError> {
        let bounds = by_number_depth(wmin, wmax, nlayers, depth_factor)?;
        Ok(Self::broadcast(ParType::Lni, bounds, par_min, par_max, par_rev))
    }

    /// Layering-ratio parameter. The layer count is derived from the
    /// geometric boundary growth; the scalar value bounds and reversal
    /// flag broadcast across that derived count.
    pub fn from_lr(
        wmin: f64,
        wmax: f64,
        lr: f64,
        depth_factor: f64,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Result<Self, ParameterError> {
        let bounds = layering_ratio(wmin, wmax, lr, depth_factor)?;
        Ok(Self::broadcast(ParType::Lr, bounds, par_min, par_max, par_rev))
    }

    /// Custom depth-based layering from pre-built arrays.
    pub fn from_depths(
        lay_min: Vec<f64>,
        lay_max: Vec<f64>,
        par_min: Vec<f64>,
        par_max: Vec<f64>,
        par_rev: Vec<bool>,
    ) -> Result<Self, ParameterError> {
        Self::from_arrays(ParType::Cd, lay_min, lay_max, par_min, par_max, par_rev)
    }

    /// Custom thickness-based layering from pre-built arrays.
    pub fn from_thicknesses(
        lay_min: Vec<f64>,
        lay_max: Vec<f64>,
        par_min: Vec<f64>,
        par_max: Vec<f64>,
        par_rev: Vec<bool>,
    ) -> Result<Self, ParameterError> {
        Self::from_arrays(ParType::Ct, lay_min, lay_max, par_min, par_max, par_rev)
    }

    /// Generic constructor over pre-built arrays. Each min/max pair is
    /// reordered if supplied reversed; mismatched lengths fail.
    fn from_arrays(
        par_type: ParType,
        mut lay_min: Vec<f64>,
        mut lay_max: Vec<f64>,
        mut par_min: Vec<f64>,
        mut par_max: Vec<f64>,
        par_rev: Vec<bool>,
    ) -> Result<Self, ParameterError> {
        let n = lay_min.len();
        if lay_max.len() != n || par_min.len() != n || par_max.len() != n || par_rev.len() != n {
            return Err(ParameterError::LengthMismatch {
                lay_min: n,
                lay_max: lay_max.len(),
                par_min: par_min.len(),
                par_max: par_max.len(),
                par_rev: par_rev.len(),
            });
        }
        if n == 0 {
            return Err(ParameterError::Empty);
        }
        reorder_pairs(&mut lay_min, &mut lay_max);
        reorder_pairs(&mut par_min, &mut par_max);
        Ok(Self {
            par_type,
            lay_min,
            lay_max,
            par_min,
            par_max,
            par_rev,
            par_value: None,
            par_add_value: None,
        })
    }

    /// Broadcast scalar value bounds and a reversal flag across the layer
    /// count resolved by a layering strategy.
    fn broadcast(
        par_type: ParType,
        bounds: LayerBounds,
        par_min: f64,
        par_max: f64,
        par_rev: bool,
    ) -> Self {
        let n = bounds.nlayers();
        let (lo, hi) = if par_min <= par_max {
            (par_min, par_max)
        } else {
            (par_max, par_min)
        };
        Self {
            par_type,
            lay_min: bounds.lay_min,
            lay_max: bounds.lay_max,
            par_min: vec![lo; n],
            par_max: vec![hi; n],
            par_rev: vec![par_rev; n],
            par_value: None,
            par_add_value: None,
        }
    }

    /// Strategy tag.
    pub fn par_type(&self) -> ParType {
        self.par_type
    }

    /// Lower bound on each layer's depth or thickness.
    pub fn lay_min(&self) -> &[f64] {
        &self.lay_min
    }

    /// Upper bound on each layer's depth or thickness.
    pub fn lay_max(&self) -> &[f64] {
        &self.lay_max
    }

    /// Lower bound on the physical value in each layer.
    pub fn par_min(&self) -> &[f64] {
        &self.par_min
    }

    /// Upper bound on the physical value in each layer.
    pub fn par_max(&self) -> &[f64] {
        &self.par_max
    }

    /// Whether each layer's value may reverse relative to the layer above.
    pub fn par_rev(&self) -> &[bool] {
        &self.par_rev
    }

    /// Fixed physical value (fixed-value parameters only).
    pub fn par_value(&self) -> Option<f64> {
        self.par_value
    }

    /// Fixed layer thickness (fixed-thickness parameters only).
    pub fn par_add_value(&self) -> Option<f64> {
        self.par_add_value
    }

    /// Number of layers.
    pub fn nlayers(&self) -> usize {
        self.lay_min.len()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.par_value {
            Some(value) => write!(f, "{} parameter fixed at {}", self.par_type, value),
            None => write!(f, "{} parameter with {} layers", self.par_type, self.nlayers()),
        }
    }
}

/// Swap any pair given in descending order.
fn reorder_pairs(lo: &mut [f64], hi: &mut [f64]) {
    for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
        if *a > *b {
            std::mem::swap(a, b);
        }
    }
}
