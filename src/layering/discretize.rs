//! Layering strategies: declarative scalars to per-layer bound arrays.
//!
//! Each strategy turns a wavelength range and a handful of scalars into
//! ordered per-layer minimum/maximum bounds. Depth-based strategies
//! (`by_number_depth`, `layering_ratio`) produce cumulative depth bounds;
//! thickness-based strategies (`fixed_thickness`, `by_number_thickness`)
//! produce per-layer thickness bounds.
//!
//! The wavelength scaling follows the usual depth-of-sensitivity
//! heuristics: a surface wave of wavelength w constrains the profile from
//! roughly w/3 (quarter-wavelength rule) down to w/2.
//!
//! # Example
//!
//! ```
//! use swipp_rs::layering::layering_ratio;
//!
//! let bounds = layering_ratio(1.0, 100.0, 2.0, 2.0).unwrap();
//! assert_eq!(bounds.nlayers(), 8);
//! // The terminal half-space reaches one unit past the deepest boundary.
//! assert_eq!(*bounds.lay_max.last().unwrap(), 51.0);
//! ```

use super::validate::{
    check_depth_factor, check_increasing_factor, check_nlayers, check_positive, check_ratio,
    check_wavelengths, LayeringError,
};

/// Depth factor used when a strategy does not take one explicitly.
pub const DEFAULT_DEPTH_FACTOR: f64 = 2.0;

/// Ordered per-layer lower/upper bounds on depth or thickness.
///
/// `lay_min` and `lay_max` always share one length and satisfy
/// `lay_min[i] <= lay_max[i]` for every layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerBounds {
    /// Lower bound on each layer's depth or thickness.
    pub lay_min: Vec<f64>,
    /// Upper bound on each layer's depth or thickness.
    pub lay_max: Vec<f64>,
}

impl LayerBounds {
    /// Number of layers.
    pub fn nlayers(&self) -> usize {
        self.lay_min.len()
    }
}

/// Fixed-thickness layering: every layer has identical, exactly-known
/// thickness, so `lay_min == lay_max == [thickness; nlayers]`.
pub fn fixed_thickness(nlayers: usize, thickness: f64) -> Result<LayerBounds, LayeringError> {
    let nlayers = check_nlayers(nlayers)?;
    let thickness = check_positive("thickness", thickness)?;
    Ok(LayerBounds {
        lay_min: vec![thickness; nlayers],
        lay_max: vec![thickness; nlayers],
    })
}

/// Layering by number, thickness form: the explored thickness range
/// `[wmin/3, wmax/(2*nlayers)]` is shared by all layers.
pub fn by_number_thickness(
    wmin: f64,
    wmax: f64,
    nlayers: usize,
) -> Result<LayerBounds, LayeringError> {
    let (wmin, wmax) = check_wavelengths(wmin, wmax)?;
    let nlayers = check_nlayers(nlayers)?;
    Ok(LayerBounds {
        lay_min: vec![wmin / 3.0; nlayers],
        lay_max: vec![wmax / (2.0 * nlayers as f64); nlayers],
    })
}

/// Layering by number, increasing thickness form: like
/// [`by_number_thickness`], but each layer's maximum thickness grows
/// geometrically, `lay_max[i] = factor^i * wmax/(2*nlayers)`, so deeper
/// layers may span more of the profile.
pub fn by_number_thickness_increasing(
    wmin: f64,
    wmax: f64,
    nlayers: usize,
    increasing_factor: f64,
) -> Result<LayerBounds, LayeringError> {
    let (wmin, wmax) = check_wavelengths(wmin, wmax)?;
    let nlayers = check_nlayers(nlayers)?;
    let factor = check_increasing_factor(increasing_factor)?;
    let base = wmax / (2.0 * nlayers as f64);
    let lay_max = (0..nlayers).map(|i| base * factor.powi(i as i32)).collect();
    Ok(LayerBounds {
        lay_min: vec![wmin / 3.0; nlayers],
        lay_max,
    })
}

/// Layering by number, depth form: the minimum depth grows linearly with
/// layer index, `lay_min[i] = (i+1)*wmin/3`, while every layer's maximum
/// depth is anchored at `wmax/depth_factor`.
pub fn by_number_depth(
    wmin: f64,
    wmax: f64,
    nlayers: usize,
    depth_factor: f64,
) -> Result<LayerBounds, LayeringError> {
    let (wmin, wmax) = check_wavelengths(wmin, wmax)?;
    let nlayers = check_nlayers(nlayers)?;
    let depth_factor = check_depth_factor(depth_factor)?;
    let lay_min = (1..=nlayers).map(|i| i as f64 * wmin / 3.0).collect();
    let lay_max = vec![wmax / depth_factor; nlayers];
    Ok(LayerBounds { lay_min, lay_max })
}

/// Layering-ratio discretization: geometrically growing depth boundaries
/// with a terminal half-space.
///
/// Boundaries start at `wmin/3` and `wmin/2`; each subsequent increment
/// grows by the factor `lr`, so boundary k+1 sits at
/// `b[k] + (wmin/2)*lr^k`. Growth stops once a boundary reaches
/// `dmax = wmax/depth_factor`; that boundary is capped at `dmax`. If
/// capping leaves a bottom layer thinner than the layer above it, the two
/// are merged. A half-space layer `[dmax, dmax + 1]` closes the profile.
///
/// The depth factor must be positive and must leave `dmax` deeper than
/// the first boundary `wmin/3`, otherwise no ordered profile exists.
///
/// This is the only strategy whose layer count is derived rather than
/// supplied.
pub fn layering_ratio(
    wmin: f64,
    wmax: f64,
    lr: f64,
    depth_factor: f64,
) -> Result<LayerBounds, LayeringError> {
    let (wmin, wmax) = check_wavelengths(wmin, wmax)?;
    let lr = check_ratio(lr)?;
    let depth_factor = check_depth_factor(depth_factor)?;

    let dmax = wmax / depth_factor;
    if dmax <= wmin / 3.0 {
        return Err(LayeringError::DepthRangeTooShallow {
            dmax,
            first: wmin / 3.0,
        });
    }
    let mut boundaries = vec![wmin / 3.0, wmin / 2.0];
    let mut step = wmin / 2.0;
    let mut last = wmin / 2.0;
    while last < dmax {
        step *= lr;
        last += step;
        boundaries.push(last);
    }

    let n = boundaries.len();
    boundaries[n - 1] = dmax;
    // Merge a capped bottom layer thinner than the layer above it.
    if n >= 3 && boundaries[n - 1] - boundaries[n - 2] < boundaries[n - 2] - boundaries[n - 3] {
        boundaries.remove(n - 2);
    }

    let mut lay_min: Vec<f64> = boundaries[..boundaries.len() - 1].to_vec();
    let mut lay_max: Vec<f64> = boundaries[1..].to_vec();
    lay_min.push(dmax);
    lay_max.push(dmax + 1.0);
    Ok(LayerBounds { lay_min, lay_max })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Heuristic boundary values, per the reference sequences.
    const TOL: f64 = 0.051;

    fn assert_seq_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "length mismatch: {:?} vs {:?}",
            actual,
            expected
        );
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a - e).abs() < TOL,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_fixed_thickness() {
        let bounds = fixed_thickness(5, 2.0).unwrap();
        assert_eq!(bounds.lay_min, vec![2.0; 5]);
        assert_eq!(bounds.lay_max, vec![2.0; 5]);
    }

    #[test]
    fn test_fixed_thickness_rejects_bad_input() {
        assert!(fixed_thickness(0, 2.0).is_err());
        assert!(fixed_thickness(5, 0.0).is_err());
        assert!(fixed_thickness(5, -1.0).is_err());
        assert!(fixed_thickness(5, f64::NAN).is_err());
    }

    #[test]
    fn test_by_number_thickness() {
        let bounds = by_number_thickness(1.0, 100.0, 3).unwrap();
        assert_eq!(bounds.lay_min, vec![1.0 / 3.0; 3]);
        assert_eq!(bounds.lay_max, vec![100.0 / 6.0; 3]);
    }

    #[test]
    fn test_by_number_thickness_rejects_zero_layers() {
        assert!(matches!(
            by_number_thickness(1.0, 100.0, 0),
            Err(LayeringError::ZeroLayerCount)
        ));
    }

    #[test]
    fn test_by_number_depth() {
        let bounds = by_number_depth(1.0, 100.0, 5, 2.0).unwrap();
        assert_seq_close(
            &bounds.lay_min,
            &[1.0 / 3.0, 2.0 / 3.0, 1.0, 4.0 / 3.0, 5.0 / 3.0],
        );
        assert_eq!(bounds.lay_max, vec![50.0; 5]);
    }

    #[test]
    fn test_by_number_depth_reordered_wavelengths() {
        let forward = by_number_depth(1.0, 100.0, 5, 2.0).unwrap();
        let reversed = by_number_depth(100.0, 1.0, 5, 2.0).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_layering_ratio_rejects_bad_ratio() {
        for bad in [-1.0, 0.0, 0.5, 0.9, 1.0] {
            assert!(layering_ratio(1.0, 100.0, bad, 2.0).is_err());
        }
        assert!(layering_ratio(1.0, 100.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_layering_ratio_reference_sequences() {
        let known: [(f64, &[f64], &[f64]); 5] = [
            (
                1.4,
                &[0.3, 0.5, 1.2, 2.2, 3.6, 5.5, 8.2, 11.9, 17.2, 24.6, 34.9, 50.0],
                &[0.5, 1.2, 2.2, 3.6, 5.5, 8.2, 11.9, 17.2, 24.6, 34.9, 50.0, 51.0],
            ),
            (
                1.5,
                &[0.3, 0.5, 1.3, 2.4, 4.1, 6.6, 10.4, 16.1, 24.6, 50.0],
                &[0.5, 1.3, 2.4, 4.1, 6.6, 10.4, 16.1, 24.6, 50.0, 51.0],
            ),
            (
                2.0,
                &[0.3, 0.5, 1.5, 3.5, 7.5, 15.5, 31.5, 50.0],
                &[0.5, 1.5, 3.5, 7.5, 15.5, 31.5, 50.0, 51.0],
            ),
            (
                3.0,
                &[0.3, 0.5, 2.0, 6.5, 20.0, 50.0],
                &[0.5, 2.0, 6.5, 20.0, 50.0, 51.0],
            ),
            (
                5.0,
                &[0.3, 0.5, 3.0, 15.5, 50.0],
                &[0.5, 3.0, 15.5, 50.0, 51.0],
            ),
        ];
        for (lr, expected_min, expected_max) in known {
            let bounds = layering_ratio(1.0, 100.0, lr, 2.0).unwrap();
            assert_seq_close(&bounds.lay_min, expected_min);
            assert_seq_close(&bounds.lay_max, expected_max);
        }
    }

    #[test]
    fn test_layering_ratio_halfspace_closes_one_past_dmax() {
        for lr in [1.2, 1.4, 2.0, 3.0, 5.0, 10.0] {
            let bounds = layering_ratio(2.0, 80.0, lr, 2.0).unwrap();
            assert_eq!(*bounds.lay_min.last().unwrap(), 40.0);
            assert_eq!(*bounds.lay_max.last().unwrap(), 41.0);
        }
    }

    #[test]
    fn test_layering_ratio_bounds_are_ordered() {
        for lr in [1.1, 1.4, 2.0, 5.0] {
            let bounds = layering_ratio(1.0, 100.0, lr, 2.0).unwrap();
            assert_eq!(bounds.lay_min.len(), bounds.lay_max.len());
            for (lo, hi) in bounds.lay_min.iter().zip(&bounds.lay_max) {
                assert!(lo < hi, "lr={}: {:?}", lr, bounds);
            }
            // Successive layers share their boundaries.
            for i in 1..bounds.nlayers() {
                assert_eq!(bounds.lay_min[i], bounds.lay_max[i - 1]);
            }
        }
    }

    #[test]
    fn test_layering_ratio_shallow_range() {
        // dmax below the second starting boundary still yields a valid
        // two-layer profile ending in the half-space.
        let bounds = layering_ratio(10.0, 12.0, 2.0, 2.0).unwrap();
        assert_eq!(bounds.nlayers(), 2);
        assert_eq!(*bounds.lay_max.last().unwrap(), 7.0);
    }

    #[test]
    fn test_layering_ratio_rejects_range_above_first_boundary() {
        // dmax = 2 sits above the first boundary at wmin/3 = 3.33, so no
        // ordered profile exists.
        assert!(matches!(
            layering_ratio(10.0, 12.0, 2.0, 6.0),
            Err(LayeringError::DepthRangeTooShallow { .. })
        ));
    }

    #[test]
    fn test_layering_ratio_rejects_non_positive_depth_factor() {
        for bad in [0.0, -2.0] {
            assert!(matches!(
                layering_ratio(1.0, 100.0, 2.0, bad),
                Err(LayeringError::NonPositive { .. })
            ));
        }
    }

    #[test]
    fn test_layering_ratio_bounds_are_finite() {
        for lr in [1.05, 2.0] {
            for depth_factor in [0.1, 2.0, 100.0] {
                if let Ok(bounds) = layering_ratio(1.0, 100.0, lr, depth_factor) {
                    for (lo, hi) in bounds.lay_min.iter().zip(&bounds.lay_max) {
                        assert!(lo.is_finite() && hi.is_finite());
                        assert!(lo <= hi);
                    }
                }
            }
        }
    }

    #[test]
    fn test_by_number_thickness_increasing() {
        let bounds = by_number_thickness_increasing(1.0, 100.0, 3, 2.0).unwrap();
        assert_eq!(bounds.lay_min, vec![1.0 / 3.0; 3]);
        let base = 100.0 / 6.0;
        assert_eq!(bounds.lay_max, vec![base, base * 2.0, base * 4.0]);
    }

    #[test]
    fn test_by_number_thickness_increasing_rejects_bad_factor() {
        for bad in [-1.0, 0.0, 1.0] {
            assert!(matches!(
                by_number_thickness_increasing(1.0, 100.0, 3, bad),
                Err(LayeringError::FactorNotGrowing(_))
            ));
        }
        assert!(by_number_thickness_increasing(1.0, 100.0, 3, f64::NAN).is_err());
        assert!(by_number_thickness_increasing(1.0, 100.0, 0, 1.5).is_err());
    }
}
