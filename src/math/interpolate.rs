use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// How grid coordinates outside the sampled axis range are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Extend the nearest edge segment linearly past the last node
    #[default]
    Extrapolate,
    /// Hold the edge node value
    Clamp,
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extrapolate" => Ok(BoundaryPolicy::Extrapolate),
            "clamp" => Ok(BoundaryPolicy::Clamp),
            other => Err(format!("Unknown boundary policy: {}", other)),
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Extrapolate => write!(f, "extrapolate"),
            BoundaryPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

/// Generic linear interpolation between two values
pub fn lin_interp<T: Float>(v0: T, v1: T, fac: T) -> T {
    v0 + (v1 - v0) * fac
}

/// Arithmetic mean of two values.
///
/// Unlike `lin_interp(a, b, 0.5)` this is exactly symmetric in its arguments.
pub fn midpoint<T: Float>(a: T, b: T) -> T {
    (a + b) / (T::one() + T::one())
}

/// Generic bilinear interpolation.
/// `f10` is the corner one step along x, `f01` one step along y.
pub fn bilin_interp<T: Float>(f00: T, f01: T, f10: T, f11: T, fac_x: T, fac_y: T) -> T {
    let f_y0 = lin_interp(f00, f10, fac_x);
    let f_y1 = lin_interp(f01, f11, fac_x);
    lin_interp(f_y0, f_y1, fac_y)
}

/// Find the bracketing node indices and weight for `target` on a strictly
/// increasing axis.
///
/// Returns `(lower, upper, weight)` such that the interpolated value is
/// `lin_interp(v[lower], v[upper], weight)`. A target that sits exactly on a
/// node yields that node with weight 0, so interpolation is exact there.
/// Single-node axes always yield `(0, 0, 0.0)`. Outside the axis range the
/// result depends on `policy`: `Clamp` pins to the edge node, `Extrapolate`
/// reuses the edge segment with a weight below 0 or above 1.
///
/// `coords` must not be empty.
pub fn find_grid_indices(coords: &[f64], target: f64, policy: BoundaryPolicy) -> (usize, usize, f64) {
    if coords.len() < 2 {
        return (0, 0, 0.0);
    }
    let last = coords.len() - 1;

    // Number of nodes at or below the target
    let upper = coords.partition_point(|&c| c <= target);

    if upper == 0 {
        return match policy {
            BoundaryPolicy::Clamp => (0, 0, 0.0),
            BoundaryPolicy::Extrapolate => (0, 1, segment_weight(coords[0], coords[1], target)),
        };
    }

    if upper > last {
        if target == coords[last] {
            return (last, last, 0.0);
        }
        return match policy {
            BoundaryPolicy::Clamp => (last, last, 0.0),
            BoundaryPolicy::Extrapolate => (
                last - 1,
                last,
                segment_weight(coords[last - 1], coords[last], target),
            ),
        };
    }

    let lower = upper - 1;
    (lower, upper, segment_weight(coords[lower], coords[upper], target))
}

fn segment_weight(x0: f64, x1: f64, x: f64) -> f64 {
    let dx = x1 - x0;
    if dx.abs() < f64::EPSILON {
        return 0.0;
    }
    (x - x0) / dx
}
