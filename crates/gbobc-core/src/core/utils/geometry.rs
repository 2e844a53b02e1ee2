use nalgebra::{Point3, Vector3};

/// Displacement between two atoms as consumed by the pairwise loops.
///
/// `delta` points from the first atom to the second (`b - a`), so a force
/// contribution `k * delta` on the first atom pulls it towards the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaR {
    pub delta: Vector3<f64>,
    pub r: f64,
    pub r2: f64,
}

impl DeltaR {
    #[inline]
    fn from_delta(delta: Vector3<f64>) -> Self {
        let r2 = delta.norm_squared();
        Self {
            delta,
            r: r2.sqrt(),
            r2,
        }
    }
}

#[inline]
pub fn delta_r(a: &Point3<f64>, b: &Point3<f64>) -> DeltaR {
    DeltaR::from_delta(b - a)
}

/// Minimum-image displacement in an orthorhombic box with edge lengths `box_size`.
#[inline]
pub fn delta_r_periodic(a: &Point3<f64>, b: &Point3<f64>, box_size: &Vector3<f64>) -> DeltaR {
    let raw = b - a;
    let wrapped = raw.zip_map(box_size, |d, edge| d - edge * (d / edge).round());
    DeltaR::from_delta(wrapped)
}
