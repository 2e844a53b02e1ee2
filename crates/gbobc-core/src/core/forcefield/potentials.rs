/// Inverse HCT integration bounds `(l_ij, u_ij)` for the descreening of atom i by atom j.
///
/// Returns `None` when atom i's offset sphere already encloses the whole scaled
/// sphere of atom j, in which case j contributes nothing.
#[inline]
pub fn hct_inverse_bounds(
    offset_radius_i: f64,
    r: f64,
    scaled_radius_j: f64,
) -> Option<(f64, f64)> {
    let r_scaled_radius_j = r + scaled_radius_j;
    if offset_radius_i >= r_scaled_radius_j {
        return None;
    }
    let lower = if offset_radius_i > (r - scaled_radius_j).abs() {
        offset_radius_i
    } else {
        (r - scaled_radius_j).abs()
    };
    Some((1.0 / lower, 1.0 / r_scaled_radius_j))
}

/// Summand of the HCT descreening sum, before the factor one half.
///
/// Includes the correction for atom i lying entirely inside the scaled sphere of atom j,
/// which the closed form of the HCT integral does not cover.
#[inline]
pub fn hct_descreening(offset_radius_i: f64, r: f64, scaled_radius_j: f64) -> f64 {
    let Some((l_ij, u_ij)) = hct_inverse_bounds(offset_radius_i, r, scaled_radius_j) else {
        return 0.0;
    };
    let r_inverse = 1.0 / r;
    let l_ij2 = l_ij * l_ij;
    let u_ij2 = u_ij * u_ij;
    let ratio = (u_ij / l_ij).ln();

    let mut term = l_ij - u_ij
        + 0.25 * r * (u_ij2 - l_ij2)
        + 0.5 * r_inverse * ratio
        + 0.25 * scaled_radius_j * scaled_radius_j * r_inverse * (l_ij2 - u_ij2);

    if offset_radius_i < scaled_radius_j - r {
        term += 2.0 * (1.0 / offset_radius_i - l_ij);
    }
    term
}

/// Negative r-derivative of the halved HCT summand, i.e. `-dI_i/dr_ij`.
///
/// The bounds contribute nothing to the derivative, so only the bracket in `r` remains.
#[inline]
pub fn hct_descreening_derivative(r: f64, scaled_radius_j: f64, l_ij: f64, u_ij: f64) -> f64 {
    let r2_inverse = 1.0 / (r * r);
    0.125 * (1.0 + scaled_radius_j * scaled_radius_j * r2_inverse) * (l_ij * l_ij - u_ij * u_ij)
        + 0.25 * (u_ij / l_ij).ln() * r2_inverse
}

/// OBC remapping of the burial measure `psi` into a Born radius.
///
/// Returns the Born radius together with the chain factor that converts
/// `dE/dB * B^2` into `dE/dI`.
#[inline]
pub fn obc_born_radius(
    radius: f64,
    offset_radius: f64,
    psi: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> (f64, f64) {
    let psi2 = psi * psi;
    let psi3 = psi * psi2;
    let tanh_sum = (alpha * psi - beta * psi2 + gamma * psi3).tanh();

    let born_radius = 1.0 / (1.0 / offset_radius - tanh_sum / radius);

    let chain = offset_radius * (alpha - 2.0 * beta * psi + 3.0 * gamma * psi2);
    let chain = (1.0 - tanh_sum * tanh_sum) * chain / radius;

    (born_radius, chain)
}

/// ACE surface-area term with the ratio of atomic to Born radius raised to the sixth power.
#[inline]
pub fn ace_surface_term(
    radius: f64,
    born_radius: f64,
    probe_radius: f64,
    surface_area_factor: f64,
) -> f64 {
    let r = radius + probe_radius;
    let ratio6 = (radius / born_radius).powi(6);
    surface_area_factor * r * r * ratio6
}

/// Still pair kernel and its partial derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbPair {
    pub energy: f64,
    /// `(1/r) dG/dr`, ready to scale the displacement vector.
    pub d_dr: f64,
    /// `dG/d(B_i B_j)`.
    pub d_dalpha2: f64,
}

#[inline]
pub fn gb_pair_energy(charge_product: f64, r2: f64, alpha2: f64) -> f64 {
    let d_ij = r2 / (4.0 * alpha2);
    let denominator = (r2 + alpha2 * (-d_ij).exp()).sqrt();
    charge_product / denominator
}

#[inline]
pub fn gb_pair(charge_product: f64, r2: f64, alpha2: f64) -> GbPair {
    let d_ij = r2 / (4.0 * alpha2);
    let exp_term = (-d_ij).exp();
    let denominator2 = r2 + alpha2 * exp_term;
    let denominator = denominator2.sqrt();

    let g_pol = charge_product / denominator;
    GbPair {
        energy: g_pol,
        d_dr: -g_pol * (1.0 - 0.25 * exp_term) / denominator2,
        d_dalpha2: -0.5 * g_pol * exp_term * (1.0 + d_ij) / denominator2,
    }
}
