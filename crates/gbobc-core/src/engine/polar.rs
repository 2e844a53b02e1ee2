use crate::core::forcefield::params::ObcParameters;
use crate::core::forcefield::potentials::{
    gb_pair, gb_pair_energy, hct_descreening_derivative, hct_inverse_bounds,
};
use crate::engine::error::{SolvationError, check_len};
use nalgebra::{Point3, Vector3};
use tracing::instrument;

fn check_pair_inputs(
    params: &ObcParameters,
    coordinates: &[Point3<f64>],
    charges: &[f64],
    born_radii: &[f64],
) -> Result<(), SolvationError> {
    let num_atoms = params.num_atoms();
    check_len("coordinates", num_atoms, coordinates.len())?;
    check_len("partial charges", num_atoms, charges.len())?;
    check_len("Born radii", num_atoms, born_radii.len())
}

/// Still pair sum over `i <= j` without any derivative bookkeeping.
///
/// Returns the polar energy scaled by the model strength.
#[instrument(skip_all, name = "gb_polar_energy")]
pub fn energy(
    params: &ObcParameters,
    coordinates: &[Point3<f64>],
    charges: &[f64],
    born_radii: &[f64],
) -> Result<f64, SolvationError> {
    check_pair_inputs(params, coordinates, charges, born_radii)?;

    let config = params.config();
    let strength = config.strength;
    let pre_factor = config.electrostatic_prefactor();
    let num_atoms = params.num_atoms();

    let mut polar = 0.0;
    for atom_i in 0..num_atoms {
        let partial_charge_i = pre_factor * charges[atom_i];
        for atom_j in atom_i..num_atoms {
            let d = params.delta_r(&coordinates[atom_i], &coordinates[atom_j]);
            if params.beyond_cutoff(d.r) {
                continue;
            }

            let charge_product = partial_charge_i * charges[atom_j];
            let alpha2_ij = born_radii[atom_i] * born_radii[atom_j];
            let mut energy = gb_pair_energy(charge_product, d.r2, alpha2_ij);

            if atom_i != atom_j {
                if let Some(cutoff) = config.cutoff {
                    energy -= charge_product / cutoff;
                }
            } else {
                energy *= 0.5;
            }
            polar += strength * energy;
        }
    }
    Ok(polar)
}

/// First pass of the force evaluation.
///
/// Adds the explicit distance dependence of every pair to `forces` and the
/// derivative of the energy with respect to each Born radius to `born_forces`.
/// Returns the polar energy, with the model strength folded into the prefactor.
#[instrument(skip_all, name = "gb_polar_first_pass")]
pub fn energy_and_forces(
    params: &ObcParameters,
    coordinates: &[Point3<f64>],
    charges: &[f64],
    born_radii: &[f64],
    born_forces: &mut [f64],
    forces: &mut [Vector3<f64>],
) -> Result<f64, SolvationError> {
    check_pair_inputs(params, coordinates, charges, born_radii)?;
    let num_atoms = params.num_atoms();
    check_len("Born force entries", num_atoms, born_forces.len())?;
    check_len("forces", num_atoms, forces.len())?;

    let config = params.config();
    let pre_factor = config.electrostatic_prefactor() * config.strength;

    let mut polar = 0.0;
    for atom_i in 0..num_atoms {
        let partial_charge_i = pre_factor * charges[atom_i];
        for atom_j in atom_i..num_atoms {
            let d = params.delta_r(&coordinates[atom_i], &coordinates[atom_j]);
            if params.beyond_cutoff(d.r) {
                continue;
            }

            let charge_product = partial_charge_i * charges[atom_j];
            let alpha2_ij = born_radii[atom_i] * born_radii[atom_j];
            let pair = gb_pair(charge_product, d.r2, alpha2_ij);

            let mut energy = pair.energy;
            if atom_i != atom_j {
                if let Some(cutoff) = config.cutoff {
                    energy -= charge_product / cutoff;
                }

                born_forces[atom_j] += pair.d_dalpha2 * born_radii[atom_i];

                let f = d.delta * pair.d_dr;
                forces[atom_i] += f;
                forces[atom_j] -= f;
            } else {
                energy *= 0.5;
            }

            polar += energy;
            born_forces[atom_i] += pair.d_dalpha2 * born_radii[atom_j];
        }
    }
    Ok(polar)
}

/// Second pass of the force evaluation.
///
/// Rescales `born_forces` in place from `dE/dB_i` to `dE/dI_i` using the chain
/// factors of the same Born radius estimate, then distributes them over the
/// HCT pair geometry.
#[instrument(skip_all, name = "gb_back_propagation")]
pub fn back_propagate(
    params: &ObcParameters,
    coordinates: &[Point3<f64>],
    born_radii: &[f64],
    chain: &[f64],
    born_forces: &mut [f64],
    forces: &mut [Vector3<f64>],
) -> Result<(), SolvationError> {
    let num_atoms = params.num_atoms();
    check_len("coordinates", num_atoms, coordinates.len())?;
    check_len("Born radii", num_atoms, born_radii.len())?;
    check_len("chain derivatives", num_atoms, chain.len())?;
    check_len("Born force entries", num_atoms, born_forces.len())?;
    check_len("forces", num_atoms, forces.len())?;

    for ((born_force, &born_radius), &chain_i) in
        born_forces.iter_mut().zip(born_radii).zip(chain)
    {
        *born_force *= born_radius * born_radius * chain_i;
    }

    let offset = params.config().dielectric_offset;
    let atomic_radii = params.atomic_radii();
    let scaled_radius_factors = params.scaled_radius_factors();

    for atom_i in 0..num_atoms {
        let offset_radius_i = atomic_radii[atom_i] - offset;

        for atom_j in 0..num_atoms {
            if atom_j == atom_i {
                continue;
            }
            let d = params.delta_r(&coordinates[atom_i], &coordinates[atom_j]);
            if params.beyond_cutoff(d.r) {
                continue;
            }

            let scaled_radius_j =
                (atomic_radii[atom_j] - offset) * scaled_radius_factors[atom_j];
            let Some((l_ij, u_ij)) = hct_inverse_bounds(offset_radius_i, d.r, scaled_radius_j)
            else {
                continue;
            };

            let t3 = hct_descreening_derivative(d.r, scaled_radius_j, l_ij, u_ij);
            let de = born_forces[atom_i] * t3 / d.r;

            let f = d.delta * de;
            forces[atom_i] -= f;
            forces[atom_j] += f;
        }
    }
    Ok(())
}
