use crate::core::forcefield::params::ObcParameters;
use crate::core::forcefield::potentials::ace_surface_term;
use crate::engine::error::{SolvationError, check_len};
use tracing::instrument;

/// ACE nonpolar term with a sixth-power radius ratio.
///
/// Adds the energy to `energy` and `dE/dB_i` to `born_forces[i]`; neither is
/// reset. Atoms with a non-positive Born radius are skipped.
#[instrument(skip_all, name = "ace_nonpolar")]
pub fn accumulate(
    params: &ObcParameters,
    born_radii: &[f64],
    energy: &mut f64,
    born_forces: &mut [f64],
) -> Result<(), SolvationError> {
    let num_atoms = params.num_atoms();
    check_len("Born radii", num_atoms, born_radii.len())?;
    check_len("Born force entries", num_atoms, born_forces.len())?;

    let config = params.config();
    let strength = config.strength;

    let atomic_radii = params.atomic_radii();
    for (atom, (&radius, &born_radius)) in atomic_radii.iter().zip(born_radii).enumerate() {
        if born_radius > 0.0 {
            let sa_term = ace_surface_term(
                radius,
                born_radius,
                config.probe_radius,
                config.surface_area_factor,
            );
            *energy += strength * sa_term;
            born_forces[atom] += strength * -6.0 * sa_term / born_radius;
        }
    }
    Ok(())
}
