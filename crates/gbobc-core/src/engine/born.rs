use crate::core::forcefield::params::ObcParameters;
use crate::core::forcefield::potentials::{hct_descreening, obc_born_radius};
use crate::engine::error::{SolvationError, check_len};
use nalgebra::Point3;
use tracing::{instrument, trace};

/// HCT descreening followed by the OBC remapping.
///
/// The estimator owns the OBC chain factors of the most recent call. They are
/// overwritten by every [`estimate`](Self::estimate) and are only meaningful
/// together with the Born radii returned by that same call.
#[derive(Debug, Default, Clone)]
pub struct BornRadiusEstimator {
    chain: Vec<f64>,
}

impl BornRadiusEstimator {
    pub fn new(num_atoms: usize) -> Self {
        Self {
            chain: vec![0.0; num_atoms],
        }
    }

    /// `dB_i/dI_i / B_i^2` for every atom, as left by the last estimate.
    pub fn chain_derivative(&self) -> &[f64] {
        &self.chain
    }

    /// Computes Born radii for every atom.
    ///
    /// `correction` adds a per-atom term to the HCT integral before the OBC
    /// remapping. The chain factors are not corrected for it, so forces derived
    /// from corrected radii are approximate.
    #[instrument(skip_all, name = "born_radii")]
    pub fn estimate(
        &mut self,
        params: &ObcParameters,
        coordinates: &[Point3<f64>],
        correction: Option<&[f64]>,
    ) -> Result<Vec<f64>, SolvationError> {
        let num_atoms = params.num_atoms();
        check_len("coordinates", num_atoms, coordinates.len())?;
        if let Some(grid) = correction {
            check_len("correction grid entries", num_atoms, grid.len())?;
        }

        let config = params.config();
        let atomic_radii = params.atomic_radii();
        let scaled_radius_factors = params.scaled_radius_factors();
        let offset = config.dielectric_offset;
        let obc = config.obc;

        self.chain.resize(num_atoms, 0.0);
        let mut born_radii = vec![0.0; num_atoms];

        for atom_i in 0..num_atoms {
            let radius_i = atomic_radii[atom_i];
            let offset_radius_i = radius_i - offset;

            let mut sum = 0.0;
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
                sum += hct_descreening(offset_radius_i, d.r, scaled_radius_j);
            }

            sum *= 0.5;
            if let Some(grid) = correction {
                sum += grid[atom_i];
            }
            let psi = sum * offset_radius_i;

            let (born_radius, chain) =
                obc_born_radius(radius_i, offset_radius_i, psi, obc.alpha, obc.beta, obc.gamma);
            born_radii[atom_i] = born_radius;
            self.chain[atom_i] = chain;
            trace!(atom = atom_i, psi, born_radius, "Born radius estimated.");
        }

        Ok(born_radii)
    }
}
