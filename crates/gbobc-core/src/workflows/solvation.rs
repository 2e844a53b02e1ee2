use crate::core::forcefield::params::ObcParameters;
use crate::core::forcefield::term::SolvationTerm;
use crate::engine::born::BornRadiusEstimator;
use crate::engine::error::{SolvationError, check_len};
use crate::engine::{nonpolar, polar};
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// GB/OBC implicit-solvent evaluator for one parameter set.
///
/// Every evaluation runs the same linear pipeline: Born radii, the optional
/// ACE nonpolar term, the Still pair sum and, when forces are requested, the
/// back-propagation of Born radius derivatives.
///
/// The evaluator keeps the OBC chain factors of its last Born radius estimate,
/// so one instance must not be shared between concurrent evaluations. Use one
/// instance per thread instead.
///
/// When a correction grid is supplied the Born radii include it, but the
/// derivatives do not account for it, so the forces of such an evaluation are
/// approximate.
///
/// The ACE and polar energies are summed separately and added at the end, so
/// the total can differ in the last bits from a single running sum over both
/// terms.
#[derive(Debug, Clone)]
pub struct ObcSolvation<'a> {
    params: &'a ObcParameters,
    estimator: BornRadiusEstimator,
    include_nonpolar: bool,
}

impl<'a> ObcSolvation<'a> {
    pub fn new(params: &'a ObcParameters) -> Self {
        Self {
            params,
            estimator: BornRadiusEstimator::new(params.num_atoms()),
            include_nonpolar: true,
        }
    }

    pub fn parameters(&self) -> &'a ObcParameters {
        self.params
    }

    pub fn set_parameters(&mut self, params: &'a ObcParameters) {
        self.params = params;
    }

    pub fn includes_nonpolar_term(&self) -> bool {
        self.include_nonpolar
    }

    pub fn set_include_nonpolar_term(&mut self, include: bool) {
        self.include_nonpolar = include;
    }

    /// Chain factors from the most recent Born radius estimate.
    pub fn chain_derivative(&self) -> &[f64] {
        self.estimator.chain_derivative()
    }

    pub fn estimate_born_radii(
        &mut self,
        coordinates: &[Point3<f64>],
        correction: Option<&[f64]>,
    ) -> Result<Vec<f64>, SolvationError> {
        self.estimator.estimate(self.params, coordinates, correction)
    }

    /// Adds the ACE energy to `energy` and its Born radius derivatives to `born_forces`.
    pub fn nonpolar_force(
        &self,
        born_radii: &[f64],
        energy: &mut f64,
        born_forces: &mut [f64],
    ) -> Result<(), SolvationError> {
        nonpolar::accumulate(self.params, born_radii, energy, born_forces)
    }

    /// Total solvation energy without forces.
    pub fn polar_energy(
        &mut self,
        coordinates: &[Point3<f64>],
        charges: &[f64],
        correction: Option<&[f64]>,
    ) -> Result<f64, SolvationError> {
        Ok(self.solvation_terms(coordinates, charges, correction)?.total())
    }

    /// Same evaluation as [`polar_energy`](Self::polar_energy), split into its
    /// polar and nonpolar parts.
    #[instrument(skip_all, name = "solvation_energy")]
    pub fn solvation_terms(
        &mut self,
        coordinates: &[Point3<f64>],
        charges: &[f64],
        correction: Option<&[f64]>,
    ) -> Result<SolvationTerm, SolvationError> {
        let params = self.params;
        let num_atoms = params.num_atoms();
        check_len("partial charges", num_atoms, charges.len())?;

        let born_radii = self.estimator.estimate(params, coordinates, correction)?;

        let mut nonpolar = 0.0;
        if self.include_nonpolar {
            let mut born_forces = vec![0.0; num_atoms];
            nonpolar::accumulate(params, &born_radii, &mut nonpolar, &mut born_forces)?;
        }
        let polar = polar::energy(params, coordinates, charges, &born_radii)?;
        let term = SolvationTerm::new(polar, nonpolar);

        debug!(
            num_atoms,
            polar = term.polar,
            nonpolar = term.nonpolar,
            "Solvation energy evaluated."
        );
        Ok(term)
    }

    /// Total solvation energy, with the forces added to `forces`.
    ///
    /// Forces are the negative energy gradient, `-dE/dx`.
    ///
    /// `forces` is never cleared: callers zero it before the first force term
    /// they accumulate.
    #[instrument(skip_all, name = "solvation_energy_forces")]
    pub fn polar_energy_and_forces(
        &mut self,
        coordinates: &[Point3<f64>],
        charges: &[f64],
        correction: Option<&[f64]>,
        forces: &mut [Vector3<f64>],
    ) -> Result<f64, SolvationError> {
        let params = self.params;
        let num_atoms = params.num_atoms();
        check_len("partial charges", num_atoms, charges.len())?;
        check_len("forces", num_atoms, forces.len())?;

        let born_radii = self.estimator.estimate(params, coordinates, correction)?;

        let mut nonpolar = 0.0;
        let mut born_forces = vec![0.0; num_atoms];
        if self.include_nonpolar {
            nonpolar::accumulate(params, &born_radii, &mut nonpolar, &mut born_forces)?;
        }

        let polar = polar::energy_and_forces(
            params,
            coordinates,
            charges,
            &born_radii,
            &mut born_forces,
            forces,
        )?;
        polar::back_propagate(
            params,
            coordinates,
            &born_radii,
            self.estimator.chain_derivative(),
            &mut born_forces,
            forces,
        )?;
        let term = SolvationTerm::new(polar, nonpolar);

        debug!(
            num_atoms,
            polar = term.polar,
            nonpolar = term.nonpolar,
            "Solvation energy and forces evaluated."
        );
        Ok(term.total())
    }
}
