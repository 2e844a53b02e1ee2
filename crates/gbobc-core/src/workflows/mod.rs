//! # Workflows Module
//!
//! High-level entry points for force-field hosts.
//!
//! ```ignore
//! use gbobc::workflows::solvation::ObcSolvation;
//!
//! let mut solvation = ObcSolvation::new(&params);
//! let mut forces = vec![Vector3::zeros(); params.num_atoms()];
//! let energy = solvation.polar_energy_and_forces(&coords, &charges, None, &mut forces)?;
//! ```

pub mod solvation;
