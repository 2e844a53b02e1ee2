//! # Force Field Module
//!
//! Parameters and closed-form potentials of the GB/OBC model.
//!
//! ## Key Components
//!
//! - [`params`] - `ObcParameters`, loaded from TOML/CSV or built in code
//! - [`term`] - Solvation energy breakdown
//!
//! ## Usage
//!
//! ```ignore
//! use gbobc::core::forcefield::params::ObcParameters;
//!
//! let params = ObcParameters::load(&model_path, &radii_path)?;
//! ```

pub mod params;
pub(crate) mod potentials;
pub mod term;
