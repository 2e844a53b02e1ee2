//! # GBOBC Core Library
//!
//! Generalized Born implicit-solvent energies and forces with the
//! Onufriev-Bashford-Case (OBC) Born radii and the ACE nonpolar term.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that the numerics, the
//! stateful evaluation stages and the public entry points stay separate.
//!
//! - **[`core`]: The Foundation.** Per-atom and model parameters (`ObcParameters`),
//!   closed-form HCT/OBC/ACE/Still kernels, energy breakdowns and pair geometry.
//!
//! - **[`engine`]: The Numerical Stages.** Configuration, the Born radius
//!   estimator that owns the OBC chain factors, the ACE term and the two passes
//!   of the pairwise polar evaluation.
//!
//! - **[`workflows`]: The Public API.** `ObcSolvation` chains the stages into the
//!   energy-only and energy-plus-forces evaluations a force-field host calls.
//!
//! Units follow the parameter set; the defaults are nm, e and kJ/mol.

pub mod core;
pub mod engine;
pub mod workflows;
