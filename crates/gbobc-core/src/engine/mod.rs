//! # Engine Module
//!
//! The numerical stages of one solvation evaluation, in pipeline order:
//!
//! 1. [`born`] - HCT descreening and OBC remapping into Born radii; owns the
//!    chain factors needed later by the force pass
//! 2. `nonpolar` - ACE surface term and its Born radius derivatives
//! 3. `polar` - Still pair sum, either energy-only or with derivatives
//!    followed by the back-propagation of Born radius sensitivities
//!
//! Configuration ([`config`]) and per-call errors ([`error`]) live alongside.
//! Every stage is sequential; the accumulation order is fixed so repeated
//! evaluations are bit-identical.

pub mod born;
pub mod config;
pub mod error;
pub(crate) mod nonpolar;
pub(crate) mod polar;
