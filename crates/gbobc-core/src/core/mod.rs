//! # Core Module
//!
//! Stateless building blocks of the solvation model.
//!
//! - **Parameters** ([`forcefield::params`]) - Per-atom radii, scale factors and
//!   the scalar model constants, validated once at construction
//! - **Kernels** (`forcefield::potentials`) - Closed forms of the HCT descreening
//!   integral, the OBC remapping, the ACE surface term and the Still pair kernel
//! - **Energy Terms** ([`forcefield::term`]) - Polar/nonpolar energy breakdown
//! - **Geometry** ([`utils::geometry`]) - Pair displacements, plain or periodic

pub mod forcefield;
pub mod utils;
