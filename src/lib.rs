//! Multi-yield-surface plasticity for soils
//!
//! This crate implements the constitutive integrator of the nested (multi-yield-surface)
//! plasticity models for pressure-independent (clay-like) and pressure-dependent
//! (sand-like) soils. A finite element driver calls [material::MultiYieldMaterial] at each
//! integration point with a trial strain and queries the resulting stress and consistent
//! tangent. The shared [material::MaterialParameters] are built once per soil description
//! and referenced by every integration point made of that soil.
//!
//! # Example
//!
//! ```
//! use soilmys::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let param = SampleParams::param_clay();
//! let params = Arc::new(MaterialParameters::new(&param, &Settings::new())?);
//! let mut material = MultiYieldMaterial::new(params, StrainOrder::PlaneStrain);
//! material.set_trial_strain(&[0.0, 0.0, 1e-5])?;
//! let stress = material.stress();
//! assert!(stress[2] > 0.0);
//! # Ok(())
//! # }
//! ```

mod error;
pub use crate::error::*;

pub mod base;
pub mod material;
pub mod prelude;
