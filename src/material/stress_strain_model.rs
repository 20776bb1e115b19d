use crate::base::StrainOrder;
use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};
use std::str::FromStr;

/// Specifies the essential functions for the stress-strain models called by a finite element driver
///
/// Strains use engineering shear components (γ = 2ε) ordered according to [StrainOrder];
/// stresses use the same order with tensor shear components.
pub trait StressStrainTrait: Send {
    /// Returns the strain order of the integration point
    fn strain_order(&self) -> StrainOrder;

    /// Computes the trial stress corresponding to the total trial strain
    ///
    /// On failure, the trial state is left at the last committed state.
    fn set_trial_strain(&mut self, strain: &[f64]) -> Result<()>;

    /// Returns the trial stress
    fn stress(&self) -> DVector<f64>;

    /// Returns the trial strain
    fn strain(&self) -> DVector<f64>;

    /// Returns the consistent tangent stiffness at the trial state
    fn tangent(&self) -> Result<DMatrix<f64>>;

    /// Returns the elastic stiffness with the reference moduli
    fn initial_tangent(&self) -> DMatrix<f64>;

    /// Accepts the trial state
    fn commit_state(&mut self);

    /// Discards the trial state
    fn revert_to_last_commit(&mut self);

    /// Returns to the virgin state
    fn revert_to_start(&mut self);

    /// Updates one of the runtime parameters
    fn update_parameter(&mut self, key: UpdateKey, value: f64) -> Result<()>;
}

/// Defines the runtime parameters accepted by `update_parameter`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateKey {
    /// Loading stage: 0 → Elastic, 1 → Plastic, 2 → ScaledElastic
    MaterialStage,

    /// Reference shear modulus of this instance
    ShearModulus,

    /// Reference bulk modulus of this instance
    BulkModulus,
}

impl UpdateKey {
    /// Returns the key corresponding to an integer identifier (1, 10 or 11)
    pub fn from_id(id: i32) -> Result<Self> {
        match id {
            1 => Ok(UpdateKey::MaterialStage),
            10 => Ok(UpdateKey::ShearModulus),
            11 => Ok(UpdateKey::BulkModulus),
            _ => Err(Error::UnknownParameter(format!("parameter id {}", id))),
        }
    }
}

impl FromStr for UpdateKey {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "materialStage" | "updateMaterialStage" => Ok(UpdateKey::MaterialStage),
            "shearModulus" => Ok(UpdateKey::ShearModulus),
            "bulkModulus" => Ok(UpdateKey::BulkModulus),
            _ => Err(Error::UnknownParameter(name.to_string())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
