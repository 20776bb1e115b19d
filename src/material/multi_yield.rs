use super::return_mapping::ReturnMapping;
use super::tangent::{isotropic_stiffness, reduce_stiffness, tangent_stiffness};
use super::{InstanceState, LoadStage, MaterialParameters, PpzState, StressStrainTrait, T2Vector, UpdateKey, YieldSurface};
use crate::base::StrainOrder;
use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};
use std::sync::Arc;

/// Implements the multi-yield-surface model at one integration point
///
/// The parameters are shared by all instances made of the same soil; each instance owns
/// its surfaces, stresses, strains and PPZ bookkeeping. Instances are independent and
/// may be integrated concurrently.
///
/// # Examples
///
/// ```
/// use soilmys::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let params = Arc::new(MaterialParameters::new(&SampleParams::param_clay(), &Settings::new())?);
/// let mut material = MultiYieldMaterial::new(params, StrainOrder::PlaneStrain);
/// material.update_parameter(UpdateKey::MaterialStage, 1.0)?;
/// for i in 1..=10 {
///     material.set_trial_strain(&[0.0, 0.0, (i as f64) * 1e-3])?;
///     material.commit_state();
/// }
/// assert!(material.active_surface() > 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MultiYieldMaterial {
    params: Arc<MaterialParameters>,
    order: StrainOrder,
    state: InstanceState,
}

impl MultiYieldMaterial {
    /// Allocates a new instance in the virgin state (elastic stage)
    pub fn new(params: Arc<MaterialParameters>, order: StrainOrder) -> Self {
        let state = InstanceState::new(&params);
        MultiYieldMaterial { params, order, state }
    }

    /// Returns the shared parameters
    pub fn params(&self) -> &MaterialParameters {
        &self.params
    }

    /// Returns the committed stress
    pub fn committed_stress(&self) -> DVector<f64> {
        DVector::from_vec(self.order.reduce(&self.state.committed_stress.components()))
    }

    /// Returns the committed strain (engineering shear strains)
    pub fn committed_strain(&self) -> DVector<f64> {
        DVector::from_vec(self.order.reduce(&self.state.committed_strain.engineering_components()))
    }

    /// Returns the index of the active surface at the trial state (0 means elastic)
    pub fn active_surface(&self) -> usize {
        self.state.active_surface
    }

    /// Returns the loading stage
    pub fn load_stage(&self) -> LoadStage {
        self.state.load_stage
    }

    /// Returns the mean stress p (negative in compression) at the trial state
    pub fn mean_stress(&self) -> f64 {
        self.state.trial_stress.volume()
    }

    /// Returns the octahedral shear stress at the trial state
    pub fn octahedral_shear_stress(&self) -> f64 {
        self.state.trial_stress.octahedral_shear(false)
    }

    /// Returns the deviatoric stress ratio `√(3/2 s && s) / (|p| + pres)` at the trial state
    pub fn stress_ratio(&self) -> f64 {
        self.state.trial_stress.deviator_ratio(self.params.residual_pressure())
    }

    /// Returns the whole state of this instance
    pub fn state(&self) -> &InstanceState {
        &self.state
    }

    /// Returns the committed yield surfaces (surface m is at index m - 1)
    pub fn yield_surfaces(&self) -> &[YieldSurface] {
        &self.state.committed_surfaces
    }

    /// Returns the committed PPZ state (pressure-dependent model only)
    pub fn ppz(&self) -> Option<&PpzState> {
        self.state.committed_ppz.as_ref()
    }

    /// Evaluates the yield function of the trial surface m (1-based) at the trial stress
    pub fn yield_value(&self, m: usize) -> Option<f64> {
        if m < 1 || m > self.state.trial_surfaces.len() {
            return None;
        }
        let h = self.params.cone_height(&self.state.trial_stress);
        Some(self.state.trial_surfaces[m - 1].yield_function(&self.state.trial_stress, h))
    }

    /// Replaces the state of this instance (e.g., to restart from a snapshot)
    pub fn restore(&mut self, state: InstanceState) -> Result<()> {
        let n = self.params.n_surfaces();
        if state.committed_surfaces.len() != n || state.trial_surfaces.len() != n {
            return Err(Error::Configuration(format!(
                "snapshot has {} surfaces but the parameters define {}",
                state.committed_surfaces.len(),
                n
            )));
        }
        if state.committed_ppz.is_some() != self.params.pressure_dependent() {
            return Err(Error::Configuration(
                "snapshot does not match the pressure dependence of the parameters".to_string(),
            ));
        }
        self.state = state;
        Ok(())
    }
}

impl StressStrainTrait for MultiYieldMaterial {
    fn strain_order(&self) -> StrainOrder {
        self.order
    }

    fn set_trial_strain(&mut self, strain: &[f64]) -> Result<()> {
        let full = self.order.expand(strain)?;
        let trial = T2Vector::new_engineering(&full);
        ReturnMapping::new(&self.params, &mut self.state).update(trial)
    }

    fn stress(&self) -> DVector<f64> {
        DVector::from_vec(self.order.reduce(&self.state.trial_stress.components()))
    }

    fn strain(&self) -> DVector<f64> {
        DVector::from_vec(self.order.reduce(&self.state.trial_strain.engineering_components()))
    }

    fn tangent(&self) -> Result<DMatrix<f64>> {
        let dd = tangent_stiffness(&self.params, &self.state)?;
        Ok(reduce_stiffness(&dd, self.order))
    }

    fn initial_tangent(&self) -> DMatrix<f64> {
        let gg = self.state.shear_modulus.unwrap_or(self.params.shear_modulus());
        let kk = self.state.bulk_modulus.unwrap_or(self.params.bulk_modulus());
        reduce_stiffness(&isotropic_stiffness(gg, kk), self.order)
    }

    fn commit_state(&mut self) {
        self.state.commit();
    }

    fn revert_to_last_commit(&mut self) {
        self.state.revert();
    }

    fn revert_to_start(&mut self) {
        self.state = InstanceState::new(&self.params);
    }

    fn update_parameter(&mut self, key: UpdateKey, value: f64) -> Result<()> {
        match key {
            UpdateKey::MaterialStage => {
                let stage = LoadStage::from_value(value)?;
                if stage != LoadStage::Plastic {
                    self.state.plastic_transition_done = false;
                }
                self.state.load_stage = stage;
            }
            UpdateKey::ShearModulus => {
                if !(value > 0.0) {
                    return Err(Error::UnknownParameter(format!("shear modulus must be positive; got {}", value)));
                }
                self.state.shear_modulus = Some(value);
            }
            UpdateKey::BulkModulus => {
                if !(value > 0.0) {
                    return Err(Error::UnknownParameter(format!("bulk modulus must be positive; got {}", value)));
                }
                self.state.bulk_modulus = Some(value);
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
