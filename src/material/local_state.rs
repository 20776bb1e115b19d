use super::{MaterialParameters, T2Vector, Vec6, YieldSurface};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Defines the loading stage of an instance
///
/// Staged analyses first apply the gravity (or consolidation) loads with an elastic stage,
/// then switch to the plastic stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStage {
    /// Linear elastic response with the reference moduli
    Elastic,

    /// Multi-yield-surface plasticity
    Plastic,

    /// Linear elastic response with pressure-dependent moduli
    ScaledElastic,
}

impl LoadStage {
    /// Returns the stage corresponding to the value given to `update_parameter`
    ///
    /// 0 → Elastic, 1 → Plastic, 2 → ScaledElastic
    pub fn from_value(value: f64) -> Result<Self> {
        if value == 0.0 {
            Ok(LoadStage::Elastic)
        } else if value == 1.0 {
            Ok(LoadStage::Plastic)
        } else if value == 2.0 {
            Ok(LoadStage::ScaledElastic)
        } else {
            Err(Error::UnknownParameter(format!("material stage must be 0, 1 or 2; got {}", value)))
        }
    }
}

/// Defines the phase of the phase-transformation pivot zone (PPZ)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PpzPhase {
    /// No live PPZ (initial phase, and again after the strain leaves the PPZ)
    NeverDilated,

    /// Inside the PPZ created by the last dilation
    InsidePpz,

    /// Inside the PPZ after it has been translated
    InsidePpzTranslated,

    /// Dilating above the phase transformation line
    ActivelyDilating,
}

impl PpzPhase {
    /// Indicates that the strain lies inside a live PPZ
    pub fn is_inside(&self) -> bool {
        matches!(self, PpzPhase::InsidePpz | PpzPhase::InsidePpzTranslated)
    }
}

/// Holds the bookkeeping of the phase-transformation pivot zone
///
/// Strain deviators are stored with tensor shear components; distances are octahedral
/// (engineering) shear strains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PpzState {
    /// Deviatoric strain at the last dilating step
    pub pivot_strain: Vec6,

    /// Deviatoric strain at the center of the PPZ
    pub center_strain: Vec6,

    /// Octahedral shear strain accumulated during the current dilation episode
    pub cumulative_dilation: f64,

    /// Largest cumulative dilation observed so far
    pub max_cumulative_dilation: f64,

    /// Octahedral shear strain accumulated by translating the PPZ
    pub cumulative_translation: f64,

    /// Radius of the PPZ on the side of the pivot (dilation of the episode that opened it)
    pub pre_ppz_strain: f64,

    /// Radius of the PPZ on the side opposite to the pivot (largest dilation so far)
    pub opposite_pre_ppz_strain: f64,

    /// Current phase
    pub phase: PpzPhase,

    /// Loss of confinement relative to the historical maximum confinement, in [0, 1]
    pub damage: f64,

    /// Historical minimum (most compressive) mean stress
    pub min_pressure: f64,
}

impl PpzState {
    /// Allocates a virgin PPZ state
    pub fn new() -> Self {
        PpzState {
            pivot_strain: Vec6::zeros(),
            center_strain: Vec6::zeros(),
            cumulative_dilation: 0.0,
            max_cumulative_dilation: 0.0,
            cumulative_translation: 0.0,
            pre_ppz_strain: 0.0,
            opposite_pre_ppz_strain: 0.0,
            phase: PpzPhase::NeverDilated,
            damage: 0.0,
            min_pressure: 0.0,
        }
    }
}

impl Default for PpzState {
    fn default() -> Self {
        PpzState::new()
    }
}

/// Holds the mutable state of one integration point
///
/// The committed quantities correspond to the last converged step; the trial quantities
/// are overwritten by each call to `set_trial_strain`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Stress at the last commit
    pub committed_stress: T2Vector,

    /// Stress corresponding to the trial strain
    pub trial_stress: T2Vector,

    /// Strain at the last commit
    pub committed_strain: T2Vector,

    /// Strain given by the last call to `set_trial_strain`
    pub trial_strain: T2Vector,

    /// Strain increment since the last commit
    pub strain_rate: T2Vector,

    /// Yield surfaces at the last commit
    pub committed_surfaces: Vec<YieldSurface>,

    /// Yield surfaces after the last call to `set_trial_strain`
    pub trial_surfaces: Vec<YieldSurface>,

    /// Index of the active surface (0 means inside the elastic region; surfaces are 1-based)
    pub active_surface: usize,

    /// Index of the active surface at the last commit
    pub committed_active_surface: usize,

    /// Current loading stage
    pub load_stage: LoadStage,

    /// Indicates that the surfaces have been initialized from the stress of the elastic stage
    pub plastic_transition_done: bool,

    /// PPZ state at the last commit (pressure-dependent model only)
    pub committed_ppz: Option<PpzState>,

    /// PPZ state after the last call to `set_trial_strain` (pressure-dependent model only)
    pub trial_ppz: Option<PpzState>,

    /// Overrides the reference shear modulus of the shared parameters
    pub shear_modulus: Option<f64>,

    /// Overrides the reference bulk modulus of the shared parameters
    pub bulk_modulus: Option<f64>,
}

impl InstanceState {
    /// Allocates the virgin state associated with the given parameters
    pub fn new(params: &MaterialParameters) -> Self {
        let ppz = if params.pressure_dependent() {
            Some(PpzState::new())
        } else {
            None
        };
        InstanceState {
            committed_stress: T2Vector::new_zero(),
            trial_stress: T2Vector::new_zero(),
            committed_strain: T2Vector::new_zero(),
            trial_strain: T2Vector::new_zero(),
            strain_rate: T2Vector::new_zero(),
            committed_surfaces: params.surfaces().to_vec(),
            trial_surfaces: params.surfaces().to_vec(),
            active_surface: 0,
            committed_active_surface: 0,
            load_stage: LoadStage::Elastic,
            plastic_transition_done: false,
            committed_ppz: ppz.clone(),
            trial_ppz: ppz,
            shear_modulus: None,
            bulk_modulus: None,
        }
    }

    /// Accepts the trial state
    pub(crate) fn commit(&mut self) {
        self.committed_stress = self.trial_stress;
        self.committed_strain = self.trial_strain;
        self.committed_surfaces.clone_from(&self.trial_surfaces);
        self.committed_active_surface = self.active_surface;
        self.committed_ppz.clone_from(&self.trial_ppz);
        self.strain_rate = T2Vector::new_zero();
    }

    /// Discards the trial state
    pub(crate) fn revert(&mut self) {
        self.trial_stress = self.committed_stress;
        self.trial_strain = self.committed_strain;
        self.trial_surfaces.clone_from(&self.committed_surfaces);
        self.active_surface = self.committed_active_surface;
        self.trial_ppz.clone_from(&self.committed_ppz);
        self.strain_rate = T2Vector::new_zero();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
