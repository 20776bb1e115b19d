use super::{dev_ddot, PpzPhase, PpzState, T2Vector, Vec6};
use crate::base::{ParamPressureDepend, MIN_MODULUS_FACTOR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Holds the stress and strain at the start and at the end of a sub-increment
#[derive(Clone, Copy, Debug)]
pub struct SubStep {
    /// Stress at the start of the sub-increment
    pub stress0: T2Vector,

    /// Strain at the start of the sub-increment
    pub strain0: T2Vector,

    /// Stress at the end of the sub-increment
    pub stress1: T2Vector,

    /// Strain at the end of the sub-increment
    pub strain1: T2Vector,
}

/// Holds the dilatancy, liquefaction and critical-state parameters of the pressure-dependent model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dilatancy {
    pt_angle: f64,
    pt_ratio: f64,
    contraction: [f64; 3],
    dilation: [f64; 3],
    liquefaction: [f64; 2],
    void_ratio: f64,
    critical_state: [f64; 3],
    atmospheric_pressure: f64,
    consolidation: [f64; 2],
}

/// Returns the octahedral engineering shear strain of a strain deviator (tensor shear components)
fn octahedral_strain(deviator: &Vec6) -> f64 {
    2.0 * (dev_ddot(deviator, deviator) / 3.0).sqrt()
}

impl Dilatancy {
    /// Allocates a new instance
    ///
    /// The phase transformation angle is clamped to the friction angle (with a warning).
    pub(crate) fn new(param: &ParamPressureDepend, friction_angle: f64, warnings: &mut Vec<String>) -> Result<Self> {
        if !(param.pt_angle > 0.0) {
            return Err(Error::Configuration(
                "pt_angle parameter for the pressure-dependent model is invalid".to_string(),
            ));
        }
        let mut pt_angle = param.pt_angle;
        if pt_angle > friction_angle {
            warnings.push(format!(
                "phase transformation angle {}° clamped to the friction angle {}°",
                pt_angle, friction_angle
            ));
            pt_angle = friction_angle;
        }
        if param.contraction.iter().any(|v| !(*v >= 0.0)) {
            return Err(Error::Configuration(
                "contraction parameters for the pressure-dependent model must be non-negative".to_string(),
            ));
        }
        if param.dilation.iter().any(|v| !(*v >= 0.0)) {
            return Err(Error::Configuration(
                "dilation parameters for the pressure-dependent model must be non-negative".to_string(),
            ));
        }
        if param.liquefaction.iter().any(|v| !(*v >= 0.0)) {
            return Err(Error::Configuration(
                "liquefaction parameters for the pressure-dependent model must be non-negative".to_string(),
            ));
        }
        if !(param.void_ratio > 0.0) {
            return Err(Error::Configuration(
                "void_ratio parameter for the pressure-dependent model is invalid".to_string(),
            ));
        }
        if !(param.atmospheric_pressure > 0.0) {
            return Err(Error::Configuration(
                "atmospheric_pressure parameter for the pressure-dependent model is invalid".to_string(),
            ));
        }
        if !(param.consolidation[0] > 0.0) || !(param.consolidation[1] >= 0.0) {
            return Err(Error::Configuration(
                "consolidation parameters for the pressure-dependent model are invalid".to_string(),
            ));
        }
        if param.critical_state.iter().any(|v| !v.is_finite()) {
            return Err(Error::Configuration(
                "critical_state parameters for the pressure-dependent model are invalid".to_string(),
            ));
        }
        let sin_pt = pt_angle.to_radians().sin();
        Ok(Dilatancy {
            pt_angle,
            pt_ratio: 6.0 * sin_pt / (3.0 - sin_pt),
            contraction: param.contraction,
            dilation: param.dilation,
            liquefaction: param.liquefaction,
            void_ratio: param.void_ratio,
            critical_state: param.critical_state,
            atmospheric_pressure: param.atmospheric_pressure,
            consolidation: param.consolidation,
        })
    }

    /// Returns the phase transformation angle in degrees (after clamping)
    pub fn pt_angle(&self) -> f64 {
        self.pt_angle
    }

    /// Returns the phase transformation stress ratio ηPT
    pub fn pt_ratio(&self) -> f64 {
        self.pt_ratio
    }

    /// Returns the atmospheric pressure
    pub fn atmospheric_pressure(&self) -> f64 {
        self.atmospheric_pressure
    }

    /// Returns p'/pa with p' floored at the residual pressure
    fn normalized_pressure(&self, stress: &T2Vector, residual_pressure: f64) -> f64 {
        let p = (-stress.volume()).max(residual_pressure);
        (p / self.atmospheric_pressure).max(MIN_MODULUS_FACTOR)
    }

    /// Returns the void ratio `e = e0 + (1 + e0) εv` (εv negative in compression)
    pub fn void_ratio(&self, strain: &T2Vector) -> f64 {
        self.void_ratio + (1.0 + self.void_ratio) * 3.0 * strain.volume()
    }

    /// Returns the void ratio on the critical state line at the confinement of the stress
    pub fn critical_void_ratio(&self, stress: &T2Vector, residual_pressure: f64) -> f64 {
        let [cs1, cs2, cs3] = self.critical_state;
        let p_norm = self.normalized_pressure(stress, residual_pressure);
        if cs3 == 0.0 {
            cs1 - cs2 * f64::ln(p_norm)
        } else {
            cs1 - cs2 * f64::powf(p_norm, cs3)
        }
    }

    /// Indicates that the void ratio reaches or crosses the critical state line during the sub-increment
    pub fn is_critical_state(&self, step: &SubStep, residual_pressure: f64) -> bool {
        let before = self.void_ratio(&step.strain0) - self.critical_void_ratio(&step.stress0, residual_pressure);
        let after = self.void_ratio(&step.strain1) - self.critical_void_ratio(&step.stress1, residual_pressure);
        after == 0.0 || (before < 0.0 && after > 0.0) || (before > 0.0 && after < 0.0)
    }

    /// Returns the multiplier `ca + cb p'/pa` of the bulk modulus in the scaled-elastic stage
    pub fn consolidation_factor(&self, stress: &T2Vector) -> f64 {
        let [ca, cb] = self.consolidation;
        let p = f64::max(-stress.volume(), 0.0);
        f64::max(ca + cb * p / self.atmospheric_pressure, MIN_MODULUS_FACTOR)
    }

    /// Calculates the volumetric component P'' (trace) of the plastic flow direction
    ///
    /// Positive values correspond to dilation (tension positive); negative values to contraction.
    /// The stress of `step.stress1` is the contact stress on the active surface.
    pub fn plastic_potential(&self, step: &SubStep, ppz: &PpzState, residual_pressure: f64, loading: bool) -> f64 {
        let stress = &step.stress1;
        let eta = stress.deviator_ratio(residual_pressure);
        let eta_pt = self.pt_ratio;
        let p_norm = self.normalized_pressure(stress, residual_pressure);

        // dilation above the phase transformation line
        if loading && eta >= eta_pt {
            if self.is_critical_state(step, residual_pressure) {
                return 0.0;
            }
            let [d1, d2, d3] = self.dilation;
            return (eta / eta_pt - 1.0) * d1 * (1.0 + d2 * ppz.cumulative_dilation) * f64::powf(p_norm, -d3);
        }

        // neutral inside the pivot zone
        if ppz.phase.is_inside() {
            return 0.0;
        }

        // contraction
        if self.is_critical_state(step, residual_pressure) {
            return 0.0;
        }
        let sense = if loading { 1.0 } else { -1.0 };
        let factor = f64::max(1.0 - sense * eta / eta_pt, 0.0);
        let [c1, c2, c3] = self.contraction;
        -factor * (c1 + c2 * ppz.max_cumulative_dilation) * f64::powf(p_norm, c3)
    }

    /// Updates the PPZ bookkeeping after a plastic sub-increment
    ///
    /// `increment` is the strain increment of the sub-increment and `step.stress1` the corrected stress.
    pub fn update_ppz(
        &self,
        ppz: &mut PpzState,
        step: &SubStep,
        increment: &T2Vector,
        residual_pressure: f64,
        loading: bool,
    ) {
        let stress = &step.stress1;
        let strain_dev = step.strain1.deviator();

        // damage from the loss of confinement
        ppz.min_pressure = f64::min(ppz.min_pressure, stress.volume());
        let p_max = -ppz.min_pressure;
        let p = -stress.volume();
        ppz.damage = if p_max > 0.0 {
            (1.0 - p / p_max).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let eta = stress.deviator_ratio(residual_pressure);
        let dgamma = increment.octahedral_shear(true);
        let dilating = loading && eta >= self.pt_ratio && !self.is_critical_state(step, residual_pressure);

        if dilating {
            if ppz.phase == PpzPhase::NeverDilated {
                ppz.cumulative_dilation = 0.0;
            }
            ppz.cumulative_dilation += dgamma;
            ppz.max_cumulative_dilation = f64::max(ppz.max_cumulative_dilation, ppz.cumulative_dilation);
            ppz.pivot_strain = *strain_dev;
            ppz.phase = PpzPhase::ActivelyDilating;
            return;
        }

        match ppz.phase {
            PpzPhase::ActivelyDilating => {
                // open the PPZ around the pivot, shifted towards the new loading direction;
                // the pivot side spans the last dilation and the opposite side the largest one
                let radius = ppz.cumulative_dilation;
                let direction = increment.unit_deviator();
                ppz.center_strain = ppz.pivot_strain + direction * (radius * f64::sqrt(3.0) / 2.0);
                ppz.pre_ppz_strain = radius;
                ppz.opposite_pre_ppz_strain = ppz.max_cumulative_dilation;
                ppz.cumulative_translation = 0.0;
                ppz.phase = PpzPhase::InsidePpz;
            }
            PpzPhase::InsidePpz | PpzPhase::InsidePpzTranslated => {
                let offset = strain_dev - ppz.center_strain;
                let towards_pivot = dev_ddot(&offset, &(ppz.pivot_strain - ppz.center_strain)) >= 0.0;
                let radius = if towards_pivot {
                    ppz.pre_ppz_strain
                } else {
                    ppz.opposite_pre_ppz_strain
                };
                if octahedral_strain(&offset) > radius {
                    // leave the PPZ and re-pivot
                    ppz.phase = PpzPhase::NeverDilated;
                    ppz.cumulative_dilation = 0.0;
                    ppz.cumulative_translation = 0.0;
                    ppz.pivot_strain = *strain_dev;
                    ppz.center_strain = *strain_dev;
                    return;
                }
                let budget = if p_max > 0.0 {
                    let [liq1, liq2] = self.liquefaction;
                    liq1 * ppz.damage * f64::powf(p_max / self.atmospheric_pressure, -liq2)
                } else {
                    0.0
                };
                if dgamma > 0.0 && ppz.cumulative_translation + dgamma <= budget {
                    ppz.center_strain += increment.deviator();
                    ppz.cumulative_translation += dgamma;
                    ppz.phase = PpzPhase::InsidePpzTranslated;
                }
            }
            PpzPhase::NeverDilated => (),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dilatancy, SubStep};
    use crate::base::ParamPressureDepend;
    use crate::material::{PpzPhase, PpzState, T2Vector};
    use approx::assert_abs_diff_eq;

    fn sample_param() -> ParamPressureDepend {
        ParamPressureDepend {
            pt_angle: 26.0,
            contraction: [0.013, 5.0, 0.0],
            dilation: [0.3, 3.0, 0.0],
            liquefaction: [1.0, 0.0],
            void_ratio: 0.6,
            critical_state: [0.9, 0.02, 0.7],
            atmospheric_pressure: 101.0,
            consolidation: [1.0, 0.0],
        }
    }

    fn pure_shear_stress(p: f64, s12: f64) -> T2Vector {
        T2Vector::new(&[-p, -p, -p, s12, 0.0, 0.0])
    }

    fn shear_strain(gamma: f64) -> T2Vector {
        T2Vector::new_engineering(&[0.0, 0.0, 0.0, gamma, 0.0, 0.0])
    }

    #[test]
    fn new_works() {
        let mut warnings = Vec::new();
        let dil = Dilatancy::new(&sample_param(), 33.0, &mut warnings).unwrap();
        assert!(warnings.is_empty());
        let sin = 26.0_f64.to_radians().sin();
        assert_abs_diff_eq!(dil.pt_ratio(), 6.0 * sin / (3.0 - sin), epsilon = 1e-15);

        let dil = Dilatancy::new(&sample_param(), 20.0, &mut warnings).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(dil.pt_angle(), 20.0);
    }

    #[test]
    fn new_captures_errors() {
        let mut warnings = Vec::new();
        let mut param = sample_param();
        param.pt_angle = 0.0;
        assert!(Dilatancy::new(&param, 33.0, &mut warnings).is_err());
        let mut param = sample_param();
        param.contraction[1] = -1.0;
        assert!(Dilatancy::new(&param, 33.0, &mut warnings).is_err());
        let mut param = sample_param();
        param.void_ratio = 0.0;
        assert!(Dilatancy::new(&param, 33.0, &mut warnings).is_err());
        let mut param = sample_param();
        param.atmospheric_pressure = -101.0;
        assert!(Dilatancy::new(&param, 33.0, &mut warnings).is_err());
    }

    #[test]
    fn critical_state_works() {
        let mut warnings = Vec::new();
        let mut param = sample_param();
        param.critical_state = [0.601, 0.0, 0.0]; // ec = 0.601 for any pressure
        let dil = Dilatancy::new(&param, 33.0, &mut warnings).unwrap();
        let stress = pure_shear_stress(100.0, 80.0);
        assert_abs_diff_eq!(dil.critical_void_ratio(&stress, 0.01), 0.601, epsilon = 1e-15);

        // e: 0.6 → 0.6 + 1.6 × 0.001 = 0.6016 crosses ec = 0.601
        let dilated = T2Vector::new(&[0.001 / 3.0, 0.001 / 3.0, 0.001 / 3.0, 0.0, 0.0, 0.0]);
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: dilated,
        };
        assert!(dil.is_critical_state(&step, 0.01));

        // no crossing: denser and getting denser
        let compressed = dilated * -1.0;
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: compressed,
        };
        assert!(!dil.is_critical_state(&step, 0.01));
    }

    #[test]
    fn plastic_potential_is_zero_at_critical_state() {
        let mut warnings = Vec::new();
        let mut param = sample_param();
        param.critical_state = [0.601, 0.0, 0.0];
        let dil = Dilatancy::new(&param, 33.0, &mut warnings).unwrap();
        let ppz = PpzState::new();
        let dilated = T2Vector::new(&[0.001 / 3.0, 0.001 / 3.0, 0.001 / 3.0, 0.0, 0.0, 0.0]);

        // above the PT line (η ≈ 1.2 > ηPT ≈ 1.03) and loading
        let stress = pure_shear_stress(100.0, 70.0);
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: dilated,
        };
        assert!(dil.is_critical_state(&step, 0.01));
        assert_eq!(dil.plastic_potential(&step, &ppz, 0.01, true), 0.0);

        // below the PT line (contraction branch)
        let stress = pure_shear_stress(100.0, 20.0);
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: dilated,
        };
        assert_eq!(dil.plastic_potential(&step, &ppz, 0.01, true), 0.0);
    }

    #[test]
    fn plastic_potential_works() {
        let mut warnings = Vec::new();
        let dil = Dilatancy::new(&sample_param(), 33.0, &mut warnings).unwrap();
        let mut ppz = PpzState::new();
        let pres = 0.01;

        // contraction below the PT line
        let stress = pure_shear_stress(101.0, 20.0);
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: shear_strain(0.001),
        };
        let eta = stress.deviator_ratio(pres);
        let pp = dil.plastic_potential(&step, &ppz, pres, true);
        let p_norm = 101.0 / 101.0;
        assert_abs_diff_eq!(pp, -(1.0 - eta / dil.pt_ratio()) * 0.013 * f64::powf(p_norm, 0.0), epsilon = 1e-15);
        assert!(pp < 0.0);

        // unloading contracts more
        let pp_unload = dil.plastic_potential(&step, &ppz, pres, false);
        assert!(pp_unload < pp);

        // dilation above the PT line
        let stress = pure_shear_stress(101.0, 70.0);
        let step = SubStep {
            stress0: stress,
            strain0: T2Vector::new_zero(),
            stress1: stress,
            strain1: shear_strain(0.001),
        };
        let eta = stress.deviator_ratio(pres);
        assert!(eta > dil.pt_ratio());
        ppz.cumulative_dilation = 0.01;
        let pp = dil.plastic_potential(&step, &ppz, pres, true);
        assert_abs_diff_eq!(pp, (eta / dil.pt_ratio() - 1.0) * 0.3 * (1.0 + 3.0 * 0.01), epsilon = 1e-14);

        // neutral inside the PPZ (not dilating)
        ppz.phase = PpzPhase::InsidePpz;
        assert_eq!(dil.plastic_potential(&step, &ppz, pres, false), 0.0);
    }

    #[test]
    fn update_ppz_follows_the_phase_sequence() {
        let mut warnings = Vec::new();
        let dil = Dilatancy::new(&sample_param(), 33.0, &mut warnings).unwrap();
        let mut ppz = PpzState::new();
        let pres = 0.01;
        let high = pure_shear_stress(101.0, 70.0);
        let low = pure_shear_stress(101.0, 10.0);
        let dgamma = 0.001;

        // below the PT line: nothing happens
        let step = SubStep {
            stress0: low,
            strain0: T2Vector::new_zero(),
            stress1: low,
            strain1: shear_strain(dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(dgamma), pres, true);
        assert_eq!(ppz.phase, PpzPhase::NeverDilated);
        assert_eq!(ppz.min_pressure, -101.0);
        assert_eq!(ppz.damage, 0.0);

        // dilation
        let mut previous = 0.0;
        for i in 1..5 {
            let step = SubStep {
                stress0: high,
                strain0: shear_strain(i as f64 * dgamma),
                stress1: high,
                strain1: shear_strain((i + 1) as f64 * dgamma),
            };
            dil.update_ppz(&mut ppz, &step, &shear_strain(dgamma), pres, true);
            assert_eq!(ppz.phase, PpzPhase::ActivelyDilating);
            assert!(ppz.cumulative_dilation > previous);
            previous = ppz.cumulative_dilation;
        }
        assert_abs_diff_eq!(previous, 4.0 * shear_strain(dgamma).octahedral_shear(true), epsilon = 1e-15);
        assert_eq!(ppz.max_cumulative_dilation, previous);

        // reversal opens the PPZ
        let step = SubStep {
            stress0: high,
            strain0: shear_strain(5.0 * dgamma),
            stress1: low,
            strain1: shear_strain(4.0 * dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(-dgamma), pres, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpz);
        assert_eq!(ppz.pre_ppz_strain, previous);
        assert_eq!(ppz.opposite_pre_ppz_strain, previous);

        // no loss of confinement: no translation
        let step = SubStep {
            stress0: low,
            strain0: shear_strain(4.0 * dgamma),
            stress1: low,
            strain1: shear_strain(3.0 * dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(-dgamma), pres, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpz);

        // far away: leaves the PPZ
        let step = SubStep {
            stress0: low,
            strain0: shear_strain(3.0 * dgamma),
            stress1: low,
            strain1: shear_strain(-20.0 * dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(-dgamma), pres, false);
        assert_eq!(ppz.phase, PpzPhase::NeverDilated);
        assert_eq!(ppz.cumulative_dilation, 0.0);
        assert_eq!(ppz.max_cumulative_dilation, previous);
    }

    #[test]
    fn ppz_radii_differ_after_a_smaller_dilation() {
        let mut warnings = Vec::new();
        let dil = Dilatancy::new(&sample_param(), 33.0, &mut warnings).unwrap();
        let mut ppz = PpzState::new();
        let pres = 0.01;
        let low = pure_shear_stress(101.0, 10.0);
        let dgamma = 0.001;
        let d = shear_strain(dgamma).octahedral_shear(true);
        let update = |ppz: &mut PpzState, stress: T2Vector, from: f64, to: f64, loading: bool| {
            let step = SubStep {
                stress0: stress,
                strain0: shear_strain(from * dgamma),
                stress1: stress,
                strain1: shear_strain(to * dgamma),
            };
            let increment = shear_strain((to - from) * dgamma);
            dil.update_ppz(ppz, &step, &increment, pres, loading);
        };

        // first episode: four increments of dilation, then out of the PPZ
        for i in 1..5 {
            update(&mut ppz, pure_shear_stress(101.0, 70.0), i as f64, (i + 1) as f64, true);
        }
        update(&mut ppz, low, 5.0, 4.0, false);
        update(&mut ppz, low, 4.0, -20.0, false);
        assert_eq!(ppz.phase, PpzPhase::NeverDilated);
        assert_abs_diff_eq!(ppz.max_cumulative_dilation, 4.0 * d, epsilon = 1e-15);

        // second episode: two increments in the opposite direction
        update(&mut ppz, pure_shear_stress(101.0, -70.0), -20.0, -21.0, true);
        update(&mut ppz, pure_shear_stress(101.0, -70.0), -21.0, -22.0, true);
        assert_eq!(ppz.phase, PpzPhase::ActivelyDilating);
        assert_abs_diff_eq!(ppz.cumulative_dilation, 2.0 * d, epsilon = 1e-15);

        // reversal: the pivot side uses the last dilation and the opposite side the largest one
        update(&mut ppz, low, -22.0, -21.0, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpz);
        assert_eq!(ppz.pre_ppz_strain, ppz.cumulative_dilation);
        assert_eq!(ppz.opposite_pre_ppz_strain, ppz.max_cumulative_dilation);
        assert!(ppz.pre_ppz_strain < ppz.opposite_pre_ppz_strain);
        assert_abs_diff_eq!(ppz.center_strain[3], -0.010, epsilon = 1e-15);

        // 2.45e-3 away from the center on the opposite side: inside (radius 4d = 3.27e-3)
        update(&mut ppz, low, -21.0, -17.0, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpz);

        // 2.45e-3 away from the center on the pivot side: outside (radius 2d = 1.63e-3)
        update(&mut ppz, low, -17.0, -23.0, false);
        assert_eq!(ppz.phase, PpzPhase::NeverDilated);
    }

    #[test]
    fn update_ppz_translates_with_damage() {
        let mut warnings = Vec::new();
        let dil = Dilatancy::new(&sample_param(), 33.0, &mut warnings).unwrap();
        let mut ppz = PpzState::new();
        let pres = 0.01;
        let high = pure_shear_stress(101.0, 70.0);
        let dgamma = 0.001;
        for i in 0..5 {
            let step = SubStep {
                stress0: high,
                strain0: shear_strain(i as f64 * dgamma),
                stress1: high,
                strain1: shear_strain((i + 1) as f64 * dgamma),
            };
            dil.update_ppz(&mut ppz, &step, &shear_strain(dgamma), pres, true);
        }

        // the confinement drops to one half: damage = 0.5
        let low = pure_shear_stress(50.5, 5.0);
        let step = SubStep {
            stress0: high,
            strain0: shear_strain(5.0 * dgamma),
            stress1: low,
            strain1: shear_strain(4.9 * dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(-0.1 * dgamma), pres, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpz);
        assert_abs_diff_eq!(ppz.damage, 0.5, epsilon = 1e-15);

        let center = ppz.center_strain;
        let step = SubStep {
            stress0: low,
            strain0: shear_strain(4.9 * dgamma),
            stress1: low,
            strain1: shear_strain(4.8 * dgamma),
        };
        dil.update_ppz(&mut ppz, &step, &shear_strain(-0.1 * dgamma), pres, false);
        assert_eq!(ppz.phase, PpzPhase::InsidePpzTranslated);
        assert!(ppz.cumulative_translation > 0.0);
        assert_abs_diff_eq!(ppz.center_strain[3], center[3] - 0.05 * dgamma, epsilon = 1e-15);
    }
}
