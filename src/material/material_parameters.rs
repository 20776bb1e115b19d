use super::{Dilatancy, Settings, T2Vector, YieldSurface};
use crate::base::{ParamBackbone, ParamMultiYield, ParamSoil};
use crate::base::{APEX_CONE_HEIGHT_RATIO, MAX_N_SURFACES, MIN_CONE_HEIGHT_RATIO, MIN_MODULUS_FACTOR};
use crate::base::{MIN_RESIDUAL_PRESSURE_RATIO, UP_LIMIT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Holds the shear strength and backbone discretization computed from the parameters
struct SurfaceSetup {
    friction_angle: f64,
    cohesion: f64,
    residual_pressure: f64,
    ref_cone_height: f64,
    peak_strength: f64,
    strains: Vec<f64>,
    strengths: Vec<f64>,
}

/// Holds the immutable parameters shared by all instances made of the same soil
///
/// The parameters are validated on construction and the nested yield surfaces are
/// generated from the backbone curve (hyperbolic or user-defined).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    shear_modulus: f64,
    bulk_modulus: f64,
    friction_angle: f64,
    cohesion: f64,
    peak_shear_strain: f64,
    ref_pressure: f64,
    press_depend_coeff: f64,
    residual_pressure: f64,
    ref_cone_height: f64,
    peak_strength: f64,
    surfaces: Vec<YieldSurface>,
    backbone: Vec<(f64, f64)>,
    min_spacing: f64,
    dilatancy: Option<Dilatancy>,
    settings: Settings,
    warnings: Vec<String>,
}

/// Returns the residual pressure `3c/(√2 M)` floored at a fraction of the reference pressure
fn residual_pressure(cohesion: f64, mm: f64, ref_confinement: f64) -> f64 {
    let floor = MIN_RESIDUAL_PRESSURE_RATIO * ref_confinement;
    if mm <= 0.0 {
        return floor;
    }
    f64::max(3.0 * cohesion / (SQRT_2 * mm), floor)
}

/// Returns the plastic modulus `2G E / (2G - E)` clamped to [0, UP_LIMIT]
fn plastic_modulus(gg: f64, ee: f64) -> f64 {
    let den = 2.0 * gg - ee;
    if den <= 0.0 {
        return UP_LIMIT;
    }
    (2.0 * gg * ee / den).clamp(0.0, UP_LIMIT)
}

/// Returns the size M = 6 sin φ / (3 - sin φ) of the failure cone
fn cone_size(friction_angle: f64) -> Result<f64> {
    let sin_phi = friction_angle.to_radians().sin();
    if !(sin_phi > 0.0 && sin_phi < 1.0) {
        return Err(Error::Configuration(format!(
            "friction angle {}° implies sin φ outside (0, 1)",
            friction_angle
        )));
    }
    Ok(6.0 * sin_phi / (3.0 - sin_phi))
}

/// Generates the surfaces along the hyperbolic backbone
fn setup_hyperbolic(base: &ParamMultiYield) -> Result<SurfaceSetup> {
    let n = base.n_surfaces;
    if n < 1 || n > MAX_N_SURFACES {
        return Err(Error::Configuration(format!(
            "number of yield surfaces must be in [1, {}]; got {}",
            MAX_N_SURFACES, n
        )));
    }
    let gg = base.shear_modulus;
    let p_ref = -base.ref_pressure;
    let (residual, ref_cone_height, peak_strength) = if base.friction_angle > 0.0 {
        let mm = cone_size(base.friction_angle)?;
        let residual = residual_pressure(base.cohesion, mm, p_ref);
        let height = p_ref + residual;
        (residual, height, SQRT_2 / 3.0 * mm * height)
    } else {
        (MIN_RESIDUAL_PRESSURE_RATIO * p_ref, 1.0, base.cohesion)
    };

    // reference strain of the hyperbola τ = G γ γr / (γr + γ)
    let gamma_peak = base.peak_shear_strain;
    let den = gg * gamma_peak - peak_strength;
    if den <= 0.0 {
        return Err(Error::Configuration(
            "peak_shear_strain is too small for the peak shear strength (negative reference strain)".to_string(),
        ));
    }
    let gamma_ref = peak_strength * gamma_peak / den;

    let mut strains = Vec::with_capacity(n);
    let mut strengths = Vec::with_capacity(n);
    for i in 1..=n {
        let tau = (i as f64) * peak_strength / (n as f64);
        strengths.push(tau);
        strains.push(tau * gamma_ref / (gg * gamma_ref - tau));
    }
    Ok(SurfaceSetup {
        friction_angle: base.friction_angle,
        cohesion: base.cohesion,
        residual_pressure: residual,
        ref_cone_height,
        peak_strength,
        strains,
        strengths,
    })
}

/// Generates the surfaces from a user-defined backbone curve
fn setup_user_backbone(
    base: &ParamMultiYield,
    backbone: &ParamBackbone,
    warnings: &mut Vec<String>,
) -> Result<SurfaceSetup> {
    let n = backbone.points.len();
    if n < 1 || n > MAX_N_SURFACES {
        return Err(Error::Configuration(format!(
            "backbone curve must have between 1 and {} points; got {}",
            MAX_N_SURFACES, n
        )));
    }
    if n != base.n_surfaces {
        warnings.push(format!(
            "number of yield surfaces set to {} (one per backbone point)",
            n
        ));
    }
    let gg = base.shear_modulus;
    let mut strains = Vec::with_capacity(n);
    let mut strengths = Vec::with_capacity(n);
    for (i, &(gamma, ratio)) in backbone.points.iter().enumerate() {
        if !(gamma > 0.0) || !(ratio > 0.0) {
            return Err(Error::Configuration(format!(
                "backbone point {} must have positive strain and modulus ratio",
                i
            )));
        }
        let tau = gg * gamma * ratio;
        if i > 0 && (gamma <= strains[i - 1] || tau <= strengths[i - 1]) {
            return Err(Error::Configuration(format!(
                "backbone point {} must have larger strain and shear stress than the previous one",
                i
            )));
        }
        strains.push(gamma);
        strengths.push(tau);
    }
    let peak_strength = strengths[n - 1];
    let p_ref = -base.ref_pressure;

    if base.friction_angle > 0.0 {
        let mut cohesion = base.cohesion;
        let mut mm = 3.0 * (peak_strength - cohesion) / (SQRT_2 * p_ref);
        if mm <= 0.0 {
            warnings.push(format!(
                "cohesion {} ignored because it exceeds the peak strength {} of the backbone curve",
                cohesion, peak_strength
            ));
            cohesion = 0.0;
            mm = 3.0 * peak_strength / (SQRT_2 * p_ref);
        }
        let sin_phi = 3.0 * mm / (6.0 + mm);
        if !(sin_phi > 0.0 && sin_phi < 1.0) {
            return Err(Error::Configuration(
                "friction angle derived from the backbone curve implies sin φ outside (0, 1)".to_string(),
            ));
        }
        let friction_angle = sin_phi.asin().to_degrees();
        if (friction_angle - base.friction_angle).abs() > 1e-6 {
            warnings.push(format!(
                "friction angle re-derived from the backbone curve: {}°",
                friction_angle
            ));
        }
        let residual = residual_pressure(cohesion, mm, p_ref);
        Ok(SurfaceSetup {
            friction_angle,
            cohesion,
            residual_pressure: residual,
            ref_cone_height: p_ref + residual,
            peak_strength,
            strains,
            strengths,
        })
    } else {
        if base.cohesion > 0.0 && base.cohesion != peak_strength {
            warnings.push(format!(
                "cohesion set to the peak strength {} of the backbone curve",
                peak_strength
            ));
        }
        Ok(SurfaceSetup {
            friction_angle: 0.0,
            cohesion: peak_strength,
            residual_pressure: MIN_RESIDUAL_PRESSURE_RATIO * p_ref,
            ref_cone_height: 1.0,
            peak_strength,
            strains,
            strengths,
        })
    }
}

impl MaterialParameters {
    /// Allocates a new instance after validating the parameters
    pub fn new(param: &ParamSoil, settings: &Settings) -> Result<Self> {
        let (base, param_dilatancy) = match param {
            ParamSoil::PressureIndepend { base } => (base, None),
            ParamSoil::PressureDepend { base, dilatancy } => (base, Some(dilatancy)),
        };
        let pressure_dependent = param_dilatancy.is_some();

        // check
        if !(base.shear_modulus > 0.0) {
            return Err(Error::Configuration(
                "shear_modulus parameter for the multi-yield model is invalid".to_string(),
            ));
        }
        if !(base.bulk_modulus > 0.0) {
            return Err(Error::Configuration(
                "bulk_modulus parameter for the multi-yield model is invalid".to_string(),
            ));
        }
        if !(base.peak_shear_strain > 0.0) {
            return Err(Error::Configuration(
                "peak_shear_strain parameter for the multi-yield model must be positive".to_string(),
            ));
        }
        if !(base.ref_pressure < 0.0) {
            return Err(Error::Configuration(
                "ref_pressure parameter for the multi-yield model must be negative (compressive)".to_string(),
            ));
        }
        if !(base.press_depend_coeff >= 0.0) {
            return Err(Error::Configuration(
                "press_depend_coeff parameter for the multi-yield model is invalid".to_string(),
            ));
        }
        if !(base.cohesion >= 0.0) {
            return Err(Error::Configuration(
                "cohesion parameter for the multi-yield model is invalid".to_string(),
            ));
        }
        let phi = base.friction_angle;
        if pressure_dependent {
            if !(phi > 0.0 && phi < 90.0) {
                return Err(Error::Configuration(
                    "friction_angle for the pressure-dependent model must be in (0°, 90°)".to_string(),
                ));
            }
        } else {
            if !(phi >= 0.0 && phi < 90.0) {
                return Err(Error::Configuration(
                    "friction_angle for the pressure-independent model must be in [0°, 90°)".to_string(),
                ));
            }
            if phi == 0.0 && base.backbone.is_none() && !(base.cohesion > 0.0) {
                return Err(Error::Configuration(
                    "cohesion must be positive when the friction angle is zero".to_string(),
                ));
            }
        }

        // backbone
        let mut warnings = Vec::new();
        let setup = match &base.backbone {
            Some(backbone) => setup_user_backbone(base, backbone, &mut warnings)?,
            None => setup_hyperbolic(base)?,
        };

        // surfaces
        let gg = base.shear_modulus;
        let n = setup.strengths.len();
        let mut surfaces = Vec::with_capacity(n);
        let mut min_spacing = f64::MAX;
        let mut previous_size = 0.0;
        for i in 0..n {
            let size = 3.0 * setup.strengths[i] / (SQRT_2 * setup.ref_cone_height);
            let hh = if i == n - 1 {
                0.0
            } else {
                let ee = 2.0 * (setup.strengths[i + 1] - setup.strengths[i]) / (setup.strains[i + 1] - setup.strains[i]);
                plastic_modulus(gg, ee)
            };
            min_spacing = f64::min(min_spacing, size - previous_size);
            previous_size = size;
            surfaces.push(YieldSurface::new(size, hh));
        }

        // dilatancy
        let dilatancy = match param_dilatancy {
            Some(p) => Some(Dilatancy::new(p, setup.friction_angle, &mut warnings)?),
            None => None,
        };

        if settings.verbose {
            for warning in &warnings {
                println!("WARNING: {}", warning);
            }
        }

        let mut backbone = Vec::with_capacity(n + 1);
        backbone.push((0.0, 0.0));
        for i in 0..n {
            backbone.push((setup.strains[i], setup.strengths[i]));
        }

        Ok(MaterialParameters {
            shear_modulus: gg,
            bulk_modulus: base.bulk_modulus,
            friction_angle: setup.friction_angle,
            cohesion: setup.cohesion,
            peak_shear_strain: base.peak_shear_strain,
            ref_pressure: base.ref_pressure,
            press_depend_coeff: base.press_depend_coeff,
            residual_pressure: setup.residual_pressure,
            ref_cone_height: setup.ref_cone_height,
            peak_strength: setup.peak_strength,
            surfaces,
            backbone,
            min_spacing,
            dilatancy,
            settings: *settings,
            warnings,
        })
    }

    /// Indicates the pressure-dependent variant
    pub fn pressure_dependent(&self) -> bool {
        self.dilatancy.is_some()
    }

    /// Returns the reference shear modulus
    pub fn shear_modulus(&self) -> f64 {
        self.shear_modulus
    }

    /// Returns the reference bulk modulus
    pub fn bulk_modulus(&self) -> f64 {
        self.bulk_modulus
    }

    /// Returns the friction angle in degrees (possibly re-derived from the backbone curve)
    pub fn friction_angle(&self) -> f64 {
        self.friction_angle
    }

    /// Returns the cohesion (possibly modified by the backbone curve)
    pub fn cohesion(&self) -> f64 {
        self.cohesion
    }

    /// Returns the peak octahedral shear strain
    pub fn peak_shear_strain(&self) -> f64 {
        self.peak_shear_strain
    }

    /// Returns the reference pressure (negative)
    pub fn ref_pressure(&self) -> f64 {
        self.ref_pressure
    }

    /// Returns the pressure-dependence exponent of the moduli
    pub fn press_depend_coeff(&self) -> f64 {
        self.press_depend_coeff
    }

    /// Returns the residual pressure (positive)
    pub fn residual_pressure(&self) -> f64 {
        self.residual_pressure
    }

    /// Returns the peak octahedral shear strength at the reference pressure
    pub fn peak_strength(&self) -> f64 {
        self.peak_strength
    }

    /// Returns the number of yield surfaces
    pub fn n_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns the virgin yield surfaces (surface m is at index m - 1)
    pub fn surfaces(&self) -> &[YieldSurface] {
        &self.surfaces
    }

    /// Returns the smallest distance between the sizes of consecutive surfaces (including the origin)
    pub fn min_surface_spacing(&self) -> f64 {
        self.min_spacing
    }

    /// Returns the dilatancy parameters (pressure-dependent variant only)
    pub fn dilatancy(&self) -> Option<&Dilatancy> {
        self.dilatancy.as_ref()
    }

    /// Returns the algorithmic controls
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the warnings produced while building the parameters
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the (octahedral shear strain, octahedral shear stress) pairs reproduced by the surfaces
    ///
    /// The first pair is the origin; pair m corresponds to surface m at the reference pressure.
    pub fn backbone(&self) -> &[(f64, f64)] {
        &self.backbone
    }

    /// Returns the cone height h used to normalize the deviatoric stress
    ///
    /// Pressure-dependent: `h = pres - p` (floored); pressure-independent: constant.
    pub fn cone_height(&self, stress: &T2Vector) -> f64 {
        if self.pressure_dependent() {
            let floor = MIN_CONE_HEIGHT_RATIO * self.residual_pressure;
            f64::max(self.residual_pressure - stress.volume(), floor)
        } else {
            self.ref_cone_height
        }
    }

    /// Returns the cone height at which the stress is held at the apex (pressure-dependent only)
    pub fn apex_height(&self) -> f64 {
        APEX_CONE_HEIGHT_RATIO * self.residual_pressure
    }

    /// Indicates that the mean stress has passed the apex cutoff of the cones
    pub fn is_beyond_apex(&self, stress: &T2Vector) -> bool {
        self.pressure_dependent() && self.residual_pressure - stress.volume() < self.apex_height()
    }

    /// Returns the pressure factor `((p' + pres)/(p'r + pres))^d` of the moduli (floored)
    pub fn modulus_factor(&self, stress: &T2Vector) -> f64 {
        if self.press_depend_coeff == 0.0 {
            return 1.0;
        }
        let ratio = (self.residual_pressure - stress.volume()) / (self.residual_pressure - self.ref_pressure);
        if ratio <= 0.0 {
            return MIN_MODULUS_FACTOR;
        }
        f64::max(f64::powf(ratio, self.press_depend_coeff), MIN_MODULUS_FACTOR)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
