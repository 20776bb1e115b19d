use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Holds the parameters shared by the pressure-independent and pressure-dependent models
///
/// Stresses and moduli must be given in consistent units (e.g., kPa).
/// Compression is negative; thus the reference pressure is a negative number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamMultiYield {
    /// Reference low-strain shear modulus Gr (at the reference pressure)
    pub shear_modulus: f64,

    /// Reference bulk modulus Br (at the reference pressure)
    pub bulk_modulus: f64,

    /// Friction angle φ in degrees
    ///
    /// The pressure-independent model also accepts φ = 0 (purely cohesive material).
    pub friction_angle: f64,

    /// Apparent cohesion c
    ///
    /// For φ = 0, this is the peak octahedral shear strength.
    pub cohesion: f64,

    /// Octahedral shear strain at which the peak strength is mobilized (at the reference pressure)
    pub peak_shear_strain: f64,

    /// Reference mean effective stress p'r (negative = compressive)
    pub ref_pressure: f64,

    /// Pressure-dependence exponent d of the moduli: `G = Gr ((p' + pres)/(p'r + pres))^d`
    pub press_depend_coeff: f64,

    /// Number of yield surfaces in [1, 100]
    ///
    /// Ignored when a user backbone is given (one surface per backbone point).
    pub n_surfaces: usize,

    /// Optional user-defined backbone curve replacing the hyperbolic one
    pub backbone: Option<ParamBackbone>,
}

/// Holds a user-defined backbone curve given as modulus-reduction samples
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamBackbone {
    /// Pairs of (octahedral shear strain γ, modulus ratio G/Gmax), with γ strictly increasing
    ///
    /// The shear stress of each sample is `τ = Gr γ (G/Gmax)`.
    pub points: Vec<(f64, f64)>,
}

/// Holds the additional parameters of the pressure-dependent model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamPressureDepend {
    /// Phase transformation angle φPT in degrees (≤ friction angle)
    pub pt_angle: f64,

    /// Contraction coefficients `[c1, c2, c3]`
    pub contraction: [f64; 3],

    /// Dilation coefficients `[d1, d2, d3]`
    pub dilation: [f64; 3],

    /// Liquefaction coefficients `[liq1, liq2]` controlling the translation of the PPZ
    pub liquefaction: [f64; 2],

    /// Initial void ratio e0
    pub void_ratio: f64,

    /// Critical state line coefficients `[cs1, cs2, cs3]`
    ///
    /// ```text
    /// ec = cs1 - cs2 (p'/pa)^cs3      (cs3 ≠ 0)
    /// ec = cs1 - cs2 ln(p'/pa)        (cs3 = 0)
    /// ```
    pub critical_state: [f64; 3],

    /// Atmospheric pressure pa (positive)
    pub atmospheric_pressure: f64,

    /// Vertical consolidation coefficients `[ca, cb]` scaling the bulk modulus in the
    /// scaled-elastic stage: `B = Br factor (ca + cb p'/pa)`
    pub consolidation: [f64; 2],
}

/// Holds the parameters of a soil material
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamSoil {
    /// Pressure-independent multi-yield model (e.g., clay under undrained loading)
    PressureIndepend {
        /// Common parameters
        base: ParamMultiYield,
    },

    /// Pressure-dependent multi-yield model with dilatancy (e.g., sand)
    PressureDepend {
        /// Common parameters
        base: ParamMultiYield,

        /// Dilatancy, liquefaction and critical state parameters
        dilatancy: ParamPressureDepend,
    },
}

impl ParamSoil {
    /// Returns the common parameters
    pub fn base(&self) -> &ParamMultiYield {
        match self {
            ParamSoil::PressureIndepend { base } => base,
            ParamSoil::PressureDepend { base, .. } => base,
        }
    }

    /// Reads the parameters from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Configuration(format!("cannot parse parameters: {}", e)))
    }

    /// Writes the parameters as a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Configuration(format!("cannot write parameters: {}", e)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
