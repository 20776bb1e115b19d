use super::{ParamBackbone, ParamMultiYield, ParamPressureDepend, ParamSoil};

/// Holds samples of soil parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a medium clay (pressure-independent; kPa)
    pub fn param_clay() -> ParamSoil {
        ParamSoil::PressureIndepend {
            base: ParamMultiYield {
                shear_modulus: 6.0e4,   // kPa
                bulk_modulus: 2.4e5,    // kPa
                friction_angle: 0.0,    // °
                cohesion: 37.0,         // kPa
                peak_shear_strain: 0.1, // [-]
                ref_pressure: -100.0,   // kPa
                press_depend_coeff: 0.0,
                n_surfaces: 20,
                backbone: None,
            },
        }
    }

    /// Returns sample parameters for a frictional clay (pressure-independent with φ > 0; kPa)
    pub fn param_clay_frictional() -> ParamSoil {
        ParamSoil::PressureIndepend {
            base: ParamMultiYield {
                shear_modulus: 6.0e4,
                bulk_modulus: 2.4e5,
                friction_angle: 20.0,
                cohesion: 10.0,
                peak_shear_strain: 0.1,
                ref_pressure: -100.0,
                press_depend_coeff: 0.0,
                n_surfaces: 20,
                backbone: None,
            },
        }
    }

    /// Returns sample parameters for a clay defined by a user backbone curve (kPa)
    pub fn param_clay_backbone() -> ParamSoil {
        ParamSoil::PressureIndepend {
            base: ParamMultiYield {
                shear_modulus: 6.0e4,
                bulk_modulus: 2.4e5,
                friction_angle: 0.0,
                cohesion: 0.0,
                peak_shear_strain: 0.1,
                ref_pressure: -100.0,
                press_depend_coeff: 0.0,
                n_surfaces: 5,
                backbone: Some(ParamBackbone {
                    points: vec![
                        (1.0e-4, 0.95),
                        (5.0e-4, 0.75),
                        (1.0e-3, 0.55),
                        (5.0e-3, 0.18),
                        (1.0e-2, 0.10),
                    ],
                }),
            },
        }
    }

    /// Returns sample parameters for a medium-dense sand (pressure-dependent; kPa)
    pub fn param_sand() -> ParamSoil {
        ParamSoil::PressureDepend {
            base: ParamMultiYield {
                shear_modulus: 7.5e4,
                bulk_modulus: 2.0e5,
                friction_angle: 33.0,
                cohesion: 0.1,
                peak_shear_strain: 0.1,
                ref_pressure: -101.0,
                press_depend_coeff: 0.5,
                n_surfaces: 20,
                backbone: None,
            },
            dilatancy: ParamPressureDepend {
                pt_angle: 26.0,
                contraction: [0.013, 5.0, 0.0],
                dilation: [0.3, 3.0, 0.0],
                liquefaction: [1.0, 0.0],
                void_ratio: 0.6,
                critical_state: [0.9, 0.02, 0.7],
                atmospheric_pressure: 101.0,
                consolidation: [1.0, 0.0],
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
