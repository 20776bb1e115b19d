use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Holds the algorithmic controls of the multi-yield-surface integrator
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Prints the warnings produced while building the material parameters
    pub verbose: bool,

    /// Octahedral (engineering) shear strain increment limiting the size of each sub-increment
    pub sub_increment_octahedral_strain: f64,

    /// Volumetric strain increment limiting the size of each sub-increment
    pub sub_increment_volumetric_strain: f64,

    /// Maximum number of sub-increments per call
    pub max_sub_increments: usize,

    /// Tolerance on the yield function used by the radial scaling onto the failure surface
    pub yield_tolerance: f64,

    /// Roots of the active-surface translation within this distance from 1 are snapped to 1
    pub root_snap_tolerance: f64,
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            verbose: false,
            sub_increment_octahedral_strain: 1.0e-4,
            sub_increment_volumetric_strain: 1.0e-5,
            max_sub_increments: 1000,
            yield_tolerance: 1.0e-8,
            root_snap_tolerance: 1.0e-6,
        }
    }

    /// Enables or disables the printing of warnings
    pub fn set_verbose(&mut self, flag: bool) -> &mut Self {
        self.verbose = flag;
        self
    }

    /// Sets the strain thresholds controlling the size of the sub-increments
    pub fn set_sub_increment_thresholds(&mut self, octahedral: f64, volumetric: f64) -> Result<&mut Self> {
        if octahedral <= 0.0 || volumetric <= 0.0 {
            return Err(Error::Configuration(
                "sub-increment strain thresholds must be positive".to_string(),
            ));
        }
        self.sub_increment_octahedral_strain = octahedral;
        self.sub_increment_volumetric_strain = volumetric;
        Ok(self)
    }

    /// Sets the maximum number of sub-increments per call
    pub fn set_max_sub_increments(&mut self, value: usize) -> Result<&mut Self> {
        if value < 1 {
            return Err(Error::Configuration(
                "the maximum number of sub-increments must be at least 1".to_string(),
            ));
        }
        self.max_sub_increments = value;
        Ok(self)
    }

    /// Sets the tolerance on the yield function
    pub fn set_yield_tolerance(&mut self, value: f64) -> Result<&mut Self> {
        if value <= 0.0 || value >= 1.0 {
            return Err(Error::Configuration("yield tolerance must be in (0, 1)".to_string()));
        }
        self.yield_tolerance = value;
        Ok(self)
    }

    /// Sets the tolerance used to snap near-one roots of the active-surface translation
    pub fn set_root_snap_tolerance(&mut self, value: f64) -> Result<&mut Self> {
        if value < 0.0 || value >= 1.0 {
            return Err(Error::Configuration("root snap tolerance must be in [0, 1)".to_string()));
        }
        self.root_snap_tolerance = value;
        Ok(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
