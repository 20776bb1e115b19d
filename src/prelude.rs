//! Makes available common structures needed to drive the soil models
//!
//! You may write `use soilmys::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{ParamBackbone, ParamMultiYield, ParamPressureDepend, ParamSoil, SampleParams, StrainOrder};
pub use crate::material::{LoadStage, MaterialParameters, MultiYieldMaterial, PpzPhase, Settings};
pub use crate::material::{StressStrainTrait, UpdateKey};
pub use crate::{Error, Result};
