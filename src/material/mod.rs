//! Implements the multi-yield-surface material models

mod dilatancy;
mod loading_path;
mod local_state;
mod material_parameters;
mod multi_yield;
mod return_mapping;
mod settings;
mod stress_strain_model;
mod t2vector;
mod tangent;
mod yield_surface;
pub use crate::material::dilatancy::*;
pub use crate::material::loading_path::*;
pub use crate::material::local_state::*;
pub use crate::material::material_parameters::*;
pub use crate::material::multi_yield::*;
pub use crate::material::settings::*;
pub use crate::material::stress_strain_model::*;
pub use crate::material::t2vector::*;
pub use crate::material::yield_surface::*;
