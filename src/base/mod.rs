//! Implements the base structures: parameters, strain orders and numerical constants

mod constants;
mod parameters;
mod sample_params;
mod strain_order;
pub use crate::base::constants::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::strain_order::*;
