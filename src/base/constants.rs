/// Ceiling of the plastic modulus (also used for nearly elastic segments of the backbone)
pub const UP_LIMIT: f64 = 1.0e20;

/// Minimum value of the pressure-dependence factor of the elastic moduli
pub const MIN_MODULUS_FACTOR: f64 = 1.0e-4;

/// Minimum residual pressure as a fraction of the reference pressure magnitude
pub const MIN_RESIDUAL_PRESSURE_RATIO: f64 = 1.0e-4;

/// Minimum cone height as a fraction of the residual pressure
pub const MIN_CONE_HEIGHT_RATIO: f64 = 1.0e-2;

/// Cone height (fraction of the residual pressure) below which the stress is held at the apex
///
/// Beyond this threshold the mean stress has passed the tip of the cones (volumetric
/// extension); the stress is then placed on the hydrostatic axis of the innermost surface
/// at this height. It must exceed [MIN_CONE_HEIGHT_RATIO] so that the cone height is never floored
/// while the surfaces are in use.
pub const APEX_CONE_HEIGHT_RATIO: f64 = 2.0e-2;

/// Maximum number of yield surfaces
pub const MAX_N_SURFACES: usize = 100;

/// Maximum number of iterations of the radial scaling onto the failure surface
pub const MAX_SCALING_ITERATIONS: usize = 10;

/// Lengths below this value are treated as zero
pub const LOW_LIMIT: f64 = 1.0e-20;
