use super::{dev_ddot, T2Vector, Vec6};
use crate::base::LOW_LIMIT;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Holds one of the nested yield surfaces
///
/// The surface is a cone in stress-ratio space (or a cylinder when the cone height is constant):
///
/// ```text
/// f = √(3/2 (s - h α) && (s - h α)) / h - M
/// ```
///
/// where `α` is the center (deviator of stress ratios), `M` the size and `h` the cone height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YieldSurface {
    center: Vec6,
    size: f64,
    plastic_modulus: f64,
}

impl YieldSurface {
    /// Allocates a new surface centered at the origin
    pub fn new(size: f64, plastic_modulus: f64) -> Self {
        YieldSurface {
            center: Vec6::zeros(),
            size,
            plastic_modulus,
        }
    }

    /// Returns the center α
    pub fn center(&self) -> &Vec6 {
        &self.center
    }

    /// Returns the size M
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Returns the plastic modulus H' at the reference pressure
    pub fn plastic_modulus(&self) -> f64 {
        self.plastic_modulus
    }

    pub(crate) fn set_center(&mut self, center: &Vec6) {
        self.center = *center;
    }

    /// Returns the radius √(3/2 ξ && ξ) of the stress point measured from the center
    pub fn ratio_distance(&self, stress: &T2Vector, cone_height: f64) -> f64 {
        let xi = stress.deviator() - self.center * cone_height;
        (1.5 * dev_ddot(&xi, &xi)).sqrt() / cone_height
    }

    /// Evaluates the yield function
    pub fn yield_function(&self, stress: &T2Vector, cone_height: f64) -> f64 {
        self.ratio_distance(stress, cone_height) - self.size
    }

    /// Returns the radial projection of the stress onto the surface (same volumetric part)
    pub fn contact_stress(&self, stress: &T2Vector, cone_height: f64) -> Result<T2Vector> {
        let center = self.center * cone_height;
        let xi = stress.deviator() - center;
        let radius = (1.5 * dev_ddot(&xi, &xi)).sqrt();
        if radius < LOW_LIMIT {
            return Err(Error::Consistency(
                "cannot project a stress located at the center of the surface".to_string(),
            ));
        }
        let dev = center + xi * (self.size * cone_height / radius);
        Ok(T2Vector::from_deviator(&dev, stress.volume()))
    }

    /// Returns the unit outward normal at a stress point on the surface
    ///
    /// With `pressure_dependent = true` the cone height is `pres - p` and the normal
    /// gains the volumetric component `(3 ξ && α + 2 M² h) / 3`.
    pub fn outward_normal(&self, stress: &T2Vector, cone_height: f64, pressure_dependent: bool) -> Result<T2Vector> {
        let xi = stress.deviator() - self.center * cone_height;
        let dev = xi * 3.0;
        let volume = if pressure_dependent {
            (3.0 * dev_ddot(&xi, &self.center) + 2.0 * self.size * self.size * cone_height) / 3.0
        } else {
            0.0
        };
        let normal = T2Vector::from_deviator(&dev, volume);
        let len = normal.t2_length();
        if len < LOW_LIMIT || !len.is_finite() {
            return Err(Error::Consistency("cannot compute the outward normal".to_string()));
        }
        Ok(normal * (1.0 / len))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
