use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Defines a six-component vector in the order `[11, 22, 33, 12, 23, 31]`
pub type Vec6 = SVector<f64, 6>;

/// Returns the double-dot product of two symmetric second-order tensors stored as Vec6
///
/// ```text
/// a && b = a11 b11 + a22 b22 + a33 b33 + 2 (a12 b12 + a23 b23 + a31 b31)
/// ```
pub fn dev_ddot(a: &Vec6, b: &Vec6) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + 2.0 * (a[3] * b[3] + a[4] * b[4] + a[5] * b[5])
}

/// Holds a symmetric second-order tensor split into deviator and volumetric (mean) parts
///
/// The deviator is traceless and stores tensor (not engineering) shear components.
/// For stresses, `volume` is the mean stress `p = tr(σ)/3` (negative in compression);
/// for strains, `volume` is the mean strain `tr(ε)/3`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct T2Vector {
    deviator: Vec6,
    volume: f64,
}

impl T2Vector {
    /// Allocates a zero tensor
    pub fn new_zero() -> Self {
        T2Vector {
            deviator: Vec6::zeros(),
            volume: 0.0,
        }
    }

    /// Allocates a new instance from tensor components
    pub fn new(components: &[f64; 6]) -> Self {
        let volume = (components[0] + components[1] + components[2]) / 3.0;
        let mut deviator = Vec6::from_row_slice(components);
        for i in 0..3 {
            deviator[i] -= volume;
        }
        T2Vector { deviator, volume }
    }

    /// Allocates a new instance from strain components with engineering shear strains (γ = 2ε)
    pub fn new_engineering(components: &[f64; 6]) -> Self {
        let mut tensor = *components;
        for i in 3..6 {
            tensor[i] *= 0.5;
        }
        T2Vector::new(&tensor)
    }

    /// Allocates a new instance from a deviator and a volumetric part
    ///
    /// Any trace in `deviator` is removed.
    pub fn from_deviator(deviator: &Vec6, volume: f64) -> Self {
        let trace = (deviator[0] + deviator[1] + deviator[2]) / 3.0;
        let mut dev = *deviator;
        for i in 0..3 {
            dev[i] -= trace;
        }
        T2Vector { deviator: dev, volume }
    }

    /// Returns the deviator
    pub fn deviator(&self) -> &Vec6 {
        &self.deviator
    }

    /// Returns the volumetric (mean) part
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Returns the tensor components
    pub fn components(&self) -> [f64; 6] {
        let mut res = [0.0; 6];
        for i in 0..6 {
            res[i] = self.deviator[i];
        }
        for i in 0..3 {
            res[i] += self.volume;
        }
        res
    }

    /// Returns the components with engineering shear strains (γ = 2ε)
    pub fn engineering_components(&self) -> [f64; 6] {
        let mut res = self.components();
        for i in 3..6 {
            res[i] *= 2.0;
        }
        res
    }

    /// Returns the length of the deviator `√(s && s)`
    pub fn deviator_length(&self) -> f64 {
        dev_ddot(&self.deviator, &self.deviator).sqrt()
    }

    /// Returns the length of the whole tensor `√(t : t)`
    pub fn t2_length(&self) -> f64 {
        self.ddot(self).sqrt()
    }

    /// Returns the octahedral shear `√(⅓ s && s)`
    ///
    /// With `engineering = true` the value is doubled (octahedral engineering shear strain).
    pub fn octahedral_shear(&self, engineering: bool) -> f64 {
        let tau = (dev_ddot(&self.deviator, &self.deviator) / 3.0).sqrt();
        if engineering {
            2.0 * tau
        } else {
            tau
        }
    }

    /// Returns the deviatoric stress ratio `√(3/2 s && s) / (|p| + residual_pressure)`
    pub fn deviator_ratio(&self, residual_pressure: f64) -> f64 {
        let den = self.volume.abs() + residual_pressure;
        if den <= 0.0 {
            return 0.0;
        }
        (1.5 * dev_ddot(&self.deviator, &self.deviator)).sqrt() / den
    }

    /// Returns the full double-dot product `a : b = a_dev && b_dev + 3 a_vol b_vol`
    pub fn ddot(&self, other: &T2Vector) -> f64 {
        dev_ddot(&self.deviator, &other.deviator) + 3.0 * self.volume * other.volume
    }

    /// Returns the unit tensor in the direction of this tensor (zero if the length vanishes)
    pub fn unit_t2(&self) -> T2Vector {
        let len = self.t2_length();
        if len <= 0.0 {
            return T2Vector::new_zero();
        }
        *self * (1.0 / len)
    }

    /// Returns the unit deviator (zero if the deviator vanishes)
    pub fn unit_deviator(&self) -> Vec6 {
        let len = self.deviator_length();
        if len <= 0.0 {
            return Vec6::zeros();
        }
        self.deviator / len
    }

    /// Returns the angle (radians) between two tensors, or zero if either vanishes
    pub fn angle_between(&self, other: &T2Vector) -> f64 {
        let den = self.t2_length() * other.t2_length();
        if den <= 0.0 {
            return 0.0;
        }
        (self.ddot(other) / den).clamp(-1.0, 1.0).acos()
    }

    /// Compares two tensors component-wise with an absolute tolerance
    pub fn is_equal(&self, other: &T2Vector, tolerance: f64) -> bool {
        if (self.volume - other.volume).abs() > tolerance {
            return false;
        }
        (0..6).all(|i| (self.deviator[i] - other.deviator[i]).abs() <= tolerance)
    }
}

impl Add for T2Vector {
    type Output = T2Vector;
    fn add(self, rhs: T2Vector) -> T2Vector {
        T2Vector {
            deviator: self.deviator + rhs.deviator,
            volume: self.volume + rhs.volume,
        }
    }
}

impl Sub for T2Vector {
    type Output = T2Vector;
    fn sub(self, rhs: T2Vector) -> T2Vector {
        T2Vector {
            deviator: self.deviator - rhs.deviator,
            volume: self.volume - rhs.volume,
        }
    }
}

impl Mul<f64> for T2Vector {
    type Output = T2Vector;
    fn mul(self, rhs: f64) -> T2Vector {
        T2Vector {
            deviator: self.deviator * rhs,
            volume: self.volume * rhs,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{dev_ddot, T2Vector, Vec6};
    use approx::assert_abs_diff_eq;

    #[test]
    fn new_works() {
        let t = T2Vector::new(&[-100.0, -80.0, -120.0, 10.0, 0.0, 5.0]);
        assert_abs_diff_eq!(t.volume(), -100.0, epsilon = 1e-14);
        let dev = t.deviator();
        assert_abs_diff_eq!(dev[0], 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(dev[1], 20.0, epsilon = 1e-14);
        assert_abs_diff_eq!(dev[2], -20.0, epsilon = 1e-14);
        assert_eq!(dev[3], 10.0);
        assert_eq!(dev[5], 5.0);
        let back = t.components();
        assert_abs_diff_eq!(back[1], -80.0, epsilon = 1e-13);
        assert_abs_diff_eq!(back[3], 10.0, epsilon = 1e-14);
    }

    #[test]
    fn engineering_works() {
        let e = T2Vector::new_engineering(&[0.0, 0.0, 0.0, 0.002, 0.0, 0.0]);
        assert_eq!(e.volume(), 0.0);
        assert_eq!(e.deviator()[3], 0.001);
        assert_eq!(e.engineering_components()[3], 0.002);
        // pure shear: γoct = √(2/3) γ
        assert_abs_diff_eq!(e.octahedral_shear(true), (2.0_f64 / 3.0).sqrt() * 0.002, epsilon = 1e-15);
    }

    #[test]
    fn from_deviator_removes_trace() {
        let dev = Vec6::from_row_slice(&[3.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let t = T2Vector::from_deviator(&dev, -5.0);
        assert_abs_diff_eq!(t.deviator()[0], 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(t.deviator()[1], -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(t.deviator()[2], -1.0, epsilon = 1e-15);
        assert_eq!(t.volume(), -5.0);
    }

    #[test]
    fn invariants_work() {
        // pure shear s12 = 10
        let t = T2Vector::new(&[-50.0, -50.0, -50.0, 10.0, 0.0, 0.0]);
        assert_abs_diff_eq!(t.deviator_length(), 200.0_f64.sqrt(), epsilon = 1e-13);
        assert_abs_diff_eq!(t.octahedral_shear(false), (200.0_f64 / 3.0).sqrt(), epsilon = 1e-13);
        assert_abs_diff_eq!(t.deviator_ratio(0.0), 300.0_f64.sqrt() / 50.0, epsilon = 1e-14);
        assert_abs_diff_eq!(t.t2_length(), (200.0_f64 + 3.0 * 2500.0).sqrt(), epsilon = 1e-12);
        let u = t.unit_t2();
        assert_abs_diff_eq!(u.t2_length(), 1.0, epsilon = 1e-15);
        let ud = t.unit_deviator();
        assert_abs_diff_eq!(dev_ddot(&ud, &ud), 1.0, epsilon = 1e-15);
        assert_eq!(T2Vector::new_zero().unit_deviator(), Vec6::zeros());
    }

    #[test]
    fn operators_work() {
        let a = T2Vector::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = T2Vector::new(&[-1.0, 0.0, 1.0, 0.5, 0.0, 0.0]);
        let c = a + b * 2.0 - b;
        assert!(c.is_equal(&(a + b), 1e-15));
        assert!(!c.is_equal(&a, 1e-15));
        assert_abs_diff_eq!(a.angle_between(&a), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(a.angle_between(&(a * -1.0)), std::f64::consts::PI, epsilon = 1e-7);
    }
}
