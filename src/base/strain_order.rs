use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Defines the strain vector layout exchanged with the finite element driver
///
/// Internally, all quantities are stored with six components in the order
/// `[11, 22, 33, 12, 23, 31]`. The driver may work with a reduced number of components;
/// shear strains are always engineering shear strains (γ = 2ε).
///
/// | order | idealization                         | components                 |
/// |:-----:|--------------------------------------|----------------------------|
/// |   3   | plane-strain                         | `[11, 22, 12]`             |
/// |   4   | axisymmetric                         | `[11, 22, 33, 12]`         |
/// |   5   | plane-strain with anti-plane shears  | `[11, 22, 12, 23, 31]`     |
/// |   6   | three-dimensional                    | `[11, 22, 33, 12, 23, 31]` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrainOrder {
    PlaneStrain,
    Axisymmetric,
    PlaneStrainAntiplane,
    ThreeDimensional,
}

const MAP_PLANE_STRAIN: [usize; 3] = [0, 1, 3];
const MAP_AXISYMMETRIC: [usize; 4] = [0, 1, 2, 3];
const MAP_PLANE_STRAIN_ANTIPLANE: [usize; 5] = [0, 1, 3, 4, 5];
const MAP_THREE_DIMENSIONAL: [usize; 6] = [0, 1, 2, 3, 4, 5];

impl StrainOrder {
    /// Returns the strain order corresponding to the number of components
    pub fn from_size(size: usize) -> Result<Self> {
        match size {
            3 => Ok(StrainOrder::PlaneStrain),
            4 => Ok(StrainOrder::Axisymmetric),
            5 => Ok(StrainOrder::PlaneStrainAntiplane),
            6 => Ok(StrainOrder::ThreeDimensional),
            _ => Err(Error::Configuration(format!(
                "strain order must be 3, 4, 5 or 6; got {}",
                size
            ))),
        }
    }

    /// Returns the number of components exchanged with the driver
    pub fn size(&self) -> usize {
        self.index_map().len()
    }

    /// Returns the positions of the reduced components in the full six-component layout
    pub fn index_map(&self) -> &'static [usize] {
        match self {
            StrainOrder::PlaneStrain => &MAP_PLANE_STRAIN,
            StrainOrder::Axisymmetric => &MAP_AXISYMMETRIC,
            StrainOrder::PlaneStrainAntiplane => &MAP_PLANE_STRAIN_ANTIPLANE,
            StrainOrder::ThreeDimensional => &MAP_THREE_DIMENSIONAL,
        }
    }

    /// Expands reduced components into the full layout (missing entries are zero)
    pub fn expand(&self, reduced: &[f64]) -> Result<[f64; 6]> {
        let map = self.index_map();
        if reduced.len() != map.len() {
            return Err(Error::InvalidStrainSize {
                expected: map.len(),
                found: reduced.len(),
            });
        }
        let mut full = [0.0; 6];
        for (i, &m) in map.iter().enumerate() {
            full[m] = reduced[i];
        }
        Ok(full)
    }

    /// Extracts the reduced components from the full layout
    pub fn reduce(&self, full: &[f64; 6]) -> Vec<f64> {
        self.index_map().iter().map(|&m| full[m]).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
