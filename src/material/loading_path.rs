use super::StressStrainTrait;
use crate::base::StrainOrder;
use crate::{Error, Result};

/// Holds the stress and strain reached at one point of a loading path
#[derive(Clone, Debug, PartialEq)]
pub struct PathPoint {
    /// Strain components (engineering shear strains)
    pub strain: Vec<f64>,

    /// Stress components
    pub stress: Vec<f64>,
}

/// Holds a sequence of total strains used to drive a stress-strain model
///
/// The first entry is the starting strain; each subsequent entry is applied with
/// `set_trial_strain` and then committed.
pub struct LoadingPath {
    /// Holds the strain order of the components
    order: StrainOrder,

    /// Holds the total strains (engineering shear strains)
    pub strains: Vec<Vec<f64>>,
}

impl LoadingPath {
    /// Allocates a new instance starting from zero strain
    pub fn new(order: StrainOrder) -> Self {
        LoadingPath {
            order,
            strains: vec![vec![0.0; order.size()]],
        }
    }

    /// Generates a symmetric cyclic shear path on the 12 component
    ///
    /// Each cycle goes `start → +a → -a → start` along γ12.
    ///
    /// # Input
    ///
    /// * `order` -- the strain order
    /// * `start` -- the starting strain (e.g., after consolidation)
    /// * `amplitude` -- the engineering shear strain amplitude `a`
    /// * `n_cycles` -- number of cycles
    /// * `n_increments` -- number of increments per quarter cycle
    pub fn new_cyclic_shear(
        order: StrainOrder,
        start: &[f64],
        amplitude: f64,
        n_cycles: usize,
        n_increments: usize,
    ) -> Result<Self> {
        let mut path = LoadingPath::new(order);
        path.check(start)?;
        path.strains[0] = start.to_vec();
        let index = path.shear_index();
        for _ in 0..n_cycles {
            for (target, n) in [(amplitude, n_increments), (-amplitude, 2 * n_increments), (0.0, n_increments)] {
                let mut strain = start.to_vec();
                strain[index] += target;
                path.push_linear(&strain, n)?;
            }
        }
        Ok(path)
    }

    /// Returns the strain order
    pub fn strain_order(&self) -> StrainOrder {
        self.order
    }

    /// Returns the position of the 12 shear component in the strain vector
    pub fn shear_index(&self) -> usize {
        match self.order {
            StrainOrder::PlaneStrain | StrainOrder::PlaneStrainAntiplane => 2,
            StrainOrder::Axisymmetric | StrainOrder::ThreeDimensional => 3,
        }
    }

    /// Returns the last strain of the path
    pub fn last(&self) -> &[f64] {
        match self.strains.last() {
            Some(strain) => strain,
            None => &[],
        }
    }

    /// Checks the number of components
    fn check(&self, strain: &[f64]) -> Result<()> {
        if strain.len() != self.order.size() {
            return Err(Error::InvalidStrainSize {
                expected: self.order.size(),
                found: strain.len(),
            });
        }
        Ok(())
    }

    /// Pushes a new total strain
    pub fn push_strain(&mut self, strain: &[f64]) -> Result<()> {
        self.check(strain)?;
        self.strains.push(strain.to_vec());
        Ok(())
    }

    /// Pushes a new total strain equal to the last strain plus an increment
    pub fn push_increment(&mut self, delta: &[f64]) -> Result<()> {
        self.check(delta)?;
        let strain: Vec<f64> = self.last().iter().zip(delta).map(|(e, d)| e + d).collect();
        self.strains.push(strain);
        Ok(())
    }

    /// Pushes `n_increments` equally spaced strains from the last strain to the target
    pub fn push_linear(&mut self, target: &[f64], n_increments: usize) -> Result<()> {
        self.check(target)?;
        let first = self.last().to_vec();
        for i in 1..=n_increments {
            let t = (i as f64) / (n_increments as f64);
            let strain: Vec<f64> = first.iter().zip(target).map(|(a, b)| a + t * (b - a)).collect();
            self.strains.push(strain);
        }
        Ok(())
    }

    /// Applies all strains but the first to the model, committing after each step
    ///
    /// Stops at the first failure; the model is then left at the last committed state.
    pub fn follow(&self, model: &mut dyn StressStrainTrait) -> Result<Vec<PathPoint>> {
        let mut points = Vec::with_capacity(self.strains.len() - 1);
        for strain in self.strains.iter().skip(1) {
            model.set_trial_strain(strain)?;
            model.commit_state();
            points.push(PathPoint {
                strain: model.strain().as_slice().to_vec(),
                stress: model.stress().as_slice().to_vec(),
            });
        }
        Ok(points)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
