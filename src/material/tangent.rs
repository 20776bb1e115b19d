use super::return_mapping::stage_moduli;
use super::{dev_ddot, InstanceState, LoadStage, MaterialParameters};
use crate::base::{StrainOrder, LOW_LIMIT};
use crate::Result;
use nalgebra::{DMatrix, SMatrix, SVector};

/// Defines the 6×6 stiffness in the order `[11, 22, 33, 12, 23, 31]` with engineering shear strains
pub(crate) type Mat6 = SMatrix<f64, 6, 6>;

/// Returns the isotropic elastic stiffness
///
/// ```text
/// Dᵢⱼ = K + 2G(δᵢⱼ - ⅓)   (i, j < 3)
/// Dₖₖ = G                  (k ≥ 3)
/// ```
pub(crate) fn isotropic_stiffness(gg: f64, kk: f64) -> Mat6 {
    let mut dd = Mat6::zeros();
    for i in 0..3 {
        for j in 0..3 {
            dd[(i, j)] = kk - 2.0 * gg / 3.0;
        }
        dd[(i, i)] += 2.0 * gg;
        dd[(i + 3, i + 3)] = gg;
    }
    dd
}

/// Computes the tangent stiffness at the trial state
///
/// ```text
/// D = Dₑ - (Dₑ:Q) ⊗ (Dₑ:Q) / (Q:Dₑ:Q + H')
/// ```
///
/// where `Q` is the outward normal of the active surface at the trial stress. The
/// volumetric part of `Q` accounts for the pressure dependence of the cone.
pub(crate) fn tangent_stiffness(params: &MaterialParameters, state: &InstanceState) -> Result<Mat6> {
    if state.load_stage != LoadStage::Plastic {
        let (gg, kk) = stage_moduli(params, state, &state.committed_stress);
        return Ok(isotropic_stiffness(gg, kk));
    }
    let stress = &state.trial_stress;
    let (gg, kk) = stage_moduli(params, state, stress);
    let dd = isotropic_stiffness(gg, kk);
    let a = state.active_surface;
    if a == 0 {
        return Ok(dd);
    }
    let surface = &state.trial_surfaces[a - 1];
    let h = params.cone_height(stress);
    let q = surface.outward_normal(stress, h, params.pressure_dependent())?;
    let hh = surface.plastic_modulus() * params.modulus_factor(stress);
    let q_dev = q.deviator();
    let q_vol = q.volume();
    let den = 2.0 * gg * dev_ddot(q_dev, q_dev) + 9.0 * kk * q_vol * q_vol + hh;
    if den < LOW_LIMIT {
        return Ok(dd);
    }
    let mut nn = SVector::<f64, 6>::zeros();
    for i in 0..6 {
        nn[i] = 2.0 * gg * q_dev[i];
    }
    for i in 0..3 {
        nn[i] += 3.0 * kk * q_vol;
    }
    Ok(dd - nn * nn.transpose() / den)
}

/// Extracts the components of the 6×6 stiffness corresponding to the strain order
pub(crate) fn reduce_stiffness(dd: &Mat6, order: StrainOrder) -> DMatrix<f64> {
    let map = order.index_map();
    DMatrix::from_fn(map.len(), map.len(), |i, j| dd[(map[i], map[j])])
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
