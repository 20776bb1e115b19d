use approx::assert_relative_eq;
use soilmys::prelude::*;
use soilmys::material::{InstanceState, LoadingPath};
use std::sync::Arc;

// Pressure-independent model under symmetric cyclic shear
//
// TEST GOAL
//
// Verifies the hysteresis (Masing) behavior obtained from the translation of the
// nested surfaces, and the commit/revert protocol of the integration point.
//
// LOADING
//
// Axisymmetric order; cyclic shear γ12 = ±AMPLITUDE during N_CYCLES cycles with
// N_INCREMENTS increments per quarter cycle
//
// PARAMETERS
//
// * G = 6e4 kPa, K = 2.4e5 kPa, φ = 0, c = 37 kPa, γ_peak = 0.1, 20 surfaces

const AMPLITUDE: f64 = 0.005;
const N_CYCLES: usize = 2;
const N_INCREMENTS: usize = 20;

fn new_material() -> MultiYieldMaterial {
    let params = MaterialParameters::new(&SampleParams::param_clay(), &Settings::new()).unwrap();
    let mut material = MultiYieldMaterial::new(Arc::new(params), StrainOrder::Axisymmetric);
    material.update_parameter(UpdateKey::MaterialStage, 1.0).unwrap();
    material
}

#[test]
fn test_pimy_cyclic_shear() {
    let mut material = new_material();
    let path = LoadingPath::new_cyclic_shear(StrainOrder::Axisymmetric, &[0.0; 4], AMPLITUDE, N_CYCLES, N_INCREMENTS)
        .unwrap();
    let points = path.follow(&mut material).unwrap();
    assert_eq!(points.len(), N_CYCLES * 4 * N_INCREMENTS);

    // the shear stress is bounded by the strength
    let tau_max = 37.0 * f64::sqrt(1.5); // σ12 at τoct = c in simple shear
    for point in &points {
        assert!(point.stress[3].abs() <= tau_max * (1.0 + 1e-7));
    }

    // peaks of each cycle
    let quarter = N_INCREMENTS;
    let cycle = 4 * N_INCREMENTS;
    let first_positive = points[quarter - 1].stress[3];
    let first_negative = points[3 * quarter - 1].stress[3];
    let second_positive = points[cycle + quarter - 1].stress[3];
    let second_negative = points[cycle + 3 * quarter - 1].stress[3];
    assert!(first_positive > 0.0);
    assert!(first_negative < 0.0);

    // symmetric and stable loops
    assert_relative_eq!(-first_negative, first_positive, max_relative = 0.05);
    assert_relative_eq!(second_positive, first_positive, max_relative = 0.05);
    assert_relative_eq!(second_negative, first_negative, max_relative = 0.05);

    // the unloading branch has the elastic stiffness right after the reversal
    let s0 = points[quarter - 1].stress[3];
    let s1 = points[quarter].stress[3];
    let ds = s0 - s1;
    let dgamma = AMPLITUDE / (N_INCREMENTS as f64);
    assert!(ds > 0.0);
    assert!(ds <= 6.0e4 * dgamma * (1.0 + 1e-9));

    // the reloading branch lies above the unloading branch at zero strain (hysteresis)
    let unloading = points[2 * quarter - 1].stress[3];
    let reloading = points[cycle - 1].stress[3];
    assert!(unloading < 0.0);
    assert!(reloading > 0.0);
    assert_relative_eq!(reloading, -unloading, max_relative = 0.05);
}

#[test]
fn test_pimy_commit_and_revert() {
    let mut material = new_material();
    let virgin = InstanceState::new(material.params());

    material.set_trial_strain(&[0.0, 0.0, 0.0, 0.003]).unwrap();
    material.commit_state();
    let committed = material.state().clone();
    let stress = material.stress();

    // trial followed by revert restores the committed state
    material.set_trial_strain(&[0.0, 0.0, 0.0, -0.004]).unwrap();
    assert!(material.stress()[3] < stress[3]);
    material.revert_to_last_commit();
    assert_eq!(material.state(), &committed);
    assert_eq!(material.stress(), stress);

    // revert to start restores the virgin state
    material.revert_to_start();
    assert_eq!(material.state(), &virgin);
    assert_eq!(material.load_stage(), LoadStage::Elastic);
    assert_eq!(material.stress().as_slice(), &[0.0; 4]);
}

#[test]
fn test_pimy_tangent_matches_the_stress_increment() {
    let mut material = new_material();
    material.set_trial_strain(&[0.0, 0.0, 0.0, 0.002]).unwrap();
    material.commit_state();
    let dd = material.tangent().unwrap();
    let s0 = material.stress();

    // small continued loading in shear
    let dgamma = 1e-7;
    material.set_trial_strain(&[0.0, 0.0, 0.0, 0.002 + dgamma]).unwrap();
    let s1 = material.stress();
    let slope = (s1[3] - s0[3]) / dgamma;
    assert_relative_eq!(dd[(3, 3)], slope, max_relative = 1e-3);
    assert!(dd[(3, 3)] < material.initial_tangent()[(3, 3)]);
}
