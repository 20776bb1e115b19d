use super::{dev_ddot, InstanceState, LoadStage, MaterialParameters, SubStep, T2Vector, YieldSurface};
use crate::base::{LOW_LIMIT, MAX_SCALING_ITERATIONS};
use crate::{Error, Result};

/// Returns the shear and bulk moduli for the current stage at the given stress
pub(crate) fn stage_moduli(params: &MaterialParameters, state: &InstanceState, stress: &T2Vector) -> (f64, f64) {
    let gg = state.shear_modulus.unwrap_or(params.shear_modulus());
    let kk = state.bulk_modulus.unwrap_or(params.bulk_modulus());
    match state.load_stage {
        LoadStage::Elastic => (gg, kk),
        LoadStage::Plastic => {
            let factor = params.modulus_factor(stress);
            (gg * factor, kk * factor)
        }
        LoadStage::ScaledElastic => {
            let factor = params.modulus_factor(stress);
            let consolidation = match params.dilatancy() {
                Some(dil) => dil.consolidation_factor(stress),
                None => 1.0,
            };
            (gg * factor, kk * factor * consolidation)
        }
    }
}

/// Scales the deviator (about the surface center) so that the stress lies on the surface
///
/// The volumetric part is unchanged; thus the cone height is also unchanged.
pub(crate) fn deviator_scaling(
    params: &MaterialParameters,
    stress: &T2Vector,
    surface: &YieldSurface,
    tolerance: f64,
) -> T2Vector {
    let h = params.cone_height(stress);
    let center = surface.center() * h;
    let target = surface.size() * h;
    let mut res = *stress;
    for _ in 0..MAX_SCALING_ITERATIONS {
        let xi = res.deviator() - center;
        let radius = (1.5 * dev_ddot(&xi, &xi)).sqrt();
        if radius <= target * (1.0 + tolerance) || radius < LOW_LIMIT {
            break;
        }
        res = T2Vector::from_deviator(&(center + xi * (target / radius)), res.volume());
    }
    res
}

/// Indicates that the strain increment pushes the deviatoric stress outwards
pub(crate) fn is_loading(increment: &T2Vector, stress: &T2Vector) -> bool {
    dev_ddot(increment.deviator(), &stress.unit_deviator()) > 0.0
}

/// Implements the return mapping of the multi-yield-surface models
pub(crate) struct ReturnMapping<'a> {
    params: &'a MaterialParameters,
    state: &'a mut InstanceState,
}

impl<'a> ReturnMapping<'a> {
    /// Allocates a new instance
    pub fn new(params: &'a MaterialParameters, state: &'a mut InstanceState) -> Self {
        ReturnMapping { params, state }
    }

    /// Computes the trial stress corresponding to the trial strain
    ///
    /// On failure, the trial state is reset to the last committed state.
    pub fn update(&mut self, trial_strain: T2Vector) -> Result<()> {
        self.state.trial_strain = trial_strain;
        self.state.strain_rate = trial_strain - self.state.committed_strain;

        // closed form for the elastic stages
        if self.state.load_stage != LoadStage::Plastic {
            let stress0 = self.state.committed_stress;
            let rate = self.state.strain_rate;
            self.state.trial_stress = self.elastic_predictor(&stress0, &rate);
            self.state.trial_surfaces.clone_from(&self.state.committed_surfaces);
            self.state.active_surface = self.state.committed_active_surface;
            self.state.trial_ppz.clone_from(&self.state.committed_ppz);
            return Ok(());
        }

        if !self.state.plastic_transition_done {
            self.elast2plast();
        }
        match self.plastic_update() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.revert();
                Err(e)
            }
        }
    }

    /// Returns σ + D : Δε using the moduli at the given stress
    fn elastic_predictor(&self, stress: &T2Vector, increment: &T2Vector) -> T2Vector {
        let (gg, kk) = stage_moduli(self.params, &*self.state, stress);
        let dev = stress.deviator() + increment.deviator() * (2.0 * gg);
        T2Vector::from_deviator(&dev, stress.volume() + 3.0 * kk * increment.volume())
    }

    /// Initializes the surfaces from the stress reached during the elastic stage
    fn elast2plast(&mut self) {
        let params = self.params;
        let n = params.n_surfaces();
        let tolerance = params.settings().yield_tolerance;
        let st = &mut *self.state;
        st.plastic_transition_done = true;
        st.committed_surfaces = params.surfaces().to_vec();
        st.committed_active_surface = 0;

        let mut stress = st.committed_stress;
        if stress.deviator_length() > 0.0 {
            let h = params.cone_height(&stress);
            let outer = &st.committed_surfaces[n - 1];
            if outer.yield_function(&stress, h) > 0.0 {
                stress = deviator_scaling(params, &stress, outer, tolerance);
            }
            let ratio_vector = stress.deviator() / h;
            let ratio = (1.5 * dev_ddot(&ratio_vector, &ratio_vector)).sqrt();
            let mut active = 0;
            for m in 1..=n {
                if st.committed_surfaces[m - 1].size() <= ratio {
                    active = m;
                }
            }
            for m in 1..=usize::min(active, n - 1) {
                let size = st.committed_surfaces[m - 1].size();
                let center = ratio_vector * (1.0 - size / ratio);
                st.committed_surfaces[m - 1].set_center(&center);
            }
            st.committed_active_surface = active;
        }

        st.committed_stress = stress;
        st.trial_stress = stress;
        st.trial_surfaces.clone_from(&st.committed_surfaces);
        st.active_surface = st.committed_active_surface;
        if let Some(ppz) = st.committed_ppz.as_mut() {
            ppz.min_pressure = f64::min(ppz.min_pressure, stress.volume());
        }
        st.trial_ppz.clone_from(&st.committed_ppz);
    }

    /// Runs the plastic stage algorithm
    fn plastic_update(&mut self) -> Result<()> {
        let params = self.params;
        {
            let st = &mut *self.state;
            st.trial_surfaces.clone_from(&st.committed_surfaces);
            st.active_surface = st.committed_active_surface;
            st.trial_ppz.clone_from(&st.committed_ppz);
        }
        let stress0 = self.state.committed_stress;
        let strain0 = self.state.committed_strain;
        let rate = self.state.strain_rate;
        if rate.t2_length() == 0.0 {
            self.state.trial_stress = stress0;
            return Ok(());
        }
        let predictor = self.elastic_predictor(&stress0, &rate);

        // load reversal
        if self.state.active_surface > 0 && self.is_load_reversal(&stress0, &predictor)? {
            self.update_inner_surfaces(&stress0);
            self.state.active_surface = 0;
        }

        // elastic
        if self.state.active_surface == 0
            && !params.is_beyond_apex(&predictor)
            && !self.is_crossing_next_surface(&predictor)
        {
            self.state.trial_stress = predictor;
            return Ok(());
        }

        // sub-increments
        let n_sub = self.sub_increment_count(&stress0, &rate);
        let increment = rate * (1.0 / (n_sub as f64));
        let mut stress = stress0;
        let mut strain = strain0;
        for _ in 0..n_sub {
            let next_strain = strain + increment;
            let trial = self.elastic_predictor(&stress, &increment);
            if params.is_beyond_apex(&trial) {
                let step = SubStep {
                    stress0: stress,
                    strain0: strain,
                    stress1: trial,
                    strain1: next_strain,
                };
                stress = self.apex_stress(&step, &increment);
                strain = next_strain;
                continue;
            }

            // unloading or neutral loading inside the active surface
            let a = self.state.active_surface;
            if a > 0 {
                let h = params.cone_height(&trial);
                if self.state.trial_surfaces[a - 1].yield_function(&trial, h) <= 0.0 {
                    self.state.active_surface = 0;
                }
            }
            if self.state.active_surface == 0 {
                if !self.is_crossing_next_surface(&trial) {
                    stress = trial;
                    strain = next_strain;
                    continue;
                }
                self.state.active_surface = 1;
            }

            // plastic
            let step = SubStep {
                stress0: stress,
                strain0: strain,
                stress1: trial,
                strain1: next_strain,
            };
            let corrected = self.stress_correction(&step, &increment)?;
            if params.is_beyond_apex(&corrected) {
                stress = self.apex_stress(&step, &increment);
                strain = next_strain;
                continue;
            }
            self.update_active_surface(&corrected)?;
            self.update_inner_surfaces(&corrected);
            if let (Some(dil), Some(ppz)) = (params.dilatancy(), self.state.trial_ppz.as_mut()) {
                let done = SubStep {
                    stress1: corrected,
                    ..step
                };
                let loading = is_loading(&increment, &corrected);
                dil.update_ppz(ppz, &done, &increment, params.residual_pressure(), loading);
            }
            stress = corrected;
            strain = next_strain;
        }
        self.state.trial_stress = stress;
        Ok(())
    }

    /// Returns the stress held at the apex cutoff and makes the step elastic
    ///
    /// The stress is placed on the axis of the innermost surface, which lies inside all
    /// the (nested) surfaces; the surfaces are left untouched.
    fn apex_stress(&mut self, step: &SubStep, increment: &T2Vector) -> T2Vector {
        let params = self.params;
        let h = params.apex_height();
        let center = *self.state.trial_surfaces[0].center();
        let stress = T2Vector::from_deviator(&(center * h), params.residual_pressure() - h);
        self.state.active_surface = 0;
        if let (Some(dil), Some(ppz)) = (params.dilatancy(), self.state.trial_ppz.as_mut()) {
            let done = SubStep {
                stress1: stress,
                ..*step
            };
            dil.update_ppz(ppz, &done, increment, params.residual_pressure(), false);
        }
        stress
    }

    /// Indicates that the stress increment points inwards with respect to the active surface
    fn is_load_reversal(&self, stress: &T2Vector, predictor: &T2Vector) -> Result<bool> {
        let a = self.state.active_surface;
        let surface = &self.state.trial_surfaces[a - 1];
        let h = self.params.cone_height(stress);
        let normal = surface.outward_normal(stress, h, self.params.pressure_dependent())?;
        let dsigma = *predictor - *stress;
        Ok(normal.ddot(&dsigma) < 0.0)
    }

    /// Indicates that the stress lies outside the surface next to the active one
    fn is_crossing_next_surface(&self, stress: &T2Vector) -> bool {
        let a = self.state.active_surface;
        if a >= self.params.n_surfaces() {
            return false;
        }
        let h = self.params.cone_height(stress);
        self.state.trial_surfaces[a].yield_function(stress, h) > 0.0
    }

    /// Returns the number of sub-increments for the strain rate
    fn sub_increment_count(&self, stress: &T2Vector, rate: &T2Vector) -> usize {
        let params = self.params;
        let settings = params.settings();
        let (gg, _) = stage_moduli(params, &*self.state, stress);
        let a = self.state.active_surface;
        let modulus = if a == 0 {
            2.0 * gg
        } else {
            let hh = self.state.trial_surfaces[a - 1].plastic_modulus() * params.modulus_factor(stress);
            2.0 * gg * hh / (2.0 * gg + hh)
        };
        let h = params.cone_height(stress);
        let dev = rate.deviator() * modulus;
        let ratio_change = (1.5 * dev_ddot(&dev, &dev)).sqrt() / h;
        let n_cross = usize::min(
            (ratio_change / params.min_surface_spacing()).ceil() as usize,
            params.n_surfaces(),
        );
        let n_oct = (rate.octahedral_shear(true) / settings.sub_increment_octahedral_strain).ceil() as usize;
        let n_vol = (3.0 * rate.volume().abs() / settings.sub_increment_volumetric_strain).ceil() as usize;
        let n = usize::max(usize::max(n_cross, n_oct), usize::max(n_vol, 1));
        usize::min(n, settings.max_sub_increments)
    }

    /// Returns the trial stress of a sub-increment corrected back onto the active surface
    ///
    /// The active surface index is increased while the corrected stress lies outside the
    /// next surface. The excess beyond the next surface is converted back to an elastic
    /// trial before correcting again. The walk visits each surface at most once.
    fn stress_correction(&mut self, step: &SubStep, increment: &T2Vector) -> Result<T2Vector> {
        let params = self.params;
        let n = params.n_surfaces();
        let pressure_dependent = params.pressure_dependent();
        let residual = params.residual_pressure();
        let (gg, kk) = stage_moduli(params, &*self.state, &step.stress0);
        let factor = params.modulus_factor(&step.stress0);
        let mut trial = step.stress1;
        for _ in 0..n {
            let a = self.state.active_surface;
            if a == 0 || a > n {
                break;
            }
            let surface = &self.state.trial_surfaces[a - 1];
            let h = params.cone_height(&trial);
            let contact = surface.contact_stress(&trial, h)?;
            let normal = surface.outward_normal(&contact, h, pressure_dependent)?;
            let hh = surface.plastic_modulus() * factor;

            // volumetric component of the flow direction
            let mut p_vol = match (params.dilatancy(), self.state.trial_ppz.as_ref()) {
                (Some(dil), Some(ppz)) => {
                    let at_contact = SubStep {
                        stress1: contact,
                        ..*step
                    };
                    dil.plastic_potential(&at_contact, ppz, residual, is_loading(increment, &contact))
                }
                _ => 0.0,
            };

            // loading function
            let q_dev = normal.deviator();
            let q_vol = normal.volume();
            let shear_term = 2.0 * gg * dev_ddot(q_dev, q_dev) + hh;
            let mut vol_term = 3.0 * q_vol * kk * p_vol;
            if vol_term < -0.5 * shear_term {
                vol_term = -0.5 * shear_term;
                p_vol = vol_term / (3.0 * q_vol * kk);
            }
            let den = shear_term + vol_term;
            if den < LOW_LIMIT {
                return Err(Error::Consistency(
                    "the denominator of the loading function vanishes".to_string(),
                ));
            }
            let lambda = f64::max(dev_ddot(q_dev, &(trial.deviator() - contact.deviator())) / den, 0.0);

            // corrected stress
            let dev = trial.deviator() - q_dev * (2.0 * gg * lambda);
            let corrected = T2Vector::from_deviator(&dev, trial.volume() - kk * lambda * p_vol);
            if a == n {
                let tolerance = params.settings().yield_tolerance;
                return Ok(deviator_scaling(params, &corrected, &self.state.trial_surfaces[n - 1], tolerance));
            }
            let h_new = params.cone_height(&corrected);
            let next = &self.state.trial_surfaces[a];
            if next.yield_function(&corrected, h_new) <= 0.0 {
                return Ok(corrected);
            }

            // the correction went past the next surface
            let kept = 1.0 - 2.0 * gg * dev_ddot(q_dev, q_dev) / den;
            let scale = if kept > LOW_LIMIT { 1.0 / kept } else { 1.0 };
            let next_contact = next.contact_stress(&corrected, h_new)?;
            let dev = next_contact.deviator() + (corrected.deviator() - next_contact.deviator()) * scale;
            trial = T2Vector::from_deviator(&dev, corrected.volume());
            self.state.active_surface = a + 1;
        }
        Err(Error::Consistency(
            "the stress correction did not converge through the surfaces".to_string(),
        ))
    }

    /// Translates the active surface (Mroz rule) so that it passes through the stress point
    ///
    /// The conjugate point `t* = c + X (t - c)` on the next surface solves
    /// `A X² + B X - C = 0`; the new center is `c' = t - (S/OS)(t* - oc)`.
    fn update_active_surface(&mut self, stress: &T2Vector) -> Result<()> {
        let a = self.state.active_surface;
        let n = self.params.n_surfaces();
        if a == 0 || a >= n {
            return Ok(());
        }
        let h = self.params.cone_height(stress);
        let t = stress.deviator() / h;
        let (center, size) = {
            let surface = &self.state.trial_surfaces[a - 1];
            (*surface.center(), surface.size())
        };
        let (outer_center, outer_size) = {
            let surface = &self.state.trial_surfaces[a];
            (*surface.center(), surface.size())
        };
        let tc = t - center;
        let co = center - outer_center;
        let aa = 1.5 * dev_ddot(&tc, &tc);
        let bb = 3.0 * dev_ddot(&tc, &co);
        let cc = outer_size * outer_size - 1.5 * dev_ddot(&co, &co);
        if aa < LOW_LIMIT {
            return Err(Error::Consistency(
                "stress point coincides with the center of the active surface".to_string(),
            ));
        }
        if cc < 0.0 {
            return Err(Error::Consistency(
                "center of the active surface lies outside the next surface".to_string(),
            ));
        }
        let discriminant = bb * bb + 4.0 * aa * cc;
        if discriminant < 0.0 {
            return Err(Error::Consistency(
                "no conjugate point exists on the next surface".to_string(),
            ));
        }
        let mut x = (-bb + discriminant.sqrt()) / (2.0 * aa);
        if (x - 1.0).abs() < self.params.settings().root_snap_tolerance {
            x = 1.0;
        }
        if x < 1.0 {
            return Err(Error::Consistency(
                "stress point lies outside the surface next to the active one".to_string(),
            ));
        }
        let t_star = center + tc * x;
        let new_center = t - (t_star - outer_center) * (size / outer_size);
        self.state.trial_surfaces[a - 1].set_center(&new_center);
        Ok(())
    }

    /// Makes the surfaces inside the active one tangent to it at the stress point
    fn update_inner_surfaces(&mut self, stress: &T2Vector) {
        let a = self.state.active_surface;
        if a <= 1 {
            return;
        }
        let h = self.params.cone_height(stress);
        let t = stress.deviator() / h;
        let (center, size) = {
            let surface = &self.state.trial_surfaces[a - 1];
            (*surface.center(), surface.size())
        };
        for m in 1..a {
            let surface = &mut self.state.trial_surfaces[m - 1];
            let new_center = t - (t - center) * (surface.size() / size);
            surface.set_center(&new_center);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
