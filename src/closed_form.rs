//! Closed-form transmitted intensities for a fluid-solid interface.
//!
//! For a P-wave incident from a fluid the transmitted amplitudes have a
//! closed form in terms of the angular impedances `Z_inc`, `Z_L` and `Z_S`:
//!
//! ```text
//! D   = Z_L cos^2(2 theta_S) + Z_S sin^2(2 theta_S) + Z_inc
//! T_L =  (rho1 / rho2) 2 Z_L cos(2 theta_S) / D
//! T_S = -(rho1 / rho2) 2 Z_S sin(2 theta_S) / D
//! I_x = rho2 tan(theta_inc) / (rho1 tan(theta_x)) |T_x|^2
//! ```
//!
//! Between the two critical angles the longitudinal refraction angle is
//! complex, so `Z_L` becomes reactive and `tan(theta_L)` is never formed; only
//! the shear intensity is evaluated. Normal incidence has no `tan` ratio at
//! all and falls back to the vertical-incidence split. These formulas serve as
//! an independent cross-check of the matrix solution.

use num_complex::Complex64;

use crate::critical::Regime;
use crate::material::Material;
use crate::snell::AngleSet;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn water() -> Material {
        Material::new("water", 1000.0, 1480.0, None).unwrap()
    }

    fn aluminium() -> Material {
        Material::new("aluminium", 2700.0, 6420.0, Some(3040.0)).unwrap()
    }

    #[test]
    fn normal_incidence() {
        let (l, s) = fluid_solid_transmission(&water(), &aluminium(), 0.0, Regime::Propagating);
        let z1: f64 = 1000.0 * 1480.0;
        let z2: f64 = 2700.0 * 6420.0;
        assert_abs_diff_eq!(l, 4.0 * z1 * z2 / (z1 + z2).powi(2), epsilon = 1e-12);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn both_modes_transmitted() {
        let (l, s) = fluid_solid_transmission(&water(), &aluminium(), 5.0, Regime::Propagating);
        assert_abs_diff_eq!(l, 0.272227, epsilon = 1e-5);
        assert_abs_diff_eq!(s, 0.017184, epsilon = 1e-5);
    }

    #[test]
    fn only_shear_transmitted() {
        let (l, s) = fluid_solid_transmission(&water(), &aluminium(), 20.0, Regime::ModeConverted);
        assert_eq!(l, 0.0);
        assert_abs_diff_eq!(s, 0.422905, epsilon = 1e-5);
    }

    #[test]
    fn nothing_transmitted() {
        assert_eq!(
            fluid_solid_transmission(&water(), &aluminium(), 40.0, Regime::TotalReflection),
            (0.0, 0.0)
        );
        assert_eq!(
            fluid_solid_transmission(&water(), &aluminium(), 13.3, Regime::AtCritical),
            (0.0, 0.0)
        );
    }
}

/// Normal-incidence energy split `(R^2, (Z1/Z2) T^2)` with `R = (Z2-Z1)/(Z2+Z1)`
/// and `T = 2 Z2/(Z2+Z1)`.
pub fn vertical_energies(incident: &Material, transmission: &Material) -> (f64, f64) {
    let (r, t) = vertical_coefficients(incident, transmission);
    let z1 = incident.p_wave_impedance();
    let z2 = transmission.p_wave_impedance();
    (r * r, z1 / z2 * t * t)
}

/// Pressure reflection and transmission coefficients at normal incidence.
pub fn vertical_coefficients(incident: &Material, transmission: &Material) -> (f64, f64) {
    let z1 = incident.p_wave_impedance();
    let z2 = transmission.p_wave_impedance();
    ((z2 - z1) / (z2 + z1), 2.0 * z2 / (z2 + z1))
}

/// Transmitted `(longitudinal, shear)` intensities for a P-wave incident from
/// a fluid, gated by the regime of `incidence_deg`.
pub fn fluid_solid_transmission(
    incident: &Material,
    transmission: &Material,
    incidence_deg: f64,
    regime: Regime,
) -> (f64, f64) {
    if incidence_deg == 0.0 {
        let (_, t) = vertical_energies(incident, transmission);
        return (t, 0.0);
    }

    match regime {
        Regime::Propagating => {
            let oblique = Oblique::new(incident, transmission, incidence_deg);
            (
                oblique.intensity(oblique.t_l, oblique.angles.p2),
                oblique.intensity(oblique.t_s, oblique.angles.s2),
            )
        }
        Regime::ModeConverted => {
            let oblique = Oblique::new(incident, transmission, incidence_deg);
            (0.0, oblique.intensity(oblique.t_s, oblique.angles.s2))
        }
        Regime::AtCritical | Regime::TotalReflection => (0.0, 0.0),
    }
}

struct Oblique {
    angles: AngleSet,
    density_ratio: f64, // rho2 / rho1
    t_l: Complex64,
    t_s: Complex64,
}

impl Oblique {
    fn new(incident: &Material, transmission: &Material, incidence_deg: f64) -> Self {
        let angles = AngleSet::new(incident, transmission, incidence_deg);
        let (rho1, rho2) = (incident.density, transmission.density);

        let z_inc = incident.vp * rho1 / angles.p1.cos();
        let z_l = transmission.vp * rho2 / angles.p2.cos();
        let z_s = transmission.vs * rho2 / angles.s2.cos();

        let cos2s = (angles.s2 * 2.0).cos();
        let sin2s = (angles.s2 * 2.0).sin();
        let denominator = z_l * cos2s * cos2s + z_s * sin2s * sin2s + z_inc;

        Self {
            angles,
            density_ratio: rho2 / rho1,
            t_l: z_l * cos2s * 2.0 / denominator / (rho2 / rho1),
            t_s: -z_s * sin2s * 2.0 / denominator / (rho2 / rho1),
        }
    }

    fn intensity(&self, amplitude: Complex64, refraction: Complex64) -> f64 {
        let ratio = self.angles.p1.tan() / refraction.tan() * self.density_ratio;
        (ratio * amplitude.norm_sqr()).re
    }
}
