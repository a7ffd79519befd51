//! Snell's law with complex angles.
//!
//! Every mode keeps the horizontal slowness of the incident P-wave, so
//! `sin(theta_x) = (c_x / c_p1) * sin(theta_p1)`. Past a critical angle the
//! right-hand side exceeds one and the angle continues into the complex plane
//! instead of becoming undefined. The continuation is done once, in
//! [`complex_asin`].
//!
//! # Branch convention
//!
//! For real `x` with `|x| > 1`:
//!
//! ```text
//! asin(x) = sign(x) * pi/2 - i * sign(x) * acosh(|x|)
//! ```
//!
//! so that `cos(theta)` is `+i * sinh(acosh(|x|))` and the evanescent field
//! decays away from the interface. Off the real axis the principal branch
//! `-i * ln(i z + sqrt(1 - z^2))` is used, which agrees with the rule above
//! when the real axis is approached from below.

use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

use crate::config::EVANESCENT_TOLERANCE;
use crate::material::Material;


/// Inverse sine continued across `|x| > 1`. See the module docs for the branch.
pub fn complex_asin(z: Complex64) -> Complex64 {
    if z.im == 0.0 && z.re.abs() > 1.0 {
        let sign = z.re.signum();
        return Complex64::new(sign * FRAC_PI_2, -sign * z.re.abs().acosh());
    }
    let i = Complex64::i();
    -i * (i * z + (Complex64::new(1.0, 0.0) - z * z).sqrt()).ln()
}

/// The four wave modes at an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    P1, // incident (and reflected) longitudinal
    S1, // reflected shear
    P2, // transmitted longitudinal
    S2, // transmitted shear
}

/// Whether a mode carries energy away from the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Propagation {
    Propagating,
    Evanescent,
}

/// Propagation angles (radians) of every mode for one incidence angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleSet {
    pub p1: Complex64,
    pub s1: Complex64,
    pub p2: Complex64,
    pub s2: Complex64,
}

impl AngleSet {
    /// Resolves all angles for a P-wave incident from `incident` at
    /// `incidence_deg` degrees onto `transmission`.
    pub fn new(incident: &Material, transmission: &Material, incidence_deg: f64) -> Self {
        let theta = incidence_deg.to_radians();
        let sin_p1 = theta.sin();
        let cp1 = incident.vp;
        let resolve = |speed: Complex64| complex_asin(speed / cp1 * sin_p1);

        Self {
            p1: Complex64::new(theta, 0.0),
            s1: resolve(incident.vs),
            p2: resolve(Complex64::new(transmission.vp, 0.0)),
            s2: resolve(transmission.vs),
        }
    }

    pub fn get(&self, mode: Mode) -> Complex64 {
        match mode {
            Mode::P1 => self.p1,
            Mode::S1 => self.s1,
            Mode::P2 => self.p2,
            Mode::S2 => self.s2,
        }
    }

    pub fn propagation(&self, mode: Mode) -> Propagation {
        if self.get(mode).im.abs() > EVANESCENT_TOLERANCE {
            Propagation::Evanescent
        } else {
            Propagation::Propagating
        }
    }
}

/// Real refraction angles (degrees) of the transmitted longitudinal and shear
/// waves, `None` for a mode beyond its critical angle. A fluid transmission
/// medium has no shear angle.
pub fn refraction_angles(
    incident: &Material,
    transmission: &Material,
    incidence_deg: f64,
) -> (Option<f64>, Option<f64>) {
    let sin_inc = incidence_deg.to_radians().sin();
    let refract = |speed: f64| {
        let sin_t = speed / incident.vp * sin_inc;
        if sin_t.abs() > 1.0 {
            None
        } else {
            Some(sin_t.asin().to_degrees())
        }
    };
    let shear = if transmission.is_fluid() {
        None
    } else {
        refract(transmission.vs.re)
    };
    (refract(transmission.vp), shear)
}
