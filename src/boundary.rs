//! Boundary conditions for an oblique P-wave at a planar interface.
//!
//! The unknowns are the stress-normalized amplitudes of the four outgoing
//! modes, ordered `[R_P, R_S, T_P, T_S]`. Each row enforces continuity of one
//! field component across the interface:
//!
//! - row 0: tangential particle velocity
//! - row 1: normal particle velocity
//! - row 2: normal stress
//! - row 3: shear stress
//!
//! Velocities are amplitudes divided by the modal impedance `rho * c`, which
//! is why rows 0 and 1 are several orders of magnitude smaller than rows 2
//! and 3. The condition number is therefore measured after scaling every row
//! to unit maximum modulus; the scaling does not change the solution.

use nalgebra::{Complex, Matrix4, Vector4, SVD};
use tracing::debug;

use crate::error::RtError;
use crate::material::Material;
use crate::snell::AngleSet;

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    fn water() -> Material {
        Material::new("water", 1000.0, 1480.0, None).unwrap()
    }

    fn aluminium() -> Material {
        Material::new("aluminium", 2700.0, 6420.0, Some(3040.0)).unwrap()
    }

    fn solve_at(incident: &Material, transmission: &Material, theta: f64) -> Vector4<Complex64> {
        let angles = AngleSet::new(incident, transmission, theta);
        BoundarySystem::new(incident, transmission, &angles)
            .solve(theta, 1e12)
            .unwrap()
    }

    #[test]
    fn normal_incidence_reduces_to_impedance_ratio() {
        let x = solve_at(&water(), &aluminium(), 0.0);
        let z1 = 1000.0 * 1480.0;
        let z2 = 2700.0 * 6420.0;
        assert_abs_diff_eq!(x[0].re, (z2 - z1) / (z2 + z1), epsilon = 1e-9);
        assert_abs_diff_eq!(x[0].im, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[2].re, 2.0 * z2 / (z2 + z1), epsilon = 1e-9);
        assert!(x[1].norm() < 1e-9);
        assert!(x[3].norm() < 1e-9);
    }

    #[test]
    fn solution_satisfies_system() {
        let incident = water();
        let transmission = aluminium();
        let angles = AngleSet::new(&incident, &transmission, 25.0);
        let system = BoundarySystem::new(&incident, &transmission, &angles);
        let x = system.solve(25.0, 1e12).unwrap();
        let residual = system.matrix * x - system.rhs;
        for i in 0..4 {
            let scale: f64 = (0..4)
                .map(|j| system.matrix[(i, j)].norm() * x[j].norm())
                .sum::<f64>()
                + system.rhs[i].norm();
            assert!(residual[i].norm() <= 1e-10 * scale, "row {} residual {}", i, residual[i]);
        }
    }

    #[test]
    fn well_conditioned_after_scaling() {
        let incident = water();
        let transmission = aluminium();
        for theta in [0.0, 10.0, 45.0, 90.0] {
            let angles = AngleSet::new(&incident, &transmission, theta);
            let condition = BoundarySystem::new(&incident, &transmission, &angles).condition_number();
            assert!(condition < 1e4, "condition {} at {}", condition, theta);
        }
    }

    #[test]
    fn identical_solids_at_grazing_incidence_are_singular() {
        let steel = Material::new("steel", 7850.0, 5900.0, Some(3200.0)).unwrap();
        let angles = AngleSet::new(&steel, &steel, 90.0);
        let result = BoundarySystem::new(&steel, &steel, &angles).solve(90.0, 1e12);
        match result {
            Err(RtError::SingularSystem { angle_deg, condition }) => {
                assert_eq!(angle_deg, 90.0);
                assert!(condition > 1e12);
            }
            other => panic!("expected a singular system, got {:?}", other),
        }
    }

    #[test]
    fn threshold_is_respected() {
        let incident = water();
        let transmission = aluminium();
        let angles = AngleSet::new(&incident, &transmission, 45.0);
        let system = BoundarySystem::new(&incident, &transmission, &angles);
        assert!(matches!(
            system.solve(45.0, 1.0),
            Err(RtError::SingularSystem { .. })
        ));
    }
}

/// The 4x4 complex system `M x = b` for one incidence angle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySystem {
    pub matrix: Matrix4<Complex<f64>>,
    pub rhs: Vector4<Complex<f64>>,
}

impl BoundarySystem {
    /// Assembles the continuity equations. `incident` is the medium carrying
    /// the incident P-wave, `transmission` the medium on the far side.
    pub fn new(incident: &Material, transmission: &Material, angles: &AngleSet) -> Self {
        let (rho1, cp1, cs1) = (incident.density, incident.vp, incident.vs);
        let (rho2, cp2, cs2) = (transmission.density, transmission.vp, transmission.vs);

        let zp1 = rho1 * cp1;
        let zp2 = rho2 * cp2;
        let zs1 = cs1 * rho1;
        let zs2 = cs2 * rho2;
        // (cp/cs)^2 of each medium
        let k1 = cp1 * cp1 / (cs1 * cs1);
        let k2 = cp2 * cp2 / (cs2 * cs2);

        let AngleSet { p1, s1, p2, s2 } = *angles;
        let two = 2.0;

        let matrix = Matrix4::new(
            // tangential velocity
            p1.sin() / zp1,
            s1.cos() / zs1,
            -p2.sin() / zp2,
            s2.cos() / zs2,
            // normal velocity
            p1.cos() / zp1,
            -s1.sin() / zs1,
            p2.cos() / zp2,
            s2.sin() / zs2,
            // normal stress
            -(s1 * two).cos(),
            (s1 * two).sin(),
            (s2 * two).cos(),
            (s2 * two).sin(),
            // shear stress
            (p1 * two).sin() / k1,
            (s1 * two).cos(),
            (p2 * two).sin() / k2,
            -(s2 * two).cos(),
        );

        let rhs = Vector4::new(
            -p1.sin() / zp1,
            p1.cos() / zp1,
            (s1 * two).cos(),
            (p1 * two).sin() / k1,
        );

        Self { matrix, rhs }
    }

    /// Copy of the system with every row divided by its largest modulus.
    fn equilibrated(&self) -> Option<Self> {
        let mut scaled = self.clone();
        for i in 0..4 {
            let scale = self
                .matrix
                .row(i)
                .iter()
                .map(|z| z.norm())
                .fold(0.0, f64::max);
            if !(scale.is_finite() && scale > 0.0) {
                return None;
            }
            for j in 0..4 {
                scaled.matrix[(i, j)] /= scale;
            }
            scaled.rhs[i] /= scale;
        }
        Some(scaled)
    }

    /// 2-norm condition number of the row-equilibrated matrix. Infinite when
    /// a row vanishes or the decomposition does not converge.
    pub fn condition_number(&self) -> f64 {
        let Some(scaled) = self.equilibrated() else {
            return f64::INFINITY;
        };
        let Some(svd) = SVD::try_new(scaled.matrix, false, false, f64::EPSILON, 0) else {
            return f64::INFINITY;
        };
        let values = svd.singular_values;
        let max = values.iter().cloned().fold(0.0, f64::max);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        if min > 0.0 {
            max / min
        } else {
            f64::INFINITY
        }
    }

    /// Solves for `[R_P, R_S, T_P, T_S]`. Fails with
    /// [`RtError::SingularSystem`] when the condition number exceeds
    /// `threshold`.
    pub fn solve(
        &self,
        incidence_deg: f64,
        threshold: f64,
    ) -> Result<Vector4<Complex<f64>>, RtError> {
        let condition = self.condition_number();
        debug!(
            angle = incidence_deg,
            condition,
            "boundary system\nM = {}\nb = {}",
            self.matrix,
            self.rhs
        );

        let singular = RtError::SingularSystem {
            angle_deg: incidence_deg,
            condition,
        };
        if !(condition <= threshold) {
            return Err(singular);
        }

        let scaled = self.equilibrated().ok_or_else(|| singular.clone())?;
        let x = scaled.matrix.lu().solve(&scaled.rhs).ok_or_else(|| singular.clone())?;

        if x.iter().all(|z| z.re.is_finite() && z.im.is_finite()) {
            Ok(x)
        } else {
            Err(singular)
        }
    }
}
