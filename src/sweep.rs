//! Parallel evaluation of an interface over a grid of incidence angles.
//!
//! Every angle is solved independently with rayon and collected back in grid
//! order. An angle whose system is singular does not abort the sweep: it is
//! logged and stored as a failed point with zero energies.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::bins::generate_angles;
use crate::error::RtError;
use crate::interface::Interface;
use crate::result::{SweepPoint, SweepResult};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical::Regime;
    use crate::material::Material;
    use approx::assert_abs_diff_eq;

    fn water_aluminium() -> Interface {
        Interface::new(
            Material::new("water", 1000.0, 1480.0, None).unwrap(),
            Material::new("aluminium", 2700.0, 6420.0, Some(3040.0)).unwrap(),
        )
    }

    #[test]
    fn sweep_preserves_order_and_conserves_energy() {
        let sweep = Sweep::new(water_aluminium(), 0.0, 90.0, 1.0, 1e12).unwrap().quiet();
        let result = sweep.run();
        assert_eq!(result.points.len(), 91);
        assert!(result.points.windows(2).all(|w| w[0].angle < w[1].angle));
        assert_eq!(result.params.failed, 0);
        assert!(result.params.worst_conservation_error.unwrap() < 1e-6);

        let (angle, peak) = result.params.peak_transmitted_s.unwrap();
        assert!(angle > 13.0 && angle < 30.0);
        assert!(peak > 0.4);
        assert_eq!(result.points[50].regime, Regime::TotalReflection);
    }

    #[test]
    fn singular_points_are_flagged() {
        let steel = Material::new("steel", 7850.0, 5900.0, Some(3200.0)).unwrap();
        let interface = Interface::new(steel.clone(), steel);
        let result = Sweep::new(interface, 80.0, 90.0, 5.0, 1e12).unwrap().quiet().run();
        assert_eq!(result.points.len(), 3);
        let last = &result.points[2];
        assert!(last.failed);
        assert_eq!(last.energies.total(), 0.0);
        assert_eq!(result.params.failed, 1);
        assert!(!result.points[0].failed);
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(matches!(
            Sweep::new(water_aluminium(), 0.0, 10.0, 0.0, 1e12),
            Err(RtError::InvalidSweep { .. })
        ));
    }

    #[test]
    fn point_matches_single_solve() {
        let interface = water_aluminium();
        let point = evaluate(&interface, 5.0, 1e12).unwrap();
        let set = interface.intensity_coefficients(5.0).unwrap();
        assert_eq!(point.energies, set.energies);
        assert_abs_diff_eq!(point.gated.0, set.energies.transmitted_p, epsilon = 1e-6);
    }
}

/// A configured sweep of one interface.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub interface: Interface,
    pub angles: Vec<f64>,
    pub threshold: f64,
    progress: bool,
}

impl Sweep {
    /// Fails with [`RtError::InvalidSweep`] for a range that
    /// [`generate_angles`] rejects.
    pub fn new(
        interface: Interface,
        start: f64,
        end: f64,
        step: f64,
        threshold: f64,
    ) -> Result<Self, RtError> {
        Ok(Self {
            interface,
            angles: generate_angles(start, end, step)?.to_vec(),
            threshold,
            progress: true,
        })
    }

    /// Disables the progress bar.
    pub fn quiet(mut self) -> Self {
        self.progress = false;
        self
    }

    pub fn run(&self) -> SweepResult {
        let start = Instant::now();
        info!(
            incident = %self.interface.incident.name,
            transmission = %self.interface.transmission.name,
            points = self.angles.len(),
            "starting sweep"
        );

        let pb = if self.progress {
            ProgressBar::new(self.angles.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg} ETA: {eta_precise}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("angle".to_string());

        let points: Vec<SweepPoint> = self
            .angles
            .par_iter()
            .map(|&angle| {
                let point = evaluate(&self.interface, angle, self.threshold).unwrap_or_else(|err| {
                    warn!(angle, %err, "failed to solve boundary system");
                    SweepPoint::failed(angle, self.interface.regime(angle))
                });
                pb.inc(1);
                point
            })
            .collect();
        pb.finish_and_clear();

        let result = SweepResult::new(self.interface.clone(), points);
        info!(
            elapsed = ?start.elapsed(),
            failed = result.params.failed,
            "sweep finished"
        );
        result
    }
}

/// Solves one angle into a sweep point.
pub fn evaluate(interface: &Interface, angle: f64, threshold: f64) -> Result<SweepPoint, RtError> {
    let set = interface.solve(angle, threshold)?;
    let gated = interface.transmitted_intensity_with(angle, threshold)?;
    Ok(SweepPoint {
        angle,
        regime: set.regime,
        energies: set.energies,
        magnitudes: set.magnitudes(),
        gated,
        failed: false,
    })
}
