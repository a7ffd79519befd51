//! Summary figures of an angle sweep.
//!
//! These condense a full sweep into the handful of numbers usually quoted when
//! choosing a wedge angle for an ultrasonic transducer: where the critical angles
//! lie, where the transmitted shear and longitudinal energies peak, and how
//! well energy conservation held over the sweep.

use serde::Serialize;
use std::fmt;

use crate::critical::CriticalAngles;
use crate::result::SweepPoint;


/// Summary parameters. Peaks are `(angle, energy)` pairs taken from the
/// regime-gated transmitted energies; failed points are skipped.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Params {
    pub critical: CriticalAngles,
    pub peak_transmitted_s: Option<(f64, f64)>,
    pub peak_transmitted_p: Option<(f64, f64)>,
    pub worst_conservation_error: Option<f64>,
    pub failed: usize,
}

impl Params {
    pub fn new(critical: CriticalAngles) -> Self {
        Self {
            critical,
            peak_transmitted_s: None,
            peak_transmitted_p: None,
            worst_conservation_error: None,
            failed: 0,
        }
    }

    pub fn from_points(critical: &CriticalAngles, points: &[SweepPoint]) -> Self {
        let mut params = Self::new(*critical);
        params.failed = points.iter().filter(|p| p.failed).count();

        let solved: Vec<&SweepPoint> = points.iter().filter(|p| !p.failed).collect();
        params.peak_transmitted_p = peak(&solved, |p| p.gated.0);
        params.peak_transmitted_s = peak(&solved, |p| p.gated.1);
        params.worst_conservation_error = solved
            .iter()
            .map(|p| p.energies.missing().abs())
            .reduce(f64::max);

        params
    }
}

fn peak(points: &[&SweepPoint], energy: impl Fn(&SweepPoint) -> f64) -> Option<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.angle, energy(p)))
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

fn fmt_angle(angle: Option<f64>) -> String {
    match angle {
        Some(angle) => format!("{:.4} deg", angle),
        None => "none".to_string(),
    }
}

fn fmt_peak(peak: Option<(f64, f64)>) -> String {
    match peak {
        Some((angle, energy)) => format!("{:.6} at {:.4} deg", energy, angle),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Critical angles:")?;
        writeln!(f, "  First (P):        {}", fmt_angle(self.critical.p))?;
        writeln!(f, "  Second (S):       {}", fmt_angle(self.critical.s))?;
        writeln!(f, "Peak transmitted:")?;
        writeln!(f, "  Longitudinal:     {}", fmt_peak(self.peak_transmitted_p))?;
        writeln!(f, "  Shear:            {}", fmt_peak(self.peak_transmitted_s))?;
        match self.worst_conservation_error {
            Some(err) => writeln!(f, "Worst |1 - total|:  {:.3e}", err)?,
            None => writeln!(f, "Worst |1 - total|:  n/a")?,
        }
        writeln!(f, "Failed points:      {}", self.failed)
    }
}
