use ndarray::Array1;

use crate::config::MAX_SWEEP_POINTS;
use crate::error::RtError;


/// Incidence angles from `start` to `end` inclusive, `step` apart (degrees).
/// The last angle is `end` when the range divides evenly, otherwise the
/// largest grid point below it.
pub fn generate_angles(start: f64, end: f64, step: f64) -> Result<Array1<f64>, RtError> {
    let valid = step.is_finite() && step > 0.0 && 0.0 <= start && start <= end && end <= 90.0;
    // tolerate rounding in (end - start) / step
    let intervals = ((end - start) / step + 1e-9).floor();
    if !valid || intervals >= MAX_SWEEP_POINTS as f64 {
        return Err(RtError::InvalidSweep { start, end, step });
    }

    let intervals = intervals as usize;
    let last = (start + intervals as f64 * step).min(end);
    // linspace can overshoot its end by an ulp
    Ok(Array1::linspace(start, last, intervals + 1).mapv(|angle| angle.min(last)))
}
