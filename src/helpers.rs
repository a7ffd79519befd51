//! Drawing helpers for the interactive energy plot.
//!
//! Plot coordinates are incidence angle in degrees on the horizontal axis and
//! energy fraction on the vertical axis.

use macroquad::prelude::*;

use crate::result::SweepResult;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_plot_area() {
        let frame = PlotFrame::new(800.0, 600.0);
        assert_eq!(frame.to_screen(0.0, 0.0), (MARGIN, 600.0 - MARGIN));
        assert_eq!(frame.to_screen(90.0, MAX_ENERGY), (800.0 - MARGIN, MARGIN));
    }
}

const MARGIN: f32 = 50.0;
const MAX_ANGLE: f64 = 90.0;
const MAX_ENERGY: f64 = 1.05;

/// Colors of the `R_P, R_S, T_P, T_S` curves and the total.
pub const CURVE_COLORS: [Color; 5] = [BLUE, SKYBLUE, RED, ORANGE, GRAY];
pub const CURVE_LABELS: [&str; 5] = ["R_P", "R_S", "T_P", "T_S", "total"];

/// Screen rectangle the plot is drawn in.
#[derive(Debug, Clone, Copy)]
pub struct PlotFrame {
    width: f32,
    height: f32,
}

impl PlotFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_screen() -> Self {
        Self::new(screen_width(), screen_height())
    }

    /// Maps `(angle, energy)` to pixels. Energies are drawn up to
    /// `MAX_ENERGY` so the unit line sits just below the top edge.
    pub fn to_screen(&self, angle: f64, energy: f64) -> (f32, f32) {
        let w = self.width - 2.0 * MARGIN;
        let h = self.height - 2.0 * MARGIN;
        let x = MARGIN + (angle / MAX_ANGLE) as f32 * w;
        let y = self.height - MARGIN - (energy / MAX_ENERGY) as f32 * h;
        (x, y)
    }
}

pub fn draw_axes(frame: &PlotFrame, color: Color) {
    let (x0, y0) = frame.to_screen(0.0, 0.0);
    let (x1, _) = frame.to_screen(MAX_ANGLE, 0.0);
    let (_, y1) = frame.to_screen(0.0, MAX_ENERGY);
    draw_line(x0, y0, x1, y0, 1.5, color);
    draw_line(x0, y0, x0, y1, 1.5, color);

    for deg in (0..=90).step_by(10) {
        let (x, y) = frame.to_screen(deg as f64, 0.0);
        draw_line(x, y, x, y + 5.0, 1.0, color);
        draw_text(&deg.to_string(), x - 8.0, y + 20.0, 16.0, color);
    }
    for tenth in 0..=10 {
        let energy = tenth as f64 / 10.0;
        let (x, y) = frame.to_screen(0.0, energy);
        draw_line(x - 5.0, y, x, y, 1.0, color);
        draw_text(&format!("{:.1}", energy), x - 35.0, y + 5.0, 16.0, color);
    }
}

/// Polyline through consecutive `(angle, energy)` samples.
pub fn draw_curve(frame: &PlotFrame, samples: &[(f64, f64)], color: Color, thickness: f32) {
    for pair in samples.windows(2) {
        let (x1, y1) = frame.to_screen(pair[0].0, pair[0].1);
        let (x2, y2) = frame.to_screen(pair[1].0, pair[1].1);
        draw_line(x1, y1, x2, y2, thickness, color);
    }
}

/// Vertical dashed line at a critical angle.
pub fn draw_marker(frame: &PlotFrame, angle: f64, label: &str, color: Color) {
    let (x, y0) = frame.to_screen(angle, 0.0);
    let (_, y1) = frame.to_screen(angle, MAX_ENERGY);
    let mut y = y1;
    while y < y0 {
        draw_line(x, y, x, (y + 6.0).min(y0), 1.0, color);
        y += 12.0;
    }
    draw_text(label, x + 4.0, y1 + 14.0, 16.0, color);
}

/// Draws the energy curves of a sweep with axes, legend and critical-angle
/// markers. Failed points are left out of the curves.
pub fn draw_sweep(result: &SweepResult, frame: &PlotFrame) {
    draw_axes(frame, WHITE);

    let solved: Vec<_> = result.points.iter().filter(|p| !p.failed).collect();
    for (i, color) in CURVE_COLORS.iter().enumerate() {
        let samples: Vec<(f64, f64)> = solved
            .iter()
            .map(|p| {
                let e = &p.energies;
                let value = match i {
                    0 => e.reflected_p,
                    1 => e.reflected_s,
                    2 => e.transmitted_p,
                    3 => e.transmitted_s,
                    _ => e.total(),
                };
                (p.angle, value)
            })
            .collect();
        draw_curve(frame, &samples, *color, 2.0);
        draw_text(
            CURVE_LABELS[i],
            frame.width - MARGIN - 60.0,
            MARGIN + 20.0 * i as f32,
            18.0,
            *color,
        );
    }

    if let Some(p) = result.critical.p {
        draw_marker(frame, p, "1st", YELLOW);
    }
    if let Some(s) = result.critical.s {
        draw_marker(frame, s, "2nd", GREEN);
    }
}
