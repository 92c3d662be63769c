//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks when no interactive terminal is wanted
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted curve through the dataset's x-values: `-` line

use crate::domain::{Dataset, TanhParams};
use crate::models::predict;

/// Render the dataset and the fitted curve.
pub fn render_ascii_plot(dataset: &Dataset, coeffs: &TanhParams, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curve = fitted_curve(dataset, coeffs);
    let (x_min, x_max) = widen(x_range(dataset).unwrap_or((0.0, 1.0)));
    let (y_min, y_max) = y_range(dataset, &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    for (x, y) in dataset.points() {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str("o Data  - Fitted function\n");

    out
}

/// The fitted model at the dataset's x-values, sorted by x for drawing.
pub fn fitted_curve(dataset: &Dataset, coeffs: &TanhParams) -> Vec<(f64, f64)> {
    let mut curve: Vec<(f64, f64)> = dataset
        .xs()
        .iter()
        .filter(|x| x.is_finite())
        .map(|&x| (x, predict(x, coeffs)))
        .collect();
    curve.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    curve
}

fn x_range(dataset: &Dataset) -> Option<(f64, f64)> {
    dataset.bounds().map(|b| (b.x_min, b.x_max))
}

fn y_range(dataset: &Dataset, curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    if let Some(b) = dataset.bounds() {
        min_y = b.y_min;
        max_y = b.y_max;
    }
    for &(_, y) in curve {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() {
        Some(widen((min_y, max_y)))
    } else {
        None
    }
}

/// Give a zero-width range some room so the mapping stays defined.
fn widen((min, max): (f64, f64)) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let ds = Dataset::from_points([(0.0, 0.0), (9.0, 1.0)]);
        let flat = TanhParams::new(0.0, 1.0);

        let txt = render_ascii_plot(&ds, &flat, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 9.000] | y=[-0.05, 1.05]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
            "o Data  - Fitted function\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn fitted_curve_is_sorted_and_on_the_model() {
        let ds = Dataset::from_points([(2.0, 0.0), (-1.0, 0.0), (0.5, 0.0)]);
        let p = TanhParams::new(1.0, 0.5);
        let curve = fitted_curve(&ds, &p);
        let xs: Vec<f64> = curve.iter().map(|c| c.0).collect();
        assert_eq!(xs, vec![-1.0, 0.5, 2.0]);
        for (x, y) in curve {
            assert_eq!(y, predict(x, &p));
        }
    }

    #[test]
    fn single_point_plot_has_requested_size() {
        let ds = Dataset::from_points([(1.0, 1.0)]);
        let txt = render_ascii_plot(&ds, &TanhParams::new(1.0, 1.0), 20, 8);
        let lines: Vec<&str> = txt.lines().collect();
        // header + rows + legend
        assert_eq!(lines.len(), 8 + 2);
        assert!(lines[1..9].iter().all(|l| l.chars().count() == 20));
        assert!(txt.contains('o'));
    }
}
