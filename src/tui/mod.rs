//! Ratatui-based fit viewer.
//!
//! Shows the observations, the fitted curve and a legend, and blocks until the
//! user dismisses it (`q`, `Esc` or `Enter`).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::domain::{Dataset, FitResult};
use crate::error::AppError;
use crate::plot::fitted_curve;

mod plotters_chart;

use plotters_chart::{FitChart, CURVE_RGB};

/// Show the fit and wait until the viewer is dismissed.
pub fn show_fit(dataset: &Dataset, fit: &FitResult) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::viewer(format!("Failed to initialize terminal: {e}")))?;

    let viewer = Viewer {
        series: chart_series(dataset, fit),
        fit,
    };
    viewer.event_loop(&mut terminal)?;
    debug!("viewer dismissed");
    Ok(())
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::viewer(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::viewer(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Series and bounds for the chart.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    curve: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

struct Viewer<'a> {
    series: ChartSeries,
    fit: &'a FitResult,
}

impl Viewer<'_> {
    fn event_loop<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::viewer(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::viewer(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::viewer(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (r, g, b) = CURVE_RGB;
        let lines = vec![
            Line::from(vec![
                Span::styled("tanhfit", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    " — y = a·tanh(b·x) | a={:.8} b={:.8} | n={}",
                    self.fit.coeffs.a,
                    self.fit.coeffs.b,
                    self.series.points.len(),
                )),
            ]),
            Line::from(vec![
                Span::styled("• Data", Style::default().fg(Color::White)),
                Span::raw("   "),
                Span::styled("— Fitted function", Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled(
                    format!("   rmse={:.4e}", self.fit.rmse),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Fit").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        // Ticks and axis titles come from plotters; the chart fills the block.
        frame.render_widget(self.chart(), inner);
    }

    fn chart(&self) -> FitChart<'_> {
        let s = &self.series;
        FitChart {
            curve: &s.curve,
            points: &s.points,
            x_bounds: s.x_bounds,
            y_bounds: s.y_bounds,
            x_label: "x",
            y_label: "y",
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(Span::styled(
            "q / Esc / Enter  close and print results",
            Style::default().fg(Color::Gray),
        ));
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn chart_series(dataset: &Dataset, fit: &FitResult) -> ChartSeries {
    let points: Vec<(f64, f64)> = dataset
        .points()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let curve = fitted_curve(dataset, &fit.coeffs);

    let (mut x0, mut x1, mut y0, mut y1) = match dataset.bounds() {
        Some(b) => (b.x_min, b.x_max, b.y_min, b.y_max),
        None => (0.0, 1.0, 0.0, 1.0),
    };
    for &(_, y) in &curve {
        if y.is_finite() {
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
    }

    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    if y1 <= y0 {
        y0 -= 0.5;
        y1 += 0.5;
    }

    let pad = ((y1 - y0).abs() * 0.05).max(1e-12);

    ChartSeries {
        curve,
        points,
        x_bounds: [x0, x1],
        y_bounds: [y0 - pad, y1 + pad],
    }
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}
