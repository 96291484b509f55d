//! The bubble-chart view: Effort on x, Impact on y, area from `rice_score`.

use crate::engine::model::ScoreSet;

pub const X_AXIS_TITLE: &str = "Effort (Lower is Better)";
pub const Y_AXIS_TITLE: &str = "Impact (Higher is Better)";

/// Radius, in axis units, of the largest bubble on the chart.
const MAX_RADIUS: f64 = 0.8;
/// Gap between a bubble's top edge and its label, in axis units.
const LABEL_GAP: f64 = 0.35;
/// Upper bound on gridline intervals per axis, however wide the axis gets.
const MAX_GRID_INTERVALS: f64 = 12.0;

/// A gridline position. Every other one carries a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub labelled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// `rice_score` times the chart scale, clamped at zero.
    pub area: f64,
}

/// One bubble per record, in the order the model returned them.
#[derive(Debug, Clone)]
pub struct BubbleChart {
    pub title: String,
    pub bubbles: Vec<Bubble>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl BubbleChart {
    pub fn new(goal: &str, scores: &ScoreSet, scale: f64) -> Self {
        let bubbles: Vec<Bubble> = scores
            .iter()
            .map(|s| Bubble {
                label: s.name.clone(),
                x: s.effort,
                y: s.impact,
                area: (s.rice_score * scale).max(0.0),
            })
            .collect();

        let x_bounds = axis_bounds(bubbles.iter().map(|b| b.x), 0.0);
        // Extra headroom so labels above the top row stay on the canvas.
        let y_bounds = axis_bounds(bubbles.iter().map(|b| b.y), 1.0);

        Self {
            title: format!("Prioritization Matrix: {goal}"),
            bubbles,
            x_bounds,
            y_bounds,
        }
    }

    /// Drawing radius in axis units. Proportional to the square root of the
    /// area, so the drawn area stays proportional to `rice_score`.
    pub fn radius(&self, bubble: &Bubble) -> f64 {
        let max_area = self.bubbles.iter().map(|b| b.area).fold(0.0, f64::max);
        if max_area <= 0.0 {
            0.0
        } else {
            MAX_RADIUS * (bubble.area / max_area).sqrt()
        }
    }

    /// Where the label of `bubble` is anchored: just above its top edge.
    pub fn label_y(&self, bubble: &Bubble) -> f64 {
        (bubble.y + self.radius(bubble) + LABEL_GAP).min(self.y_bounds[1])
    }

    pub fn x_ticks(&self) -> Vec<Tick> {
        grid_ticks(self.x_bounds)
    }

    pub fn y_ticks(&self) -> Vec<Tick> {
        grid_ticks(self.y_bounds)
    }
}

/// Whole-number ticks, one unit apart on the usual 0–11 range. Wider axes
/// get a coarser step so there are never more than 13 ticks.
fn grid_ticks([lo, hi]: [f64; 2]) -> Vec<Tick> {
    let step = ((hi - lo) / MAX_GRID_INTERVALS).ceil().max(1.0);
    if !step.is_finite() {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| Tick {
            value: k as f64 * step,
            labelled: k % 2 == 0,
        })
        .collect()
}

/// Covers the 1–10 scoring range at least, widened to fit outliers.
fn axis_bounds(values: impl Iterator<Item = f64>, headroom: f64) -> [f64; 2] {
    let (lo, hi) = values.fold((0.0_f64, 11.0_f64), |(lo, hi), v| {
        (lo.min(v - 1.0), hi.max(v + 1.0))
    });
    [lo, hi + headroom]
}

#[cfg(feature = "tui")]
pub use widget::render_to_text;

#[cfg(feature = "tui")]
mod widget {
    use ratatui::{
        buffer::Buffer,
        layout::Rect,
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{
            Block, Borders, Widget,
            canvas::{Canvas, Circle, Context, Points},
        },
    };
    use unicode_width::UnicodeWidthStr;

    use super::{BubbleChart, Tick, X_AXIS_TITLE, Y_AXIS_TITLE};
    use crate::common::format::format_score;

    const BUBBLE_COLOR: Color = Color::LightBlue;
    const GRID_COLOR: Color = Color::DarkGray;

    impl BubbleChart {
        /// Canvas widget sized for `area` (used to centre labels).
        pub fn canvas(&self, area: Rect) -> Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
            let inner_cols = area.width.saturating_sub(2).max(1) as f64;
            let units_per_col = (self.x_bounds[1] - self.x_bounds[0]) / inner_cols;

            Canvas::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Line::from(format!(" {} ", self.title)).left_aligned())
                        .title(Line::from(format!(" ↑ {Y_AXIS_TITLE} ")).right_aligned())
                        .title_bottom(Line::from(format!(" {X_AXIS_TITLE} → ")).right_aligned()),
                )
                .marker(Marker::Braille)
                .x_bounds(self.x_bounds)
                .y_bounds(self.y_bounds)
                .paint(move |ctx| self.paint(ctx, units_per_col))
        }

        fn paint(&self, ctx: &mut Context<'_>, units_per_col: f64) {
            let [x0, x1] = self.x_bounds;
            let [y0, y1] = self.y_bounds;

            let x_ticks = self.x_ticks();
            let y_ticks = self.y_ticks();

            let mut grid = Vec::new();
            for tick in &x_ticks {
                dashed(&mut grid, |t| (tick.value, y0 + t * (y1 - y0)));
            }
            for tick in &y_ticks {
                dashed(&mut grid, |t| (x0 + t * (x1 - x0), tick.value));
            }
            ctx.draw(&Points {
                coords: &grid,
                color: GRID_COLOR,
            });

            for tick in x_ticks.iter().filter(|t| t.labelled) {
                ctx.print(tick.value, y0, tick_label(tick));
            }
            for tick in y_ticks.iter().filter(|t| t.labelled) {
                ctx.print(x0, tick.value, tick_label(tick));
            }

            ctx.layer();
            for bubble in &self.bubbles {
                let radius = self.radius(bubble);
                if radius > 0.0 {
                    ctx.draw(&Circle {
                        x: bubble.x,
                        y: bubble.y,
                        radius,
                        color: BUBBLE_COLOR,
                    });
                }
                ctx.draw(&Points {
                    coords: &[(bubble.x, bubble.y)],
                    color: Color::White,
                });
            }

            ctx.layer();
            for bubble in &self.bubbles {
                let width = UnicodeWidthStr::width(bubble.label.as_str()) as f64 * units_per_col;
                let x = (bubble.x - width / 2.0).min(x1 - width).max(x0);
                ctx.print(
                    x,
                    self.label_y(bubble),
                    Span::styled(
                        bubble.label.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                );
            }
        }
    }

    fn tick_label(tick: &Tick) -> Span<'static> {
        Span::styled(format_score(tick.value), Style::default().fg(GRID_COLOR))
    }

    /// Appends points for a dashed line parameterised over t in [0, 1].
    fn dashed(out: &mut Vec<(f64, f64)>, at: impl Fn(f64) -> (f64, f64)) {
        const STEPS: usize = 240;
        for i in 0..=STEPS {
            if (i / 4) % 2 == 0 {
                out.push(at(i as f64 / STEPS as f64));
            }
        }
    }

    /// Renders the chart off-screen and returns it as lines of text.
    pub fn render_to_text(chart: &BubbleChart, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        chart.canvas(area).render(area, &mut buf);

        let mut out = String::new();
        for row in buf.content().chunks(width as usize) {
            let mut line = String::new();
            let mut skip = 0;
            for cell in row {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                skip = UnicodeWidthStr::width(symbol).saturating_sub(1);
                line.push_str(symbol);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
