//! The table view: every record, best `rice_score` first.

use crate::common::format::{format_score, pad_to_width, truncate_to_width};
use crate::engine::model::{FeatureScore, ScoreSet};

pub const HEADERS: [&str; 8] = ["#", "Feature", "R", "I", "C", "E", "RICE", "R×I×C/E"];

const NAME_WIDTH: usize = 28;

/// Records ordered by `rice_score`, highest first. Ties keep input order.
/// The score set itself is left untouched.
pub fn ranked(scores: &ScoreSet) -> Vec<&FeatureScore> {
    let mut rows: Vec<&FeatureScore> = scores.iter().collect();
    rows.sort_by(|a, b| b.rice_score.total_cmp(&a.rice_score));
    rows
}

/// Cell text for each ranked row, in [`HEADERS`] order.
pub fn table_rows(scores: &ScoreSet) -> Vec<[String; 8]> {
    ranked(scores)
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            [
                (i + 1).to_string(),
                s.name.clone(),
                format_score(s.reach),
                format_score(s.impact),
                format_score(s.confidence),
                format_score(s.effort),
                format_score(s.rice_score),
                s.computed_rice()
                    .map(format_score)
                    .unwrap_or_else(|| "n/a".into()),
            ]
        })
        .collect()
}

/// Plain-text rendering for batch output.
pub fn render_text(scores: &ScoreSet) -> String {
    let rows = table_rows(scores);
    let name_width = rows
        .iter()
        .map(|r| unicode_width::UnicodeWidthStr::width(r[1].as_str()))
        .chain(std::iter::once(HEADERS[1].len()))
        .max()
        .unwrap_or(0)
        .min(NAME_WIDTH);

    let mut out = String::new();
    out.push_str(&format_line(&HEADERS.map(str::to_owned), name_width));
    out.push('\n');
    out.push_str(&"-".repeat(name_width + 4 + 4 * 4 + 9 + 9));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_line(row, name_width));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[String; 8], name_width: usize) -> String {
    let name = pad_to_width(&truncate_to_width(&cells[1], name_width), name_width);
    format!(
        "{:>3} {} {:>3} {:>3} {:>3} {:>3} {:>8} {:>8}",
        cells[0], name, cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
    )
    .trim_end()
    .to_string()
}

#[cfg(feature = "tui")]
pub use widget::results_table;

#[cfg(feature = "tui")]
mod widget {
    use ratatui::{
        layout::Constraint,
        style::{Color, Modifier, Style},
        widgets::{Cell, Row, Table},
    };

    use super::{HEADERS, ranked, table_rows};
    use crate::engine::model::ScoreSet;

    /// Table widget for the results pane. Rows where the model's arithmetic
    /// disagrees with R×I×C/E get the check column highlighted.
    pub fn results_table(scores: &ScoreSet) -> Table<'static> {
        let mismatches: Vec<bool> = ranked(scores).iter().map(|s| s.score_mismatch()).collect();
        let rows: Vec<Row> = table_rows(scores)
            .into_iter()
            .zip(mismatches)
            .map(|(cells, mismatch)| {
                let check_style = if mismatch {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let [rank, name, r, i, c, e, rice, check] = cells;
                Row::new(vec![
                    Cell::from(rank),
                    Cell::from(name),
                    Cell::from(r),
                    Cell::from(i),
                    Cell::from(c),
                    Cell::from(e),
                    Cell::from(rice).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(check).style(check_style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(8),
        ];

        Table::new(rows, widths)
            .header(
                Row::new(HEADERS.to_vec()).style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ")
    }
}
