use anyhow::Result;
use serde_json::json;

use crate::engine::{
    config::{OptimizerConfig, OutputFormat},
    session::RunOutcome,
};
use crate::ui::{chart::BubbleChart, table};

#[cfg(feature = "colors")]
use colored::Colorize;

const CHART_WIDTH: u16 = 100;
const CHART_HEIGHT: u16 = 30;

/// Prints the results of a batch run.
pub struct OutputHandler<'a> {
    outcome: &'a RunOutcome,
    config: &'a OptimizerConfig,
}

impl<'a> OutputHandler<'a> {
    pub fn new(outcome: &'a RunOutcome, config: &'a OptimizerConfig) -> Self {
        Self { outcome, config }
    }

    pub fn handle(&self) -> Result<()> {
        match self.config.output_format {
            OutputFormat::Json => self.handle_json_output(),
            OutputFormat::Table => {
                self.handle_chart_output();
                self.handle_table_output();
                Ok(())
            }
        }
    }

    fn handle_json_output(&self) -> Result<()> {
        let json_out = json!({
            "goal": self.outcome.goal,
            "model": self.config.model,
            "features": self.outcome.features,
            "scores": self.outcome.scores,
            "ranked": table::ranked(&self.outcome.scores),
        });
        println!("{}", serde_json::to_string_pretty(&json_out)?);
        Ok(())
    }

    fn handle_chart_output(&self) {
        let chart = BubbleChart::new(
            &self.outcome.goal,
            &self.outcome.scores,
            self.config.bubble_scale,
        );
        #[cfg(feature = "tui")]
        {
            heading("📊 Matrix Chart");
            print!(
                "{}",
                crate::ui::chart::render_to_text(&chart, CHART_WIDTH, CHART_HEIGHT)
            );
        }
        #[cfg(not(feature = "tui"))]
        {
            let _ = (CHART_WIDTH, CHART_HEIGHT);
            heading(&chart.title);
            for b in &chart.bubbles {
                println!("  {:<28} E={:<4} I={:<4} size={:.0}", b.label, b.x, b.y, b.area);
            }
        }
    }

    fn handle_table_output(&self) {
        heading("📋 Data Table");
        print!("{}", table::render_text(&self.outcome.scores));
    }
}

#[cfg(feature = "colors")]
fn heading(s: &str) {
    println!("\n{}", s.bold().yellow());
}
#[cfg(not(feature = "colors"))]
fn heading(s: &str) {
    println!("\n{s}");
}

pub fn print_summary(goal: &str, features: usize, scored: usize) {
    let line = "=".repeat(40);
    println!("\n{line}\n🎯 Goal: {goal}\n🧩 Features Scored: {scored}/{features}\n{line}");
}
