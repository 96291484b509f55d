use anyhow::Result;
use clap::Parser;

// ──────────────────────────────────────────────────────────────
//  Entry point
// ──────────────────────────────────────────────────────────────
fn main() -> Result<()> {
    let args = roadmap_optimizer::ui::cli::Cli::parse();
    roadmap_optimizer::app_controller::run(args)
}
