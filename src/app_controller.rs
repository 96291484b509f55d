use anyhow::{Context, Result};

use crate::{
    common::logging,
    engine::{
        client::GeminiClient,
        config::OptimizerConfig,
        config_file::{APP_NAME, ConfigFile},
        prompt::PromptBuilder,
        session::OptimizerSession,
    },
    ui::{cli::Cli, config::build_config, output, template},
};

#[cfg(feature = "colors")]
use colored::{ColoredString, Colorize};

/// The primary orchestration function for the application.
pub fn run(args: Cli) -> Result<()> {
    let interactive_ui = !args.batch && cfg!(feature = "tui");
    logging::init(args.log_file.as_deref(), interactive_ui)?;

    let cfg_file: ConfigFile = confy::load(APP_NAME, None).context("Failed to load config file")?;
    let config = build_config(&args, &cfg_file)?;

    let (tpl_content, tpl_hash) = template::resolve_template(&config.template)?;
    log::info!("Using prompt template: {}", template::describe_template(&tpl_hash));
    let prompt = PromptBuilder::new(&tpl_content)?;

    let client = GeminiClient::new(&config.base_url, &config.model)?;
    let credential = args.api_key.clone().unwrap_or_default();
    let session = OptimizerSession::from_config(&config, credential);

    if args.batch {
        return run_batch_flow(session, &config, &client, &prompt);
    }

    #[cfg(feature = "tui")]
    {
        let view = crate::ui::tui_app::ViewSettings {
            bubble_scale: config.bubble_scale,
            model: config.model.clone(),
            template_label: template::describe_template(&tpl_hash),
        };
        crate::ui::tui_app::run_app(session, view, &client, &prompt)
    }
    #[cfg(not(feature = "tui"))]
    {
        println!(
            "{}",
            colour("[i] Interactive mode requires the 'tui' feature; running once in batch mode.")
        );
        run_batch_flow(session, &config, &client, &prompt)
    }
}

// ──────────────────────────────────────────────────────────────
//  Batch flow (non-interactive)
// ──────────────────────────────────────────────────────────────
fn run_batch_flow(
    mut session: OptimizerSession,
    config: &OptimizerConfig,
    client: &GeminiClient,
    prompt: &PromptBuilder,
) -> Result<()> {
    #[cfg(feature = "interactive")]
    if session.credential.trim().is_empty() && std::io::IsTerminal::is_terminal(&std::io::stdin())
    {
        session.credential = crate::ui::config::prompt_for_credential()?;
    }
    #[cfg(not(feature = "interactive"))]
    let _ = &mut session;

    let feature_count = session.run_config().features().len();

    #[cfg(feature = "interactive")]
    let spinner = {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_message(format!(
            "AI is calculating RICE scores for {feature_count} features..."
        ));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let result = session.optimize(client, prompt);

    #[cfg(feature = "interactive")]
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            output::OutputHandler::new(&outcome, config).handle()?;
            if config.output_format == crate::engine::config::OutputFormat::Table {
                output::print_summary(&outcome.goal, feature_count, outcome.scores.len());
            }
            Ok(())
        }
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                eprintln!("{}", colour("--- RAW RESPONSE START ---"));
                eprintln!("{raw}");
                eprintln!("{}", colour("--- RAW RESPONSE END ---"));
            }
            Err(anyhow::Error::new(e))
        }
    }
}

#[cfg(feature = "colors")]
fn colour<S: AsRef<str>>(s: S) -> ColoredString {
    s.as_ref().yellow()
}
#[cfg(not(feature = "colors"))]
fn colour<S: AsRef<str>>(s: S) -> String {
    s.as_ref().into()
}
