//! Archsim Control - interactive simulated Arch shell

use anyhow::{Context, Result};
use archsim_common::{AiRunner, ArchsimConfig, OpenAiTranslator, Simulator};
use archsimctl::cli::{Cli, Commands};
use archsimctl::errors;
use archsimctl::logging::Journal;
use archsimctl::repl;
use archsimctl::session::{Reply, Session};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("archsimctl: {:#}", e);
        std::process::exit(errors::EXIT_GENERAL_ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // The LLM credential may live in ./.env
    if let Err(e) = dotenvy::dotenv_override() {
        tracing::debug!("no .env loaded: {}", e);
    }

    let config = ArchsimConfig::load(cli.config.as_deref());
    let translator = OpenAiTranslator::from_config(config.llm.clone())
        .context("failed to set up the LLM client")?;
    if !translator.is_configured() {
        tracing::info!("LLM fallback unavailable; rule-based translation only");
    }

    let mut sim = Simulator::default();
    for scenario in &cli.scenarios {
        sim.inject(*scenario);
    }

    let journal = if cli.no_journal || !config.journal.enabled {
        Journal::disabled()
    } else {
        Journal::discover(config.journal.path.clone())
    };

    let mut session = Session::new(AiRunner::new(sim, translator), journal);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run(&mut session),
        Commands::Run { command } => {
            println!("{}", session.run_raw(&command.join(" ")));
            Ok(())
        }
        Commands::Ask { request } => match session.run_ai(&request.join(" ")) {
            Ok(translation) => {
                if let Some(text) = repl::render(&Reply::Translated(translation)) {
                    println!("{}", text);
                }
                Ok(())
            }
            Err(e) => {
                let code = errors::exit_code_for(&e);
                if let Some(text) = repl::render(&Reply::Rejected(e)) {
                    eprintln!("{}", text);
                }
                std::process::exit(code);
            }
        },
    }
}
