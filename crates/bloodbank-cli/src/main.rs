//! Blood Bank CLI - stock ledger, donations, requests and audit log
//!
//! This is the command-line interface for Blood Bank. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing::Level;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{donate, init, misc, query, request, staff, stock};
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli) {
        let ui_ctx = UiContext::detect();
        let hint = errors::hint(&e);
        print_error(&ui_ctx, &format!("{:#}", e), hint.as_deref());
        std::process::exit(errors::exit_code(&e));
    }
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return misc::handle_completions(args.shell);
    }

    let ctx = AppContext::new(cli)?;
    match &cli.command {
        Commands::Init => init::handle_init(&ctx)?,
        Commands::Inventory(args) => stock::handle_inventory(&ctx, args)?,
        Commands::Alerts(args) => stock::handle_alerts(&ctx, args)?,
        Commands::Compatibility(args) => stock::handle_compatibility(&ctx, args)?,
        Commands::Stock(command) => stock::handle_stock(&ctx, command)?,
        Commands::Donate(args) => donate::handle_donate(&ctx, args)?,
        Commands::Request(args) => request::handle_request(&ctx, args)?,
        Commands::Staff(args) => staff::handle_staff(&ctx, args)?,
        Commands::Search(args) => query::handle_search(&ctx, args)?,
        Commands::History(args) => query::handle_history(&ctx, args)?,
        Commands::Report(args) => query::handle_report(&ctx, args)?,
        Commands::Logs(args) => query::handle_logs(&ctx, args)?,
        Commands::Completions(_) => {}
    }
    Ok(())
}
