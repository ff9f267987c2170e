use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tokio::runtime::Runtime;

mod actions;
mod batch;
mod cli;
mod commands;
mod discovery;
mod dispatcher;
mod domain_models;
mod enrichment;
mod error;
mod executor;
mod logger;
mod middleware;
mod output;
mod reducers;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod theme;
mod utils;
mod view_models;
mod views;

use actions::{Action, GlobalAction};
use batch::BatchSummary;
use cli::Cli;
use gh_dep_config::AppConfig;
use middleware::{
    browser_middleware::BrowserMiddleware, execution_middleware::ExecutionMiddleware,
    keyboard_middleware::KeyboardMiddleware, logging::LoggingMiddleware,
};
use state::AppState;
use store::Store;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.is_interactive() {
        let log_file = logger::init_file(cli.verbose)?;
        log::info!("Starting gh-dep, logging to {}", log_file.display());
    } else {
        logger::init_stderr(cli.verbose);
    }

    let config = AppConfig::load();
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    match &cli.command {
        Some(command) => runtime.block_on(commands::run(command, &cli, &config)),
        None => run_interactive(&runtime, &cli, &config),
    }
}

fn run_interactive(runtime: &Runtime, cli: &Cli, config: &AppConfig) -> Result<ExitCode> {
    let options = cli.options(config)?;

    eprintln!("Fetching pull requests...");
    let (client, prs) = runtime.block_on(async {
        let client = commands::connect().await?;
        let prs = commands::load_prs(&client, cli, config).await?;
        anyhow::Ok((client, prs))
    })?;
    log::info!("Loaded {} PRs", prs.len());

    let mut store = Store::new(AppState::new(prs, cli.mode, options));

    // Add middleware in order (they execute in this order)
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(KeyboardMiddleware::new()));
    store.add_middleware(Box::new(BrowserMiddleware::new(runtime.handle().clone())));
    store.add_middleware(Box::new(ExecutionMiddleware::new(
        runtime.handle().clone(),
        client,
    )));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    print_summary(store.state());
    log::info!("Exiting gh-dep");

    let failed = store.state().execution.failed() > 0;
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, store: &mut Store) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(store.state(), area, frame);
        })?;

        if !store.state().running {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    store.dispatch(Action::Global(GlobalAction::KeyPressed(key)));
                }
            }
        }

        // Results of background tasks
        store.drain_pending();
    }

    Ok(())
}

/// Repeat the outcome on the normal screen once the TUI is gone
fn print_summary(state: &AppState) {
    if state.execution.total == 0 {
        return;
    }
    for result in state.execution.ordered() {
        println!("{}", result);
    }
    let summary = BatchSummary {
        succeeded: state.execution.succeeded(),
        failed: state.execution.failed(),
    };
    println!("\n{}", summary);
}
