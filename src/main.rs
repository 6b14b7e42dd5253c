//! bikeshare - Explore US bikeshare trip data from the command line

use bikeshare::{
    cli::Cli,
    data_loader::DataLoader,
    error::Result,
    output::get_formatter,
    prompt::Prompter,
    report::{Reporter, TripReport},
    session::Session,
};
use clap::Parser;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts and reports.
    // --quiet and --verbose override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("error")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("bikeshare=info,bikeshare_core=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let is_tty = is_terminal::is_terminal(io::stdout());
    let color = is_tty && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let loader = DataLoader::new(&cli.data_dir).with_progress(is_tty && !cli.json);
    info!("Reading city data from {}", loader.data_dir().display());

    match cli.selection() {
        Some(selection) => {
            info!("Running one-shot report for {}", selection);

            let trips = loader.load_data(selection.city, selection.month, selection.day)?;
            let report = TripReport::compute(selection, &trips);
            let formatter = get_formatter(cli.json, color);

            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", formatter.format_report(&report))?;
        }
        None => {
            info!("Starting interactive session");

            let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            let reporter = Reporter::new(get_formatter(false, color));
            let mut session = Session::new(loader, prompter, reporter);
            let iterations = session.run()?;

            info!("Session finished after {} iteration(s)", iterations);
        }
    }

    Ok(())
}
