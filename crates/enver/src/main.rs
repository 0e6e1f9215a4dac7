use clap::Parser;
use std::process::ExitCode;

use enver_platform::AppPaths;

mod app;
mod cache;
mod cli;
mod logging;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let paths = AppPaths::new();
    let settings = settings::AppSettings::load(&paths);
    logging::init_logging(
        &paths,
        logging::LogPlan::new(cli.verbose, settings.debug_logging),
    );

    log::info!("enver {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = app::App::new(paths, settings);
    match app.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            log::error!("Fatal: {}", e);
            eprintln!("fatal: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            log::warn!("Command failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
