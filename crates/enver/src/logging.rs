use enver_platform::AppPaths;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;

/// Which sinks get installed and how much each one receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPlan {
    pub terminal: LevelFilter,
    /// `None` leaves the log file untouched.
    pub file: Option<LevelFilter>,
}

impl LogPlan {
    /// `verbosity` counts `-v` flags and only raises the stderr level. The
    /// settings flag alone decides whether the log file is written.
    pub fn new(verbosity: u8, file_logging: bool) -> Self {
        let terminal = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let file = file_logging.then(|| terminal.max(LevelFilter::Debug));
        Self { terminal, file }
    }
}

fn config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("enver")
        .build()
}

pub fn init_logging(paths: &AppPaths, plan: LogPlan) {
    let config = config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        plan.terminal,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut file_error = None;
    if let Some(level) = plan.file {
        let log_path = paths.log_file();
        let opened = paths
            .ensure_dirs()
            .and_then(|()| File::create(&log_path));
        match opened {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(e) => file_error = Some((log_path, e)),
        }
    }

    if CombinedLogger::init(loggers).is_err() {
        return;
    }

    match (plan.file, file_error) {
        (_, Some((path, e))) => log::warn!("Cannot write log file {:?}: {}", path, e),
        (Some(level), None) => log::info!("Logging to {:?} at {}", paths.log_file(), level),
        (None, None) => {}
    }
}
