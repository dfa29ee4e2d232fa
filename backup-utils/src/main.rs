use backup_utils_core::cli::Outcome;
use backup_utils_core::cli::config::{ConfigCmd, check, dump, init};
use backup_utils_core::cli::logs::{LogsArgs, run_logs};
use backup_utils_core::cli::notify::{
    NotifyArgs, TestNotificationArgs, run_notify, run_test_notification,
};
use backup_utils_core::cli::stats::{StatsArgs, run_stats};
use backup_utils_core::conf::load_config;
use backup_utils_core::logging::init_logging;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "backup-utils",
    version,
    about = "Backup log viewer, statistics and notification logging"
)]
struct Cli {
    /// Path to the config file (defaults to config/backup-utils.hcl)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// View and filter backup notification logs
    Logs(LogsArgs),

    /// Analyze backup logs and show statistics
    Stats(StatsArgs),

    /// Append a backup notification to the log
    Notify(NotifyArgs),

    /// Log a synthetic notification to check the setup
    TestNotification(TestNotificationArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut out = io::stdout().lock();
    let now = Local::now().naive_local();
    let load = || {
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!(log_dir = %cfg.logging.dir.display(), "configuration loaded");
        anyhow::Ok(cfg)
    };

    match cli.command {
        Command::Logs(args) => run_logs(&args, &load()?, now, &mut out),
        Command::Stats(args) => run_stats(&args, &load()?, now, &mut out),
        Command::Notify(args) => run_notify(&args, &load()?, now, &mut out),
        Command::TestNotification(args) => run_test_notification(&args, &load()?, now, &mut out),
        Command::Config { cmd } => {
            match cmd {
                ConfigCmd::Check => check(&load()?, &mut out)?,
                ConfigCmd::Dump { json: _, yaml } => dump(&load()?, yaml, &mut out)?,
                ConfigCmd::Init { path } => init(&path, &mut out)?,
            }
            Ok(Outcome::Success)
        }
    }
}
