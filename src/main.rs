use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use syncstamp::config::{LogFormat, SyncstampConfig};
use syncstamp::invocation::Invocation;
use syncstamp::record::Status;

#[derive(Parser)]
#[command(
    name = "syncstamp",
    about = "Stamp a repository's sync status into a mirror status list",
    version,
    long_about = "Reads a JSON list of mirrored repositories, moves one repository to a new \
                  sync status with the matching timestamps, and writes the list back."
)]
struct Cli {
    /// New status for the repository
    status: TargetStatus,

    /// Repository name
    repo: String,

    /// Repository size in bytes (0 leaves the size unchanged)
    size: Option<String>,

    /// Delay until the next scheduled sync, e.g. "1h" or "90m" (0 leaves it unchanged)
    next_schedule: Option<String>,

    /// Read the status list from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Write the status list to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Configuration file (default: $SYNCSTAMP_CONFIG, then /etc/syncstamp/syncstamp.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (overrides the config file)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

/// Statuses an operator may request directly.
#[derive(Clone, Copy, ValueEnum)]
enum TargetStatus {
    Syncing,
    Success,
    Failed,
}

impl From<TargetStatus> for Status {
    fn from(s: TargetStatus) -> Self {
        match s {
            TargetStatus::Syncing => Status::Syncing,
            TargetStatus::Success => Status::Success,
            TargetStatus::Failed => Status::Failed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SyncstampConfig::resolve(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    syncstamp::logging::init(&config.logging);

    let opts = syncstamp::RunOptions {
        invocation: Invocation {
            status: cli.status.into(),
            name: cli.repo,
            size: cli.size,
            schedule: cli.next_schedule,
        },
        input: cli.input,
        output: cli.output,
        indent: config.output.indent,
    };

    syncstamp::run(opts)?;
    Ok(())
}
