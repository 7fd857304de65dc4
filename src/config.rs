use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::domain::DropTarget;

pub const DEFAULT_JOBS_FILE: &str = "jobs.json";

#[derive(Parser, Debug)]
#[command(name = "jobboard", about = "Drag-and-drop scheduling board for CRM jobs")]
pub struct Cli {
    /// JSON file holding the job records to schedule
    #[arg(long, env = "JOBBOARD_JOBS_FILE")]
    pub jobs_file: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "JOBBOARD_LOG_FILE")]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the unscheduled bucket and the calendar, one line per day
    Show {
        /// First day to print (defaults to the earliest scheduled start)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Number of days to print
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// Drop a job onto a date (YYYY-MM-DD) or onto "unscheduled"
    Move {
        job_id: String,
        target: DropTarget,

        /// Have the backend refuse the write, to preview the rollback
        #[arg(long)]
        simulate_failure: bool,
    },
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub jobs_file: Option<PathBuf>,
    pub log_file: Option<String>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("jobboard").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }
}

/// Effective settings: command-line flags, then the config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub jobs_file: PathBuf,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            jobs_file: cli
                .jobs_file
                .clone()
                .or(file.jobs_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_JOBS_FILE)),
            log_file: cli.log_file.clone().or(file.log_file),
        }
    }
}
