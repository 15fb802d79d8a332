//! Runtime configuration from command-line flags, falling back to environment variables.

use crate::prompt::UserId;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Fixture bot server
///
/// Serves the fixture commands over a JSON API and stores state as flat JSON files.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory holding fixtures.json, records.json and tournaments.json
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// User id allowed to wipe all fixtures
    #[arg(long, env = "OWNER_ID")]
    pub owner_id: Option<UserId>,

    /// Seconds to wait for the league/knockout choice
    #[arg(long, env = "FORMAT_TIMEOUT_SECS", default_value_t = 180)]
    pub format_timeout_secs: u64,

    /// Seconds to wait for the number of league rounds
    #[arg(long, env = "ROUNDS_TIMEOUT_SECS", default_value_t = 60)]
    pub rounds_timeout_secs: u64,

    /// Seconds to wait for a Y/N delete confirmation
    #[arg(long, env = "CONFIRM_TIMEOUT_SECS", default_value_t = 30)]
    pub confirm_timeout_secs: u64,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            owner_id: self.owner_id,
            format_timeout: Duration::from_secs(self.format_timeout_secs),
            rounds_timeout: Duration::from_secs(self.rounds_timeout_secs),
            confirm_timeout: Duration::from_secs(self.confirm_timeout_secs),
        }
    }
}

/// The part of [`Config`] the fixture service itself needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// `None` disables `delete-all` for everyone.
    pub owner_id: Option<UserId>,
    pub format_timeout: Duration,
    pub rounds_timeout: Duration,
    pub confirm_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner_id: None,
            format_timeout: Duration::from_secs(180),
            rounds_timeout: Duration::from_secs(60),
            confirm_timeout: Duration::from_secs(30),
        }
    }
}
