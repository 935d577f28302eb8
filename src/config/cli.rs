use crate::config::toml_config::TomlConfig;
use crate::core::report::OutputFormat;
use crate::domain::model::{CompetitorId, OddCountPolicy, PairingMode, PairingStrategy};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "swiss-pairing")]
#[command(about = "Swiss-system tournament pairing tool")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the tournament data file
    #[arg(long)]
    pub data_path: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Register a competitor
    Register { name: String },
    /// Record the outcome of a match
    Report {
        winner: CompetitorId,
        loser: CompetitorId,
    },
    /// Show the current standings
    Standings,
    /// Pair the next round
    Pair {
        #[arg(long, value_enum)]
        mode: Option<PairingMode>,
        #[arg(long, value_enum)]
        strategy: Option<PairingStrategy>,
        #[arg(long, value_enum)]
        odd_count: Option<OddCountPolicy>,
    },
    /// Number of registered competitors
    Count,
    /// Delete all match records (and competitors with --players)
    Reset {
        #[arg(long)]
        players: bool,
    },
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.data_path {
            config.tournament.data_path = path.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Command::Pair {
            mode,
            strategy,
            odd_count,
        } = &self.command
        {
            if let Some(mode) = mode {
                config.pairing.mode = *mode;
            }
            if let Some(strategy) = strategy {
                config.pairing.strategy = *strategy;
            }
            if let Some(odd_count) = odd_count {
                config.pairing.odd_count = *odd_count;
            }
        }
    }
}
