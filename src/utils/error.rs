use crate::domain::model::CompetitorId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Not enough competitors for a round: {count} registered, at least 2 required")]
    InsufficientCompetitors { count: usize },

    #[error("Odd number of competitors ({count}): {unpaired} would be left without an opponent")]
    OddCompetitorCount { count: usize, unpaired: String },

    #[error("No valid pairing found: competitor {competitor} has no eligible opponent left")]
    NoValidPairingFound { competitor: String },

    #[error("Pairing search gave up after {steps} steps without a decision")]
    PairingSearchLimit { steps: usize },

    #[error("Unknown competitor id: {id}")]
    UnknownCompetitor { id: CompetitorId },

    #[error("A competitor cannot play against itself (id {id})")]
    SelfMatch { id: CompetitorId },

    #[error("Invalid competitor name: {reason}")]
    InvalidName { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 配對結果，非系統故障
    Pairing,
    /// 賽事資料（選手、比賽紀錄）
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TournamentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TournamentError::InsufficientCompetitors { .. }
            | TournamentError::OddCompetitorCount { .. }
            | TournamentError::NoValidPairingFound { .. }
            | TournamentError::PairingSearchLimit { .. } => ErrorCategory::Pairing,
            TournamentError::UnknownCompetitor { .. }
            | TournamentError::SelfMatch { .. }
            | TournamentError::InvalidName { .. } => ErrorCategory::Data,
            TournamentError::ConfigError { .. }
            | TournamentError::ConfigValidationError { .. }
            | TournamentError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TournamentError::IoError(_)
            | TournamentError::SerializationError(_)
            | TournamentError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Pairing => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TournamentError::InsufficientCompetitors { count } => format!(
                "Only {} competitor(s) registered, a round needs at least two",
                count
            ),
            TournamentError::OddCompetitorCount { unpaired, .. } => format!(
                "The field has an odd number of competitors; {} has no opponent this round",
                unpaired
            ),
            TournamentError::NoValidPairingFound { competitor } => format!(
                "Every remaining opponent of {} is a rematch, no pairing could be built",
                competitor
            ),
            TournamentError::IoError(e) => format!("Could not access tournament data: {}", e),
            TournamentError::SerializationError(_) => {
                "The tournament data file is corrupted or not valid JSON".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TournamentError::InsufficientCompetitors { .. } => {
                "Register more competitors before pairing a round"
            }
            TournamentError::OddCompetitorCount { .. } => {
                "Register or withdraw a competitor, or set pairing.odd_count = \"drop_last\""
            }
            TournamentError::NoValidPairingFound { .. } => {
                "Try pairing.strategy = \"exhaustive\" or pair this round manually"
            }
            TournamentError::PairingSearchLimit { .. } => {
                "Use pairing.strategy = \"greedy\" or pair this round manually"
            }
            TournamentError::UnknownCompetitor { .. } => {
                "Check the ids listed by the `standings` command"
            }
            TournamentError::SelfMatch { .. } => "Winner and loser must be different competitors",
            TournamentError::InvalidName { .. } => "Use a non-empty competitor name",
            TournamentError::IoError(_) => "Check that the data path exists and is writable",
            TournamentError::SerializationError(_) => {
                "Restore the data file from a backup or start over with `reset --players`"
            }
            TournamentError::CsvError(_) => "Retry with --format text",
            TournamentError::ConfigError { .. }
            | TournamentError::ConfigValidationError { .. }
            | TournamentError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run the command again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
