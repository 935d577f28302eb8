pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{local_storage::LocalStorage, memory_store::InMemoryTournament};
pub use config::TomlConfig;
pub use core::engine::PairingEngine;
pub use core::pairing::{
    basic_pairing, detect_completion, exhaustive_matching, exhaustive_pairing, greedy_matching,
    strict_pairing,
};
pub use domain::model::{
    CompetitorId, MatchRecord, OddCountPolicy, Pairing, PairingMode, PairingSet, PairingSettings,
    PairingStrategy, RoundOutcome, StandingsEntry,
};
pub use utils::error::{Result, TournamentError};
