pub mod engine;
pub mod pairing;
pub mod report;

pub use crate::domain::model::{PairingSet, RoundOutcome, StandingsEntry};
pub use crate::domain::ports::{MatchRecorder, RematchChecker, StandingsView, Storage};
pub use crate::utils::error::Result;
