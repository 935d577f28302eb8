use crate::core::pairing::{basic_pairing, exhaustive_pairing, strict_pairing};
use crate::domain::model::{PairingMode, PairingSettings, PairingStrategy, RoundOutcome};
use crate::domain::ports::{RematchChecker, StandingsView};
use crate::utils::error::Result;

/// 配對引擎：讀取一次排名快照，依設定產生下一輪對戰
///
/// 引擎不加鎖；同一賽事的配對請求必須由呼叫端逐一執行。
pub struct PairingEngine<S> {
    store: S,
    settings: PairingSettings,
}

impl<S: StandingsView + RematchChecker> PairingEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, PairingSettings::default())
    }

    pub fn with_settings(store: S, settings: PairingSettings) -> Self {
        Self { store, settings }
    }

    pub fn next_round(&self) -> Result<RoundOutcome> {
        let standings = self.store.standings()?;
        tracing::info!(
            "🎲 Pairing next round: {} competitors (mode: {:?}, strategy: {:?})",
            standings.len(),
            self.settings.mode,
            self.settings.strategy
        );

        let outcome = match (self.settings.mode, self.settings.strategy) {
            (PairingMode::Basic, _) => {
                basic_pairing(&standings, self.settings.odd_count).map(RoundOutcome::Pairings)
            }
            (PairingMode::Strict, PairingStrategy::Greedy) => {
                strict_pairing(&standings, &self.store, self.settings.odd_count)
            }
            (PairingMode::Strict, PairingStrategy::Exhaustive) => {
                exhaustive_pairing(&standings, &self.store, self.settings.odd_count)
            }
        };

        match &outcome {
            Ok(RoundOutcome::Pairings(set)) => {
                tracing::info!("✅ Produced {} pairings", set.len());
            }
            Ok(RoundOutcome::Complete { leader }) => {
                tracing::info!("🏁 Tournament complete, winner: {}", leader.name);
            }
            Err(e) => {
                tracing::warn!("❌ Pairing failed: {} (Category: {:?})", e, e.category());
            }
        }

        outcome
    }
}
