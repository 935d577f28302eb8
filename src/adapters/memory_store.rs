use crate::domain::model::{Competitor, CompetitorId, MatchRecord, StandingsEntry};
use crate::domain::ports::{MatchRecorder, RematchChecker, StandingsView, Storage};
use crate::utils::error::{Result, TournamentError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// 記憶體中的賽事資料：選手（依報名順序）與比賽紀錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryTournament {
    players: Vec<Competitor>,
    matches: Vec<MatchRecord>,
    /// 最後配發的編號；刪除選手後不會重複使用
    last_id: CompetitorId,
}

impl InMemoryTournament {
    pub fn new() -> Self {
        Self::default()
    }

    /// 報名選手，回傳配發的編號。名稱不需唯一
    pub fn register_player(&mut self, name: &str) -> Result<CompetitorId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName {
                reason: "name cannot be empty or whitespace-only".to_string(),
            });
        }

        self.last_id += 1;
        self.players.push(Competitor {
            id: self.last_id,
            name: name.to_string(),
        });
        tracing::debug!("Registered player {} as id {}", name, self.last_id);
        Ok(self.last_id)
    }

    pub fn count_players(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Competitor] {
        &self.players
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// 清除所有比賽紀錄，保留選手
    pub fn delete_matches(&mut self) {
        tracing::info!("🗑️ Deleting {} match records", self.matches.len());
        self.matches.clear();
    }

    /// 清除所有選手；比賽紀錄參照選手，一併清除
    pub fn delete_players(&mut self) {
        tracing::info!("🗑️ Deleting {} players", self.players.len());
        self.matches.clear();
        self.players.clear();
    }

    pub fn report_match(&mut self, winner: CompetitorId, loser: CompetitorId) -> Result<()> {
        if winner == loser {
            return Err(TournamentError::SelfMatch { id: winner });
        }
        for id in [winner, loser] {
            if !self.players.iter().any(|p| p.id == id) {
                return Err(TournamentError::UnknownCompetitor { id });
            }
        }

        self.matches.push(MatchRecord {
            winner,
            loser,
            recorded_at: Utc::now(),
        });
        tracing::debug!("Recorded match: {} beat {}", winner, loser);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let tournament: Self = serde_json::from_str(content)?;
        Ok(tournament.with_consistent_ids())
    }

    /// 快照中的 last_id 不得小於已存在的最大編號，否則新報名會重複配發
    fn with_consistent_ids(mut self) -> Self {
        let max_id = self.players.iter().map(|p| p.id).max().unwrap_or(0);
        if self.last_id < max_id {
            tracing::warn!(
                "⚠️ Snapshot last_id {} is behind stored player id {}, adjusting",
                self.last_id,
                max_id
            );
            self.last_id = max_id;
        }
        self
    }

    /// 從 storage 載入快照；檔案不存在時回傳空的賽事
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        match storage.read_file(path).await {
            Ok(data) => {
                let tournament: Self = serde_json::from_slice(&data)?;
                Ok(tournament.with_consistent_ids())
            }
            Err(TournamentError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("📁 No tournament data at {}, starting fresh", path);
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let json = self.to_json()?;
        storage.write_file(path, json.as_bytes()).await
    }
}

impl StandingsView for InMemoryTournament {
    fn standings(&self) -> Result<Vec<StandingsEntry>> {
        let mut entries: Vec<StandingsEntry> = self
            .players
            .iter()
            .map(|p| {
                let wins = self.matches.iter().filter(|m| m.winner == p.id).count();
                let played = self
                    .matches
                    .iter()
                    .filter(|m| m.winner == p.id || m.loser == p.id)
                    .count();
                StandingsEntry::new(p.id, p.name.clone(), wins as u32, played as u32)
            })
            .collect();

        // sort_by_key 為穩定排序，同勝場維持報名順序
        entries.sort_by_key(|e| Reverse(e.wins));
        Ok(entries)
    }
}

impl RematchChecker for InMemoryTournament {
    fn has_played_before(&self, a: CompetitorId, b: CompetitorId) -> bool {
        self.matches.iter().any(|m| m.involves_pair(a, b))
    }
}

impl MatchRecorder for InMemoryTournament {
    fn record_match(&mut self, winner: CompetitorId, loser: CompetitorId) -> Result<()> {
        self.report_match(winner, loser)
    }
}
