use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 選手編號，由 store 依報名順序從 1 開始配發
pub type CompetitorId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
}

/// 排名表中的一列 (id, name, wins, matches_played)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub id: CompetitorId,
    pub name: String,
    pub wins: u32,
    pub matches_played: u32,
}

impl StandingsEntry {
    pub fn new(id: CompetitorId, name: impl Into<String>, wins: u32, matches_played: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches_played,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: CompetitorId,
    pub loser: CompetitorId,
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// 不論勝負方向，是否為這兩位選手之間的比賽
    pub fn involves_pair(&self, a: CompetitorId, b: CompetitorId) -> bool {
        (self.winner == a && self.loser == b) || (self.winner == b && self.loser == a)
    }
}

/// 一組對戰，`first` 為排名較高的一方
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub first_id: CompetitorId,
    pub first_name: String,
    pub second_id: CompetitorId,
    pub second_name: String,
}

impl Pairing {
    pub fn new(first: &StandingsEntry, second: &StandingsEntry) -> Self {
        Self {
            first_id: first.id,
            first_name: first.name.clone(),
            second_id: second.id,
            second_name: second.name.clone(),
        }
    }

    pub fn ids(&self) -> (CompetitorId, CompetitorId) {
        (self.first_id, self.second_id)
    }

    pub fn contains(&self, id: CompetitorId) -> bool {
        self.first_id == id || self.second_id == id
    }
}

pub type PairingSet = Vec<Pairing>;

/// 一輪配對的結果：對戰表，或是賽事已產生唯一領先者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Pairings(PairingSet),
    Complete { leader: StandingsEntry },
}

impl RoundOutcome {
    pub fn pairings(&self) -> Option<&PairingSet> {
        match self {
            RoundOutcome::Pairings(set) => Some(set),
            RoundOutcome::Complete { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// 相鄰排名兩兩配對，不檢查重複對戰
    Basic,
    /// 先檢查是否已結束，再避免重複對戰
    #[default]
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    #[default]
    Greedy,
    Exhaustive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OddCountPolicy {
    #[default]
    Reject,
    DropLast,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSettings {
    #[serde(default)]
    pub mode: PairingMode,
    #[serde(default)]
    pub strategy: PairingStrategy,
    #[serde(default)]
    pub odd_count: OddCountPolicy,
}
