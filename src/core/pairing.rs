//! Swiss 配對演算法
//!
//! 所有函式都是純函式：輸入一份排名快照（以及重複對戰查詢），輸出下一輪的對戰表。
//! 同一個賽事同時只能有一個配對請求在進行，由呼叫端負責序列化。

use crate::domain::model::{OddCountPolicy, Pairing, PairingSet, RoundOutcome, StandingsEntry};
use crate::domain::ports::RematchChecker;
use crate::utils::error::{Result, TournamentError};
use std::collections::HashSet;

/// 排名相鄰兩兩配對：0 對 1、2 對 3 …，不檢查是否重複對戰
pub fn basic_pairing(
    standings: &[StandingsEntry],
    odd_count: OddCountPolicy,
) -> Result<PairingSet> {
    let field = pairable_field(standings, odd_count)?;

    Ok(field
        .chunks_exact(2)
        .map(|pair| Pairing::new(&pair[0], &pair[1]))
        .collect())
}

/// 第一名勝場嚴格多於第二名且不為零時，回傳領先者
///
/// 只比較前兩名的勝場數，不檢查其他選手是否已打完相同輪數。
pub fn detect_completion(standings: &[StandingsEntry]) -> Result<Option<&StandingsEntry>> {
    match standings {
        [top, second, ..] => Ok((top.wins > second.wins && top.wins > 0).then_some(top)),
        _ => Err(TournamentError::InsufficientCompetitors {
            count: standings.len(),
        }),
    }
}

/// 先做結束判定，再以單次貪婪掃描產生不重複對戰的配對
pub fn strict_pairing<R: RematchChecker + ?Sized>(
    standings: &[StandingsEntry],
    checker: &R,
    odd_count: OddCountPolicy,
) -> Result<RoundOutcome> {
    strict_round(standings, odd_count, |field| greedy_matching(field, checker))
}

/// 與 [`strict_pairing`] 相同，但貪婪掃描卡住時會回溯
pub fn exhaustive_pairing<R: RematchChecker + ?Sized>(
    standings: &[StandingsEntry],
    checker: &R,
    odd_count: OddCountPolicy,
) -> Result<RoundOutcome> {
    strict_round(standings, odd_count, |field| exhaustive_matching(field, checker))
}

fn strict_round<F>(
    standings: &[StandingsEntry],
    odd_count: OddCountPolicy,
    matcher: F,
) -> Result<RoundOutcome>
where
    F: FnOnce(&[StandingsEntry]) -> Result<PairingSet>,
{
    if let Some(leader) = detect_completion(standings)? {
        tracing::info!(
            "🏆 Unique leader {} with {} wins, tournament is complete",
            leader.name,
            leader.wins
        );
        return Ok(RoundOutcome::Complete {
            leader: leader.clone(),
        });
    }

    let field = pairable_field(standings, odd_count)?;
    matcher(field).map(RoundOutcome::Pairings)
}

/// 由左至右掃描：每個尚未配對的位置，找之後第一個尚未配對且未曾交手的對手
///
/// 不回溯。往後找不到合格對手時回傳 `NoValidPairingFound`。
pub fn greedy_matching<R: RematchChecker + ?Sized>(
    entries: &[StandingsEntry],
    checker: &R,
) -> Result<PairingSet> {
    let mut placed = vec![false; entries.len()];
    let mut pairings = Vec::with_capacity(entries.len() / 2);

    for (i, entry) in entries.iter().enumerate() {
        if placed[i] {
            continue;
        }

        let partner = (i + 1..entries.len())
            .find(|&j| !placed[j] && !checker.has_played_before(entry.id, entries[j].id));

        let Some(j) = partner else {
            tracing::warn!(
                "No eligible opponent left for {} (id {}) at rank {}",
                entry.name,
                entry.id,
                i + 1
            );
            return Err(TournamentError::NoValidPairingFound {
                competitor: entry.name.clone(),
            });
        };

        placed[i] = true;
        placed[j] = true;
        tracing::debug!("Paired {} vs {}", entry.name, entries[j].name);
        pairings.push(Pairing::new(entry, &entries[j]));
    }

    Ok(pairings)
}

/// 搜尋步數上限，超過即放棄並回報錯誤
pub const EXHAUSTIVE_STEP_LIMIT: usize = 1_000_000;

/// 以位元遮罩記錄尚未配對的位置，最多支援 128 人
const MAX_EXHAUSTIVE_FIELD: usize = 128;

/// 回溯搜尋不重複對戰的完全配對
///
/// 候選對手依排名順序嘗試，所以貪婪掃描能成功時結果與 [`greedy_matching`] 相同。
/// 重複對戰查詢先整理成矩陣，搜尋過程不再查詢 store。已失敗的未配對集合會被記住，
/// 總步數受 [`EXHAUSTIVE_STEP_LIMIT`] 限制。超過 128 人時退回貪婪掃描。
pub fn exhaustive_matching<R: RematchChecker + ?Sized>(
    entries: &[StandingsEntry],
    checker: &R,
) -> Result<PairingSet> {
    let n = entries.len();
    if n > MAX_EXHAUSTIVE_FIELD {
        tracing::warn!(
            "⚠️ {} competitors exceed the exhaustive search limit of {}, using greedy scan",
            n,
            MAX_EXHAUSTIVE_FIELD
        );
        return greedy_matching(entries, checker);
    }

    let mut played = vec![vec![false; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let met = checker.has_played_before(entries[i].id, entries[j].id);
            played[i][j] = met;
            played[j][i] = met;
        }
    }

    // 每位選手至少要有一位可對戰的對手
    let eligible: Vec<usize> = (0..n)
        .map(|i| (0..n).filter(|&j| j != i && !played[i][j]).count())
        .collect();
    if let Some(isolated) = eligible.iter().position(|&count| count == 0) {
        tracing::warn!(
            "{} (id {}) has already played every other competitor",
            entries[isolated].name,
            entries[isolated].id
        );
        return Err(TournamentError::NoValidPairingFound {
            competitor: entries[isolated].name.clone(),
        });
    }

    let mut search = MatchingSearch {
        played: &played,
        partner: vec![0; n],
        failed: HashSet::new(),
        steps: 0,
    };
    let open = if n == 0 { 0 } else { u128::MAX >> (128 - n) };

    match search.assign(open) {
        SearchResult::Found => {}
        SearchResult::Failed => {
            // 回報可選對手最少（最受限）的選手
            let competitor = eligible
                .iter()
                .enumerate()
                .min_by_key(|&(_, count)| *count)
                .and_then(|(i, _)| entries.get(i))
                .map(|e| e.name.clone())
                .unwrap_or_default();
            tracing::warn!(
                "No rematch-free pairing exists for {} competitors (most constrained: {})",
                n,
                competitor
            );
            return Err(TournamentError::NoValidPairingFound { competitor });
        }
        SearchResult::LimitReached => {
            tracing::warn!("Pairing search stopped after {} steps", search.steps);
            return Err(TournamentError::PairingSearchLimit {
                steps: search.steps,
            });
        }
    }

    Ok(search
        .partner
        .iter()
        .enumerate()
        .filter(|&(i, &j)| j > i)
        .map(|(i, &j)| Pairing::new(&entries[i], &entries[j]))
        .collect())
}

enum SearchResult {
    Found,
    Failed,
    LimitReached,
}

struct MatchingSearch<'a> {
    played: &'a [Vec<bool>],
    partner: Vec<usize>,
    /// 已證明無法完全配對的未配對集合
    failed: HashSet<u128>,
    steps: usize,
}

impl MatchingSearch<'_> {
    fn assign(&mut self, open: u128) -> SearchResult {
        if open == 0 {
            return SearchResult::Found;
        }
        if self.failed.contains(&open) {
            return SearchResult::Failed;
        }
        self.steps += 1;
        if self.steps > EXHAUSTIVE_STEP_LIMIT {
            return SearchResult::LimitReached;
        }

        let i = open.trailing_zeros() as usize;
        let rest = open & !(1u128 << i);
        for j in i + 1..self.partner.len() {
            if rest & (1u128 << j) == 0 || self.played[i][j] {
                continue;
            }
            // 成功路徑會覆寫每一個位置，失敗分支留下的值不影響結果
            self.partner[i] = j;
            self.partner[j] = i;
            match self.assign(rest & !(1u128 << j)) {
                SearchResult::Failed => {}
                done => return done,
            }
        }

        self.failed.insert(open);
        SearchResult::Failed
    }
}

/// 檢查人數並依 odd_count 政策處理奇數人數
fn pairable_field(
    standings: &[StandingsEntry],
    odd_count: OddCountPolicy,
) -> Result<&[StandingsEntry]> {
    if standings.len() < 2 {
        return Err(TournamentError::InsufficientCompetitors {
            count: standings.len(),
        });
    }

    if standings.len() % 2 == 0 {
        return Ok(standings);
    }

    match (standings.split_last(), odd_count) {
        (Some((last, rest)), OddCountPolicy::DropLast) => {
            tracing::warn!(
                "⚠️ Odd number of competitors ({}), {} sits out this round",
                standings.len(),
                last.name
            );
            Ok(rest)
        }
        (last, _) => Err(TournamentError::OddCompetitorCount {
            count: standings.len(),
            unpaired: last.map(|(e, _)| e.name.clone()).unwrap_or_default(),
        }),
    }
}
