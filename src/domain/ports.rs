use crate::domain::model::{CompetitorId, StandingsEntry};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 依勝場數遞減排序；同勝場保持穩定的報名順序
pub trait StandingsView {
    fn standings(&self) -> Result<Vec<StandingsEntry>>;
}

/// 兩位選手是否曾經交手（不分勝負方向）
pub trait RematchChecker {
    fn has_played_before(&self, a: CompetitorId, b: CompetitorId) -> bool;
}

/// 由呼叫端在一輪結束後記錄結果，配對引擎本身不會呼叫
pub trait MatchRecorder {
    fn record_match(&mut self, winner: CompetitorId, loser: CompetitorId) -> Result<()>;
}

impl<T: StandingsView + ?Sized> StandingsView for &T {
    fn standings(&self) -> Result<Vec<StandingsEntry>> {
        (**self).standings()
    }
}

impl<T: RematchChecker + ?Sized> RematchChecker for &T {
    fn has_played_before(&self, a: CompetitorId, b: CompetitorId) -> bool {
        (**self).has_played_before(a, b)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn tournament_name(&self) -> &str;
}
