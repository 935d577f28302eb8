use crate::adapters::memory_store::InMemoryTournament;
use crate::config::cli::Command;
use crate::config::toml_config::TomlConfig;
use crate::core::engine::PairingEngine;
use crate::core::report::{render_outcome, render_standings};
use crate::domain::model::CompetitorId;
use crate::domain::ports::{MatchRecorder, StandingsView, Storage};
use crate::utils::error::Result;

/// 執行單一指令：載入快照、處理、有變更時寫回，回傳要輸出的文字
///
/// 每次呼叫都重新載入資料檔，同一個資料檔不可同時執行多個指令。
pub async fn execute<S: Storage>(
    command: &Command,
    config: &TomlConfig,
    storage: &S,
) -> Result<String> {
    let data_file = config.data_file();
    let mut tournament = InMemoryTournament::load(storage, data_file).await?;
    let format = config.output.format;

    let (output, changed) = match command {
        Command::Register { name } => {
            let id = tournament.register_player(name)?;
            tracing::info!("✅ Registered {} (id {})", name.trim(), id);
            (format!("Registered {} with id {}\n", name.trim(), id), true)
        }
        Command::Report { winner, loser } => {
            tournament.record_match(*winner, *loser)?;
            let output = format!(
                "Recorded: {} beat {}\n",
                display_name(&tournament, *winner),
                display_name(&tournament, *loser)
            );
            (output, true)
        }
        Command::Standings => (render_standings(&tournament.standings()?, format)?, false),
        Command::Pair { .. } => {
            let engine = PairingEngine::with_settings(&tournament, config.pairing);
            let outcome = engine.next_round()?;
            (render_outcome(&outcome, format)?, false)
        }
        Command::Count => (format!("{}\n", tournament.count_players()), false),
        Command::Reset { players } => {
            if *players {
                tournament.delete_players();
                ("Deleted all competitors and matches\n".to_string(), true)
            } else {
                tournament.delete_matches();
                ("Deleted all matches\n".to_string(), true)
            }
        }
    };

    if changed {
        tournament.save(storage, data_file).await?;
        tracing::debug!("💾 Saved tournament data to {}", data_file);
    }

    Ok(output)
}

fn display_name(tournament: &InMemoryTournament, id: CompetitorId) -> String {
    tournament
        .players()
        .iter()
        .find(|p| p.id == id)
        .map(|p| format!("{} ({})", p.name, id))
        .unwrap_or_else(|| id.to_string())
}
