use anyhow::Result;
use swiss_pairing::app::commands::execute;
use swiss_pairing::core::report::OutputFormat;
use swiss_pairing::{
    Command, InMemoryTournament, LocalStorage, PairingStrategy, TomlConfig, TournamentError,
};
use tempfile::TempDir;

fn setup() -> Result<(TempDir, LocalStorage, TomlConfig)> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[tournament]
name = "Integration Cup"
data_path = "{}"
data_file = "cup.json"
"#,
        data_path
    ))?;
    let storage = LocalStorage::new(data_path);
    Ok((temp_dir, storage, config))
}

async fn register(storage: &LocalStorage, config: &TomlConfig, names: &[&str]) -> Result<()> {
    for name in names {
        execute(
            &Command::Register {
                name: name.to_string(),
            },
            config,
            storage,
        )
        .await?;
    }
    Ok(())
}

fn pair() -> Command {
    Command::Pair {
        mode: None,
        strategy: None,
        odd_count: None,
    }
}

/// 報名、記錄比賽後資料會寫入資料檔
#[tokio::test]
async fn test_commands_persist_between_invocations() -> Result<()> {
    let (temp_dir, storage, config) = setup()?;

    register(&storage, &config, &["Twilight Sparkle", "Fluttershy"]).await?;
    let output = execute(&Command::Report { winner: 2, loser: 1 }, &config, &storage).await?;
    assert_eq!(output, "Recorded: Fluttershy (2) beat Twilight Sparkle (1)\n");

    let data = tokio::fs::read_to_string(temp_dir.path().join("cup.json")).await?;
    let snapshot = InMemoryTournament::from_json(&data)?;
    assert_eq!(snapshot.count_players(), 2);
    assert_eq!(snapshot.matches().len(), 1);

    let count = execute(&Command::Count, &config, &storage).await?;
    assert_eq!(count, "2\n");
    Ok(())
}

#[tokio::test]
async fn test_standings_csv_output() -> Result<()> {
    let (_temp_dir, storage, mut config) = setup()?;
    config.output.format = OutputFormat::Csv;

    register(&storage, &config, &["Ann", "Bob"]).await?;
    execute(&Command::Report { winner: 2, loser: 1 }, &config, &storage).await?;

    let output = execute(&Command::Standings, &config, &storage).await?;
    assert_eq!(output, "id,name,wins,matches\n2,Bob,1,1\n1,Ann,0,1\n");
    Ok(())
}

#[tokio::test]
async fn test_pair_command_renders_round() -> Result<()> {
    let (_temp_dir, storage, mut config) = setup()?;
    config.output.format = OutputFormat::Csv;
    register(&storage, &config, &["A", "B", "C", "D"]).await?;

    let first = execute(&pair(), &config, &storage).await?;
    assert_eq!(first, "id1,name1,id2,name2\n1,A,2,B\n3,C,4,D\n");

    execute(&Command::Report { winner: 1, loser: 2 }, &config, &storage).await?;
    execute(&Command::Report { winner: 4, loser: 3 }, &config, &storage).await?;

    let second = execute(&pair(), &config, &storage).await?;
    assert_eq!(second, "id1,name1,id2,name2\n1,A,4,D\n2,B,3,C\n");

    execute(&Command::Report { winner: 1, loser: 4 }, &config, &storage).await?;
    execute(&Command::Report { winner: 2, loser: 3 }, &config, &storage).await?;

    let done = execute(&pair(), &config, &storage).await?;
    assert_eq!(done, "There is a unique winner: A (2 wins)\n");
    Ok(())
}

#[tokio::test]
async fn test_pair_command_errors() -> Result<()> {
    let (_temp_dir, storage, mut config) = setup()?;

    let empty = execute(&pair(), &config, &storage).await;
    assert!(matches!(
        empty,
        Err(TournamentError::InsufficientCompetitors { count: 0 })
    ));

    register(&storage, &config, &["A", "B", "C", "D"]).await?;
    execute(&Command::Report { winner: 1, loser: 3 }, &config, &storage).await?;
    execute(&Command::Report { winner: 2, loser: 4 }, &config, &storage).await?;
    execute(&Command::Report { winner: 3, loser: 4 }, &config, &storage).await?;

    let dead_end = execute(&pair(), &config, &storage).await;
    assert!(matches!(
        dead_end,
        Err(TournamentError::NoValidPairingFound { .. })
    ));

    config.pairing.strategy = PairingStrategy::Exhaustive;
    let recovered = execute(&pair(), &config, &storage).await?;
    assert!(recovered.contains("A"));
    Ok(())
}

#[tokio::test]
async fn test_reset_commands() -> Result<()> {
    let (_temp_dir, storage, config) = setup()?;
    register(&storage, &config, &["A", "B"]).await?;
    execute(&Command::Report { winner: 1, loser: 2 }, &config, &storage).await?;

    execute(&Command::Reset { players: false }, &config, &storage).await?;
    assert_eq!(execute(&Command::Count, &config, &storage).await?, "2\n");

    execute(&Command::Reset { players: true }, &config, &storage).await?;
    assert_eq!(execute(&Command::Count, &config, &storage).await?, "0\n");

    let unknown = execute(&Command::Report { winner: 1, loser: 2 }, &config, &storage).await;
    assert!(matches!(
        unknown,
        Err(TournamentError::UnknownCompetitor { id: 1 })
    ));
    Ok(())
}
