use anyhow::Result;
use std::collections::HashSet;
use swiss_pairing::domain::ports::{MatchRecorder, StandingsView};
use swiss_pairing::{
    basic_pairing, greedy_matching, strict_pairing, InMemoryTournament, OddCountPolicy,
    PairingEngine, PairingMode, PairingSettings, RoundOutcome, StandingsEntry, TournamentError,
};

fn register_all(names: &[&str]) -> Result<InMemoryTournament> {
    let mut tournament = InMemoryTournament::new();
    for name in names {
        tournament.register_player(name)?;
    }
    Ok(tournament)
}

/// 新報名的選手尚未有任何比賽
#[test]
fn test_standings_before_matches() -> Result<()> {
    let tournament = register_all(&["Melpomene Murray", "Randy Schwartz"])?;

    let standings = tournament.standings()?;

    assert_eq!(standings.len(), 2);
    assert!(standings.iter().all(|e| e.wins == 0 && e.matches_played == 0));
    let names: HashSet<_> = standings.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains("Melpomene Murray") && names.contains("Randy Schwartz"));
    Ok(())
}

#[test]
fn test_report_matches_updates_standings() -> Result<()> {
    let mut tournament =
        register_all(&["Bruno Walton", "Boots O'Neal", "Cathy Burton", "Diane Grant"])?;
    tournament.record_match(1, 2)?;
    tournament.record_match(3, 4)?;

    for entry in tournament.standings()? {
        assert_eq!(entry.matches_played, 1);
        match entry.id {
            1 | 3 => assert_eq!(entry.wins, 1),
            _ => assert_eq!(entry.wins, 0),
        }
    }

    tournament.delete_matches();
    assert!(tournament
        .standings()?
        .iter()
        .all(|e| e.wins == 0 && e.matches_played == 0));
    Ok(())
}

#[test]
fn test_basic_pairing_for_fresh_field() -> Result<()> {
    let tournament = register_all(&["A", "B", "C", "D"])?;

    let set = basic_pairing(&tournament.standings()?, OddCountPolicy::Reject)?;

    let ids: Vec<_> = set.iter().map(|p| p.ids()).collect();
    assert_eq!(ids, vec![(1, 2), (3, 4)]);
    Ok(())
}

#[test]
fn test_rematch_free_pairing_after_first_round() -> Result<()> {
    let mut tournament = register_all(&["A", "B", "C", "D"])?;
    tournament.record_match(1, 2)?;

    // 排名：A 一勝，其餘依報名順序
    let standings = vec![
        StandingsEntry::new(1, "A", 1, 1),
        StandingsEntry::new(3, "C", 0, 1),
        StandingsEntry::new(4, "D", 0, 1),
        StandingsEntry::new(2, "B", 0, 1),
    ];

    let set = greedy_matching(&standings, &tournament)?;

    let ids: Vec<_> = set.iter().map(|p| p.ids()).collect();
    assert_eq!(ids, vec![(1, 3), (4, 2)]);
    Ok(())
}

/// 八人賽制：三輪後產生唯一冠軍，過程中不出現重複對戰
#[test]
fn test_full_tournament_runs_to_completion() -> Result<()> {
    let mut tournament = register_all(&["A", "B", "C", "D", "E", "F", "G", "H"])?;
    let mut seen = HashSet::new();

    for round in 1..=3 {
        let outcome = PairingEngine::new(&tournament).next_round()?;
        let RoundOutcome::Pairings(set) = outcome else {
            panic!("tournament ended early in round {round}");
        };
        assert_eq!(set.len(), 4);

        for pairing in &set {
            let key = (
                pairing.first_id.min(pairing.second_id),
                pairing.first_id.max(pairing.second_id),
            );
            assert!(seen.insert(key), "rematch {key:?} in round {round}");
        }
        // 排名較高者獲勝
        for pairing in &set {
            tournament.record_match(pairing.first_id, pairing.second_id)?;
        }
    }

    match PairingEngine::new(&tournament).next_round()? {
        RoundOutcome::Complete { leader } => {
            assert_eq!(leader.name, "A");
            assert_eq!(leader.wins, 3);
        }
        other => panic!("expected completion, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_strict_pairing_reports_dead_end() -> Result<()> {
    let mut tournament = register_all(&["A", "B", "C", "D"])?;
    tournament.record_match(1, 3)?;
    tournament.record_match(2, 4)?;
    tournament.record_match(3, 4)?;

    // 排名 A、B、C、D；A 對 B 之後只剩已交手的 C、D
    let err = strict_pairing(&tournament.standings()?, &tournament, OddCountPolicy::Reject)
        .unwrap_err();

    assert!(matches!(err, TournamentError::NoValidPairingFound { .. }));
    Ok(())
}

#[test]
fn test_odd_field_policy() -> Result<()> {
    let tournament = register_all(&["A", "B", "C"])?;

    let rejected = PairingEngine::new(&tournament).next_round();
    assert!(matches!(
        rejected,
        Err(TournamentError::OddCompetitorCount { count: 3, .. })
    ));

    let settings = PairingSettings {
        mode: PairingMode::Basic,
        odd_count: OddCountPolicy::DropLast,
        ..Default::default()
    };
    let outcome = PairingEngine::with_settings(&tournament, settings).next_round()?;
    let ids: Vec<_> = outcome.pairings().unwrap().iter().map(|p| p.ids()).collect();
    assert_eq!(ids, vec![(1, 2)]);
    Ok(())
}
