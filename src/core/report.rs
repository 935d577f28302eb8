use crate::domain::model::{Pairing, RoundOutcome, StandingsEntry};
use crate::utils::error::{Result, TournamentError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Tsv,
}

pub fn render_standings(entries: &[StandingsEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut report = format!(
                "{:<6} {:<6} {:<24} {:>5} {:>8}\n",
                "Rank", "Id", "Name", "Wins", "Matches"
            );
            report.push_str(&"-".repeat(53));
            report.push('\n');
            for (rank, entry) in entries.iter().enumerate() {
                report.push_str(&format!(
                    "{:<6} {:<6} {:<24} {:>5} {:>8}\n",
                    rank + 1,
                    entry.id,
                    entry.name,
                    entry.wins,
                    entry.matches_played
                ));
            }
            Ok(report)
        }
        OutputFormat::Csv | OutputFormat::Tsv => delimited(
            format,
            &["id", "name", "wins", "matches"],
            entries.iter().map(|e| {
                vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.wins.to_string(),
                    e.matches_played.to_string(),
                ]
            }),
        ),
    }
}

pub fn render_pairings(pairings: &[Pairing], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut report = String::new();
            for (table, p) in pairings.iter().enumerate() {
                report.push_str(&format!(
                    "Table {:<3} {:>4} {:<24} vs {:>4} {}\n",
                    table + 1,
                    p.first_id,
                    p.first_name,
                    p.second_id,
                    p.second_name
                ));
            }
            Ok(report)
        }
        OutputFormat::Csv | OutputFormat::Tsv => delimited(
            format,
            &["id1", "name1", "id2", "name2"],
            pairings.iter().map(|p| {
                vec![
                    p.first_id.to_string(),
                    p.first_name.clone(),
                    p.second_id.to_string(),
                    p.second_name.clone(),
                ]
            }),
        ),
    }
}

pub fn render_outcome(outcome: &RoundOutcome, format: OutputFormat) -> Result<String> {
    match outcome {
        RoundOutcome::Pairings(set) => render_pairings(set, format),
        RoundOutcome::Complete { leader } => Ok(format!(
            "There is a unique winner: {} ({} wins)\n",
            leader.name, leader.wins
        )),
    }
}

fn delimited<I>(format: OutputFormat, header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        TournamentError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings() -> Vec<StandingsEntry> {
        vec![
            StandingsEntry::new(1, "Ann Lee", 1, 1),
            StandingsEntry::new(2, "Bo, Jr.", 0, 1),
        ]
    }

    #[test]
    fn test_standings_csv_quotes_names() {
        let csv = render_standings(&standings(), OutputFormat::Csv).unwrap();
        assert_eq!(csv, "id,name,wins,matches\n1,Ann Lee,1,1\n2,\"Bo, Jr.\",0,1\n");
    }

    #[test]
    fn test_pairings_tsv() {
        let entries = standings();
        let pairing = Pairing::new(&entries[0], &entries[1]);
        let tsv = render_pairings(&[pairing], OutputFormat::Tsv).unwrap();
        assert_eq!(tsv, "id1\tname1\tid2\tname2\n1\tAnn Lee\t2\tBo, Jr.\n");
    }

    #[test]
    fn test_text_report_lists_ranks() {
        let text = render_standings(&standings(), OutputFormat::Text).unwrap();
        assert!(text.lines().nth(2).unwrap().starts_with("1 "));
        assert!(text.contains("Bo, Jr."));
    }

    #[test]
    fn test_completion_message() {
        let outcome = RoundOutcome::Complete {
            leader: StandingsEntry::new(1, "Ann Lee", 3, 3),
        };
        let text = render_outcome(&outcome, OutputFormat::Csv).unwrap();
        assert!(text.contains("unique winner: Ann Lee"));
    }
}
