//! The `lexigrade history` command.

use std::path::PathBuf;

use anyhow::Result;

use lexigrade_client::load_config_from;
use lexigrade_core::report::AttemptRecord;
use lexigrade_core::statistics::{compute_week_stats, ScoreEntry};
use lexigrade_core::traits::ResultStore;

pub async fn execute(
    records: Option<PathBuf>,
    remote: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let policy = config.quiz.pass_policy();

    let entries: Vec<ScoreEntry> = if remote {
        let user_id = config.server.require_user()?;
        config.server.backend()?.results(user_id).await?
    } else {
        let dir = records.unwrap_or_else(|| config.output_dir.clone());
        if !dir.is_dir() {
            anyhow::bail!("no saved attempts in {}", dir.display());
        }
        let (entries, unassigned): (Vec<ScoreEntry>, Vec<ScoreEntry>) =
            AttemptRecord::load_dir(&dir)?
                .iter()
                .filter_map(ScoreEntry::from_attempt)
                .partition(|e| e.week > 0);
        if !unassigned.is_empty() {
            eprintln!(
                "Skipping {} attempt(s) graded without --week.",
                unassigned.len()
            );
        }
        entries
    };

    let stats = compute_week_stats(&entries, &policy);

    if format == "json" {
        let weeks: Vec<_> = stats.values().collect();
        println!("{}", serde_json::to_string_pretty(&weeks)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No scores recorded yet.");
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Week", "Attempts", "Best", "Latest", "Average", "Passed"]);
    for s in stats.values() {
        table.add_row(vec![
            Cell::new(s.week),
            Cell::new(s.attempts),
            Cell::new(format!("{}%", s.best_score)),
            Cell::new(format!("{}%", s.latest_score)),
            Cell::new(format!("{:.1}%", s.average_score)),
            Cell::new(if s.passed { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");

    let passed = stats.values().filter(|s| s.passed).count();
    println!("\n{passed}/{} week(s) passed.", stats.len());

    Ok(())
}
