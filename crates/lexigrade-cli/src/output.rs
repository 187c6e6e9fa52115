//! Summary, saved outputs and submission shared by `grade` and `quiz`.

use std::path::Path;

use anyhow::{Context, Result};

use lexigrade_client::{ClientError, LexigradeConfig};
use lexigrade_core::grading::Classification;
use lexigrade_core::report::AttemptRecord;
use lexigrade_core::traits::ResultStore;

/// Print the per-answer table and the score line to stderr.
pub fn print_summary(record: &AttemptRecord) {
    use comfy_table::{Cell, Table};

    let report = &record.report;
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Expected", "Answer", "Result"]);

    for (i, d) in report.details.iter().enumerate() {
        let result = match d.classification {
            Classification::Tolerant => format!("tolerant ({} edit(s))", d.distance),
            c => c.to_string(),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(d.prompt.as_deref().unwrap_or("")),
            Cell::new(&d.expected),
            Cell::new(&d.actual),
            Cell::new(result),
        ]);
    }

    eprintln!("\n{table}");

    match (report.score_percent, report.verdict()) {
        (Some(score), Some(verdict)) => eprintln!(
            "\nWeek {} ({}): {}/{} credited, {} exact, {} tolerant. Score {}% ({}).",
            record.week,
            record.page,
            report.credited_count,
            report.total,
            report.exact_count,
            report.tolerant_count,
            score,
            verdict
        ),
        _ => eprintln!("\nNothing to grade."),
    }

    let missed: Vec<&str> = report
        .by_classification(Classification::Incorrect)
        .map(|d| d.expected.as_str())
        .collect();
    if !missed.is_empty() {
        eprintln!("To practice: {}", missed.join(", "));
    }
}

/// Write the record in each requested format to `output`.
pub fn write_outputs(record: &AttemptRecord, output: &Path, format: &str) -> Result<()> {
    if format == "none" {
        return Ok(());
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = record.created_at.format("%Y-%m-%dT%H%M%S");
    let id = record.id.to_string();
    let stem = format!("attempt-week{}-{timestamp}-{}", record.week, &id[..8]);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match fmt.trim() {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                record.save_json(&path)?;
                eprintln!("Attempt saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{stem}.html"));
                lexigrade_report::write_html_report(record, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}

/// Store the score remotely when it passes the configured policy.
///
/// Returns whether anything was submitted.
pub async fn submit_if_passing(config: &LexigradeConfig, record: &AttemptRecord) -> Result<bool> {
    let policy = config.quiz.pass_policy();
    let Some(submission) = record.submission() else {
        eprintln!("Nothing graded; not submitted.");
        return Ok(false);
    };

    if !policy.passes(&record.report) {
        let rule = if policy.inclusive { "at least" } else { "above" };
        eprintln!(
            "Score {}% is not {rule} {}%; not submitted.",
            submission.score, policy.min_score
        );
        return Ok(false);
    }

    let user_id = config.server.require_user()?;
    let backend = config.server.backend()?;
    if let Err(e) = backend.submit(user_id, &submission).await {
        let message = match submit_hint(&e) {
            Some(hint) => format!("failed to submit score ({hint})"),
            None => "failed to submit score".to_string(),
        };
        return Err(e.context(message));
    }

    tracing::info!(week = submission.week, score = submission.score, "score submitted");
    eprintln!("Score {}% submitted for week {}.", submission.score, submission.week);
    Ok(true)
}

/// What the user can do about a failed submission.
fn submit_hint(err: &anyhow::Error) -> Option<&'static str> {
    let client_err = err.downcast_ref::<ClientError>()?;
    if client_err.is_auth() {
        Some("check server.token or LEXIGRADE_TOKEN")
    } else if client_err.is_permanent() {
        Some("check server.base_url and server.user_id")
    } else {
        Some("the service may be down, try again later")
    }
}
