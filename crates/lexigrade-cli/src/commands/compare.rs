//! The `lexigrade compare` command.

use std::path::PathBuf;

use anyhow::Result;

use lexigrade_core::report::AttemptRecord;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = AttemptRecord::load_json(&baseline_path)?;
    let current = AttemptRecord::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            let score = |s: Option<u8>| s.map_or_else(|| "-".to_string(), |s| format!("{s}%"));
            println!(
                "Score: {} -> {}",
                score(report.baseline_score),
                score(report.current_score)
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!("  {} {} -> {}", r.expected, r.before, r.after);
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!("  {} {} -> {}", i.expected, i.before, i.after);
                }
            }

            if report.new_items > 0 {
                println!("\n{} new item(s)", report.new_items);
            }
            if report.removed_items > 0 {
                println!("{} removed item(s)", report.removed_items);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
