//! The `lexigrade grade` command.

use std::path::PathBuf;

use anyhow::Result;

use lexigrade_client::load_config_from;
use lexigrade_core::model::{PageInfo, Selection};
use lexigrade_core::parser::parse_answer_sheet;
use lexigrade_core::report::{build_report, AttemptRecord};

use crate::output;

pub async fn execute(
    answers_path: PathBuf,
    week: Option<u32>,
    output_dir: Option<PathBuf>,
    format: String,
    submit: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    if submit && week.is_none() {
        anyhow::bail!("--submit needs --week so the score can be stored against it");
    }

    let pairs = parse_answer_sheet(&answers_path)?;
    eprintln!(
        "Grading {} answer(s) from {}",
        pairs.len(),
        answers_path.display()
    );

    let report = build_report(&pairs);
    let record = AttemptRecord::new(
        week.unwrap_or(0),
        PageInfo::from(Selection::All),
        config.quiz.direction,
        report,
    );

    output::print_summary(&record);

    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    output::write_outputs(&record, &output_dir, &format)?;

    if submit {
        output::submit_if_passing(&config, &record).await?;
    }

    Ok(())
}
