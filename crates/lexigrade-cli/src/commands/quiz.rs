//! The `lexigrade quiz` command.
//!
//! Reads one answer per line. `:back` returns to the previous question and
//! `:quit` (or end of input) grades what has been answered so far.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use lexigrade_client::load_config_from;
use lexigrade_core::model::{Direction, Selection, WordList};
use lexigrade_core::quiz::Quiz;
use lexigrade_core::traits::WordSource;

use crate::output;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    words_path: Option<PathBuf>,
    week: Option<u32>,
    page: usize,
    all: bool,
    direction: Option<String>,
    output_dir: Option<PathBuf>,
    format: String,
    submit: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let list: WordList = match (words_path, week) {
        (Some(path), _) => lexigrade_core::parser::parse_word_list(&path)?,
        (None, Some(week)) => config.server.backend()?.week_words(week).await?,
        (None, None) => anyhow::bail!("pass --words FILE or --week N"),
    };

    let direction: Direction = match direction {
        Some(d) => d.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => config.quiz.direction,
    };
    let selection = if all { Selection::All } else { Selection::Page(page) };

    let mut quiz = Quiz::new(&list, selection, direction, config.quiz.page_size)?;
    eprintln!(
        "Week {}: {} question(s), {}. Type :back to go back, :quit to finish early.",
        quiz.week(),
        quiz.len(),
        direction
    );

    let stdin = std::io::stdin();
    let stderr = std::io::stderr();
    ask_all(&mut quiz, stdin.lock(), stderr.lock())?;

    let record = quiz.finish();
    output::print_summary(&record);

    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    output::write_outputs(&record, &output_dir, &format)?;

    if submit {
        output::submit_if_passing(&config, &record).await?;
    }

    Ok(())
}

/// Ask every question in order, reading answers from `input`.
fn ask_all(quiz: &mut Quiz, mut input: impl BufRead, mut prompt_out: impl Write) -> Result<()> {
    loop {
        let Some(item) = quiz.current() else {
            return Ok(());
        };
        write!(
            prompt_out,
            "[{}/{}] {}",
            quiz.position() + 1,
            quiz.len(),
            item.prompt
        )?;
        let earlier = quiz.current_answer();
        if !earlier.is_empty() {
            write!(prompt_out, " (was: {earlier})")?;
        }
        write!(prompt_out, ": ")?;
        prompt_out.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            writeln!(prompt_out)?;
            return Ok(());
        }

        let answer = line.trim_end_matches(['\r', '\n']);
        match answer.trim() {
            ":quit" => return Ok(()),
            ":back" => {
                quiz.previous();
                continue;
            }
            _ => quiz.answer(answer),
        }

        if !quiz.next() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigrade_core::grading::Classification;
    use lexigrade_core::model::Word;

    fn list() -> WordList {
        let word = |w: &str, t: &str| Word {
            id: String::new(),
            word: w.into(),
            translation: t.into(),
            week: 1,
        };
        WordList {
            week: 1,
            name: String::new(),
            words: vec![
                word("cat", "кот"),
                word("elephant", "слон"),
                word("fish", "рыба"),
            ],
        }
    }

    fn run_with_prompts(input: &str) -> (Quiz, String) {
        let mut quiz = Quiz::new(&list(), Selection::All, Direction::ToWord, 10).unwrap();
        let mut prompts = Vec::new();
        ask_all(&mut quiz, input.as_bytes(), &mut prompts).unwrap();
        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.starts_with("[1/3] кот: "));
        (quiz, prompts)
    }

    fn run(input: &str) -> Quiz {
        run_with_prompts(input).0
    }

    #[test]
    fn answers_every_question() {
        let record = run("cat\nelefant\nbird\n").finish();
        let classes: Vec<_> = record
            .report
            .details
            .iter()
            .map(|d| d.classification)
            .collect();
        assert_eq!(
            classes,
            vec![
                Classification::Exact,
                Classification::Tolerant,
                Classification::Incorrect
            ]
        );
        assert_eq!(record.report.score_percent, Some(67));
    }

    #[test]
    fn back_replaces_earlier_answer() {
        let record = run("cot\n:back\ncat\nelephant\nfish\n").finish();
        assert_eq!(record.report.exact_count, 3);
    }

    #[test]
    fn revisited_question_shows_earlier_answer() {
        let (_, prompts) = run_with_prompts("cot\n:back\ncat\n:quit\n");
        assert!(prompts.contains("[1/3] кот (was: cot): "));
    }

    #[test]
    fn quit_leaves_rest_unanswered() {
        let record = run("cat\n:quit\n").finish();
        assert_eq!(record.report.total, 3);
        assert_eq!(record.report.credited_count, 1);
        assert_eq!(record.report.details[1].actual, "");
    }

    #[test]
    fn end_of_input_finishes() {
        let record = run("cat\nelephant").finish();
        assert_eq!(record.report.credited_count, 2);
        assert_eq!(record.report.incorrect_count, 1);
    }
}
