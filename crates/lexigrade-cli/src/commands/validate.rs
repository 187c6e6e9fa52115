//! The `lexigrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lexigrade_client::load_config_from;

pub fn execute(words_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let page_size = load_config_from(config_path.as_deref())?.quiz.page_size;
    let lists = lexigrade_core::parser::load_word_lists(&words_path)?;

    let mut total_warnings = 0;

    for list in &lists {
        let name = if list.name.is_empty() {
            format!("Week {}", list.week)
        } else {
            format!("{} (week {})", list.name, list.week)
        };
        println!(
            "Word list: {name}: {} words, {} page(s)",
            list.words.len(),
            list.page_count(page_size)
        );

        let warnings = lexigrade_core::parser::validate_word_list(list);
        for w in &warnings {
            let prefix = w
                .word
                .as_ref()
                .map(|word| format!("  [{word}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All word lists valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
