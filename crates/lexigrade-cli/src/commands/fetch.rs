//! The `lexigrade fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use lexigrade_client::load_config_from;
use lexigrade_core::parser::word_list_to_toml;
use lexigrade_core::traits::WordSource;

pub async fn execute(
    week: Option<u32>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let backend = config.server.backend()?;

    let Some(week) = week else {
        let weeks = backend.available_weeks().await?;
        let weeks: Vec<String> = weeks.iter().map(u32::to_string).collect();
        println!("Available weeks: {}", weeks.join(", "));
        return Ok(());
    };

    let list = backend.week_words(week).await?;
    if list.words.is_empty() {
        eprintln!("Week {week} has no words on the server.");
    }
    let toml = word_list_to_toml(&list)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, toml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved {} word(s) to {}", list.words.len(), path.display());
        }
        None => print!("{toml}"),
    }

    Ok(())
}
