//! The `lexigrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create lexigrade.toml
    if std::path::Path::new("lexigrade.toml").exists() {
        println!("lexigrade.toml already exists, skipping.");
    } else {
        std::fs::write("lexigrade.toml", SAMPLE_CONFIG)?;
        println!("Created lexigrade.toml");
    }

    // Create example word list
    std::fs::create_dir_all("words")?;
    let example_path = std::path::Path::new("words/example.toml");
    if example_path.exists() {
        println!("words/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_WORD_LIST)?;
        println!("Created words/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit lexigrade.toml with your server URL and user");
    println!("  2. Run: lexigrade validate --words words/example.toml");
    println!("  3. Run: lexigrade quiz --words words/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexigrade configuration

output_dir = "./lexigrade-results"

[server]
base_url = "http://localhost:3000/api"
token = "${LEXIGRADE_TOKEN}"
user_id = "${LEXIGRADE_USER_ID}"
timeout_secs = 30

[quiz]
page_size = 10
# A week counts as passed once a score goes above pass_score.
pass_score = 50
pass_inclusive = false
direction = "to-word"
"#;

const EXAMPLE_WORD_LIST: &str = r#"[word_list]
week = 1
name = "Animals"

[[words]]
word = "cat"
translation = "кот"

[[words]]
word = "dog"
translation = "собака"

[[words]]
word = "elephant"
translation = "слон"

[[words]]
word = "fish"
translation = "рыба"

[[words]]
word = "bird"
translation = "птица"
"#;
