//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizdeck.toml with your API URL, or stay offline with quiz files");
    println!("  2. Run: quizdeck validate --quiz quizzes/example.toml");
    println!("  3. Run: quizdeck take --quiz 1 --file quizzes/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

store_path = "./quizdeck-completions.json"
output_dir = "./quizdeck-reports"

[api]
base_url = "http://localhost:8080"
token = "${QUIZDECK_API_TOKEN}"
timeout_secs = 15
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = 1
title = "Example Quiz"
description = "A short example quiz to get started"
time_limit_minutes = 5
shuffle_questions = false

[[questions]]
id = 1
text = "Which command starts an attempt?"
option_a = "quizdeck take"
option_b = "quizdeck list"
option_c = "quizdeck results"
option_d = "quizdeck validate"
correct = "A"
display_order = 1

[[questions]]
id = 2
text = "What happens when the countdown reaches zero?"
option_a = "The attempt is discarded"
option_b = "Your answers are submitted automatically"
option_c = "The timer restarts"
option_d = "Nothing"
correct = "B"
display_order = 2

[[questions]]
id = 3
text = "How many times can an answer be changed before submitting?"
option_a = "Never"
option_b = "Once"
option_c = "Twice"
option_d = "As many times as you like"
correct = "D"
display_order = 3
"#;
