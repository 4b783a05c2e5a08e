use anyhow::Result;
use colored::Colorize;

use super::output;
use crate::theme::{all_themes, DEFAULT_THEME};

pub fn run() -> Result<()> {
    output::header_stdout("Themes");
    let width = all_themes().iter().map(|t| t.name.len()).max().unwrap_or(0);
    for theme in all_themes() {
        let marker = if theme.name == DEFAULT_THEME {
            format!(" {}", "(default)".dimmed())
        } else {
            String::new()
        };
        println!(
            "  {:<width$}  {}{}",
            theme.name.bold(),
            theme.description,
            marker,
            width = width
        );
    }
    Ok(())
}
