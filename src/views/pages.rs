use std::io::{self, Write};

use colored::Colorize;
use eyre::Result;

/// Prints a prompt and reads one trimmed line from stdin.
pub fn prompt(message: &str) -> Result<String> {
    print!("{}", message.cyan());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Non-blocking user-facing notice. Failures never corrupt state, so this is
/// all the error UX there is.
pub fn alert(message: &str) {
    println!("{}", message.red());
}

pub fn landing() {
    println!("\n{}", "RESUME RECOMMENDER".cyan().bold());
    println!("{}\n", "Personalized Job Matches Start Here".bold());
    println!("Browse the current job feed, or upload your resume to get");
    println!("listings matched and scored against it.\n");
}

pub fn feed_header() {
    println!("\n{}", "=== Job Feed ===".cyan().bold());
    println!("{}\n", "Current roles refreshed from our feed".dimmed());
}

pub fn search_header() {
    println!("\n{}", "=== Search Jobs ===".cyan().bold());
    println!(
        "{}\n",
        "Upload your resume and filters to get matched listings".dimmed()
    );
}

pub fn results_header() {
    println!("\n{}", "=== Match Results ===".cyan().bold());
    println!("{}\n", "Here are your top recommendations".bold());
}

/// Results view reached without a carried listing.
pub fn no_search_data() {
    println!("\n{}", "=== Match Results ===".cyan().bold());
    println!("No search data detected. Please return to the search page.\n");
}

/// Job detail view reached without a selected job.
pub fn no_job_selected() {
    println!("\n{}", "=== Job Details ===".cyan().bold());
    println!("No job selected. Please return to the results list.\n");
}
