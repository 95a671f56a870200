use colored::Colorize;

use crate::models::job::JobListing;

const OVERVIEW_LIMIT: usize = 180;

/// What the card's action line offers: an in-page selection number on the
/// results list, or the outbound apply link on the feed.
pub enum CardAction<'a> {
    Select(usize),
    Apply(Option<&'a str>),
}

/// Truncated description shown on the card.
pub fn overview(description: &str) -> String {
    if description.is_empty() {
        return "No company overview available.".to_string();
    }
    let mut text: String = description.chars().take(OVERVIEW_LIMIT).collect();
    if description.chars().count() > OVERVIEW_LIMIT {
        text.push_str("...");
    }
    text
}

/// One-listing summary block, shared by the feed and the results list.
pub fn render(job: &JobListing, action: CardAction<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", job.title.bold()));
    out.push_str(&format!("{}\n", job.company.cyan()));
    out.push_str(&format!("{}\n", job.location));
    if let Some(score) = job.score {
        out.push_str(&format!("Match Score: {}\n", score));
    }

    out.push_str(&format!("{}\n", "Company Overview".dimmed()));
    out.push_str(&format!("{}\n", overview(&job.description)));

    match action {
        CardAction::Select(number) => {
            out.push_str(&format!("[{}] View Details\n", number));
        }
        CardAction::Apply(Some(link)) => {
            out.push_str(&format!("View Details: {}\n", link.underline()));
        }
        CardAction::Apply(None) => {}
    }

    out
}
