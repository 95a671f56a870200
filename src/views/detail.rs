use colored::Colorize;

use crate::format;
use crate::models::job::JobListing;

/// Full rendering of one job: normalized score, summary sentences as
/// bullets, keyword tags, description paragraphs, evidence image and the
/// apply link. Pure function of the listing.
pub fn render(job: &JobListing) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "RECOMMENDED ROLE".dimmed()));
    out.push_str(&format!("{}\n", job.title.bold()));
    out.push_str(&format!("{}\n", job.company.cyan()));
    out.push_str(&format!("{}\n", job.location));

    if let Some(score) = format::normalize_score(job.score) {
        out.push_str(&format!(
            "\nMatch Score: {}\n",
            format!("{}%", score).green().bold()
        ));
    }

    out.push_str(&format!("\n{}\n", "Match Summary".bold()));
    let sentences = format::summary_sentences(job.summary.as_deref().unwrap_or(""));
    if sentences.is_empty() {
        out.push_str("No summary provided by the model.\n");
    } else {
        for sentence in &sentences {
            out.push_str(&format!("  - {}\n", sentence));
        }
    }

    if let Some(keywords) = &job.keywords
        && !keywords.is_empty()
    {
        out.push_str(&format!("\n{}\n", "Highlighted Skills".bold()));
        let tags: Vec<String> = keywords.iter().map(|k| format!("[{}]", k)).collect();
        out.push_str(&format!("  {}\n", tags.join(" ")));
    }

    out.push_str(&format!("\n{}\n", "Company Overview".bold()));
    let blocks = format::paragraphs(&job.description);
    if blocks.is_empty() {
        out.push_str("No description available.\n");
    } else {
        for (idx, block) in blocks.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", block));
        }
    }

    if let Some(image) = &job.evidence_image {
        out.push_str(&format!("\n{}\n  {}\n", "Model Evidence".bold(), image));
    }

    if let Some(link) = &job.apply_link {
        out.push_str(&format!(
            "\n{} {}\n",
            "Apply on Company Site:".bold(),
            link.underline()
        ));
    }

    out
}
