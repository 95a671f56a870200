//! Display-formatting helpers for the job detail view.

/// Normalizes a match score to a whole percentage. Values at or below 1 are
/// read as fractions and scaled by 100; anything above 1 is taken to already
/// be a percentage and only rounded.
pub fn normalize_score(score: Option<f64>) -> Option<i64> {
    let score = score?;
    if score > 1.0 {
        Some(score.round() as i64)
    } else {
        Some((score * 100.0).round() as i64)
    }
}

/// Splits a description on runs of newlines into trimmed, non-empty
/// paragraphs, preserving their order.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a summary into sentences at whitespace that immediately follows a
/// period. Deliberately naive: abbreviations mis-split here the same way
/// they do in the product, which keeps rendered output stable.
pub fn summary_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() && current.ends_with('.') {
            sentences.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    sentences.push(current);

    sentences
        .into_iter()
        .map(|sentence| sentence.trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_absent_stays_absent() {
        assert_eq!(normalize_score(None), None);
    }

    #[test]
    fn score_fractions_scale_to_percent() {
        assert_eq!(normalize_score(Some(0.0)), Some(0));
        assert_eq!(normalize_score(Some(0.87)), Some(87));
        assert_eq!(normalize_score(Some(0.874)), Some(87));
        assert_eq!(normalize_score(Some(0.875)), Some(88));
        assert_eq!(normalize_score(Some(1.0)), Some(100));
    }

    #[test]
    fn score_above_one_is_already_percent() {
        assert_eq!(normalize_score(Some(1.2)), Some(1));
        assert_eq!(normalize_score(Some(73.4)), Some(73));
        assert_eq!(normalize_score(Some(87.0)), Some(87));
    }

    #[test]
    fn paragraphs_split_on_newline_runs() {
        let text = "First block.\n\n  Second block.  \n\n\nThird.";
        assert_eq!(
            paragraphs(text),
            vec!["First block.", "Second block.", "Third."]
        );
    }

    #[test]
    fn paragraphs_of_empty_text_are_empty() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn summary_splits_after_periods() {
        let text = "Strong overlap in Rust. Lacks cloud experience.  Apply anyway.";
        assert_eq!(
            summary_sentences(text),
            vec![
                "Strong overlap in Rust.",
                "Lacks cloud experience.",
                "Apply anyway."
            ]
        );
    }

    #[test]
    fn summary_keeps_unterminated_tail_and_inline_periods() {
        // "B.C." has no whitespace after the inner period, so it stays whole.
        assert_eq!(summary_sentences("A. B.C. D"), vec!["A.", "B.C.", "D"]);
        assert!(summary_sentences("").is_empty());
        assert!(summary_sentences("   ").is_empty());
    }
}
