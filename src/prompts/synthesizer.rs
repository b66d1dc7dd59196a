use std::fmt::Write;
use crate::analysis::Analysis;
use crate::codeforces::Profile;

pub const STRENGTHS_LIMIT: usize = 5;
pub const UNSOLVED_LIMIT: usize = 5;
pub const NO_DATA: &str = "no data available";

pub const SYSTEM_PROMPT: &str = r#"You are an experienced competitive programming coach who trains Codeforces contestants.
You give concrete, actionable advice grounded in the statistics you are shown.
You never invent statistics that were not provided.
You answer in plain text with numbered sections."#;

/// Format `numerator / denominator` as a percentage with one decimal.
/// A zero denominator yields `0%`.
pub fn percentage(numerator: u32, denominator: u32) -> String {
    if denominator == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", numerator as f64 * 100.0 / denominator as f64)
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Build the prompt sent to the generative backend
pub fn synthesize_prompt(handle: &str, profile: &Profile, analysis: &Analysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", SYSTEM_PROMPT);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Analyze the Codeforces performance of user \"{}\" and give personalized training recommendations.",
        handle
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "PROFILE:");
    let _ = writeln!(out, "- Handle: {}", handle);
    match profile.rating {
        Some(rating) => {
            let _ = writeln!(out, "- Current rating: {}", rating);
        }
        None => {
            let _ = writeln!(out, "- Current rating: unrated");
        }
    }
    let _ = writeln!(out, "- Rank: {}", profile.rank.as_deref().unwrap_or("unranked"));
    if let Some(max_rating) = profile.max_rating {
        match profile.max_rank.as_deref() {
            Some(max_rank) => {
                let _ = writeln!(out, "- Max rating: {} ({})", max_rating, max_rank);
            }
            None => {
                let _ = writeln!(out, "- Max rating: {}", max_rating);
            }
        }
    }
    if let Some(org) = profile.organization.as_deref() {
        let _ = writeln!(out, "- Organization: {}", org);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "PERFORMANCE METRICS:");
    let _ = writeln!(out, "- Problems solved: {}", analysis.total_problems_solved);
    let _ = writeln!(out, "- Problems attempted: {}", analysis.problems_attempted);
    let _ = writeln!(out, "- Total submissions: {}", analysis.total_submissions);
    let _ = writeln!(out, "- Accepted submissions: {}", analysis.total_accepted);
    let _ = writeln!(
        out,
        "- Acceptance rate: {}",
        percentage(analysis.total_accepted, analysis.total_submissions)
    );
    if analysis.highest_solved_rating > 0 {
        let _ = writeln!(out, "- Hardest problem solved: rated {}", analysis.highest_solved_rating);
    } else {
        let _ = writeln!(out, "- Hardest problem solved: {}", NO_DATA);
    }
    let _ = writeln!(out, "- Most attempts on a single problem: {}", analysis.max_attempts);
    let _ = writeln!(out);

    let _ = writeln!(out, "STRENGTHS (most solved tags):");
    if analysis.top_tags.is_empty() {
        let _ = writeln!(out, "- {}", NO_DATA);
    } else {
        for entry in analysis.top_tags.iter().take(STRENGTHS_LIMIT) {
            let _ = writeln!(out, "- {}: {} solved", entry.tag, plural(entry.count, "problem", "problems"));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "WEAKNESSES (least solved tags):");
    if analysis.weak_tags.is_empty() {
        let _ = writeln!(out, "- {}", NO_DATA);
    } else {
        for tag in &analysis.weak_tags {
            let count = analysis.solved_count_for_tag(tag);
            let _ = writeln!(out, "- {}: only {} solved", tag, plural(count, "problem", "problems"));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "RATING GAP:");
    let rating = profile.rating.unwrap_or(0);
    let target = rating.saturating_add(100);
    match analysis.average_solved_rating() {
        Some(average) => {
            let gap = (target as f64 - average).max(0.0);
            let _ = writeln!(out, "- Average rating of solved problems: {:.0}", average);
            let _ = writeln!(out, "- Suggested practice rating (current + 100): {}", target);
            let _ = writeln!(out, "- Estimated gap: {:.0}", gap);
        }
        None => {
            let _ = writeln!(out, "- Average rating of solved problems: {}", NO_DATA);
            let _ = writeln!(out, "- Suggested practice rating (current + 100): {}", target);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "LANGUAGES:");
    if analysis.top_languages.is_empty() {
        let _ = writeln!(out, "- {}", NO_DATA);
    } else {
        for entry in &analysis.top_languages {
            let _ = writeln!(
                out,
                "- {}: {} of submissions",
                entry.language,
                percentage(entry.count, analysis.total_submissions)
            );
        }
    }
    let _ = writeln!(out);

    if !analysis.unsolved_problems.is_empty() {
        let _ = writeln!(out, "ATTEMPTED BUT UNSOLVED:");
        for id in analysis.unsolved_problems.iter().take(UNSOLVED_LIMIT) {
            let attempts = analysis.problems.get(id).map(|p| p.attempt_count).unwrap_or(0);
            let _ = writeln!(out, "- {} ({})", id, plural(attempts, "attempt", "attempts"));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Based on this data, provide:");
    let _ = writeln!(out, "1. Focus areas: the topics to prioritise and why");
    let _ = writeln!(out, "2. Target ratings: the problem rating range to practise next");
    let _ = writeln!(out, "3. Study plan: a weekly schedule for the next month");
    let _ = writeln!(out, "4. Problem types: kinds of problems to seek out");
    let _ = writeln!(out, "5. Contest tips: advice for performing better in live contests");
    let _ = write!(out, "6. Specific problems: Codeforces problem IDs (e.g. 1520A) to solve next");

    out
}
