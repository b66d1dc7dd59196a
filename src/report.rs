use std::fmt::Write;

use chrono::{TimeZone, Utc};

use crate::analysis::Analysis;
use crate::codeforces::Profile;
use crate::prompts::percentage;

fn format_epoch(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => seconds.to_string(),
    }
}

/// Markdown summary of an analysis for terminal output
pub fn build_report(handle: &str, profile: &Profile, analysis: &Analysis) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Codeforces analysis for {}", handle);
    match (profile.rating, profile.rank.as_deref()) {
        (Some(rating), Some(rank)) => {
            let _ = writeln!(output, "Rating {} ({})", rating, rank);
        }
        (Some(rating), None) => {
            let _ = writeln!(output, "Rating {}", rating);
        }
        _ => {}
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Totals");
    let _ = writeln!(output, "- Solved: {} of {} attempted problems", analysis.total_problems_solved, analysis.problems_attempted);
    let _ = writeln!(output, "- Submissions: {} ({} accepted, {})",
        analysis.total_submissions,
        analysis.total_accepted,
        percentage(analysis.total_accepted, analysis.total_submissions)
    );
    let _ = writeln!(output, "- Hardest solved: {}", analysis.highest_solved_rating);
    let _ = writeln!(output, "- Most attempts on one problem: {}", analysis.max_attempts);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Top tags");
    if analysis.top_tags.is_empty() {
        let _ = writeln!(output, "No solved problems yet.");
    } else {
        for entry in &analysis.top_tags {
            let _ = writeln!(output, "- {}: {}", entry.tag, entry.count);
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Weak tags");
    if analysis.weak_tags.is_empty() {
        let _ = writeln!(output, "No solved problems yet.");
    } else {
        for tag in &analysis.weak_tags {
            let _ = writeln!(output, "- {}: {}", tag, analysis.solved_count_for_tag(tag));
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Rating distribution");
    if analysis.rating_distribution.is_empty() {
        let _ = writeln!(output, "No rated problems solved.");
    } else {
        for entry in &analysis.rating_distribution {
            let _ = writeln!(output, "- {}: {}", entry.rating, entry.count);
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Languages");
    if analysis.top_languages.is_empty() {
        let _ = writeln!(output, "No submissions.");
    } else {
        for entry in &analysis.top_languages {
            let _ = writeln!(output, "- {}: {}", entry.language, entry.count);
        }
    }

    if !analysis.unsolved_problems.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Unsolved attempts");
        for id in analysis.unsolved_problems.iter().take(10) {
            if let Some(state) = analysis.problems.get(id) {
                let _ = writeln!(
                    output,
                    "- {}: {} attempts, last {}",
                    id,
                    state.attempt_count,
                    format_epoch(state.last_attempt_at_epoch_seconds)
                );
            }
        }
    }

    output
}
