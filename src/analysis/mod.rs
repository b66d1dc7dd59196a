pub mod model;

use std::collections::BTreeMap;
use crate::codeforces::{ProblemId, SubmissionRecord};
pub use model::{Analysis, LanguageCount, ProblemAttemptState, RatingCount, TagCount};

pub const TOP_TAGS_LIMIT: usize = 10;
pub const WEAK_TAGS_LIMIT: usize = 5;
pub const TOP_LANGUAGES_LIMIT: usize = 5;

/// Aggregate a handle's full submission list.
///
/// Records are consumed in one pass into per-problem state; the tag, rating and
/// language breakdowns are then derived from that state, so the result does not
/// depend on input order.
pub fn analyze(submissions: &[SubmissionRecord]) -> Analysis {
    let mut problems: BTreeMap<ProblemId, ProblemAttemptState> = BTreeMap::new();
    let mut languages: BTreeMap<String, u32> = BTreeMap::new();
    let mut total_accepted = 0u32;

    for submission in submissions {
        *languages.entry(submission.language.clone()).or_insert(0) += 1;

        let accepted = submission.verdict.is_accepted();
        if accepted {
            total_accepted += 1;
        }

        let state = problems
            .entry(submission.problem_id.clone())
            .or_insert_with(|| ProblemAttemptState {
                solved: false,
                attempt_count: 0,
                tags: Vec::new(),
                rating: None,
                last_attempt_at_epoch_seconds: submission.submitted_at_epoch_seconds,
            });

        // Problem metadata is the same on every submission; merging keeps the
        // state independent of which submission arrived first.
        merge_tags(&mut state.tags, &submission.tags);
        state.rating = state.rating.max(submission.rating);
        state.attempt_count += 1;
        state.solved |= accepted;
        state.last_attempt_at_epoch_seconds = state
            .last_attempt_at_epoch_seconds
            .max(submission.submitted_at_epoch_seconds);
    }

    let mut solved_by_tag: BTreeMap<String, u32> = BTreeMap::new();
    let mut solved_by_rating: BTreeMap<u32, u32> = BTreeMap::new();
    let mut total_problems_solved = 0u32;
    let mut highest_solved_rating = 0u32;
    let mut max_attempts = 0u32;
    let mut total_attempts = 0u32;

    for state in problems.values() {
        total_attempts += state.attempt_count;
        max_attempts = max_attempts.max(state.attempt_count);

        if !state.solved {
            continue;
        }
        total_problems_solved += 1;
        for tag in &state.tags {
            *solved_by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
        if let Some(rating) = state.rating {
            *solved_by_rating.entry(rating).or_insert(0) += 1;
            highest_solved_rating = highest_solved_rating.max(rating);
        }
    }

    let mut unsolved: Vec<(&ProblemId, u32)> = problems
        .iter()
        .filter(|(_, s)| !s.solved)
        .map(|(id, s)| (id, s.attempt_count))
        .collect();
    // Stable sort keeps problem id order among equal attempt counts
    unsolved.sort_by(|a, b| b.1.cmp(&a.1));
    let unsolved_problems = unsolved.into_iter().map(|(id, _)| id.clone()).collect();

    let tag_counts: Vec<TagCount> = solved_by_tag
        .iter()
        .map(|(tag, count)| TagCount { tag: tag.clone(), count: *count })
        .collect();

    let mut top_tags = tag_counts.clone();
    top_tags.sort_by(|a, b| b.count.cmp(&a.count));
    top_tags.truncate(TOP_TAGS_LIMIT);

    let mut weak = tag_counts;
    weak.sort_by(|a, b| a.count.cmp(&b.count));
    let weak_tags = weak
        .into_iter()
        .take(WEAK_TAGS_LIMIT)
        .map(|t| t.tag)
        .collect();

    let rating_distribution = solved_by_rating
        .iter()
        .map(|(rating, count)| RatingCount { rating: *rating, count: *count })
        .collect();

    let mut top_languages: Vec<LanguageCount> = languages
        .iter()
        .map(|(language, count)| LanguageCount { language: language.clone(), count: *count })
        .collect();
    top_languages.sort_by(|a, b| b.count.cmp(&a.count));
    top_languages.truncate(TOP_LANGUAGES_LIMIT);

    tracing::debug!(
        submissions = submissions.len(),
        problems = problems.len(),
        solved = total_problems_solved,
        "Analysis complete"
    );

    Analysis {
        total_problems_solved,
        total_submissions: submissions.len() as u32,
        total_accepted,
        total_attempts,
        problems_attempted: problems.len() as u32,
        solved_by_tag,
        solved_by_rating,
        languages,
        top_tags,
        weak_tags,
        rating_distribution,
        top_languages,
        max_attempts,
        highest_solved_rating,
        problems,
        unsolved_problems,
    }
}

/// Insert `incoming` into the sorted, duplicate-free `tags`
fn merge_tags(tags: &mut Vec<String>, incoming: &[String]) {
    for tag in incoming {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if let Err(pos) = tags.binary_search_by(|t| t.as_str().cmp(tag)) {
            tags.insert(pos, tag.to_string());
        }
    }
}
