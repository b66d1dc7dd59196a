use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use crate::codeforces::ProblemId;

/// Per-problem state accumulated while scanning submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemAttemptState {
    pub solved: bool,
    pub attempt_count: u32,
    pub tags: Vec<String>,
    pub rating: Option<u32>,
    pub last_attempt_at_epoch_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCount {
    pub rating: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: u32,
}

/// Aggregate view of a handle's submission history.
/// Built once by `analyze` and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub total_problems_solved: u32,
    pub total_submissions: u32,
    pub total_accepted: u32,
    /// Sum of attempt counts over all problems
    pub total_attempts: u32,
    pub problems_attempted: u32,
    pub solved_by_tag: BTreeMap<String, u32>,
    pub solved_by_rating: BTreeMap<u32, u32>,
    pub languages: BTreeMap<String, u32>,
    pub top_tags: Vec<TagCount>,
    pub weak_tags: Vec<String>,
    pub rating_distribution: Vec<RatingCount>,
    pub top_languages: Vec<LanguageCount>,
    pub max_attempts: u32,
    pub highest_solved_rating: u32,
    pub problems: BTreeMap<ProblemId, ProblemAttemptState>,
    /// Attempted but never accepted, most attempts first
    pub unsolved_problems: Vec<ProblemId>,
}

impl Analysis {
    /// Accepted submissions over all submissions, 0.0 when there are none
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_submissions == 0 {
            0.0
        } else {
            self.total_accepted as f64 / self.total_submissions as f64
        }
    }

    pub fn solved_count_for_tag(&self, tag: &str) -> u32 {
        self.solved_by_tag.get(tag).copied().unwrap_or(0)
    }

    /// Unweighted mean of the distinct solved ratings
    pub fn average_solved_rating(&self) -> Option<f64> {
        if self.rating_distribution.is_empty() {
            return None;
        }
        let sum: u64 = self.rating_distribution.iter().map(|r| r.rating as u64).sum();
        Some(sum as f64 / self.rating_distribution.len() as f64)
    }

    pub fn weakest_tag(&self) -> Option<&str> {
        self.weak_tags.first().map(|t| t.as_str())
    }
}
