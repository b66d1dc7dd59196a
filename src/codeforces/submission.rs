use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Composite problem key: contest id plus the problem index within that contest.
/// Serialized as `"{contest_id}/{index}"` so it can key JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemId {
    pub contest_id: u32,
    pub index: String,
}

impl ProblemId {
    pub fn new<S: Into<String>>(contest_id: u32, index: S) -> Self {
        ProblemId {
            contest_id,
            index: index.into(),
        }
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest_id, self.index)
    }
}

impl FromStr for ProblemId {
    type Err = String;

    /// Parse `"1520/A"`, or the compact `"1520A"` where the index starts
    /// after the leading digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (contest, index) = match s.split_once('/') {
            Some(parts) => parts,
            None => s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len())),
        };
        if index.is_empty() {
            return Err(format!("problem id '{}' has no index", s));
        }
        let contest_id = contest
            .parse::<u32>()
            .map_err(|_| format!("problem id '{}' has no contest id", s))?;
        Ok(ProblemId::new(contest_id, index))
    }
}

impl TryFrom<String> for ProblemId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProblemId> for String {
    fn from(id: ProblemId) -> Self {
        format!("{}/{}", id.contest_id, id.index)
    }
}

/// Outcome of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    RuntimeError,
    CompilationError,
    Other,
}

impl Verdict {
    /// Map a Codeforces API verdict string. Unknown or missing verdicts
    /// (e.g. submissions still in queue) become `Other`.
    pub fn from_api(raw: Option<&str>) -> Self {
        match raw {
            Some("OK") => Verdict::Accepted,
            Some("WRONG_ANSWER") => Verdict::WrongAnswer,
            Some("TIME_LIMIT_EXCEEDED") => Verdict::TimeLimitExceeded,
            Some("RUNTIME_ERROR") => Verdict::RuntimeError,
            Some("COMPILATION_ERROR") => Verdict::CompilationError,
            _ => Verdict::Other,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub problem_id: ProblemId,
    pub verdict: Verdict,
    pub tags: Vec<String>,
    pub rating: Option<u32>,
    pub language: String,
    pub submitted_at_epoch_seconds: i64,
}

// Raw Codeforces API payloads (`user.status`)

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProblem {
    #[serde(default)]
    pub contest_id: Option<u32>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub contest_id: Option<u32>,
    #[serde(default)]
    pub creation_time_seconds: i64,
    pub problem: RawProblem,
    #[serde(default)]
    pub programming_language: String,
    #[serde(default)]
    pub verdict: Option<String>,
}

impl RawSubmission {
    /// Validate and convert into a `SubmissionRecord`.
    /// Returns `None` when the problem cannot be identified.
    pub fn into_record(self) -> Option<SubmissionRecord> {
        let contest_id = self.problem.contest_id.or(self.contest_id)?;
        let index = self.problem.index.filter(|i| !i.trim().is_empty())?;

        Some(SubmissionRecord {
            problem_id: ProblemId::new(contest_id, index),
            verdict: Verdict::from_api(self.verdict.as_deref()),
            tags: self.problem.tags,
            rating: self.problem.rating.filter(|r| *r > 0),
            language: self.programming_language,
            submitted_at_epoch_seconds: self.creation_time_seconds,
        })
    }
}

/// Convert raw API submissions, skipping records without a problem identifier
pub fn into_records(raw: Vec<RawSubmission>) -> Vec<SubmissionRecord> {
    let total = raw.len();
    let records: Vec<SubmissionRecord> = raw
        .into_iter()
        .filter_map(|submission| {
            let id = submission.id;
            let record = submission.into_record();
            if record.is_none() {
                tracing::warn!(submission_id = ?id, "Skipping submission without problem identifier");
            }
            record
        })
        .collect();

    if records.len() != total {
        tracing::debug!(
            kept = records.len(),
            rejected = total - records.len(),
            "Filtered malformed submissions"
        );
    }
    records
}
