pub mod client;
pub mod profile;
pub mod submission;

pub use client::{CodeforcesClient, SourceError};
pub use profile::Profile;
pub use submission::{ProblemId, SubmissionRecord, Verdict};
