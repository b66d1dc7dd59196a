pub mod analysis;
pub mod cache;
pub mod circuit_breaker;
pub mod codeforces;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipelines;
pub mod prompts;
pub mod report;
pub mod routes;
pub mod state;

pub use analysis::{analyze, Analysis};
pub use codeforces::{Profile, ProblemId, SubmissionRecord, Verdict};
pub use error::CoachError;
pub use pipelines::coach::{GenerationMode, Recommendation};
pub use prompts::{synthesize_fallback, synthesize_prompt};
