use cfcoach_lib::analysis::analyze;
use cfcoach_lib::codeforces::{Profile, ProblemId, SubmissionRecord, Verdict};
use cfcoach_lib::report::build_report;

fn record(index: &str, verdict: Verdict, tags: &[&str], rating: Option<u32>, at: i64) -> SubmissionRecord {
    SubmissionRecord {
        problem_id: ProblemId::new(1700, index),
        verdict,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating,
        language: "GNU C++17".to_string(),
        submitted_at_epoch_seconds: at,
    }
}

#[test]
fn test_report_sections() {
    let records = vec![
        record("A", Verdict::Accepted, &["math"], Some(800), 1_650_000_000),
        record("B", Verdict::WrongAnswer, &["dp"], Some(1500), 1_650_000_100),
        record("B", Verdict::TimeLimitExceeded, &["dp"], Some(1500), 1_650_000_200),
    ];
    let mut profile = Profile::with_rating(1234);
    profile.rank = Some("pupil".to_string());

    let report = build_report("alice", &profile, &analyze(&records));

    assert!(report.starts_with("# Codeforces analysis for alice\n"));
    assert!(report.contains("Rating 1234 (pupil)"));
    assert!(report.contains("- Solved: 1 of 2 attempted problems"));
    assert!(report.contains("- Submissions: 3 (1 accepted, 33.3%)"));
    assert!(report.contains("## Top tags\n- math: 1"));
    assert!(report.contains("## Rating distribution\n- 800: 1"));
    assert!(report.contains("- GNU C++17: 3"));
    assert!(report.contains("## Unsolved attempts\n- 1700B: 2 attempts, last 2022-04-15"));
}

#[test]
fn test_report_empty_history() {
    let report = build_report("nobody", &Profile::default(), &analyze(&[]));

    assert!(!report.contains("\nRating "));
    assert!(report.contains("- Submissions: 0 (0 accepted, 0%)"));
    assert!(report.contains("No solved problems yet."));
    assert!(report.contains("No rated problems solved."));
    assert!(report.contains("No submissions."));
    assert!(!report.contains("Unsolved attempts"));
}
