use cfcoach_lib::analysis::analyze;
use cfcoach_lib::codeforces::{ProblemId, SubmissionRecord, Verdict};

fn submission(
    contest_id: u32,
    index: &str,
    verdict: Verdict,
    tags: &[&str],
    rating: Option<u32>,
    language: &str,
    at: i64,
) -> SubmissionRecord {
    SubmissionRecord {
        problem_id: ProblemId::new(contest_id, index),
        verdict,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating,
        language: language.to_string(),
        submitted_at_epoch_seconds: at,
    }
}

fn sample_history() -> Vec<SubmissionRecord> {
    vec![
        submission(1520, "A", Verdict::WrongAnswer, &["implementation"], Some(800), "C++17", 100),
        submission(1520, "A", Verdict::Accepted, &["implementation"], Some(800), "C++17", 160),
        submission(1520, "B", Verdict::Accepted, &["math", "greedy"], Some(1000), "C++17", 200),
        submission(1521, "C", Verdict::TimeLimitExceeded, &["dp"], Some(1400), "Python 3", 300),
        submission(1521, "C", Verdict::RuntimeError, &["dp"], Some(1400), "Python 3", 250),
        submission(1521, "C", Verdict::Accepted, &["dp"], Some(1400), "C++17", 400),
        submission(1600, "D", Verdict::CompilationError, &["graphs"], Some(1900), "C++17", 500),
        submission(1600, "E", Verdict::Accepted, &[], None, "Rust", 600),
        submission(1601, "A", Verdict::Accepted, &["math"], Some(1000), "C++17", 700),
        submission(1601, "A", Verdict::Accepted, &["math"], Some(1000), "C++17", 710),
    ]
}

#[test]
fn test_empty_input() {
    let analysis = analyze(&[]);
    assert_eq!(analysis.total_problems_solved, 0);
    assert_eq!(analysis.total_submissions, 0);
    assert_eq!(analysis.total_accepted, 0);
    assert_eq!(analysis.total_attempts, 0);
    assert_eq!(analysis.problems_attempted, 0);
    assert_eq!(analysis.max_attempts, 0);
    assert_eq!(analysis.highest_solved_rating, 0);
    assert!(analysis.solved_by_tag.is_empty());
    assert!(analysis.solved_by_rating.is_empty());
    assert!(analysis.languages.is_empty());
    assert!(analysis.top_tags.is_empty());
    assert!(analysis.weak_tags.is_empty());
    assert!(analysis.rating_distribution.is_empty());
    assert!(analysis.top_languages.is_empty());
    assert!(analysis.problems.is_empty());
    assert!(analysis.unsolved_problems.is_empty());
}

#[test]
fn test_single_accepted_submission() {
    let records = vec![submission(1, "A", Verdict::Accepted, &["dp"], Some(1200), "C++17", 10)];
    let analysis = analyze(&records);

    assert_eq!(analysis.total_problems_solved, 1);
    assert_eq!(analysis.total_accepted, 1);
    assert_eq!(analysis.highest_solved_rating, 1200);
    assert_eq!(analysis.solved_by_tag.len(), 1);
    assert_eq!(analysis.solved_by_tag.get("dp"), Some(&1));
    assert_eq!(analysis.solved_by_rating.len(), 1);
    assert_eq!(analysis.solved_by_rating.get(&1200), Some(&1));
}

#[test]
fn test_wrong_answer_then_accepted() {
    let records = vec![
        submission(1, "A", Verdict::WrongAnswer, &["dp"], Some(1200), "C++17", 10),
        submission(1, "A", Verdict::Accepted, &["dp"], Some(1200), "C++17", 20),
    ];
    let analysis = analyze(&records);

    assert_eq!(analysis.total_problems_solved, 1);
    assert_eq!(analysis.total_accepted, 1);
    assert_eq!(analysis.total_attempts, 2);
    assert!(analysis.max_attempts >= 2);
    let state = &analysis.problems[&ProblemId::new(1, "A")];
    assert_eq!(state.attempt_count, 2);
    assert!(state.solved);
    assert_eq!(analysis.solved_by_tag.get("dp"), Some(&1));
}

#[test]
fn test_sample_history_counters() {
    let analysis = analyze(&sample_history());

    assert_eq!(analysis.total_submissions, 10);
    assert_eq!(analysis.total_accepted, 6);
    assert_eq!(analysis.total_attempts, 10);
    assert_eq!(analysis.problems_attempted, 6);
    // 1520A, 1520B, 1521C, 1600E, 1601A
    assert_eq!(analysis.total_problems_solved, 5);
    assert_eq!(analysis.max_attempts, 3);
    assert_eq!(analysis.highest_solved_rating, 1400);

    assert_eq!(analysis.solved_by_tag.get("math"), Some(&2));
    assert_eq!(analysis.solved_by_tag.get("greedy"), Some(&1));
    assert_eq!(analysis.solved_by_tag.get("dp"), Some(&1));
    assert_eq!(analysis.solved_by_tag.get("implementation"), Some(&1));
    assert!(analysis.solved_by_tag.get("graphs").is_none());

    assert_eq!(analysis.solved_by_rating.get(&1000), Some(&2));
    assert_eq!(analysis.languages.get("C++17"), Some(&7));
    assert_eq!(analysis.languages.get("Python 3"), Some(&2));
    assert_eq!(analysis.languages.get("Rust"), Some(&1));

    assert_eq!(analysis.unsolved_problems, vec![ProblemId::new(1600, "D")]);
}

#[test]
fn test_other_verdict_not_accepted() {
    let records = vec![
        submission(1, "A", Verdict::Other, &["dp"], Some(1200), "C++17", 10),
        submission(1, "B", Verdict::Other, &["dp"], Some(1200), "C++17", 20),
    ];
    let analysis = analyze(&records);
    assert_eq!(analysis.total_accepted, 0);
    assert_eq!(analysis.total_problems_solved, 0);
    assert_eq!(analysis.total_submissions, 2);
}

#[test]
fn test_untagged_and_unrated_problems() {
    let records = vec![submission(7, "E", Verdict::Accepted, &[], None, "Rust", 10)];
    let analysis = analyze(&records);
    assert_eq!(analysis.total_problems_solved, 1);
    assert!(analysis.solved_by_tag.is_empty());
    assert!(analysis.solved_by_rating.is_empty());
    assert_eq!(analysis.highest_solved_rating, 0);
}

#[test]
fn test_duplicate_tags_counted_once() {
    let records = vec![submission(3, "A", Verdict::Accepted, &["dp", "dp"], Some(900), "C++17", 10)];
    let analysis = analyze(&records);
    assert_eq!(analysis.solved_by_tag.get("dp"), Some(&1));
}

#[test]
fn test_solved_bounded_by_distinct_problems() {
    let analysis = analyze(&sample_history());
    assert!(analysis.total_problems_solved <= analysis.problems_attempted);

    let with_accepted = analysis.problems.values().filter(|p| p.solved).count() as u32;
    assert_eq!(analysis.total_problems_solved, with_accepted);
}

#[test]
fn test_rating_sum_matches_rated_solved() {
    let records: Vec<SubmissionRecord> = sample_history()
        .into_iter()
        .filter(|s| s.rating.is_some())
        .collect();
    let analysis = analyze(&records);
    let sum: u32 = analysis.solved_by_rating.values().sum();
    assert_eq!(sum, analysis.total_problems_solved);

    // Unrated solved problems count toward totals but not the rating buckets
    let full = analyze(&sample_history());
    let full_sum: u32 = full.solved_by_rating.values().sum();
    assert_eq!(full_sum + 1, full.total_problems_solved);
}

#[test]
fn test_idempotent() {
    let records = sample_history();
    assert_eq!(analyze(&records), analyze(&records));
}

#[test]
fn test_order_independent() {
    let records = sample_history();
    let baseline = analyze(&records);

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(analyze(&reversed), baseline);

    let mut rotated = records.clone();
    rotated.rotate_left(4);
    assert_eq!(analyze(&rotated), baseline);

    // The out-of-order RE at t=250 must not lower the max timestamp
    let rotated_analysis = analyze(&rotated);
    let state = &rotated_analysis.problems[&ProblemId::new(1521, "C")];
    assert_eq!(state.last_attempt_at_epoch_seconds, 400);
}

#[test]
fn test_top_tags_ordering() {
    let analysis = analyze(&sample_history());
    assert_eq!(analysis.top_tags[0].tag, "math");
    assert_eq!(analysis.top_tags[0].count, 2);
    // Ties keep alphabetical order
    let tied: Vec<&str> = analysis.top_tags[1..].iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(tied, vec!["dp", "greedy", "implementation"]);
}

#[test]
fn test_weak_tags_ordering_and_limit() {
    let tags = ["a", "b", "c", "d", "e", "f", "g"];
    let mut records = Vec::new();
    for (i, tag) in tags.iter().enumerate() {
        records.push(submission(100 + i as u32, "A", Verdict::Accepted, &[*tag], Some(800), "C++17", i as i64));
    }
    // Give "a" and "b" extra solves so they are no longer the weakest
    records.push(submission(200, "A", Verdict::Accepted, &["a", "b"], Some(800), "C++17", 50));

    let analysis = analyze(&records);
    assert_eq!(analysis.weak_tags, vec!["c", "d", "e", "f", "g"]);
}

#[test]
fn test_top_tags_limit() {
    let mut records = Vec::new();
    for i in 0..15u32 {
        let tag = format!("tag{:02}", i);
        records.push(submission(i + 1, "A", Verdict::Accepted, &[tag.as_str()], Some(800), "C++17", i as i64));
    }
    let analysis = analyze(&records);
    assert_eq!(analysis.top_tags.len(), 10);
    assert_eq!(analysis.weak_tags.len(), 5);
}

#[test]
fn test_rating_distribution_ascending() {
    let analysis = analyze(&sample_history());
    let ratings: Vec<u32> = analysis.rating_distribution.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![800, 1000, 1400]);
}

#[test]
fn test_top_languages_ordering() {
    let analysis = analyze(&sample_history());
    let langs: Vec<(&str, u32)> = analysis
        .top_languages
        .iter()
        .map(|l| (l.language.as_str(), l.count))
        .collect();
    assert_eq!(langs, vec![("C++17", 7), ("Python 3", 2), ("Rust", 1)]);
}

#[test]
fn test_acceptance_rate_and_average() {
    let empty = analyze(&[]);
    assert_eq!(empty.acceptance_rate(), 0.0);
    assert!(empty.average_solved_rating().is_none());

    let analysis = analyze(&sample_history());
    assert!((analysis.acceptance_rate() - 0.6).abs() < 1e-9);
    // Distinct ratings 800, 1000, 1400
    let avg = analysis.average_solved_rating().unwrap();
    assert!((avg - 1066.666).abs() < 0.01);
}

#[test]
fn test_analysis_json_roundtrip() {
    let analysis = analyze(&sample_history());
    let json = serde_json::to_string(&analysis).unwrap();
    assert!(json.contains("\"1521/C\""));

    let parsed: cfcoach_lib::Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, analysis);
}

#[test]
fn test_problem_id_parse() {
    assert_eq!("1520A".parse::<ProblemId>().unwrap(), ProblemId::new(1520, "A"));
    assert_eq!("1700B2".parse::<ProblemId>().unwrap(), ProblemId::new(1700, "B2"));
    assert_eq!("12/3".parse::<ProblemId>().unwrap(), ProblemId::new(12, "3"));
    assert!("1520".parse::<ProblemId>().is_err());
    assert!("1520/".parse::<ProblemId>().is_err());
    assert!("A".parse::<ProblemId>().is_err());
}

#[test]
fn test_numeric_index_survives_json() {
    let records = vec![submission(12, "3", Verdict::WrongAnswer, &["dp"], Some(1000), "C++17", 5)];
    let analysis = analyze(&records);
    let json = serde_json::to_string(&analysis).unwrap();

    let parsed: cfcoach_lib::Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.unsolved_problems, vec![ProblemId::new(12, "3")]);
    assert_eq!(parsed, analysis);
}
