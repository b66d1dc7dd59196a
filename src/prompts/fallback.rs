use std::fmt::Write;
use crate::analysis::Analysis;
use crate::codeforces::Profile;

/// Lowest problem rating on Codeforces; also the baseline for unrated users
pub const MIN_PROBLEM_RATING: i32 = 800;
pub const BAND_HALF_WIDTH: i32 = 100;
pub const DAILY_PROBLEM_QUOTA: u32 = 3;

/// Practice band `[max(800, r - 100), r + 100]`, never inverted
pub fn target_band(profile: &Profile) -> (i32, i32) {
    let rating = profile.rating.unwrap_or(MIN_PROBLEM_RATING);
    let low = rating.saturating_sub(BAND_HALF_WIDTH).max(MIN_PROBLEM_RATING);
    let high = rating.saturating_add(BAND_HALF_WIDTH).max(low);
    (low, high)
}

/// Deterministic training plan used when the generative backend is unavailable
pub fn synthesize_fallback(handle: &str, profile: &Profile, analysis: &Analysis) -> String {
    let (low, high) = target_band(profile);
    let mut out = String::new();

    let _ = writeln!(out, "# Training plan for {}", handle);
    let _ = writeln!(out);
    match profile.rating {
        Some(rating) => {
            let _ = writeln!(
                out,
                "Current rating: {} ({}). Problems solved: {}.",
                rating,
                profile.rank.as_deref().unwrap_or("unranked"),
                analysis.total_problems_solved
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Current rating: unrated. Problems solved: {}.",
                analysis.total_problems_solved
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## 1. Target rating band");
    let _ = writeln!(out, "Practise problems rated {} to {}.", low, high);
    let _ = writeln!(
        out,
        "Start each session at {} to warm up and finish with at least one problem at {}.",
        low, high
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## 2. Immediate focus");
    match analysis.weakest_tag() {
        Some(tag) => {
            let _ = writeln!(
                out,
                "Your weakest topic is \"{}\" ({} solved). Solve five \"{}\" problems inside your band before moving on.",
                tag,
                analysis.solved_count_for_tag(tag),
                tag
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Not enough solved problems to find a weak topic yet. Work through a broad mix of topics in your band."
            );
        }
    }
    let strengths: Vec<&str> = analysis.top_tags.iter().take(3).map(|t| t.tag.as_str()).collect();
    if !strengths.is_empty() {
        let _ = writeln!(
            out,
            "Keep your strengths sharp with an occasional harder problem in: {}.",
            strengths.join(", ")
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## 3. Daily routine");
    let _ = writeln!(
        out,
        "- Solve {} problems a day: one at {} and the rest between {} and {}.",
        DAILY_PROBLEM_QUOTA, low, low, high
    );
    let _ = writeln!(out, "- Give each problem 30 to 45 minutes before reading the editorial.");
    let _ = writeln!(out, "- After reading an editorial, re-implement the solution from scratch the next day.");
    let _ = writeln!(out);

    let _ = writeln!(out, "## 4. Contests");
    let _ = writeln!(out, "- Take part in at least one rated contest every week.");
    let _ = writeln!(out, "- Upsolve every problem you could not finish during the contest within two days.");
    let _ = write!(out, "- Use virtual contests on weeks without a suitable rated round.");

    out
}
