// src/core/analytics.rs
//
// Pure aggregation over quiz attempts. Handlers fetch fully joined rows
// from the database and hand them in; everything here is arithmetic and
// sorting, recomputed from scratch on every call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One quiz attempt, already joined with its chapter and subject names.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub quiz_id: i64,
    pub user_id: i64,
    pub attempted_at: DateTime<Utc>,
    pub total_score: i64,
    pub accuracy_percentage: f64,
    pub subject_name: String,
    pub chapter_name: String,
    /// Display name of the attempting user; only the platform report
    /// shows it.
    pub user_full_name: String,
}

/// Per-user performance summary. Derived on every request, never stored.
#[derive(Debug, Default, Serialize)]
pub struct PerformanceReport {
    pub overall_accuracy: f64,
    pub total_quizzes: usize,
    pub total_score: i64,
    pub accuracy_trend: Vec<TrendPoint>,
    pub subject_performance: Vec<SubjectPerformance>,
    pub chapter_performance: Vec<ChapterPerformance>,
    pub strengths: Vec<ChapterPerformance>,
    pub weaknesses: Vec<ChapterPerformance>,
    pub recent_attempts: Vec<RecentAttempt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub accuracy: f64,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub average_accuracy: f64,
    pub total_score: i64,
    pub attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterPerformance {
    pub chapter: String,
    pub average_accuracy: f64,
    pub total_score: i64,
    pub attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentAttempt {
    pub quiz_id: i64,
    pub subject: String,
    pub chapter: String,
    pub date: String,
    pub score: i64,
    pub accuracy: f64,
}

/// Entity counts for the admin dashboard, supplied by the storage layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformTotals {
    pub users: i64,
    pub subjects: i64,
    pub chapters: i64,
    pub quizzes: i64,
    pub questions: i64,
    pub attempts: i64,
}

/// Platform-wide summary for the admin dashboard.
#[derive(Debug, Default, Serialize)]
pub struct PlatformReport {
    pub total_users: i64,
    pub total_subjects: i64,
    pub total_chapters: i64,
    pub total_quizzes: i64,
    pub total_questions: i64,
    pub total_attempts: i64,
    pub average_accuracy: f64,
    pub popular_subjects: Vec<PopularSubject>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularSubject {
    pub name: String,
    pub attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub user: String,
    pub quiz: String,
    pub score: i64,
    pub accuracy: f64,
    pub date: String,
}

const STRENGTH_THRESHOLD: f64 = 75.0;
const WEAKNESS_THRESHOLD: f64 = 60.0;

/// Rolls one user's attempts up into a [`PerformanceReport`].
///
/// An empty input produces the zero report; that is the defined base case
/// for a user who has not taken any quiz yet.
pub fn performance_report(attempts: &[AttemptRecord]) -> PerformanceReport {
    if attempts.is_empty() {
        return PerformanceReport::default();
    }

    let total_quizzes = attempts.len();
    let total_score: i64 = attempts.iter().map(|a| a.total_score).sum();
    let overall_accuracy = round2(
        attempts.iter().map(|a| a.accuracy_percentage).sum::<f64>() / total_quizzes as f64,
    );

    let mut by_time: Vec<&AttemptRecord> = attempts.iter().collect();
    by_time.sort_by_key(|a| a.attempted_at);

    let accuracy_trend = by_time
        .iter()
        .map(|a| TrendPoint {
            date: a.attempted_at.format("%Y-%m-%d").to_string(),
            accuracy: round2(a.accuracy_percentage),
            score: a.total_score,
        })
        .collect();

    let subject_performance = group_by_name(attempts, |a| &a.subject_name)
        .into_iter()
        .map(|g| SubjectPerformance {
            subject: g.name,
            average_accuracy: g.average_accuracy,
            total_score: g.total_score,
            attempts: g.attempts,
        })
        .collect();

    let chapter_performance: Vec<ChapterPerformance> =
        group_by_name(attempts, |a| &a.chapter_name)
            .into_iter()
            .map(|g| ChapterPerformance {
                chapter: g.name,
                average_accuracy: g.average_accuracy,
                total_score: g.total_score,
                attempts: g.attempts,
            })
            .collect();

    // Both lists keep the descending sort of chapter_performance; the
    // weaknesses list is "chapters below the bar", not "worst first".
    let strengths = chapter_performance
        .iter()
        .filter(|c| c.average_accuracy >= STRENGTH_THRESHOLD)
        .take(3)
        .cloned()
        .collect();
    let weaknesses = chapter_performance
        .iter()
        .filter(|c| c.average_accuracy < WEAKNESS_THRESHOLD)
        .take(3)
        .cloned()
        .collect();

    let recent_attempts = by_time
        .iter()
        .rev()
        .take(10)
        .map(|a| RecentAttempt {
            quiz_id: a.quiz_id,
            subject: a.subject_name.clone(),
            chapter: a.chapter_name.clone(),
            date: a.attempted_at.format("%Y-%m-%d %H:%M").to_string(),
            score: a.total_score,
            accuracy: round2(a.accuracy_percentage),
        })
        .collect();

    PerformanceReport {
        overall_accuracy,
        total_quizzes,
        total_score,
        accuracy_trend,
        subject_performance,
        chapter_performance,
        strengths,
        weaknesses,
        recent_attempts,
    }
}

/// Builds the admin dashboard report from entity counts and the full
/// attempt history of the platform.
pub fn platform_report(totals: PlatformTotals, attempts: &[AttemptRecord]) -> PlatformReport {
    let average_accuracy = if attempts.is_empty() {
        0.0
    } else {
        round2(attempts.iter().map(|a| a.accuracy_percentage).sum::<f64>() / attempts.len() as f64)
    };

    // Rank subjects by how often their quizzes were attempted. Grouping is
    // by subject name, the same convention the per-user report uses.
    let mut popular_subjects: Vec<PopularSubject> = group_by_name(attempts, |a| &a.subject_name)
        .into_iter()
        .map(|g| PopularSubject {
            name: g.name,
            attempts: g.attempts,
        })
        .collect();
    popular_subjects.sort_by(|a, b| b.attempts.cmp(&a.attempts));
    popular_subjects.truncate(5);

    let mut by_time: Vec<&AttemptRecord> = attempts.iter().collect();
    by_time.sort_by_key(|a| std::cmp::Reverse(a.attempted_at));

    let recent_activity = by_time
        .iter()
        .take(10)
        .map(|a| ActivityEntry {
            user: a.user_full_name.clone(),
            quiz: format!("{} - {}", a.subject_name, a.chapter_name),
            score: a.total_score,
            accuracy: round2(a.accuracy_percentage),
            date: a.attempted_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    PlatformReport {
        total_users: totals.users,
        total_subjects: totals.subjects,
        total_chapters: totals.chapters,
        total_quizzes: totals.quizzes,
        total_questions: totals.questions,
        total_attempts: totals.attempts,
        average_accuracy,
        popular_subjects,
        recent_activity,
    }
}

struct NamedGroup {
    name: String,
    average_accuracy: f64,
    total_score: i64,
    attempts: usize,
}

/// Groups attempts by a display name and computes the per-group mean
/// accuracy (rounded), summed score, and attempt count, sorted descending
/// by mean accuracy. Distinct entities sharing a name collapse into one
/// group; that is the documented grouping convention of the reports.
/// First-seen order breaks ties (the sort is stable).
fn group_by_name<F>(attempts: &[AttemptRecord], name_of: F) -> Vec<NamedGroup>
where
    F: Fn(&AttemptRecord) -> &String,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(String, f64, i64, usize)> = Vec::new();

    for attempt in attempts {
        let name = name_of(attempt);
        let slot = *index.entry(name.as_str()).or_insert_with(|| {
            sums.push((name.clone(), 0.0, 0, 0));
            sums.len() - 1
        });
        let entry = &mut sums[slot];
        entry.1 += attempt.accuracy_percentage;
        entry.2 += attempt.total_score;
        entry.3 += 1;
    }

    let mut groups: Vec<NamedGroup> = sums
        .into_iter()
        .map(|(name, accuracy_sum, total_score, attempts)| NamedGroup {
            name,
            average_accuracy: round2(accuracy_sum / attempts as f64),
            total_score,
            attempts,
        })
        .collect();

    groups.sort_by(|a, b| {
        b.average_accuracy
            .partial_cmp(&a.average_accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    groups
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_away() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(80.0), 80.0);
    }

    #[test]
    fn zero_report_for_no_attempts() {
        let report = performance_report(&[]);
        assert_eq!(report.total_quizzes, 0);
        assert_eq!(report.total_score, 0);
        assert_eq!(report.overall_accuracy, 0.0);
        assert!(report.accuracy_trend.is_empty());
        assert!(report.recent_attempts.is_empty());
    }
}
