// tests/analytics_tests.rs

use chrono::{DateTime, TimeZone, Utc};

use quizmaster::core::analytics::{
    AttemptRecord, PlatformTotals, performance_report, platform_report,
};

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 30, 0).unwrap()
}

fn attempt(
    quiz_id: i64,
    subject: &str,
    chapter: &str,
    accuracy: f64,
    score: i64,
    at: DateTime<Utc>,
) -> AttemptRecord {
    AttemptRecord {
        quiz_id,
        user_id: 1,
        attempted_at: at,
        total_score: score,
        accuracy_percentage: accuracy,
        subject_name: subject.to_string(),
        chapter_name: chapter.to_string(),
        user_full_name: "Ada Lovelace".to_string(),
    }
}

#[test]
fn empty_history_gives_zero_report() {
    let report = performance_report(&[]);

    assert_eq!(report.overall_accuracy, 0.0);
    assert_eq!(report.total_quizzes, 0);
    assert_eq!(report.total_score, 0);
    assert!(report.accuracy_trend.is_empty());
    assert!(report.subject_performance.is_empty());
    assert!(report.chapter_performance.is_empty());
    assert!(report.strengths.is_empty());
    assert!(report.weaknesses.is_empty());
    assert!(report.recent_attempts.is_empty());
}

#[test]
fn overall_metrics_are_mean_and_sum() {
    let attempts = vec![
        attempt(1, "Maths", "Algebra", 80.0, 8, ts(1, 10)),
        attempt(2, "Maths", "Algebra", 90.0, 9, ts(2, 10)),
        attempt(3, "Maths", "Algebra", 70.0, 7, ts(3, 10)),
    ];

    let report = performance_report(&attempts);
    assert_eq!(report.overall_accuracy, 80.0);
    assert_eq!(report.total_quizzes, 3);
    assert_eq!(report.total_score, 24);
}

#[test]
fn trend_is_ascending_by_timestamp_at_day_granularity() {
    // Deliberately unsorted input.
    let attempts = vec![
        attempt(1, "Maths", "Algebra", 50.0, 5, ts(9, 8)),
        attempt(2, "Maths", "Algebra", 66.666, 6, ts(2, 8)),
        attempt(3, "Maths", "Algebra", 70.0, 7, ts(5, 8)),
    ];

    let report = performance_report(&attempts);
    let dates: Vec<&str> = report.accuracy_trend.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, ["2025-03-02", "2025-03-05", "2025-03-09"]);
    assert_eq!(report.accuracy_trend[0].accuracy, 66.67);
    assert_eq!(report.accuracy_trend[0].score, 6);
}

#[test]
fn groups_sort_descending_by_mean_accuracy() {
    let attempts = vec![
        attempt(1, "History", "Rome", 40.0, 4, ts(1, 9)),
        attempt(2, "Maths", "Algebra", 90.0, 9, ts(2, 9)),
        attempt(3, "Maths", "Algebra", 80.0, 8, ts(3, 9)),
        attempt(4, "Biology", "Cells", 70.0, 7, ts(4, 9)),
    ];

    let report = performance_report(&attempts);

    let subjects: Vec<&str> = report
        .subject_performance
        .iter()
        .map(|s| s.subject.as_str())
        .collect();
    assert_eq!(subjects, ["Maths", "Biology", "History"]);

    let maths = &report.subject_performance[0];
    assert_eq!(maths.average_accuracy, 85.0);
    assert_eq!(maths.total_score, 17);
    assert_eq!(maths.attempts, 2);
}

#[test]
fn strengths_and_weaknesses_split_at_the_thresholds() {
    let attempts = vec![
        attempt(1, "Maths", "Algebra", 85.0, 8, ts(1, 9)),
        attempt(2, "Maths", "Algebra", 85.0, 9, ts(2, 9)),
        attempt(3, "Maths", "Geometry", 50.0, 5, ts(3, 9)),
        // 70 sits between the thresholds: neither strength nor weakness.
        attempt(4, "Maths", "Calculus", 70.0, 7, ts(4, 9)),
    ];

    let report = performance_report(&attempts);

    assert_eq!(report.strengths.len(), 1);
    assert_eq!(report.strengths[0].chapter, "Algebra");

    assert_eq!(report.weaknesses.len(), 1);
    assert_eq!(report.weaknesses[0].chapter, "Geometry");
}

#[test]
fn weaknesses_keep_descending_order() {
    let attempts = vec![
        attempt(1, "Maths", "Algebra", 30.0, 3, ts(1, 9)),
        attempt(2, "Maths", "Geometry", 50.0, 5, ts(2, 9)),
        attempt(3, "Maths", "Calculus", 40.0, 4, ts(3, 9)),
    ];

    let report = performance_report(&attempts);
    let chapters: Vec<&str> = report
        .weaknesses
        .iter()
        .map(|w| w.chapter.as_str())
        .collect();
    assert_eq!(chapters, ["Geometry", "Calculus", "Algebra"]);
}

#[test]
fn strengths_and_weaknesses_cap_at_three() {
    let mut attempts = Vec::new();
    for (i, name) in ["A", "B", "C", "D", "E"].into_iter().enumerate() {
        attempts.push(attempt(i as i64, "S", name, 90.0, 9, ts(1 + i as u32, 9)));
        attempts.push(attempt(
            10 + i as i64,
            "S",
            &format!("weak-{name}"),
            40.0,
            4,
            ts(10 + i as u32, 9),
        ));
    }

    let report = performance_report(&attempts);
    assert_eq!(report.strengths.len(), 3);
    assert_eq!(report.weaknesses.len(), 3);
}

#[test]
fn recent_attempts_cap_at_ten_newest_first() {
    let attempts: Vec<AttemptRecord> = (1..=14)
        .map(|day| attempt(day as i64, "Maths", "Algebra", 75.0, 7, ts(day, 12)))
        .collect();

    let report = performance_report(&attempts);
    assert_eq!(report.recent_attempts.len(), 10);

    // Newest attempt (day 14) first, then strictly descending.
    assert_eq!(report.recent_attempts[0].quiz_id, 14);
    assert_eq!(report.recent_attempts[9].quiz_id, 5);
    for pair in report.recent_attempts.windows(2) {
        assert!(pair[0].date > pair[1].date);
    }
    // Minute granularity on the recent list.
    assert_eq!(report.recent_attempts[0].date, "2025-03-14 12:30");
}

#[test]
fn subjects_sharing_a_name_merge_into_one_group() {
    // Two distinct subject entities named "Science" (different quizzes,
    // different chapters) collapse into one group. Accepted simplification
    // of the name-keyed grouping.
    let attempts = vec![
        attempt(1, "Science", "Physics", 80.0, 8, ts(1, 9)),
        attempt(2, "Science", "Chemistry", 60.0, 6, ts(2, 9)),
    ];

    let report = performance_report(&attempts);
    assert_eq!(report.subject_performance.len(), 1);
    assert_eq!(report.subject_performance[0].subject, "Science");
    assert_eq!(report.subject_performance[0].attempts, 2);
    assert_eq!(report.subject_performance[0].average_accuracy, 70.0);
    assert_eq!(report.chapter_performance.len(), 2);
}

#[test]
fn platform_report_with_no_attempts_has_zero_accuracy() {
    let totals = PlatformTotals {
        users: 3,
        subjects: 2,
        chapters: 4,
        quizzes: 6,
        questions: 40,
        attempts: 0,
    };

    let report = platform_report(totals, &[]);
    assert_eq!(report.total_users, 3);
    assert_eq!(report.total_questions, 40);
    assert_eq!(report.average_accuracy, 0.0);
    assert!(report.popular_subjects.is_empty());
    assert!(report.recent_activity.is_empty());
}

#[test]
fn popular_subjects_rank_by_attempt_count_top_five() {
    let mut attempts = Vec::new();
    for (subject, n) in [("A", 2), ("B", 5), ("C", 1), ("D", 4), ("E", 3), ("F", 6)] {
        for i in 0..n {
            attempts.push(attempt(
                i as i64,
                subject,
                "Ch",
                50.0,
                5,
                ts(1 + i as u32, 9),
            ));
        }
    }

    let totals = PlatformTotals::default();
    let report = platform_report(totals, &attempts);

    let ranked: Vec<(&str, usize)> = report
        .popular_subjects
        .iter()
        .map(|p| (p.name.as_str(), p.attempts))
        .collect();
    assert_eq!(ranked, [("F", 6), ("B", 5), ("D", 4), ("E", 3), ("A", 2)]);
}

#[test]
fn recent_activity_labels_quizzes_with_subject_and_chapter() {
    let attempts = vec![attempt(1, "Maths", "Algebra", 91.234, 9, ts(8, 14))];

    let report = platform_report(PlatformTotals::default(), &attempts);
    assert_eq!(report.recent_activity.len(), 1);

    let entry = &report.recent_activity[0];
    assert_eq!(entry.user, "Ada Lovelace");
    assert_eq!(entry.quiz, "Maths - Algebra");
    assert_eq!(entry.accuracy, 91.23);
    assert_eq!(entry.date, "2025-03-08 14:30");
}
