//! Property tests for the grading engine.

use lexigrade_core::report::score_percent;
use lexigrade_core::{
    build_report, classify, levenshtein, normalize, tolerance_threshold, AnswerPair,
    Classification,
};
use proptest::prelude::*;

// --- STRATEGIES ---

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Zа-яА-Я' ]{0,12}"
}

fn any_text() -> impl Strategy<Value = String> {
    "\\PC{0,16}"
}

prop_compose! {
    fn arb_pair()(expected in word(), actual in word()) -> AnswerPair {
        AnswerPair::new(expected, actual)
    }
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(s in any_text()) {
        prop_assert_eq!(levenshtein(&s, &s), 0);
    }

    #[test]
    fn distance_is_symmetric(a in any_text(), b in any_text()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn triangle_inequality(a in word(), b in word(), c in word()) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn distance_bounded_by_longer_input(a in any_text(), b in any_text()) {
        let longest = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein(&a, &b) <= longest);
    }

    #[test]
    fn normalize_is_idempotent(s in any_text()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn classification_follows_policy(expected in word(), actual in word()) {
        let r = classify(&expected, &actual);
        let ne = normalize(&expected);
        let na = normalize(&actual);
        let credited_by_distance = levenshtein(&ne, &na) <= tolerance_threshold(&ne);

        let want = if na.is_empty() {
            Classification::Incorrect
        } else if ne == na {
            Classification::Exact
        } else if credited_by_distance {
            Classification::Tolerant
        } else {
            Classification::Incorrect
        };
        prop_assert_eq!(r.classification, want);
        prop_assert_eq!(&r.normalized_expected, &ne);
        prop_assert_eq!(&r.normalized_actual, &na);
    }

    #[test]
    fn classify_is_deterministic(expected in word(), actual in word()) {
        prop_assert_eq!(classify(&expected, &actual), classify(&expected, &actual));
    }

    #[test]
    fn report_counts_partition_total(pairs in proptest::collection::vec(arb_pair(), 0..30)) {
        let report = build_report(&pairs);
        prop_assert_eq!(report.total, pairs.len());
        prop_assert_eq!(
            report.exact_count + report.tolerant_count + report.incorrect_count,
            report.total
        );
        prop_assert!(report.credited_count <= report.total);
        prop_assert_eq!(report.details.len(), pairs.len());
        for (pair, detail) in pairs.iter().zip(&report.details) {
            prop_assert_eq!(&pair.expected, &detail.expected);
            prop_assert_eq!(&pair.actual, &detail.actual);
        }
        if report.total == 0 {
            prop_assert_eq!(report.score_percent, None);
        } else {
            let score = report.score_percent.unwrap();
            prop_assert!(score <= 100);
        }
    }

    #[test]
    fn score_matches_float_rounding(total in 1usize..500, credited_frac in 0.0f64..=1.0) {
        let credited = (total as f64 * credited_frac).floor() as usize;
        let exact = credited as f64 * 100.0 / total as f64;
        let got = score_percent(credited, total).unwrap() as f64;
        prop_assert!((got - exact).abs() <= 0.5);
        // Half-way values round up.
        if (exact.fract() - 0.5).abs() < f64::EPSILON {
            prop_assert_eq!(got, exact.ceil());
        }
    }
}
