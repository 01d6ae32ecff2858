//! Property tests for scoring and incentives

use kudos_core::error::KudosError;
use kudos_core::incentive::{parse_decimal_amount, MAX_INCENTIVE, MIN_INCENTIVE};
use kudos_core::{calculate_incentive, HelpfulnessScorer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn helpfulness_stays_in_range(text in "\\PC{0,400}") {
        let report = HelpfulnessScorer::default().score(&text).unwrap();
        prop_assert!((0.0..=100.0).contains(&report.helpfulness));
        prop_assert!((0.0..=100.0).contains(&report.subscores.descriptiveness));
        prop_assert_eq!(report.features.word_count, text.split_whitespace().count());
    }

    #[test]
    fn keyword_anywhere_makes_review_actionable(
        prefix in "[a-z ]{0,40}",
        suffix in "[a-z ]{0,40}",
        keyword in prop::sample::select(vec!["BUG", "Fix", "shipping", "hard to use"]),
    ) {
        let text = format!("{} {} {}", prefix, keyword, suffix);
        let report = HelpfulnessScorer::default().score(&text).unwrap();
        prop_assert_eq!(report.subscores.actionability, 100.0);
    }

    #[test]
    fn incentive_is_bounded_and_monotonic(a in 1.0f64..=100.0, b in 1.0f64..=100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_pay = calculate_incentive(low).unwrap().amount();
        let high_pay = calculate_incentive(high).unwrap().amount();

        prop_assert!(low_pay <= high_pay);
        prop_assert!(low_pay >= MIN_INCENTIVE && high_pay <= MAX_INCENTIVE);
    }

    #[test]
    fn incentive_text_is_plain_decimal(score in 1.0f64..=100.0) {
        let text = calculate_incentive(score).unwrap().to_decimal_string();
        prop_assert!(!text.contains('e') && !text.contains('E'));
        prop_assert_eq!(parse_decimal_amount(&text).unwrap(), text.parse::<f64>().unwrap());
    }

    #[test]
    fn scores_outside_range_are_rejected(score in prop_oneof![-1e6f64..1.0, 100.000001f64..1e6]) {
        prop_assert!(matches!(calculate_incentive(score), Err(KudosError::InvalidScore(_))));
    }
}
