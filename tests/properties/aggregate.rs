//! Property tests for merging per-file outcomes.

use std::path::PathBuf;

use proptest::prelude::*;

use apksign::merge;
use apksign::{Failure, FailureKind, Outcome};

fn outcome() -> impl Strategy<Value = Outcome<u32>> {
    prop_oneof![
        Just(Outcome::NotStarted),
        Just(Outcome::InProgress),
        any::<u32>().prop_map(Outcome::Succeeded),
        "[a-z ]{1,20}".prop_map(|m| Outcome::Failed(Failure::new(
            FailureKind::ProcessExecutionFailed,
            m
        ))),
    ]
}

fn files_for(count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| PathBuf::from(format!("/in/app{}.apk", i)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any failed file makes the batch failed, and every failed
    /// file appears in the message in input order.
    #[test]
    fn property_any_failure_wins(outcomes in proptest::collection::vec(outcome(), 1..12)) {
        let files = files_for(outcomes.len());
        let merged = merge(&outcomes, &files).unwrap();

        let failed: Vec<usize> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_failed())
            .map(|(i, _)| i)
            .collect();

        if failed.is_empty() {
            prop_assert!(!merged.is_failed());
        } else {
            let message = merged.failure().unwrap().message().to_string();
            let lines: Vec<&str> = message.lines().collect();
            prop_assert_eq!(lines.len(), failed.len());
            for (line, index) in lines.iter().zip(&failed) {
                let prefix = format!("{}: ", files[*index].display());
                prop_assert!(line.starts_with(&prefix));
            }
        }
    }

    /// PROPERTY: a batch is succeeded only when every file succeeded, and
    /// then it carries the first file's value.
    #[test]
    fn property_success_requires_all(outcomes in proptest::collection::vec(outcome(), 1..12)) {
        let files = files_for(outcomes.len());
        let merged = merge(&outcomes, &files).unwrap();

        let all_succeeded = outcomes.iter().all(Outcome::is_succeeded);
        prop_assert_eq!(merged.is_succeeded(), all_succeeded);
        if all_succeeded {
            prop_assert_eq!(merged.value(), outcomes[0].value());
        }
    }

    /// PROPERTY: without failures, unfinished work wins over not-started work.
    #[test]
    fn property_in_progress_before_not_started(
        outcomes in proptest::collection::vec(
            prop_oneof![
                Just(Outcome::<u32>::NotStarted),
                Just(Outcome::<u32>::InProgress),
                any::<u32>().prop_map(Outcome::Succeeded),
            ],
            1..12,
        )
    ) {
        let files = files_for(outcomes.len());
        let merged = merge(&outcomes, &files).unwrap();

        let expected = if outcomes.iter().any(|o| matches!(o, Outcome::InProgress)) {
            "in_progress"
        } else if outcomes.iter().any(|o| matches!(o, Outcome::NotStarted)) {
            "not_started"
        } else {
            "succeeded"
        };
        prop_assert_eq!(merged.state_name(), expected);
    }

    /// PROPERTY: mismatched lengths are always rejected.
    #[test]
    fn property_length_mismatch_rejected(
        outcomes in proptest::collection::vec(outcome(), 0..8),
        extra in 1usize..4,
    ) {
        let files = files_for(outcomes.len() + extra);
        prop_assert!(merge(&outcomes, &files).is_err());
    }
}
