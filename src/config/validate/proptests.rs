//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use crate::sweep::SweepConfig;
use crate::train::TrainConfig;
use proptest::prelude::*;

fn arb_widths() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::btree_set(1usize..1000, 1..20).prop_map(|set| set.into_iter().collect())
}

fn arb_valid_spec() -> impl Strategy<Value = ExperimentSpec> {
    (
        arb_widths(),
        1usize..256,   // batch_size
        1e-6f32..1.0,  // lr
        0.0f32..0.99,  // momentum
        1usize..2000,  // epochs
        any::<u64>(),  // seed
    )
        .prop_flat_map(|(widths, batch_size, lr, momentum, epochs, seed)| {
            let len = widths.len();
            (0..len).prop_map(move |start_index| ExperimentSpec {
                training: TrainConfig {
                    batch_size,
                    lr,
                    momentum,
                    epochs,
                    ..Default::default()
                },
                sweep: SweepConfig {
                    widths: widths.clone(),
                    start_index,
                    seed,
                },
                ..Default::default()
            })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.batch_size = 0;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_non_positive_lr_fails(
        spec in arb_valid_spec(),
        neg_lr in -1.0f32..=0.0
    ) {
        let mut spec = spec;
        spec.training.lr = neg_lr;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_lr_above_one_fails(
        spec in arb_valid_spec(),
        high_lr in 1.01f32..10.0
    ) {
        let mut spec = spec;
        spec.training.lr = high_lr;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_swapped_widths_fail(spec in arb_valid_spec()) {
        let mut spec = spec;
        prop_assume!(spec.sweep.widths.len() >= 2);
        spec.sweep.widths.swap(0, 1);
        let widths_not_ascending = matches!(
            validate_spec(&spec),
            Err(ValidationError::WidthsNotAscending { .. })
        );
        prop_assert!(widths_not_ascending);
    }

    #[test]
    fn prop_start_index_at_len_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.sweep.start_index = spec.sweep.widths.len();
        let is_out_of_range = matches!(
            validate_spec(&spec),
            Err(ValidationError::StartIndexOutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_zero_epochs_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.epochs = 0;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidEpochs(0))
        ));
    }
}
