//! Fuzz target for growth and status classification on raw totals.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ot_core::{classify, Growth, OutbreakStatus, StatusThresholds};
use ot_math::percent_change;

#[derive(Debug, Arbitrary)]
struct Input {
    current: u64,
    previous: u64,
    winning_floor: u64,
}

fuzz_target!(|input: Input| {
    if let Some(rate) = percent_change(input.current, input.previous) {
        assert_eq!(rate == 0, input.current == input.previous);
        assert!(rate >= -100);
    }

    let thresholds = StatusThresholds {
        winning_floor: input.winning_floor,
        ..StatusThresholds::default()
    };
    let growth = Growth::between(input.current, Some(input.previous));
    let status = classify(input.current, growth, input.previous, &thresholds);
    if input.current == 0 {
        assert!(matches!(status, OutbreakStatus::None | OutbreakStatus::Won));
    }
});
