//! Fuzz target for input document parsing.
//!
//! Arbitrary bytes must either be rejected with an error or produce
//! series the pipeline can classify without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ot_config::EngineConfig;
use ot_core::input::parse_input;
use ot_core::run_pipeline;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(inputs) = parse_input(text) {
        let output = run_pipeline(&inputs, &EngineConfig::default(), None, None);
        assert_eq!(output.status_counts.total(), output.countries.len());
    }
});
