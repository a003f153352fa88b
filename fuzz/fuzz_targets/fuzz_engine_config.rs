//! Fuzz target for engine configuration parsing (JSON and TOML).

#![no_main]

use libfuzzer_sys::fuzz_target;
use ot_config::{validate_engine_config, EngineConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = EngineConfig::from_json_str(text) {
        let _ = validate_engine_config(&config);
    }
    if let Ok(config) = EngineConfig::from_toml_str(text) {
        let _ = validate_engine_config(&config);
    }
});
