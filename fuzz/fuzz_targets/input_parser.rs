#![no_main]

use abstats::comparison::{compare, AnalysisConfig};
use abstats::input::parse_input;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must not panic, and anything that parses must compare
        if let Ok(parsed) = parse_input(input) {
            let _ = compare(&parsed.groups, "us", &AnalysisConfig::default());
        }
    }
});
