#![no_main]

use libfuzzer_sys::fuzz_target;
use restlint::serialize::to_yaml;
use restlint::{Validator, analyze_path, synthesize_spec};

fuzz_target!(|data: &[u8]| {
    let path = String::from_utf8_lossy(data);
    let validator = Validator::builtin();

    let direct = validator.validate_url_path(&path);

    let yaml = match to_yaml(&synthesize_spec(&analyze_path(&path))) {
        Ok(y) => y,
        Err(_) => return,
    };

    // Re-parsing the emitted document must give the same verdicts.
    match validator.validate(&yaml, &[]) {
        Ok(report) if report.results == direct.results => {}
        other => panic!(
            "Synthesized spec did not round-trip.\n\
             Path (lossy): {:?}\n\
             Serialized YAML:\n{}\n\
             Result: {:?}",
            path.get(..200).unwrap_or(&path),
            yaml.get(..500).unwrap_or(&yaml),
            other,
        ),
    }
});
