#![no_main]

use libfuzzer_sys::fuzz_target;
use restlint::Validator;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let spec = match restlint::parse_spec(&s) {
        Ok(spec) => spec,
        Err(_) => return,
    };

    // Any parsed tree, however odd, must produce one result per rule.
    let validator = Validator::builtin();
    let report = validator.validate_spec(&spec, &[]);
    assert_eq!(report.results.len(), validator.rule_names().len());
});
