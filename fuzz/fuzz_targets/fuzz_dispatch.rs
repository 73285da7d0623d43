#![no_main]

use libfuzzer_sys::fuzz_target;
use restlint::Validator;
use restlint::rpc::Dispatcher;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let dispatcher = Dispatcher::new(Validator::builtin());

    let response = dispatcher.handle_json(&s);
    assert!(response.result.is_some() != response.error.is_some());
    let _ = serde_json::to_string(&response);
});
