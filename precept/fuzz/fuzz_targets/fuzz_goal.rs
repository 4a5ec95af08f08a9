#![no_main]

use libfuzzer_sys::fuzz_target;
use precept::{ResourceLimits, Session};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut limits = ResourceLimits::default();
        limits.max_inference_steps = 10_000;
        let mut session = Session::new(limits);

        if session.consult("fruit(apple).\nfruit(banana).\n").is_ok() {
            let _ = session.resolve(s);
        }
    }
});
