#![no_main]

use libfuzzer_sys::fuzz_target;
use precept::{ResourceLimits, Session};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut session = Session::new(ResourceLimits::default());

        let _ = session.consult(s);
    }
});
