#![no_main]

use libfuzzer_sys::fuzz_target;
use precept::{ResourceLimits, Session};

fuzz_target!(|depth: u8| {
    let mut session = Session::new(ResourceLimits::default());

    let depth = (depth as usize % 100) + 1;

    let mut term = String::from("x");
    for _ in 0..depth {
        term = format!("w({})", term);
    }

    let code = format!("nested({}).", term);

    let _ = session.consult(&code);
});
