#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic, and the entry points must agree.
        let valid = shelterwish::core::validate_nip(s);
        let parsed = shelterwish::core::Nip::parse(s);
        assert_eq!(valid, parsed.is_ok());
        if let Ok(nip) = parsed {
            assert_eq!(nip.to_string(), shelterwish::core::format_nip(s));
        }
    }
});
