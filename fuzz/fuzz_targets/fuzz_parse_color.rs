#![no_main]

use libfuzzer_sys::fuzz_target;
use tint_color::{Rgb, parse_color};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(color) = parse_color(input) else {
        return;
    };

    // Both output forms must parse back to the same color.
    assert_eq!(parse_color(&color.to_hex()), Ok(color), "hex form did not round-trip");
    assert_eq!(
        Rgb::from_css_rgb(&color.to_css_rgb()),
        Ok(color),
        "rgb() form did not round-trip"
    );
});
