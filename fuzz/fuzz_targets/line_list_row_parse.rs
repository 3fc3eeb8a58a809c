//! Fuzz target for single-row line-list parsing.
//!
//! Feeds arbitrary UTF-8 lines to the row parser, checking for panics,
//! crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use linesense::catalog::io_line_list::fuzz_parse_row;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_row(line);
});
