//! Fuzz target for terminal input decoding.
//!
//! Arbitrary bytes must parse and dispatch to commands without panicking,
//! and every successful parse must consume at least one byte.

#![no_main]

use dynmenu::input::{InputParser, ParseError, dispatch};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parser = InputParser::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        match parser.parse(remaining) {
            Ok((event, consumed)) => {
                assert!(consumed > 0 && consumed <= remaining.len());
                let _ = dispatch(&event);
                remaining = &remaining[consumed..];
            }
            Err(ParseError::Empty | ParseError::Incomplete) => break,
            Err(ParseError::UnrecognizedSequence(skip)) => {
                remaining = &remaining[skip.len().clamp(1, remaining.len())..];
            }
            Err(ParseError::InvalidUtf8) => remaining = &remaining[1..],
        }
    }

    // The buffered path must agree on termination too
    let mut buf = data.to_vec();
    let mut guard = 0;
    while parser.next_event(&mut buf).is_some() {
        guard += 1;
        assert!(guard <= data.len(), "next_event did not drain its buffer");
    }
});
