// src/prompt.rs
//
// Startup head count. Input is re-requested until it is a plain
// non-negative integer.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitialCountError {
    #[error("no number entered")]
    Empty,
    #[error("'{0}' is not a non-negative whole number")]
    NotDigits(String),
    #[error("'{0}' is too large")]
    OutOfRange(String),
}

/// Accept only ASCII digits (the trailing line terminator is ignored).
/// Signs, spaces and decimal points are rejected.
pub fn parse_initial_count(input: &str) -> Result<u32, InitialCountError> {
    let trimmed = input.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        return Err(InitialCountError::Empty);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(InitialCountError::NotDigits(trimmed.to_string()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| InitialCountError::OutOfRange(trimmed.to_string()))
}

/// Prompt on `output` and read lines from `input` until one parses.
/// Running out of input is an error.
pub fn read_initial_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u32> {
    loop {
        write!(output, "- Enter current number of people in the room: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("reading initial count")?;
        if read == 0 {
            bail!("input closed before a valid count was entered");
        }

        match parse_initial_count(&line) {
            Ok(count) => return Ok(count),
            Err(e) => {
                warn!("Rejected initial count: {}", e);
                writeln!(output, "- Invalid input, try again.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_accepts_digits() {
        assert_eq!(parse_initial_count("0"), Ok(0));
        assert_eq!(parse_initial_count("12\n"), Ok(12));
        assert_eq!(parse_initial_count("007\r\n"), Ok(7));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        assert_eq!(parse_initial_count(""), Err(InitialCountError::Empty));
        assert_eq!(parse_initial_count("\n"), Err(InitialCountError::Empty));
        for bad in ["-1", "+3", " 4", "4 ", "2.0", "abc", "1e3"] {
            assert!(
                matches!(parse_initial_count(bad), Err(InitialCountError::NotDigits(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(matches!(
            parse_initial_count("99999999999"),
            Err(InitialCountError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut input = Cursor::new("lots\n-2\n\n5\n");
        let mut output = Vec::new();
        let count = read_initial_count(&mut input, &mut output).unwrap();
        assert_eq!(count, 5);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input").count(), 3);
        assert_eq!(text.matches("Enter current number").count(), 4);
    }

    #[test]
    fn test_eof_is_error() {
        let mut input = Cursor::new("x\n");
        let mut output = Vec::new();
        assert!(read_initial_count(&mut input, &mut output).is_err());
    }
}
