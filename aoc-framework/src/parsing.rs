//! Utility functions and errors for parsing input.
//!
//! Puzzle input is line oriented. Most inputs are either a single block of lines, or blocks of
//! lines delimited by blank lines. [`parse_input_lines`] covers the former, while
//! [`InputScanner`] and [`split_sections`] cover the latter.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    fn new(line_index: usize, source: impl Into<DynamicError>) -> Self {
        Self {
            line_index,
            source: source.into(),
        }
    }

    /// The zero-based index of the line that failed to parse.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Check if a line has no content besides whitespace.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parse every non-blank line of input with a closure receiving the zero-based line index and the
/// line.
///
/// Blank lines are skipped, but line indexes still count them. Errors from the closure are mapped
/// to [`InvalidLine`] to report where parsing failed.
///
/// ```
/// # use aoc_framework::parsing::{parse_input_lines, parse_with_context};
/// let input = "3\n1\n\n4\n\n";
/// let numbers = parse_input_lines(input, |_, line| parse_with_context::<u8>(line))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(numbers, vec![3, 1, 4]);
/// ```
pub fn parse_input_lines<'a, T, E, F>(
    input: &'a str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(usize, &'a str) -> Result<T, E>,
    E: Into<DynamicError>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .map(move |(index, line)| {
            parser(index, line).map_err(|source| InvalidLine::new(index, source))
        })
}

/// Parse non-blank lines with a closure, mapping any line's dynamic error with an [`InvalidLine`].
///
/// # Arguments
/// - `input` - The input string to parse.
/// - `offset` - An offset to add to the line index for [`InvalidLine`] errors. Useful when parsing
///   a later slice of input and errors should have any reported line index reflect the offset line
///   position from the original input. Set to `0` if no offset is needed.
/// - `parser` - A closure that takes a line string and returns a result.
///
/// # Errors
///
/// If parsing a line fails, an [`InvalidLine`] error is returned, sourcing the original error.
pub fn parse_lines_with_offset<'a, T, E, F>(
    input: &'a str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(&'a str) -> Result<T, E>,
    E: Into<DynamicError>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .map(move |(index, line)| {
            parser(line).map_err(|source| InvalidLine::new(index.saturating_add(offset), source))
        })
}

/// A cursor over input lines, for input formatted as blocks of lines delimited by blank lines.
///
/// Line indexes passed to parsing closures are absolute to the whole input.
#[derive(Debug)]
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Skip over blank lines.
    ///
    /// Returns `Some` if a non-blank line follows, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<()> {
        while self.lines.next_if(|(_, line)| is_blank(line)).is_some() {}
        self.lines.peek().map(|_| ())
    }

    /// Check if only blank lines remain, skipping over them.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_empty().is_none()
    }

    /// Parse the next line if it continues the current block.
    ///
    /// Returns `None` without consuming anything when the next line is blank, or when the input is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] sourcing the closure's error.
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &'a str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let Some((index, line)) = self.lines.next_if(|(_, line)| !is_blank(line)) else {
            return Ok(None);
        };
        parser(index, line)
            .map(Some)
            .map_err(|source| InvalidLine::new(index, source))
    }

    /// Skip any blank lines, then parse the next line.
    ///
    /// Returns `None` if the input is exhausted.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] sourcing the closure's error.
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &'a str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        self.skip_empty();
        self.next_in_sequence(parser)
    }

    /// Parse every line of the current block, stopping at a blank line or the end of input.
    ///
    /// The blank line ending the block is not consumed.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] sourcing the first error from the closure.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        F: FnMut(usize, &'a str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}

/// The input did not have two sections delimited by a blank line.
#[derive(Error, Debug)]
#[error("expected two sections of input separated by a blank line")]
pub struct MissingSection;

/// Split input into two sections at the first blank line following content.
///
/// Leading blank lines are ignored, and every non-blank line after the separator belongs to the
/// second section. Surrounding blank lines are trimmed from both sections.
///
/// ```
/// # use aoc_framework::parsing::split_sections;
/// let (first, second) = split_sections("a\nb\n\nc\n\nd\n\n\n").unwrap();
/// assert_eq!(first, "a\nb");
/// assert_eq!(second, "c\n\nd");
/// ```
///
/// # Errors
///
/// [`MissingSection`] if either section would be empty.
pub fn split_sections(input: &str) -> Result<(&str, &str), MissingSection> {
    fn trim_newlines(section: &str) -> &str {
        section.trim_matches(['\n', '\r'])
    }

    let mut offset = 0;
    let mut first_start = None;
    for line in input.split_inclusive('\n') {
        let line_end = offset + line.len();
        if is_blank(line) {
            if let Some(start) = first_start {
                let first = trim_newlines(&input[start..offset]);
                let second = trim_newlines(&input[line_end..]);
                if second.lines().all(is_blank) {
                    return Err(MissingSection);
                }
                return Ok((first, second));
            }
        } else if first_start.is_none() {
            first_start = Some(offset);
        }
        offset = line_end;
    }
    Err(MissingSection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynamicResult;

    #[test]
    fn parse_with_context_reports_string() {
        let Err(error) = parse_with_context::<u32>("12a") else {
            panic!("expected a parse error");
        };
        assert_eq!(error.to_string(), "failed to parse string: \"12a\"");
    }

    #[test]
    fn parse_input_lines_reports_one_based_line() {
        let input = "1\n2\nthree\n4";
        let Err(error) = parse_input_lines(input, |_, line| parse_with_context::<u32>(line))
            .collect::<Result<Vec<_>, _>>()
        else {
            panic!("expected an invalid line");
        };
        assert_eq!(error.line_index(), 2);
        assert_eq!(error.to_string(), "failure parsing line 3");
    }

    #[test]
    fn parse_input_lines_skips_blank_lines() -> DynamicResult<()> {
        let input = "1\n\n2\n  \n3\n\n";
        let indexed = parse_input_lines(input, |index, line| {
            parse_with_context::<u32>(line).map(|number| (index, number))
        })
        .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(indexed, vec![(0, 1), (2, 2), (4, 3)]);

        let Err(error) = parse_input_lines("1\n\nx\n", |_, line| parse_with_context::<u32>(line))
            .collect::<Result<Vec<_>, _>>()
        else {
            panic!("expected an invalid line");
        };
        assert_eq!(error.line_index(), 2);
        Ok(())
    }

    #[test]
    fn parse_lines_with_offset_shifts_line_index() {
        let Err(error) = parse_lines_with_offset("x", 4, parse_with_context::<u32>)
            .collect::<Result<Vec<_>, _>>()
        else {
            panic!("expected an invalid line");
        };
        assert_eq!(error.line_index(), 4);
    }

    #[test]
    fn scanner_reads_blocks() -> DynamicResult<()> {
        let input = "header\n1\n2\n\n\n3\n4\n5\n";
        let mut scanner = InputScanner::new(input);

        let header = scanner.next_in_sequence(|_, line| Ok::<_, DynamicError>(line))?;
        assert_eq!(header, Some("header"));

        let first = scanner.collect_sequence(|_, line| parse_with_context::<u8>(line))?;
        assert_eq!(first, vec![1, 2]);

        // a blank line stops the sequence without consuming it
        let stopped = scanner.next_in_sequence(|_, line| parse_with_context::<u8>(line))?;
        assert_eq!(stopped, None);

        assert!(scanner.skip_empty().is_some());
        let second = scanner.collect_sequence(|_, line| parse_with_context::<u8>(line))?;
        assert_eq!(second, vec![3, 4, 5]);

        assert!(scanner.skip_empty().is_none());
        assert!(scanner.is_exhausted());
        Ok(())
    }

    #[test]
    fn scanner_next_item_skips_blank_lines() -> DynamicResult<()> {
        let mut scanner = InputScanner::new("\n\n  \nvalue\n");
        let item = scanner.next_item(|index, line| Ok::<_, DynamicError>((index, line)))?;
        assert_eq!(item, Some((3, "value")));
        let end = scanner.next_item(|index, line| Ok::<_, DynamicError>((index, line)))?;
        assert_eq!(end, None);
        Ok(())
    }

    #[test]
    fn scanner_errors_use_absolute_line_index() -> DynamicResult<()> {
        let mut scanner = InputScanner::new("1\n\n2\nx\n");
        scanner.collect_sequence(|_, line| parse_with_context::<u8>(line))?;
        scanner.skip_empty();
        let Err(error) = scanner.collect_sequence(|_, line| parse_with_context::<u8>(line)) else {
            panic!("expected an invalid line");
        };
        assert_eq!(error.line_index(), 3);
        Ok(())
    }

    #[test]
    fn split_sections_on_first_blank_line() -> DynamicResult<()> {
        let input = "3   4\n4   3\n\n1,2\n3,4\n\n\n";
        let (first, second) = split_sections(input)?;
        assert_eq!(first.lines().collect::<Vec<_>>(), vec!["3   4", "4   3"]);
        assert_eq!(second.lines().collect::<Vec<_>>(), vec!["1,2", "3,4"]);
        Ok(())
    }

    #[test]
    fn split_sections_keeps_later_blocks_in_second_section() -> DynamicResult<()> {
        let input = "\na\n\nb\n\nc\n";
        let (first, second) = split_sections(input)?;
        assert_eq!(first, "a");
        let second_lines: Vec<_> = second.lines().filter(|line| !is_blank(line)).collect();
        assert_eq!(second_lines, vec!["b", "c"]);
        Ok(())
    }

    #[test]
    fn split_sections_handles_crlf() -> DynamicResult<()> {
        let (first, second) = split_sections("a\r\nb\r\n\r\nc\r\n")?;
        assert_eq!(first, "a\r\nb");
        assert_eq!(second, "c");
        Ok(())
    }

    #[test]
    fn split_sections_requires_two_sections() {
        assert!(split_sections("a\nb\n").is_err());
        assert!(split_sections("a\nb\n\n\n").is_err());
        assert!(split_sections("").is_err());
    }
}
