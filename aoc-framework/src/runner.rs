//! Functions and traits for running solutions.
//!
//! Running a solution emits events to an [`OutputHandler`]: the solution's name, the parse step
//! (when the solution parses its input), each part's answer, and the end of the solution.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[solution_runner]`][solution_runner]
//! attribute macro with appropriate properties:
//!
//! ```
//! # use aoc_framework::runner::{solution_runner};
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01)]
//! struct Day01Runner;
//!
//! // or
//!
//! #[solution_runner(name = "Day 1", part_one = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// A trait for an output events handler.
///
/// When a solution runs, the steps of running the solution leads to events to output through a
/// handler as feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`] to identify the part.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);

    /// Called after every step of the solution succeeded.
    ///
    /// The total duration of parsing and solving parts is optionally passed.
    fn solution_end(&mut self, _total_duration_opt: Option<Duration>) {}
}

/// Measures steps of a solution when timing is enabled, and sums their durations.
#[derive(Debug)]
struct Stopwatch {
    enabled: bool,
    total: Duration,
}

impl Stopwatch {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            total: Duration::ZERO,
        }
    }

    /// Run a step, returning its result with its duration if timing is enabled.
    fn measure<T>(&mut self, step: impl FnOnce() -> T) -> (T, Option<Duration>) {
        if !self.enabled {
            return (step(), None);
        }
        let start = Instant::now();
        let result = step();
        let elapsed = start.elapsed();
        self.total = self.total.saturating_add(elapsed);
        (result, Some(elapsed))
    }

    fn total(&self) -> Option<Duration> {
        self.enabled.then_some(self.total)
    }
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    stopwatch: &mut Stopwatch,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    handler.part_start(P::KIND);
    let (result, duration_opt) = stopwatch.measure(|| S::solve(input));
    let output = result?;
    handler.part_output(P::KIND, &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    stopwatch: &mut Stopwatch,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = stopwatch.measure(|| D::parse(input));
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run the steps of a solution between its name and end events.
fn run_steps(
    name: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
    steps: impl FnOnce(&mut dyn OutputHandler, &mut Stopwatch) -> DynamicResult<()>,
) -> DynamicResult<()> {
    let mut stopwatch = Stopwatch::new(timed);
    handler.solution_name(name);
    steps(handler, &mut stopwatch)?;
    handler.solution_end(stopwatch.total());
    Ok(())
}

/// Run a solution that only implements part one and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
pub fn solve_half_solution<S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    run_steps(name, handler, timed, |handler, stopwatch| {
        run_part::<S1, PartOne>(input, handler, stopwatch)
    })
}

/// Run a solution that implements both parts and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated.
pub fn solve_full_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    run_steps(name, handler, timed, |handler, stopwatch| {
        run_part::<S1, PartOne>(input, handler, stopwatch)?;
        run_part::<S2, PartTwo>(input, handler, stopwatch)
    })
}

/// Run a solution that implements part one and has a parse data step for input.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution is propagated.
pub fn solve_parsed_half_solution<D, S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    run_steps(name, handler, timed, |handler, stopwatch| {
        let parsed = run_parse::<D>(input, handler, stopwatch)?;
        run_part::<S1, PartOne>(&parsed, handler, stopwatch)
    })
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// Both parts share the one parsed instance.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    run_steps(name, handler, timed, |handler, stopwatch| {
        let parsed = run_parse::<D>(input, handler, stopwatch)?;
        run_part::<S1, PartOne>(&parsed, handler, stopwatch)?;
        run_part::<S2, PartTwo>(&parsed, handler, stopwatch)
    })
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `handler` - The output handler to output events to.
    /// - `timed` - A flag to measure the time to process steps then output the elapsed times to the
    ///   handler.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as strings.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
        timings: usize,
    }

    impl RecordingHandler {
        fn count_timing(&mut self, duration_opt: Option<Duration>) {
            if duration_opt.is_some() {
                self.timings += 1;
            }
        }
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.count_timing(duration_opt);
            self.events.push("parsed".to_owned());
        }

        fn part_start(&mut self, part: PartKind) {
            self.events.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.count_timing(duration_opt);
            self.events.push(format!("{part}: {output}"));
        }

        fn solution_end(&mut self, total_duration_opt: Option<Duration>) {
            self.count_timing(total_duration_opt);
            self.events.push("end".to_owned());
        }
    }

    struct Numbers(Vec<i64>);

    impl ParseData for Numbers {
        fn parse(input: &str) -> DynamicResult<Self> {
            let numbers = input
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()?;
            Ok(Self(numbers))
        }
    }

    struct Sums;

    impl Solution<PartOne> for Sums {
        type Input = Numbers;
        type Output = i64;

        fn solve(input: &Numbers) -> DynamicResult<i64> {
            Ok(input.0.iter().sum())
        }
    }

    impl Solution<PartTwo> for Sums {
        type Input = Numbers;
        type Output = i64;

        fn solve(input: &Numbers) -> DynamicResult<i64> {
            input
                .0
                .iter()
                .max()
                .copied()
                .ok_or_else(|| "no numbers".into())
        }
    }

    /// Solves straight from the input string.
    struct Words;

    impl Solution<PartOne> for Words {
        type Input = str;
        type Output = usize;

        fn solve(input: &str) -> DynamicResult<usize> {
            Ok(input.split_whitespace().count())
        }
    }

    impl Solution<PartTwo> for Words {
        type Input = str;
        type Output = String;

        fn solve(input: &str) -> DynamicResult<String> {
            input
                .split_whitespace()
                .max_by_key(|word| word.len())
                .map(str::to_owned)
                .ok_or_else(|| "no words".into())
        }
    }

    #[test]
    fn half_solution_skips_parse_events() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_half_solution::<Words>("Words", "a bb ccc", &mut handler, true)?;
        assert_eq!(
            handler.events,
            vec!["name Words", "start Part 1", "Part 1: 3", "end"]
        );
        // part one and the total
        assert_eq!(handler.timings, 2);
        Ok(())
    }

    #[test]
    fn full_solution_solves_both_parts_from_input() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_full_solution::<Words, Words>("Words", "a ccc bb", &mut handler, false)?;
        assert_eq!(
            handler.events,
            vec![
                "name Words",
                "start Part 1",
                "Part 1: 3",
                "start Part 2",
                "Part 2: ccc",
                "end",
            ]
        );
        assert_eq!(handler.timings, 0);
        Ok(())
    }

    #[test]
    fn full_solution_stops_at_failing_part() {
        let mut handler = RecordingHandler::default();
        let result = solve_full_solution::<Words, Words>("Words", "  ", &mut handler, false);
        assert!(result.is_err());
        assert_eq!(
            handler.events,
            vec!["name Words", "start Part 1", "Part 1: 0", "start Part 2"]
        );
    }

    #[test]
    fn parsed_full_solution_emits_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Numbers, Sums, Sums>("Sums", "1 5 2", &mut handler, false)?;
        assert_eq!(
            handler.events,
            vec![
                "name Sums",
                "parse",
                "parsed",
                "start Part 1",
                "Part 1: 8",
                "start Part 2",
                "Part 2: 5",
                "end",
            ]
        );
        assert_eq!(handler.timings, 0);
        Ok(())
    }

    #[test]
    fn timed_run_reports_durations() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_half_solution::<Numbers, Sums>("Sums", "1 2", &mut handler, true)?;
        // parse, part one and the total
        assert_eq!(handler.timings, 3);
        Ok(())
    }

    #[test]
    fn failing_part_stops_run() {
        let mut handler = RecordingHandler::default();
        let result =
            solve_parsed_full_solution::<Numbers, Sums, Sums>("Sums", "", &mut handler, false);
        assert!(result.is_err());
        assert_eq!(handler.events.last().map(String::as_str), Some("start Part 2"));
    }

    #[test]
    fn failing_parse_stops_run() {
        let mut handler = RecordingHandler::default();
        let result =
            solve_parsed_half_solution::<Numbers, Sums>("Sums", "1 x", &mut handler, false);
        assert!(result.is_err());
        assert_eq!(handler.events, vec!["name Sums", "parse"]);
    }
}
