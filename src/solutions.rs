//! Solutions implemented for Advent of Code 2024.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`AdventOfCode2024<DAY>`] for its day as a [`SolutionRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`AdventOfCode2024<DAY>`] for a day, below `MATCH SOLUTIONS HERE`,
//!    and list the day in [`AVAILABLE_DAYS`]:
//!
//! ```ignore
//! // matching for day 1
//! 1 => AdventOfCode2024::<1>::run(input, handler, timed),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day.
///
/// Use [`#[solution_runner]`][aoc_framework::runner::solution_runner] for convenience:
///
/// ```ignore
/// // in a submodule "day01.rs"
/// use aoc_framework::runner::solution_runner;
/// use aoc_framework::{PartOne, Solution};
///
/// struct Day01;
/// impl Solution<PartOne> for Day01 {
///     /* ... */
/// }
///
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// impl super::AdventOfCode2024<1> {}
/// ```
struct AdventOfCode2024<const DAY: u8>;

/// The days with a solution available to run, in order.
pub const AVAILABLE_DAYS: &[u8] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
];

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        // --- MATCH SOLUTIONS HERE ---
        1 => AdventOfCode2024::<1>::run(input, handler, timed),
        2 => AdventOfCode2024::<2>::run(input, handler, timed),
        3 => AdventOfCode2024::<3>::run(input, handler, timed),
        4 => AdventOfCode2024::<4>::run(input, handler, timed),
        5 => AdventOfCode2024::<5>::run(input, handler, timed),
        6 => AdventOfCode2024::<6>::run(input, handler, timed),
        7 => AdventOfCode2024::<7>::run(input, handler, timed),
        8 => AdventOfCode2024::<8>::run(input, handler, timed),
        9 => AdventOfCode2024::<9>::run(input, handler, timed),
        10 => AdventOfCode2024::<10>::run(input, handler, timed),
        11 => AdventOfCode2024::<11>::run(input, handler, timed),
        12 => AdventOfCode2024::<12>::run(input, handler, timed),
        13 => AdventOfCode2024::<13>::run(input, handler, timed),
        14 => AdventOfCode2024::<14>::run(input, handler, timed),
        15 => AdventOfCode2024::<15>::run(input, handler, timed),
        16 => AdventOfCode2024::<16>::run(input, handler, timed),
        17 => AdventOfCode2024::<17>::run(input, handler, timed),
        18 => AdventOfCode2024::<18>::run(input, handler, timed),
        19 => AdventOfCode2024::<19>::run(input, handler, timed),
        20 => AdventOfCode2024::<20>::run(input, handler, timed),
        21 => AdventOfCode2024::<21>::run(input, handler, timed),
        22 => AdventOfCode2024::<22>::run(input, handler, timed),
        23 => AdventOfCode2024::<23>::run(input, handler, timed),
        24 => AdventOfCode2024::<24>::run(input, handler, timed),
        25 => AdventOfCode2024::<25>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use aoc_framework::PartKind;

    use super::*;

    /// Collects part answers.
    #[derive(Default)]
    struct Answers(Vec<String>);

    impl OutputHandler for Answers {
        fn solution_name(&mut self, _name: &str) {}

        fn parse_start(&mut self) {}

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {}

        fn part_start(&mut self, _part: PartKind) {}

        fn part_output(
            &mut self,
            _part: PartKind,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.0.push(output.to_string());
        }
    }

    #[test]
    fn runs_a_day_by_number() -> DynamicResult<()> {
        let mut answers = Answers::default();
        run_day(1, "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n", &mut answers, false)?;
        assert_eq!(answers.0, vec!["11", "31"]);
        Ok(())
    }

    #[test]
    fn unknown_day_is_not_available() {
        let mut answers = Answers::default();
        let result = run_day(26, "", &mut answers, false);
        assert!(result.is_err_and(|error| error.is::<DayNotAvailable>()));
    }

    #[test]
    fn every_listed_day_runs() {
        let mut answers = Answers::default();
        for &day in AVAILABLE_DAYS {
            // empty input is invalid for every day, but the day must be found
            let result = run_day(day, "", &mut answers, false);
            assert!(
                result.is_err_and(|error| !error.is::<DayNotAvailable>()),
                "day {day} should be available and reject empty input"
            );
        }
    }
}
