//! Framework of traits and utilities for Advent of Code.
//!
//! A day's solution is split into a parse step and two parts:
//!
//! - [`ParseData`] builds an in-memory model from the raw input string,
//! - [`Solution<PartOne>`] and [`Solution<PartTwo>`] compute an answer from that model.
//!
//! The [`runner`] module drives those steps and reports progress through an
//! [`OutputHandler`][runner::OutputHandler]. Reusable pieces for solving live in [`parsing`],
//! [`grid`] and [`search`].
//!
//! # Quick Start
//!
//! Define the parsed model and implement [`ParseData`], then implement [`Solution`] for each
//! part:
//!
//! ```
//! use aoc_framework::grid::{Grid, Position};
//! use aoc_framework::search::breadth_first_shortest;
//! use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};
//!
//! struct Maze(Grid<char>);
//!
//! impl ParseData for Maze {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         Ok(Self(Grid::parse_with(input, |_, ch| Ok::<_, std::convert::Infallible>(ch))?))
//!     }
//! }
//!
//! struct ShortestWalk;
//!
//! impl Solution<PartOne> for ShortestWalk {
//!     type Input = Maze;
//!     type Output = usize;
//!
//!     fn solve(input: &Maze) -> DynamicResult<usize> {
//!         let grid = &input.0;
//!         let goal = Position::new(grid.rows() - 1, grid.cols() - 1);
//!         let steps = breadth_first_shortest(
//!             [Position::new(0, 0)],
//!             |&position| {
//!                 grid.neighbors(position)
//!                     .filter(|&(_, next)| grid.get(next) != Some(&'#'))
//!                     .map(|(_, next)| next)
//!                     .collect::<Vec<_>>()
//!             },
//!             |&position| position == goal,
//!         );
//!         Ok(steps.ok_or("no path to the goal")?)
//!     }
//! }
//!
//! let maze = Maze::parse("..#\n#..\n#..\n").unwrap();
//! assert_eq!(ShortestWalk::solve(&maze).unwrap(), 4);
//! ```
//!
//! # Solutions over the raw input
//!
//! When a part needs no shared model, set `Input = str`:
//!
//! ```
//! use aoc_framework::{DynamicResult, PartTwo, Solution};
//!
//! struct LineCount;
//!
//! impl Solution<PartTwo> for LineCount {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.lines().count())
//!     }
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod grid;
pub mod parsing;
pub mod runner;
pub mod search;

mod private {
    /// Sealed so [`Part`][super::Part] is only implemented by the two part markers.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl PartKind {
    /// The one-based number of the part.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// The related [`PartKind`] for this part.
    const KIND: PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    const KIND: PartKind = PartKind::One;
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    const KIND: PartKind = PartKind::Two;
}

/// A solution for one [`Part`] of a day's puzzle.
///
/// A type usually implements this for both [`PartOne`] and [`PartTwo`], sharing one parsed
/// [`Solution::Input`].
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// The answer produced by the solution.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// A solution can fail on input it cannot handle, like a missing start position or a puzzle
    /// with no answer. It is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Solutions can be passed parsed data constructed through this trait by setting
/// [`Solution::Input`] to the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
