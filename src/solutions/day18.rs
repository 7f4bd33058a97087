use std::fmt::{self, Display};

use aoc_framework::grid::{Grid, Position};
use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::breadth_first_shortest;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 18: RAM Run",
    parsed = FallingBytes,
    part_one = Day18,
    part_two = Day18
)]
impl super::AdventOfCode2024<18> {}

/*
Input is a list of byte positions, `X,Y`, in the order they fall into a square memory space. `X`
is the distance from the left edge and `Y` from the top edge. A fallen byte corrupts its position,
which can no longer be entered.

You start at the top left corner, `0,0`, and need to reach the exit at the bottom right corner,
moving up, down, left, or right.
*/

/// A fallen byte's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Byte(Position);

impl Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.col, self.0.row)
    }
}

#[derive(Debug)]
struct FallingBytes(Vec<Byte>);

#[derive(thiserror::Error, Debug)]
enum ParseFallingBytesError {
    #[error("expected a byte position formatted as `X,Y`")]
    InvalidFormat,

    #[error("input has no bytes")]
    NoBytes,
}

impl ParseData for FallingBytes {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let bytes: Vec<_> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (x, y) = line
                .trim()
                .split_once(',')
                .ok_or(ParseFallingBytesError::InvalidFormat)?;
            Ok(Byte(Position::new(
                parse_with_context(y)?,
                parse_with_context(x)?,
            )))
        })
        .collect::<Result<_, _>>()?;

        if bytes.is_empty() {
            return Err(ParseFallingBytesError::NoBytes.into());
        }
        Ok(Self(bytes))
    }
}

#[derive(thiserror::Error, Debug)]
enum MemoryError {
    #[error("byte {0} falls outside the memory space")]
    ByteOutOfBounds(Byte),

    #[error("the exit cannot be reached")]
    NoPath,

    #[error("the exit stays reachable after every byte falls")]
    NeverBlocked,
}

/// A square memory space, with positions from 0 up to `size - 1` on both axes.
#[derive(Debug, Clone, Copy)]
struct MemorySpace {
    size: usize,
}

const MEMORY_SPACE: MemorySpace = MemorySpace { size: 71 };

impl MemorySpace {
    /// Mark each position corrupted by the bytes.
    fn corrupted(self, bytes: &[Byte]) -> Result<Grid<bool>, MemoryError> {
        let mut corrupted = Grid::filled(self.size, self.size, false);
        for &byte in bytes {
            corrupted
                .set(byte.0, true)
                .ok_or(MemoryError::ByteOutOfBounds(byte))?;
        }
        Ok(corrupted)
    }

    /// The minimum number of steps from the start to the exit after the bytes fall.
    fn shortest_path(self, bytes: &[Byte]) -> Result<Option<usize>, MemoryError> {
        let corrupted = self.corrupted(bytes)?;
        let start = Position::new(0, 0);
        let exit = Position::new(self.size - 1, self.size - 1);
        if corrupted.get(start) != Some(&false) {
            return Ok(None);
        }

        Ok(breadth_first_shortest(
            [start],
            |&position| {
                corrupted
                    .neighbors(position)
                    .map(|(_, neighbor)| neighbor)
                    .filter(|&neighbor| corrupted.get(neighbor) == Some(&false))
            },
            |&position| position == exit,
        ))
    }

    /// The first byte to fall that cuts off the exit.
    ///
    /// More fallen bytes can only block more paths, so the number of bytes the exit survives is
    /// found by binary search.
    fn first_blocking_byte(self, bytes: &[Byte]) -> Result<Byte, MemoryError> {
        self.corrupted(bytes)?;

        let counts: Vec<usize> = (0..=bytes.len()).collect();
        let first_blocked = counts.partition_point(|&count| {
            matches!(self.shortest_path(&bytes[..count]), Ok(Some(_)))
        });

        match first_blocked.checked_sub(1) {
            Some(index) if index < bytes.len() => Ok(bytes[index]),
            _ => Err(MemoryError::NeverBlocked),
        }
    }
}

/*
For part 1, simulate the first kilobyte (1024 bytes) falling onto a memory space 71 positions
wide. Find the minimum number of steps needed to reach the exit.
*/

const FIRST_KILOBYTE: usize = 1024;

struct Day18;

impl Solution<PartOne> for Day18 {
    type Input = FallingBytes;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let fallen = &input.0[..FIRST_KILOBYTE.min(input.0.len())];
        Ok(MEMORY_SPACE
            .shortest_path(fallen)?
            .ok_or(MemoryError::NoPath)?)
    }
}

/*
For part 2, find the coordinates of the first byte that will prevent the exit from being reachable
from the starting position.
*/

impl Solution<PartTwo> for Day18 {
    type Input = FallingBytes;
    type Output = Byte;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(MEMORY_SPACE.first_blocking_byte(&input.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    const EXAMPLE_SPACE: MemorySpace = MemorySpace { size: 7 };

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = FallingBytes::parse(EXAMPLE_INPUT)?;
        assert_eq!(EXAMPLE_SPACE.shortest_path(&parsed.0[..12])?, Some(22));
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = FallingBytes::parse(EXAMPLE_INPUT)?;
        let byte = EXAMPLE_SPACE.first_blocking_byte(&parsed.0)?;
        assert_eq!(byte.to_string(), "6,1");
        Ok(())
    }

    #[test]
    fn rejects_bytes_outside_memory() -> DynamicResult<()> {
        let parsed = FallingBytes::parse("7,0\n")?;
        assert!(matches!(
            EXAMPLE_SPACE.shortest_path(&parsed.0),
            Err(MemoryError::ByteOutOfBounds(_))
        ));
        Ok(())
    }

    #[test]
    fn exit_never_blocked() -> DynamicResult<()> {
        let parsed = FallingBytes::parse("1,1\n")?;
        assert!(matches!(
            EXAMPLE_SPACE.first_blocking_byte(&parsed.0),
            Err(MemoryError::NeverBlocked)
        ));
        Ok(())
    }
}
