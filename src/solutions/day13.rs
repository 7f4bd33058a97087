use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::Vector2;
use regex::Regex;

#[solution_runner(
    name = "Day 13: Claw Contraption",
    parsed = Arcade,
    part_one = Day13,
    part_two = Day13
)]
impl super::AdventOfCode2024<13> {}

/*
Input is a list of claw machines separated by blank lines. Each machine has two buttons labeled A
and B, and a prize:

```
Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400
```

Each button moves the claw right along X and forward along Y by a specific amount. A machine's
prize is won when the claw is positioned exactly above it on both axes. It costs 3 tokens to push
the A button and 1 token to push the B button.
*/

type Coordinate = i64;

type Vector = Vector2<Coordinate>;

#[derive(Debug, Clone, Copy)]
struct ClawMachine {
    button_a: Vector,
    button_b: Vector,
    prize: Vector,
}

#[derive(Debug)]
struct Arcade(Vec<ClawMachine>);

#[derive(thiserror::Error, Debug)]
enum ParseArcadeError {
    #[error("expected line to describe {expected}")]
    UnexpectedLine { expected: &'static str },

    #[error("machine is missing its `{0}` line")]
    IncompleteMachine(&'static str),

    #[error("input has no claw machines")]
    NoMachines,
}

/// Parses the lines describing a claw machine.
struct MachineLineParser {
    re: Regex,
}

impl MachineLineParser {
    const PATTERN: &str = r"^(Button A|Button B|Prize): X[+=](\d+), Y[+=](\d+)$";

    fn new() -> Self {
        let re = Regex::new(Self::PATTERN).expect("pattern should be valid");
        Self { re }
    }

    fn parse_line(&self, line: &str, expected: &'static str) -> DynamicResult<Vector> {
        let caps = self
            .re
            .captures(line.trim())
            .filter(|caps| &caps[1] == expected)
            .ok_or(ParseArcadeError::UnexpectedLine { expected })?;
        Ok(Vector::new(
            parse_with_context(&caps[2])?,
            parse_with_context(&caps[3])?,
        ))
    }

    fn next_vector(
        &self,
        scanner: &mut InputScanner<'_>,
        expected: &'static str,
    ) -> DynamicResult<Vector> {
        Ok(scanner
            .next_in_sequence(|_, line| self.parse_line(line, expected))?
            .ok_or(ParseArcadeError::IncompleteMachine(expected))?)
    }
}

impl ParseData for Arcade {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let line_parser = MachineLineParser::new();
        let mut scanner = InputScanner::new(input);
        let mut machines = Vec::new();

        while scanner.skip_empty().is_some() {
            machines.push(ClawMachine {
                button_a: line_parser.next_vector(&mut scanner, "Button A")?,
                button_b: line_parser.next_vector(&mut scanner, "Button B")?,
                prize: line_parser.next_vector(&mut scanner, "Prize")?,
            });
        }

        if machines.is_empty() {
            return Err(ParseArcadeError::NoMachines.into());
        }
        Ok(Self(machines))
    }
}

const BUTTON_A_COST: Coordinate = 3;
const BUTTON_B_COST: Coordinate = 1;

impl ClawMachine {
    /// Solve for the number of presses of each button that reach the prize.
    ///
    /// The two buttons form a 2x2 linear system, solved exactly with Cramer's rule. Only
    /// non-negative whole numbers of presses are accepted.
    ///
    /// Buttons moving along the same line give no unique solution, and are treated as unwinnable.
    fn presses(&self) -> Option<(Coordinate, Coordinate)> {
        let Self {
            button_a: a,
            button_b: b,
            prize: p,
        } = *self;

        let determinant = a.x.checked_mul(b.y)? - a.y.checked_mul(b.x)?;
        if determinant == 0 {
            return None;
        }
        let a_numerator = p.x.checked_mul(b.y)? - p.y.checked_mul(b.x)?;
        let b_numerator = a.x.checked_mul(p.y)? - a.y.checked_mul(p.x)?;
        if a_numerator % determinant != 0 || b_numerator % determinant != 0 {
            return None;
        }

        let a_presses = a_numerator / determinant;
        let b_presses = b_numerator / determinant;
        (a_presses >= 0 && b_presses >= 0).then_some((a_presses, b_presses))
    }

    /// The fewest tokens to win the prize, if it can be won.
    fn fewest_tokens(&self, max_presses: Option<Coordinate>) -> Option<Coordinate> {
        let (a_presses, b_presses) = self.presses()?;
        if max_presses.is_some_and(|max| a_presses > max || b_presses > max) {
            return None;
        }
        Some(a_presses * BUTTON_A_COST + b_presses * BUTTON_B_COST)
    }

    #[must_use]
    fn with_prize_offset(self, offset: Coordinate) -> Self {
        Self {
            prize: self.prize.add_scalar(offset),
            ..self
        }
    }
}

fn total_tokens(
    machines: impl Iterator<Item = ClawMachine>,
    max_presses: Option<Coordinate>,
) -> Coordinate {
    machines
        .filter_map(|machine| machine.fewest_tokens(max_presses))
        .checked_sum()
        .expect("total tokens should not overflow")
}

/*
For part 1, each button would need to be pressed no more than 100 times to win a prize. Find the
fewest tokens to spend to win all possible prizes.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = Arcade;
    type Output = Coordinate;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_tokens(input.0.iter().copied(), Some(100)))
    }
}

/*
For part 2, due to a unit conversion error, the position of every prize is actually 10000000000000
higher on both axes. There is no longer a limit on button presses.
*/

const PRIZE_OFFSET: Coordinate = 10_000_000_000_000;

impl Solution<PartTwo> for Day13 {
    type Input = Arcade;
    type Output = Coordinate;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_tokens(
            input
                .0
                .iter()
                .map(|machine| machine.with_prize_offset(PRIZE_OFFSET)),
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400

Button A: X+26, Y+66
Button B: X+67, Y+21
Prize: X=12748, Y=12176

Button A: X+17, Y+86
Button B: X+84, Y+37
Prize: X=7870, Y=6450

Button A: X+69, Y+23
Button B: X+27, Y+71
Prize: X=18641, Y=10279
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 480);
        Ok(())
    }

    #[test]
    fn part_one_presses_example_machines() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0[0].presses(), Some((80, 40)));
        assert_eq!(parsed.0[1].presses(), None);
        assert_eq!(parsed.0[2].presses(), Some((38, 86)));
        assert_eq!(parsed.0[3].presses(), None);
        Ok(())
    }

    #[test]
    fn part_two_wins_second_and_fourth_machines() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        let winnable: Vec<bool> = parsed
            .0
            .iter()
            .map(|machine| {
                machine
                    .with_prize_offset(PRIZE_OFFSET)
                    .fewest_tokens(None)
                    .is_some()
            })
            .collect();
        assert_eq!(winnable, vec![false, true, false, true]);
        Ok(())
    }

    #[test]
    fn parse_rejects_incomplete_machine() {
        assert!(Arcade::parse("Button A: X+94, Y+34\nButton B: X+22, Y+67\n").is_err());
        assert!(
            Arcade::parse("Button B: X+22, Y+67\nButton A: X+94, Y+34\nPrize: X=1, Y=1\n").is_err()
        );
    }
}
