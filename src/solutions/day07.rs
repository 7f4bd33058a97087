use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use rayon::prelude::*;

#[solution_runner(
    name = "Day 7: Bridge Repair",
    parsed = Calibrations,
    part_one = Day07,
    part_two = Day07
)]
impl super::AdventOfCode2024<7> {}

/*
Input is calibration equations with their operators removed. Each line has a test value, a colon,
then the space separated numbers of the equation.

Operators are always evaluated left to right, ignoring precedence rules, and numbers cannot be
rearranged.
*/

type Number = u64;

#[derive(Debug)]
struct Equation {
    test_value: Number,
    operands: Vec<Number>,
}

#[derive(Debug)]
struct Calibrations(Vec<Equation>);

#[derive(thiserror::Error, Debug)]
enum ParseCalibrationsError {
    #[error("expected a colon after the test value")]
    MissingColon,

    #[error("an equation must have at least one operand")]
    NoOperands,

    #[error("input has no equations")]
    NoEquations,
}

impl ParseData for Calibrations {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let equations: Vec<_> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (test_value, operands) = line
                .split_once(':')
                .ok_or(ParseCalibrationsError::MissingColon)?;
            let operands = operands
                .split_whitespace()
                .map(parse_with_context::<Number>)
                .collect::<Result<Vec<_>, _>>()?;
            if operands.is_empty() {
                return Err(ParseCalibrationsError::NoOperands.into());
            }
            Ok(Equation {
                test_value: parse_with_context(test_value.trim())?,
                operands,
            })
        })
        .collect::<Result<_, _>>()?;

        if equations.is_empty() {
            return Err(ParseCalibrationsError::NoEquations.into());
        }
        Ok(Self(equations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
    Concatenate,
}

/// The left operands that undo an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeftOperand {
    Exactly(Number),
    /// Multiplying by zero, where every left operand gives zero.
    Any,
}

impl Operator {
    /// Find the left operand that gives `result` when combined with `right`, if one exists.
    fn unapply(self, result: Number, right: Number) -> Option<LeftOperand> {
        match self {
            Self::Add => result.checked_sub(right).map(LeftOperand::Exactly),
            Self::Multiply if right == 0 => (result == 0).then_some(LeftOperand::Any),
            Self::Multiply => (result % right == 0).then(|| LeftOperand::Exactly(result / right)),
            Self::Concatenate => {
                let digits = right.checked_ilog10().unwrap_or(0) + 1;
                let shift = 10_u64.checked_pow(digits)?;
                let remaining = result.checked_sub(right)?;
                (remaining % shift == 0).then(|| LeftOperand::Exactly(remaining / shift))
            }
        }
    }
}

impl Equation {
    /// Check if some combination of the operators between the operands makes the test value.
    ///
    /// Works backwards from the test value, undoing the last operand with each operator, which
    /// prunes most combinations early.
    fn is_solvable(&self, operators: &[Operator]) -> bool {
        fn undo(result: Number, operands: &[Number], operators: &[Operator]) -> bool {
            match operands {
                [] => false,
                [first] => result == *first,
                [rest @ .., last] => {
                    operators
                        .iter()
                        .any(|operator| match operator.unapply(result, *last) {
                            Some(LeftOperand::Exactly(left)) => undo(left, rest, operators),
                            Some(LeftOperand::Any) => true,
                            None => false,
                        })
                }
            }
        }

        undo(self.test_value, &self.operands, operators)
    }
}

/// The total of test values for equations that can be made true with the operators.
fn total_calibration(equations: &[Equation], operators: &[Operator]) -> Number {
    equations
        .par_iter()
        .filter(|equation| equation.is_solvable(operators))
        .map(|equation| Some(equation.test_value))
        .try_reduce(|| 0, Number::checked_add)
        .expect("total calibration result should not overflow")
}

/*
For part 1, operators are add (`+`) and multiply (`*`). Sum the test values of the equations that
could possibly be true.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = Calibrations;
    type Output = Number;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_calibration(
            &input.0,
            &[Operator::Add, Operator::Multiply],
        ))
    }
}

/*
For part 2, a third operator concatenates (`||`) the digits of its left and right inputs.
*/

impl Solution<PartTwo> for Day07 {
    type Input = Calibrations;
    type Output = Number;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(total_calibration(
            &input.0,
            &[Operator::Add, Operator::Multiply, Operator::Concatenate],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Calibrations::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3749);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Calibrations::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 11387);
        Ok(())
    }

    #[test]
    fn undoes_concatenation() {
        let exactly = |left| Some(LeftOperand::Exactly(left));
        assert_eq!(Operator::Concatenate.unapply(156, 6), exactly(15));
        assert_eq!(Operator::Concatenate.unapply(1510, 10), exactly(15));
        assert_eq!(Operator::Concatenate.unapply(156, 7), None);
        assert_eq!(Operator::Concatenate.unapply(6, 6), exactly(0));
        assert_eq!(Operator::Concatenate.unapply(30, 0), exactly(3));
    }

    #[test]
    fn zero_operands_are_valid() -> DynamicResult<()> {
        let parsed = Calibrations::parse("3: 3 0
0: 5 7 0
30: 3 0
4: 0 4
")?;
        let add_multiply = [Operator::Add, Operator::Multiply];
        let solvable: Vec<bool> = parsed
            .0
            .iter()
            .map(|equation| equation.is_solvable(&add_multiply))
            .collect();
        assert_eq!(solvable, vec![true, true, false, true]);
        assert!(parsed.0[2].is_solvable(&[Operator::Concatenate]));
        assert_eq!(Operator::Multiply.unapply(0, 0), Some(LeftOperand::Any));
        assert_eq!(Operator::Multiply.unapply(5, 0), None);
        Ok(())
    }

    #[test]
    fn skips_blank_lines() -> DynamicResult<()> {
        let parsed = Calibrations::parse("190: 10 19

83: 17 5

")?;
        assert_eq!(parsed.0.len(), 2);
        Ok(())
    }

    #[test]
    fn evaluates_left_to_right() -> DynamicResult<()> {
        // 2 + 3 * 4 is 20 left to right, not 14
        let parsed = Calibrations::parse("20: 2 3 4\n14: 2 3 4\n")?;
        assert!(parsed.0[0].is_solvable(&[Operator::Add, Operator::Multiply]));
        assert!(!parsed.0[1].is_solvable(&[Operator::Add, Operator::Multiply]));
        Ok(())
    }
}
