use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;

#[solution_runner(
    name = "Day 3: Mull It Over",
    parsed = Program,
    part_one = Day03,
    part_two = Day03
)]
impl super::AdventOfCode2024<3> {}

/*
Input is the corrupted memory of a computer program. Most of it is noise, but scattered through it
are valid instructions:

- `mul(X,Y)` multiplies two numbers of one to three digits each.
- `do()` enables future `mul` instructions.
- `don't()` disables future `mul` instructions.

Anything else, including instructions with extra characters or spaces, is to be ignored. Line
breaks are part of the memory and do not reset anything.
*/

type Operand = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Mul(Operand, Operand),
    Do,
    Dont,
}

#[derive(Debug)]
struct Program {
    instructions: Vec<Instruction>,
}

#[derive(thiserror::Error, Debug)]
#[error("corrupted memory is empty")]
struct EmptyMemory;

impl Program {
    const INSTRUCTION_PATTERN: &str = r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)";
}

impl ParseData for Program {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        if input.trim().is_empty() {
            return Err(EmptyMemory.into());
        }

        let re = Regex::new(Self::INSTRUCTION_PATTERN).expect("pattern should be valid");
        let instructions = re
            .captures_iter(input)
            .map(|caps| -> DynamicResult<_> {
                let instruction = match (caps.get(1), caps.get(2)) {
                    (Some(x), Some(y)) => Instruction::Mul(
                        parse_with_context(x.as_str())?,
                        parse_with_context(y.as_str())?,
                    ),
                    _ if &caps[0] == "do()" => Instruction::Do,
                    _ => Instruction::Dont,
                };
                Ok(instruction)
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { instructions })
    }
}

/*
For part 1, sum the results of every `mul` instruction.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = Program;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .instructions
            .iter()
            .filter_map(|instruction| match *instruction {
                Instruction::Mul(x, y) => Some(u64::from(x) * u64::from(y)),
                Instruction::Do | Instruction::Dont => None,
            })
            .checked_sum()
            .expect("sum of products should not overflow"))
    }
}

/*
For part 2, handle the conditional instructions. Only the most recent `do()` or `don't()` applies,
and `mul` instructions start enabled.
*/

impl Solution<PartTwo> for Day03 {
    type Input = Program;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut enabled = true;
        let mut products = Vec::new();
        for instruction in &input.instructions {
            match *instruction {
                Instruction::Mul(x, y) if enabled => products.push(u64::from(x) * u64::from(y)),
                Instruction::Mul(..) => {}
                Instruction::Do => enabled = true,
                Instruction::Dont => enabled = false,
            }
        }

        Ok(products
            .into_iter()
            .checked_sum()
            .expect("sum of enabled products should not overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Program::parse(
            "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))",
        )?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 161);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Program::parse(
            "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))",
        )?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 48);
        Ok(())
    }

    #[test]
    fn ignores_malformed_instructions() -> DynamicResult<()> {
        let parsed = Program::parse("mul(4*\nmul(6,9!\nmul ( 2 , 4 )\nmul(1234,5)\n")?;
        assert!(parsed.instructions.is_empty());
        Ok(())
    }

    #[test]
    fn disabled_state_spans_lines() -> DynamicResult<()> {
        let parsed = Program::parse("mul(2,3)don't()\nmul(5,5)\ndo()mul(1,1)")?;
        assert_eq!(<Day03 as Solution<PartTwo>>::solve(&parsed)?, 7);
        Ok(())
    }
}
