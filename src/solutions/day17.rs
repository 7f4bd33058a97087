use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use thiserror::Error;

#[solution_runner(
    name = "Day 17: Chronospatial Computer",
    parsed = Debugger,
    part_one = Day17,
    part_two = Day17
)]
impl super::AdventOfCode2024<17> {}

/*
Input is the state of a 3-bit computer: the initial values of registers A, B, and C, then a
program of 3-bit numbers.

```
Register A: 729
Register B: 0
Register C: 0

Program: 0,1,5,4,3,0
```

Each instruction is an opcode followed by an operand. The instruction pointer starts at 0 and
increases by 2 after each instruction, except for jumps. The computer halts when it tries to read
an opcode past the end of the program.

Literal operands are the operand's value. Combo operands 0 through 3 are literal values, while 4,
5, and 6 are the values of registers A, B, and C. Combo operand 7 is reserved and never valid.

| Opcode | Name  | Behavior                                              |
|--------|-------|-------------------------------------------------------|
| 0      | `adv` | A = A / 2^combo                                       |
| 1      | `bxl` | B = B XOR literal                                     |
| 2      | `bst` | B = combo % 8                                         |
| 3      | `jnz` | if A is not 0, jump to literal                        |
| 4      | `bxc` | B = B XOR C (operand is ignored)                      |
| 5      | `out` | output combo % 8                                      |
| 6      | `bdv` | B = A / 2^combo                                       |
| 7      | `cdv` | C = A / 2^combo                                       |
*/

type Register = u64;

/// A 3-bit number of a program.
type Word = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Registers {
    a: Register,
    b: Register,
    c: Register,
}

#[derive(Debug)]
struct Debugger {
    registers: Registers,
    program: Vec<Word>,
}

#[derive(Error, Debug)]
enum ParseDebuggerError {
    #[error("expected line `{expected}: ...`")]
    MissingLine { expected: &'static str },

    #[error("program value {0} is not a 3-bit number")]
    NotThreeBit(u8),

    #[error("program is empty")]
    EmptyProgram,

    #[error("unexpected input after the program")]
    TrailingInput,
}

fn labeled_value<'a>(line: &'a str, label: &'static str) -> Result<&'a str, ParseDebuggerError> {
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
        .ok_or(ParseDebuggerError::MissingLine { expected: label })
}

impl ParseData for Debugger {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let mut next_register = |label: &'static str| -> DynamicResult<Register> {
            scanner
                .next_item(|_, line| -> DynamicResult<_> {
                    Ok(parse_with_context(labeled_value(line, label)?)?)
                })?
                .ok_or_else(|| ParseDebuggerError::MissingLine { expected: label }.into())
        };
        let registers = Registers {
            a: next_register("Register A")?,
            b: next_register("Register B")?,
            c: next_register("Register C")?,
        };

        let program = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                labeled_value(line, "Program")?
                    .split(',')
                    .map(|value| -> DynamicResult<Word> {
                        let value = parse_with_context::<Word>(value.trim())?;
                        if value > 7 {
                            return Err(ParseDebuggerError::NotThreeBit(value).into());
                        }
                        Ok(value)
                    })
                    .collect::<DynamicResult<Vec<_>>>()
            })?
            .ok_or(ParseDebuggerError::MissingLine {
                expected: "Program",
            })?;
        if program.is_empty() {
            return Err(ParseDebuggerError::EmptyProgram.into());
        }
        if !scanner.is_exhausted() {
            return Err(ParseDebuggerError::TrailingInput.into());
        }

        Ok(Self { registers, program })
    }
}

/// An error while running a program.
#[derive(Error, Debug, PartialEq, Eq)]
enum ExecutionError {
    #[error("reserved combo operand 7 used at instruction {0}")]
    ReservedOperand(usize),

    #[error("instruction at {0} is missing its operand")]
    MissingOperand(usize),

    #[error("program did not halt within {0} instructions")]
    StepLimit(usize),
}

/// Stop programs that never halt.
const MAX_STEPS: usize = 1_000_000;

/// Divide by a power of two, which is zero once the shift exceeds the register width.
fn divide_power_of_two(numerator: Register, exponent: Register) -> Register {
    u32::try_from(exponent)
        .ok()
        .and_then(|shift| numerator.checked_shr(shift))
        .unwrap_or(0)
}

impl Registers {
    /// The value of a combo operand.
    fn combo(&self, operand: Word, pointer: usize) -> Result<Register, ExecutionError> {
        match operand {
            0..=3 => Ok(Register::from(operand)),
            4 => Ok(self.a),
            5 => Ok(self.b),
            6 => Ok(self.c),
            _ => Err(ExecutionError::ReservedOperand(pointer)),
        }
    }

    /// Register A divided by two to the power of a combo operand.
    fn divided_a(&self, operand: Word, pointer: usize) -> Result<Register, ExecutionError> {
        Ok(divide_power_of_two(self.a, self.combo(operand, pointer)?))
    }
}

/// Run a program to completion, returning the output and final registers.
fn run(
    program: &[Word],
    mut registers: Registers,
) -> Result<(Vec<Word>, Registers), ExecutionError> {
    let mut output = Vec::new();
    let mut pointer = 0;

    for _ in 0..MAX_STEPS {
        let Some(&opcode) = program.get(pointer) else {
            return Ok((output, registers));
        };
        let operand = *program
            .get(pointer + 1)
            .ok_or(ExecutionError::MissingOperand(pointer))?;
        let literal = Register::from(operand);

        match opcode {
            0 => registers.a = registers.divided_a(operand, pointer)?,
            1 => registers.b ^= literal,
            2 => registers.b = registers.combo(operand, pointer)? % 8,
            3 if registers.a != 0 => {
                pointer = usize::from(operand);
                continue;
            }
            3 => {}
            4 => registers.b ^= registers.c,
            5 => {
                let value = registers.combo(operand, pointer)? % 8;
                output.push(Word::try_from(value).expect("value modulo 8 should fit in a word"));
            }
            6 => registers.b = registers.divided_a(operand, pointer)?,
            _ => registers.c = registers.divided_a(operand, pointer)?,
        }
        pointer += 2;
    }

    Err(ExecutionError::StepLimit(MAX_STEPS))
}

fn format_output(output: &[Word]) -> String {
    output
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/*
For part 1, run the program and join its output values with commas.
*/

struct Day17;

impl Solution<PartOne> for Day17 {
    type Input = Debugger;
    type Output = String;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (output, _) = run(&input.program, input.registers)?;
        Ok(format_output(&output))
    }
}

/*
For part 2, find the lowest positive initial value for register A that causes the program to
output a copy of itself.

Programs loop by consuming three bits of register A each iteration, so the last output value
depends only on the highest three bits of A. Building A three bits at a time, from the last output
back to the first, keeps the candidates few. Every candidate is confirmed by running the program.
*/

#[derive(Error, Debug)]
#[error("no initial value of register A makes the program output itself")]
struct NoQuine;

fn find_quine(program: &[Word], registers: Registers) -> Result<Option<Register>, ExecutionError> {
    let mut candidates: Vec<Register> = vec![0];

    for suffix_start in (0..program.len()).rev() {
        let expected = &program[suffix_start..];
        let mut next_candidates = Vec::new();
        for prefix in &candidates {
            for bits in 0..8 {
                let Some(a) = prefix.checked_mul(8).map(|shifted| shifted | bits) else {
                    continue;
                };
                let (output, _) = run(program, Registers { a, ..registers })?;
                if output == expected {
                    next_candidates.push(a);
                }
            }
        }
        candidates = next_candidates;
    }

    Ok(candidates.into_iter().filter(|&a| a > 0).min())
}

impl Solution<PartTwo> for Day17 {
    type Input = Debugger;
    type Output = Register;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(find_quine(&input.program, input.registers)?.ok_or(NoQuine)?)
    }
}
