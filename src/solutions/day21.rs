use aoc_framework::grid::Position;
use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::Memo;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 21: Keypad Conundrum",
    parsed = DoorCodes,
    part_one = Day21,
    part_two = Day21
)]
impl super::AdventOfCode2024<21> {}

/*
Input is a list of codes to type on a door's numeric keypad, one per line:

```
+---+---+---+
| 7 | 8 | 9 |
+---+---+---+
| 4 | 5 | 6 |
+---+---+---+
| 1 | 2 | 3 |
+---+---+---+
    | 0 | A |
    +---+---+
```

A robot types on the numeric keypad. It is controlled by a directional keypad, which is typed on by
another robot, and so on up a chain, until the last directional keypad is typed on by you:

```
    +---+---+
    | ^ | A |
+---+---+---+
| < | v | > |
+---+---+---+
```

Every robot arm starts aimed at `A`. Arrows move an arm one key, `A` presses the key it is aimed at,
and an arm must never be aimed at the gap of its keypad.
*/

type Key = char;

#[derive(Debug)]
struct DoorCodes(Vec<String>);

#[derive(thiserror::Error, Debug)]
enum ParseDoorCodesError {
    #[error("code must be digits ending with `A`")]
    InvalidCode,

    #[error("input has no codes")]
    NoCodes,
}

#[derive(thiserror::Error, Debug)]
#[error("complexity of the codes is too large to count")]
struct ComplexityOverflow;

impl ParseData for DoorCodes {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let codes: Vec<_> = parse_input_lines(input, |_, line| {
            let code = line.trim();
            let is_door_code = code
                .strip_suffix('A')
                .is_some_and(|digits| {
                    !digits.is_empty() && digits.bytes().all(|digit| digit.is_ascii_digit())
                });
            if is_door_code {
                Ok(code.to_string())
            } else {
                Err(ParseDoorCodesError::InvalidCode)
            }
        })
        .collect::<Result<_, _>>()?;

        if codes.is_empty() {
            return Err(ParseDoorCodesError::NoCodes.into());
        }
        Ok(Self(codes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keypad {
    Numeric,
    Directional,
}

impl Keypad {
    fn position(self, key: Key) -> Option<Position> {
        let (row, col) = match (self, key) {
            (Self::Numeric, '7') => (0, 0),
            (Self::Numeric, '8') => (0, 1),
            (Self::Numeric, '9') => (0, 2),
            (Self::Numeric, '4') => (1, 0),
            (Self::Numeric, '5') => (1, 1),
            (Self::Numeric, '6') => (1, 2),
            (Self::Numeric, '1') => (2, 0),
            (Self::Numeric, '2') => (2, 1),
            (Self::Numeric, '3') => (2, 2),
            (Self::Numeric, '0') => (3, 1),
            (Self::Numeric, 'A') => (3, 2),
            (Self::Directional, '^') => (0, 1),
            (Self::Directional, 'A') => (0, 2),
            (Self::Directional, '<') => (1, 0),
            (Self::Directional, 'v') => (1, 1),
            (Self::Directional, '>') => (1, 2),
            _ => return None,
        };
        Some(Position::new(row, col))
    }

    fn gap(self) -> Position {
        match self {
            Self::Numeric => Position::new(3, 0),
            Self::Directional => Position::new(0, 0),
        }
    }

    /// Directional key sequences that move an arm from one key to another and press it.
    ///
    /// Repeating a direction is always cheapest for the controlling robot, so only the two orders
    /// of moving along one axis then the other are worth considering. Orders passing over the gap
    /// are left out.
    fn paths(self, from: Key, to: Key) -> Vec<Vec<Key>> {
        let (Some(from), Some(to)) = (self.position(from), self.position(to)) else {
            return Vec::new();
        };

        let vertical_key = if to.row > from.row { 'v' } else { '^' };
        let horizontal_key = if to.col > from.col { '>' } else { '<' };
        let vertical = std::iter::repeat_n(vertical_key, from.row.abs_diff(to.row));
        let horizontal = std::iter::repeat_n(horizontal_key, from.col.abs_diff(to.col));

        let mut paths = Vec::with_capacity(2);
        if Position::new(from.row, to.col) != self.gap() {
            paths.push(horizontal.clone().chain(vertical.clone()).chain(['A']).collect());
        }
        if Position::new(to.row, from.col) != self.gap() {
            let path: Vec<Key> = vertical.chain(horizontal).chain(['A']).collect();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

/// Presses to move an arm from one directional key to another and press it, by robots above.
type PressMemo = Memo<(Key, Key, usize), u64>;

/// Your presses to have `keys` typed on a directional keypad with `robots` robot-operated
/// directional keypads between it and you.
fn sequence_presses(memo: &mut PressMemo, keys: &[Key], robots: usize) -> u64 {
    if robots == 0 {
        return u64::try_from(keys.len()).expect("key count should fit in u64");
    }
    let mut previous = 'A';
    let mut presses = 0_u64;
    for &key in keys {
        let step = memo.get_or_insert_with((previous, key, robots), |memo| {
            Keypad::Directional
                .paths(previous, key)
                .iter()
                .map(|path| sequence_presses(memo, path, robots - 1))
                .min()
                .expect("directional keys should be connected")
        });
        presses = presses
            .checked_add(step)
            .expect("press count should not overflow");
        previous = key;
    }
    presses
}

/// Your fewest presses to type a code on the numeric keypad.
fn code_presses(memo: &mut PressMemo, code: &str, robots: usize) -> u64 {
    let mut previous = 'A';
    let mut presses = 0_u64;
    for key in code.chars() {
        let best = Keypad::Numeric
            .paths(previous, key)
            .iter()
            .map(|path| sequence_presses(memo, path, robots))
            .min()
            .expect("numeric keys should be connected");
        presses = presses
            .checked_add(best)
            .expect("press count should not overflow");
        previous = key;
    }
    presses
}

/// The sum of each code's complexity: its fewest presses times the numeric part of the code.
fn total_complexity(codes: &[String], robots: usize) -> DynamicResult<u64> {
    let mut memo = PressMemo::new();
    let complexities = codes
        .iter()
        .map(|code| -> DynamicResult<u64> {
            let numeric = parse_with_context::<u64>(code.trim_end_matches('A'))?;
            Ok(code_presses(&mut memo, code, robots)
                .checked_mul(numeric)
                .ok_or(ComplexityOverflow)?)
        })
        .collect::<DynamicResult<Vec<_>>>()?;
    Ok(complexities
        .into_iter()
        .checked_sum()
        .ok_or(ComplexityOverflow)?)
}

/*
For part 1, there are two robots on directional keypads between you and the robot on the numeric
keypad. Sum the complexities of the codes.
*/

struct Day21;

impl Solution<PartOne> for Day21 {
    type Input = DoorCodes;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        total_complexity(&input.0, 2)
    }
}

/*
For part 2, there are twenty-five robots on directional keypads between you and the robot on the
numeric keypad.
*/

impl Solution<PartTwo> for Day21 {
    type Input = DoorCodes;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        total_complexity(&input.0, 25)
    }
}
