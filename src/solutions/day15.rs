use std::collections::HashSet;

use aoc_framework::grid::{Direction, Grid, Position};
use aoc_framework::parsing::split_sections;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 15: Warehouse Woes",
    parsed = Instructions,
    part_one = Day15,
    part_two = Day15
)]
impl super::AdventOfCode2024<15> {}

/*
Input is a map of a warehouse, a blank line, then the moves a robot will attempt.

- `#` is a wall.
- `O` is a box.
- `@` is the robot.
- `.` is empty floor.

Moves are arrows (`^`, `v`, `<`, `>`) spread across multiple lines, where line breaks are to be
ignored. If the robot would move into a box, it pushes the box, along with any boxes lined up
behind it. If the move would push a box or the robot into a wall, nothing moves.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Wall,
    Box,
    /// The left half of a wide box.
    BoxLeft,
    /// The right half of a wide box.
    BoxRight,
}

impl From<Tile> for char {
    fn from(value: Tile) -> Self {
        match value {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Box => 'O',
            Tile::BoxLeft => '[',
            Tile::BoxRight => ']',
        }
    }
}

#[derive(Debug, Clone)]
struct Warehouse {
    /// The map without the robot, which stands on empty floor.
    map: Grid<Tile>,
    robot: Position,
}

#[derive(Debug)]
struct Instructions {
    warehouse: Warehouse,
    moves: Vec<Direction>,
}

#[derive(thiserror::Error, Debug)]
enum ParseInstructionsError {
    #[error("invalid warehouse tile: {0:?}")]
    InvalidTile(char),

    #[error("warehouse must have exactly one robot, found {0}")]
    RobotCount(usize),
}

impl ParseData for Instructions {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let (map_section, moves_section) = split_sections(input)?;

        let mut robots = Vec::new();
        let map = Grid::parse_with(map_section, |position, ch| match ch {
            '.' => Ok(Tile::Empty),
            '#' => Ok(Tile::Wall),
            'O' => Ok(Tile::Box),
            '@' => {
                robots.push(position);
                Ok(Tile::Empty)
            }
            _ => Err(ParseInstructionsError::InvalidTile(ch)),
        })?;
        let [robot] = robots[..] else {
            return Err(ParseInstructionsError::RobotCount(robots.len()).into());
        };

        let moves = moves_section
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(Direction::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            warehouse: Warehouse { map, robot },
            moves,
        })
    }
}

impl Warehouse {
    /// Attempt to move the robot, pushing any boxes in the way.
    fn attempt_move(&mut self, direction: Direction) {
        let mut pushed = Vec::new();
        let mut queued = HashSet::new();
        let mut frontier = vec![self.robot];

        while let Some(position) = frontier.pop() {
            let Some(next) = self.map.step(position, direction) else {
                return;
            };
            if queued.contains(&next) {
                continue;
            }
            let tile = self.map.get(next).copied().unwrap_or(Tile::Wall);
            let other_half = match tile {
                Tile::Wall => return,
                Tile::Empty => continue,
                Tile::Box => None,
                Tile::BoxLeft => Some(Direction::East),
                Tile::BoxRight => Some(Direction::West),
            };

            queued.insert(next);
            pushed.push((next, tile));
            frontier.push(next);
            // a wide box moving vertically drags its other half along
            if let Some(half) = other_half.filter(|_| direction.is_vertical())
                && let Some(half_position) = self.map.step(next, half)
                && queued.insert(half_position)
            {
                let half_tile = self.map.get(half_position).copied().unwrap_or(Tile::Wall);
                pushed.push((half_position, half_tile));
                frontier.push(half_position);
            }
        }

        for &(position, _) in &pushed {
            self.map.set(position, Tile::Empty);
        }
        for &(position, tile) in &pushed {
            if let Some(target) = position.step(direction) {
                self.map.set(target, tile);
            }
        }
        if let Some(next) = self.map.step(self.robot, direction) {
            self.robot = next;
        }
    }

    /// The sum of GPS coordinates of every box, measured from the left edge of the box.
    fn gps_sum(&self) -> u64 {
        self.map
            .find_all(|&tile| matches!(tile, Tile::Box | Tile::BoxLeft))
            .map(|position| {
                u64::try_from(100 * position.row + position.col)
                    .expect("GPS coordinate should fit in u64")
            })
            .checked_sum()
            .expect("sum of GPS coordinates should not overflow")
    }

    /// The warehouse with everything except the robot twice as wide.
    fn widened(&self) -> Self {
        let mut map = Grid::filled(self.map.rows(), self.map.cols() * 2, Tile::Empty);
        for (position, &tile) in self.map.iter() {
            let (left, right) = match tile {
                Tile::Box => (Tile::BoxLeft, Tile::BoxRight),
                _ => (tile, tile),
            };
            map.set(Position::new(position.row, position.col * 2), left);
            map.set(Position::new(position.row, position.col * 2 + 1), right);
        }

        Self {
            map,
            robot: Position::new(self.robot.row, self.robot.col * 2),
        }
    }
}

impl Instructions {
    fn run(&self, mut warehouse: Warehouse) -> u64 {
        for &direction in &self.moves {
            warehouse.attempt_move(direction);
        }
        warehouse.gps_sum()
    }
}

/*
For part 1, predict the motion of the robot and boxes. A box's GPS coordinate is 100 times its
distance from the top edge of the map plus its distance from the left edge. Sum the GPS
coordinates of all boxes after the robot finishes moving.
*/

struct Day15;

impl Solution<PartOne> for Day15 {
    type Input = Instructions;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.run(input.warehouse.clone()))
    }
}

/*
For part 2, everything except the robot is twice as wide. Boxes become `[]`, and pushing a wide
box vertically can push two boxes above or below it, which can in turn push more boxes. Nothing
moves if any pushed box would hit a wall.
*/

impl Solution<PartTwo> for Day15 {
    type Input = Instructions;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.run(input.warehouse.widened()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_EXAMPLE: &str = r"########
#..O.O.#
##@.O..#
#...O..#
#.#.O..#
#...O..#
#......#
########

<^^>>>vv<v>>v<<
";

    const LARGE_EXAMPLE: &str = r"##########
#..O..O.O#
#......O.#
#.OO..O.O#
#..O@..O.#
#O#..O...#
#O..O..O.#
#.OO.O.OO#
#....O...#
##########

<vv>^<v^>v>^vv^v>v<>v^v<v<^vv<<<^><<><>>v<vvv<>^v^>^<<<><<v<<<v^vv^v>^
vvv<<^>^v^^><<>>><>^<<><^vv^^<>vvv<>><^^v>^>vv<>v<<<<v<^v>^<^^>>>^<v<v
><>vv>v^v^<>><>>>><^^>vv>v<^^^>>v^v^<^^>v^^>v^<^v>v<>>v^v^<v>v^^<^^vv<
<<v<^>>^^^^>>>v^<>vvv^><v<<<>^^^vv^<vvv>^>v<^^^^v<>^>vvvv><>>v^<<^^^^^
^><^><>>><>^^<<^^v>>><^<v>^<vv>>v>>>^v><>^v><<<<v>>v<v<v>vvv>^<><<>^><
^>><>^v<><^vvv<^^<><v<<<<<><^v<<<><<<^^<v<^^^><^>>^<v^><<<^>>^v<v^v<v^
>^>>^v>vv>^<<^v<>><<><<v<<v><>v<^vv<<<>^^v^>^^>>><<^v>>v^v><^^>>^<>vv^
<><^^>^^^<><vvvvv^v<v<<>^v<v>v<<^><<><<><<<^^<<<^<<>><<><^^^>^^<>^>v<>
^^>vv<^v^v<vv>^<><v<^v>^^^>>>^^vvv^>vvv<>>>^<^>>>>>^<<^v>^vvv<>^<><<v>
v^^>>><<^^<>>^v^<v^vv<>v^<<>^<^v^v><^<<<><<^<v><v<>vv>>v><v^<vv<>v^<<^
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (example, expected) in [(SMALL_EXAMPLE, 2028), (LARGE_EXAMPLE, 10092)] {
            let parsed = Instructions::parse(example)?;
            let result = <Day15 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Instructions::parse(LARGE_EXAMPLE)?;
        let result = <Day15 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 9021);
        Ok(())
    }

    #[test]
    fn part_two_pushes_stacked_wide_boxes() -> DynamicResult<()> {
        let parsed = Instructions::parse(
            r"#######
#...#.#
#.....#
#..OO@#
#..O..#
#.....#
#######

<vv<<^^<<^^
",
        )?;
        let mut warehouse = parsed.warehouse.widened();
        for &direction in &parsed.moves {
            warehouse.attempt_move(direction);
        }
        assert_eq!(
            warehouse.map.to_string(),
            "##############\n\
             ##...[].##..##\n\
             ##.....[]...##\n\
             ##....[]....##\n\
             ##..........##\n\
             ##..........##\n\
             ##############\n"
        );
        assert_eq!(warehouse.robot, Position::new(2, 5));
        assert_eq!(warehouse.gps_sum(), 618);
        Ok(())
    }

    #[test]
    fn blocked_push_moves_nothing() -> DynamicResult<()> {
        let parsed = Instructions::parse("#####\n#@OO#\n#####\n\n>\n")?;
        let mut warehouse = parsed.warehouse.clone();
        warehouse.attempt_move(Direction::East);
        assert_eq!(warehouse.robot, Position::new(1, 1));
        assert_eq!(warehouse.map, parsed.warehouse.map);
        Ok(())
    }
}
