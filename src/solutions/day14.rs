use std::collections::HashSet;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use rayon::prelude::*;
use regex::Regex;

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 14: Restroom Redoubt",
    parsed = Robots,
    part_one = Day14,
    part_two = Day14
)]
impl super::AdventOfCode2024<14> {}

/*
Input is a list of robots, one per line, with a position and velocity: `p=0,4 v=3,-3`.

Positions are `x,y` tiles from the top left of the area, with `x` to the right and `y` down.
Velocities are in tiles per second. Robots teleport to the other side when they would move past an
edge, and they can share a tile without interacting.
*/

type Coordinate = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Robot {
    position: (Coordinate, Coordinate),
    velocity: (Coordinate, Coordinate),
}

#[derive(Debug)]
struct Robots(Vec<Robot>);

#[derive(thiserror::Error, Debug)]
enum ParseRobotsError {
    #[error("expected robot formatted as `p=X,Y v=DX,DY`")]
    InvalidFormat,

    #[error("input has no robots")]
    NoRobots,
}

impl Robots {
    const ROBOT_PATTERN: &str = r"^p=(-?\d+),(-?\d+) v=(-?\d+),(-?\d+)$";
}

impl ParseData for Robots {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let re = Regex::new(Self::ROBOT_PATTERN).expect("pattern should be valid");
        let robots: Vec<_> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let caps = re
                .captures(line.trim())
                .ok_or(ParseRobotsError::InvalidFormat)?;
            Ok(Robot {
                position: (parse_with_context(&caps[1])?, parse_with_context(&caps[2])?),
                velocity: (parse_with_context(&caps[3])?, parse_with_context(&caps[4])?),
            })
        })
        .collect::<Result<_, _>>()?;

        if robots.is_empty() {
            return Err(ParseRobotsError::NoRobots.into());
        }
        Ok(Self(robots))
    }
}

/// The dimensions of the area robots patrol, in tiles.
#[derive(Debug, Clone, Copy)]
struct Area {
    width: Coordinate,
    height: Coordinate,
}

const BATHROOM: Area = Area {
    width: 101,
    height: 103,
};

impl Area {
    /// Where a robot is after a number of seconds, wrapping around the edges.
    fn position_after(self, robot: &Robot, seconds: Coordinate) -> (Coordinate, Coordinate) {
        let (x, y) = robot.position;
        let (dx, dy) = robot.velocity;
        (
            (x + dx * seconds).rem_euclid(self.width),
            (y + dy * seconds).rem_euclid(self.height),
        )
    }

    /// The quadrant index of a position, or `None` for positions on the middle lines.
    fn quadrant(self, (x, y): (Coordinate, Coordinate)) -> Option<usize> {
        let middle_x = self.width / 2;
        let middle_y = self.height / 2;
        if x == middle_x || y == middle_y {
            return None;
        }
        Some(usize::from(x > middle_x) + 2 * usize::from(y > middle_y))
    }

    /// Product of robot counts in each quadrant after a number of seconds.
    fn safety_factor(self, robots: &[Robot], seconds: Coordinate) -> u64 {
        let mut counts = [0_u64; 4];
        for robot in robots {
            if let Some(quadrant) = self.quadrant(self.position_after(robot, seconds)) {
                counts[quadrant] += 1;
            }
        }
        counts
            .into_iter()
            .checked_product()
            .expect("safety factor should not overflow")
    }

    /// Check if every robot is on its own tile after a number of seconds.
    fn all_apart(self, robots: &[Robot], seconds: Coordinate) -> bool {
        let mut occupied = HashSet::with_capacity(robots.len());
        robots
            .iter()
            .all(|robot| occupied.insert(self.position_after(robot, seconds)))
    }

    /// The fewest seconds until every robot is on its own tile.
    ///
    /// Positions repeat after `width * height` seconds, bounding the search. Candidate seconds are
    /// checked in parallel, keeping the earliest match.
    fn first_apart(self, robots: &[Robot]) -> Option<Coordinate> {
        (0..self.width * self.height)
            .into_par_iter()
            .find_first(|&seconds| self.all_apart(robots, seconds))
    }
}

/*
For part 1, predict where the robots will be after 100 seconds in an area 101 tiles wide and 103
tiles tall. Count robots in each quadrant, ignoring robots exactly on the middle lines, and
multiply the counts together for the safety factor.
*/

struct Day14;

impl Solution<PartOne> for Day14 {
    type Input = Robots;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(BATHROOM.safety_factor(&input.0, 100))
    }
}

/*
For part 2, most of the robots should arrange themselves into a picture of a Christmas tree. Find
the fewest seconds that must elapse for the robots to display it.

The picture appears when no two robots share a tile.
*/

#[derive(thiserror::Error, Debug)]
#[error("robots never arrange themselves apart from each other")]
struct NoPictureFound;

impl Solution<PartTwo> for Day14 {
    type Input = Robots;
    type Output = Coordinate;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(BATHROOM.first_apart(&input.0).ok_or(NoPictureFound)?)
    }
}
