use std::collections::{BTreeSet, HashMap};

use aoc_framework::parsing::{parse_lines_with_offset, split_sections};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

#[solution_runner(
    name = "Day 24: Crossed Wires",
    parsed = Device,
    part_one = Day24,
    part_two = Day24
)]
impl super::AdventOfCode2024<24> {}

/*
Input is the initial values of some wires, `x00: 1`, a blank line, then a list of gates, like
`x00 AND y01 -> z02`. Wires carry `0` or `1`, and gates wait for both of their inputs to have a
value before producing their output.

- `AND` outputs 1 if both inputs are 1.
- `OR` outputs 1 if either input is 1.
- `XOR` outputs 1 if the inputs differ.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    And,
    Or,
    Xor,
}

impl Operation {
    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a != b,
        }
    }
}

#[derive(Debug)]
struct Gate {
    inputs: [String; 2],
    operation: Operation,
    output: String,
}

impl Gate {
    fn has_input(&self, wire: &str) -> bool {
        self.inputs.iter().any(|input| input == wire)
    }
}

#[derive(Debug)]
struct Device {
    initial: HashMap<String, bool>,
    gates: Vec<Gate>,
}

#[derive(thiserror::Error, Debug)]
enum ParseDeviceError {
    #[error("expected an initial value formatted as `wire: 0` or `wire: 1`")]
    InvalidInitialValue,

    #[error("expected a gate formatted as `a OP b -> c`")]
    InvalidGate,

    #[error("unknown gate operation {0:?}")]
    UnknownOperation(String),

    #[error("wire {0:?} has more than one source")]
    MultipleSources(String),

    #[error("input has no gates")]
    NoGates,
}

fn parse_initial_value(line: &str) -> Result<(&str, bool), ParseDeviceError> {
    let (wire, value) = line
        .split_once(':')
        .ok_or(ParseDeviceError::InvalidInitialValue)?;
    match value.trim() {
        "0" => Ok((wire.trim(), false)),
        "1" => Ok((wire.trim(), true)),
        _ => Err(ParseDeviceError::InvalidInitialValue),
    }
}

fn parse_gate(line: &str) -> Result<Gate, ParseDeviceError> {
    let (expression, output) = line
        .split_once("->")
        .ok_or(ParseDeviceError::InvalidGate)?;
    let [a, operation, b]: [&str; 3] = expression
        .split_whitespace()
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| ParseDeviceError::InvalidGate)?;
    let operation = match operation {
        "AND" => Operation::And,
        "OR" => Operation::Or,
        "XOR" => Operation::Xor,
        _ => return Err(ParseDeviceError::UnknownOperation(operation.to_string())),
    };
    let output = output.trim();
    if output.is_empty() {
        return Err(ParseDeviceError::InvalidGate);
    }
    Ok(Gate {
        inputs: [a.to_string(), b.to_string()],
        operation,
        output: output.to_string(),
    })
}

impl ParseData for Device {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let (values_section, gates_section) = split_sections(input)?;

        let mut initial = HashMap::new();
        for value in parse_lines_with_offset(values_section, 0, parse_initial_value) {
            let (wire, value) = value?;
            if initial.insert(wire.to_string(), value).is_some() {
                return Err(ParseDeviceError::MultipleSources(wire.to_string()).into());
            }
        }

        let gates_offset = values_section.lines().count() + 1;
        let gates: Vec<_> = parse_lines_with_offset(gates_section, gates_offset, parse_gate)
            .collect::<Result<_, _>>()?;
        if gates.is_empty() {
            return Err(ParseDeviceError::NoGates.into());
        }

        let mut outputs = initial.keys().map(String::as_str).collect::<Vec<_>>();
        outputs.extend(gates.iter().map(|gate| gate.output.as_str()));
        outputs.sort_unstable();
        if let Some(pair) = outputs.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ParseDeviceError::MultipleSources(pair[0].to_string()).into());
        }

        Ok(Self { initial, gates })
    }
}

#[derive(thiserror::Error, Debug)]
enum SimulationError {
    #[error("gates form a loop through wire {0:?}")]
    Loop(String),

    #[error("wire {0:?} never receives a value")]
    Undriven(String),

    #[error("too many `z` wires to fit in a number")]
    TooManyOutputs,
}

fn wire_node<'a>(
    graph: &mut DiGraph<&'a str, ()>,
    nodes: &mut HashMap<&'a str, NodeIndex>,
    wire: &'a str,
) -> NodeIndex {
    *nodes.entry(wire).or_insert_with(|| graph.add_node(wire))
}

impl Device {
    /// Value of every wire once the gates settle.
    ///
    /// Gates are evaluated in topological order of a graph with an edge from each gate input to
    /// the gate output.
    fn simulate(&self) -> Result<HashMap<&str, bool>, SimulationError> {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for wire in self.initial.keys() {
            wire_node(&mut graph, &mut nodes, wire);
        }
        for gate in &self.gates {
            let output = wire_node(&mut graph, &mut nodes, &gate.output);
            for input in &gate.inputs {
                let input = wire_node(&mut graph, &mut nodes, input);
                graph.add_edge(input, output, ());
            }
        }

        let order = toposort(&graph, None)
            .map_err(|cycle| SimulationError::Loop(graph[cycle.node_id()].to_string()))?;
        let sources: HashMap<&str, &Gate> = self
            .gates
            .iter()
            .map(|gate| (gate.output.as_str(), gate))
            .collect();

        let mut values: HashMap<&str, bool> = HashMap::with_capacity(order.len());
        for node in order {
            let wire = graph[node];
            let value = match (self.initial.get(wire), sources.get(wire)) {
                (Some(&value), _) => value,
                (None, Some(gate)) => {
                    let [a, b] = gate.inputs.each_ref().map(|input| {
                        values
                            .get(input.as_str())
                            .copied()
                            .ok_or_else(|| SimulationError::Undriven(input.clone()))
                    });
                    gate.operation.apply(a?, b?)
                }
                (None, None) => return Err(SimulationError::Undriven(wire.to_string())),
            };
            values.insert(wire, value);
        }
        Ok(values)
    }

    /// The number formed by the wires starting with `prefix`, with `00` as the least significant
    /// bit.
    fn read_number(values: &HashMap<&str, bool>, prefix: char) -> Result<u64, SimulationError> {
        let mut bits: Vec<(&str, bool)> = values
            .iter()
            .filter(|(wire, _)| wire.starts_with(prefix))
            .map(|(&wire, &value)| (wire, value))
            .collect();
        if bits.len() > 64 {
            return Err(SimulationError::TooManyOutputs);
        }
        bits.sort_unstable();
        Ok(bits
            .into_iter()
            .rev()
            .fold(0, |number, (_, bit)| (number << 1) | u64::from(bit)))
    }

    fn feeds(&self, wire: &str, operation: Operation) -> bool {
        self.gates
            .iter()
            .any(|gate| gate.operation == operation && gate.has_input(wire))
    }

    /// Gate outputs that break the pattern of a ripple-carry adder.
    ///
    /// In a correct adder, every `z` wire except the final carry comes from an `XOR`. Other
    /// `XOR` gates read `x` and `y` wires directly, and their output feeds another `XOR`. The
    /// output of every `AND` feeds an `OR` gate building the carry. The first bit is a half adder,
    /// so its gates are exempt from the feeding rules.
    fn miswired_outputs(&self) -> BTreeSet<&str> {
        let final_carry = self
            .gates
            .iter()
            .map(|gate| gate.output.as_str())
            .filter(|wire| wire.starts_with('z'))
            .max();

        self.gates
            .iter()
            .filter(|gate| {
                let output = gate.output.as_str();
                let reads_inputs = gate
                    .inputs
                    .iter()
                    .all(|input| input.starts_with('x') || input.starts_with('y'));
                let first_bit = gate.has_input("x00") && gate.has_input("y00");

                let misplaced_output = output.starts_with('z')
                    && Some(output) != final_carry
                    && gate.operation != Operation::Xor;
                let misfed = match gate.operation {
                    Operation::Xor if !reads_inputs => !output.starts_with('z'),
                    Operation::Xor => !first_bit && !self.feeds(output, Operation::Xor),
                    Operation::And => !first_bit && !self.feeds(output, Operation::Or),
                    Operation::Or => false,
                };
                misplaced_output || misfed
            })
            .map(|gate| gate.output.as_str())
            .collect()
    }
}

/*
For part 1, simulate the gates. The wires starting with `z` form a binary number, with `z00` as
the least significant bit. Find the decimal number it outputs.
*/

struct Day24;

impl Solution<PartOne> for Day24 {
    type Input = Device;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let values = input.simulate()?;
        Ok(Device::read_number(&values, 'z')?)
    }
}

/*
For part 2, the device is meant to add the numbers on the `x` and `y` wires, outputting on the `z`
wires. Four pairs of gates have had their output wires swapped. Find the eight wires involved,
sorted and joined with commas.
*/

const SWAPPED_WIRES: usize = 8;

#[derive(thiserror::Error, Debug)]
#[error("found {0} miswired outputs instead of {SWAPPED_WIRES}")]
struct UnexpectedMiswiring(usize);

impl Solution<PartTwo> for Day24 {
    type Input = Device;
    type Output = String;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let miswired = input.miswired_outputs();
        if miswired.len() != SWAPPED_WIRES {
            return Err(UnexpectedMiswiring(miswired.len()).into());
        }
        Ok(miswired.into_iter().collect::<Vec<_>>().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"x00: 1
x01: 1
x02: 1
y00: 0
y01: 1
y02: 0

x00 AND y00 -> z00
x01 XOR y01 -> z01
x02 OR y02 -> z02
";

    /// A 4-bit ripple-carry adder computing 11 + 6.
    const ADDER_INPUT: &str = r"x00: 1
x01: 1
x02: 0
x03: 1
y00: 0
y01: 1
y02: 1
y03: 0

x00 AND y00 -> c00
x00 XOR y00 -> z00
x01 XOR y01 -> s01
s01 XOR c00 -> z01
x01 AND y01 -> a01
s01 AND c00 -> b01
a01 OR b01 -> c01
x02 XOR y02 -> s02
s02 XOR c01 -> z02
x02 AND y02 -> a02
s02 AND c01 -> b02
a02 OR b02 -> c02
x03 XOR y03 -> s03
s03 XOR c02 -> z03
x03 AND y03 -> a03
s03 AND c02 -> b03
a03 OR b03 -> z04
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Device::parse(EXAMPLE_INPUT)?;
        let result = <Day24 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn adder_adds() -> DynamicResult<()> {
        let parsed = Device::parse(ADDER_INPUT)?;
        let values = parsed.simulate()?;
        assert_eq!(Device::read_number(&values, 'x')?, 11);
        assert_eq!(Device::read_number(&values, 'y')?, 6);
        assert_eq!(Device::read_number(&values, 'z')?, 17);
        Ok(())
    }

    fn swap_outputs(input: &str, swaps: &[(&str, &str)]) -> String {
        input
            .lines()
            .map(|line| match line.split_once(" -> ") {
                Some((expression, output)) => {
                    let output = swaps
                        .iter()
                        .find_map(|&(a, b)| {
                            if output == a {
                                Some(b)
                            } else if output == b {
                                Some(a)
                            } else {
                                None
                            }
                        })
                        .unwrap_or(output);
                    format!("{expression} -> {output}\n")
                }
                None => format!("{line}\n"),
            })
            .collect()
    }

    #[test]
    fn correct_adder_has_no_miswiring() -> DynamicResult<()> {
        let parsed = Device::parse(ADDER_INPUT)?;
        assert!(parsed.miswired_outputs().is_empty());
        Ok(())
    }

    #[test]
    fn finds_swapped_outputs() -> DynamicResult<()> {
        let swapped = swap_outputs(ADDER_INPUT, &[("s01", "a01"), ("z02", "c02")]);
        let parsed = Device::parse(&swapped)?;
        let miswired: Vec<_> = parsed.miswired_outputs().into_iter().collect();
        assert_eq!(miswired, vec!["a01", "c02", "s01", "z02"]);

        let swapped = swap_outputs(ADDER_INPUT, &[("z01", "b02"), ("s02", "z03")]);
        let parsed = Device::parse(&swapped)?;
        let miswired: Vec<_> = parsed.miswired_outputs().into_iter().collect();
        assert_eq!(miswired, vec!["b02", "s02", "z01", "z03"]);
        Ok(())
    }

    #[test]
    fn part_two_expects_four_swaps() -> DynamicResult<()> {
        let swapped = swap_outputs(ADDER_INPUT, &[("s01", "a01"), ("z02", "c02")]);
        let parsed = Device::parse(&swapped)?;
        assert!(<Day24 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn loops_are_an_error() -> DynamicResult<()> {
        let parsed = Device::parse("x00: 1\n\nx00 AND a -> b\nx00 OR b -> a\n")?;
        assert!(matches!(parsed.simulate(), Err(SimulationError::Loop(_))));
        Ok(())
    }

    #[test]
    fn rejects_wires_with_two_sources() {
        assert!(Device::parse("x00: 1\n\nx00 AND x00 -> x00\n").is_err());
        assert!(Device::parse("x00: 1\n\nx00 AND x00 -> a\nx00 OR x00 -> a\n").is_err());
    }
}
