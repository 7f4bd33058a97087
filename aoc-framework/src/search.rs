//! Frontier search over discrete state spaces.
//!
//! States are small value types (usually a [`Position`][crate::grid::Position], optionally paired
//! with a facing or other data). Searches take a successor closure deriving the next states from a
//! state, so the state space never needs to be built up front.
//!
//! - [`breadth_first_distances`], [`breadth_first_within`] and [`breadth_first_shortest`] expand
//!   level by level for unit step costs.
//! - [`dijkstra`] and [`dijkstra_all`] handle weighted steps, the latter keeping every
//!   minimum-cost path.
//! - [`Memo`] caches results for top-down recursive counting.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use num_traits::{CheckedAdd, Zero};
use thiserror::Error;

/// The result of offering a cost to a [`BestCosts`] map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostUpdate {
    /// The cost is lower than any recorded, and was recorded.
    Improved,
    /// The cost equals the recorded cost.
    Tied,
    /// The cost is higher than the recorded cost, and was discarded.
    Worse,
}

/// A mapping from state to the lowest cost found to reach it.
///
/// A recorded cost is only ever replaced by a strictly lower one.
#[derive(Debug, Clone)]
pub struct BestCosts<S, C> {
    costs: HashMap<S, C>,
}

impl<S, C> Default for BestCosts<S, C> {
    fn default() -> Self {
        Self {
            costs: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash, C: Copy + Ord> BestCosts<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The best cost recorded for a state.
    pub fn get(&self, state: &S) -> Option<C> {
        self.costs.get(state).copied()
    }

    /// Offer a cost for a state, recording it if it is lower than the known best.
    pub fn offer(&mut self, state: S, cost: C) -> CostUpdate {
        match self.costs.entry(state) {
            Entry::Vacant(entry) => {
                entry.insert(cost);
                CostUpdate::Improved
            }
            Entry::Occupied(mut entry) => match cost.cmp(entry.get()) {
                Ordering::Less => {
                    entry.insert(cost);
                    CostUpdate::Improved
                }
                Ordering::Equal => CostUpdate::Tied,
                Ordering::Greater => CostUpdate::Worse,
            },
        }
    }

    /// Record a cost only if it strictly improves on the known best. Returns whether it was
    /// recorded.
    pub fn improve(&mut self, state: S, cost: C) -> bool {
        self.offer(state, cost) == CostUpdate::Improved
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    #[must_use]
    pub fn into_map(self) -> HashMap<S, C> {
        self.costs
    }
}

/// Expand frontiers level by level, calling `on_level` with each new frontier and its distance.
///
/// Expansion stops when the frontier is empty, or when `on_level` returns `false`.
fn expand_levels<S, I, F, L>(
    starts: impl IntoIterator<Item = S>,
    mut successors: F,
    mut on_level: L,
) where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> I,
    L: FnMut(&[S], usize) -> bool,
{
    let mut visited = HashSet::new();
    let mut frontier: Vec<S> = starts
        .into_iter()
        .filter(|state| visited.insert(state.clone()))
        .collect();
    let mut distance = 0;

    while !frontier.is_empty() && on_level(&frontier, distance) {
        let mut next_frontier = Vec::new();
        for state in &frontier {
            for next in successors(state) {
                if visited.insert(next.clone()) {
                    next_frontier.push(next);
                }
            }
        }
        frontier = next_frontier;
        distance += 1;
    }
}

/// The number of steps to every state reachable from the starts.
///
/// Every step costs one, so the first level a state appears on is its shortest distance.
pub fn breadth_first_distances<S, I, F>(
    starts: impl IntoIterator<Item = S>,
    successors: F,
) -> HashMap<S, usize>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> I,
{
    breadth_first_within(starts, successors, usize::MAX)
}

/// The number of steps to every state reachable from the starts in at most `max_steps` steps.
pub fn breadth_first_within<S, I, F>(
    starts: impl IntoIterator<Item = S>,
    successors: F,
    max_steps: usize,
) -> HashMap<S, usize>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> I,
{
    let mut distances = HashMap::new();
    expand_levels(starts, successors, |frontier, distance| {
        distances.extend(frontier.iter().map(|state| (state.clone(), distance)));
        distance < max_steps
    });
    distances
}

/// The minimum number of steps from any start to a state satisfying `is_goal`.
///
/// Returns `None` if no goal is reachable.
pub fn breadth_first_shortest<S, I, F, G>(
    starts: impl IntoIterator<Item = S>,
    successors: F,
    mut is_goal: G,
) -> Option<usize>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> I,
    G: FnMut(&S) -> bool,
{
    let mut found = None;
    expand_levels(starts, successors, |frontier, distance| {
        if frontier.iter().any(&mut is_goal) {
            found = Some(distance);
            false
        } else {
            true
        }
    });
    found
}

/// Adding step costs overflowed the cost type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("path cost overflowed")]
pub struct CostOverflow;

/// An entry of the priority queue, ordered so the lowest cost pops first.
struct Queued<S, C> {
    cost: C,
    state: S,
}

impl<S, C: Ord> PartialEq for Queued<S, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<S, C: Ord> Eq for Queued<S, C> {}

impl<S, C: Ord> PartialOrd for Queued<S, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, C: Ord> Ord for Queued<S, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // flip for a min-heap on cost
        other.cost.cmp(&self.cost)
    }
}

/// Find the minimum cost from any start to a state satisfying `is_goal`, returning the goal
/// state reached with its cost.
///
/// `successors` yields next states paired with the non-negative cost of the step to them.
///
/// # Errors
///
/// [`CostOverflow`] if summing step costs overflows.
pub fn dijkstra<S, C, I, F, G>(
    starts: impl IntoIterator<Item = S>,
    mut successors: F,
    mut is_goal: G,
) -> Result<Option<(S, C)>, CostOverflow>
where
    S: Clone + Eq + Hash,
    C: Copy + Ord + Zero + CheckedAdd,
    I: IntoIterator<Item = (S, C)>,
    F: FnMut(&S) -> I,
    G: FnMut(&S) -> bool,
{
    let mut best = BestCosts::new();
    let mut queue = BinaryHeap::new();
    for state in starts {
        if best.improve(state.clone(), C::zero()) {
            queue.push(Queued {
                cost: C::zero(),
                state,
            });
        }
    }

    while let Some(Queued { cost, state }) = queue.pop() {
        // skip stale entries superseded by a cheaper one
        if best.get(&state).is_some_and(|recorded| cost > recorded) {
            continue;
        }
        if is_goal(&state) {
            return Ok(Some((state, cost)));
        }
        for (next, step_cost) in successors(&state) {
            let next_cost = cost.checked_add(&step_cost).ok_or(CostOverflow)?;
            if best.improve(next.clone(), next_cost) {
                queue.push(Queued {
                    cost: next_cost,
                    state: next,
                });
            }
        }
    }

    Ok(None)
}

/// Minimum costs to every reachable state, with every predecessor lying on a minimum-cost path.
#[derive(Debug, Clone)]
pub struct ShortestPaths<S, C> {
    costs: HashMap<S, C>,
    predecessors: HashMap<S, Vec<S>>,
}

impl<S, C> ShortestPaths<S, C>
where
    S: Clone + Eq + Hash,
    C: Copy + Ord,
{
    /// The minimum cost to reach a state.
    pub fn cost(&self, state: &S) -> Option<C> {
        self.costs.get(state).copied()
    }

    /// The minimum cost among the given states, ignoring unreachable ones.
    pub fn min_cost_among<'a>(&self, states: impl IntoIterator<Item = &'a S>) -> Option<C>
    where
        S: 'a,
    {
        states
            .into_iter()
            .filter_map(|state| self.cost(state))
            .min()
    }

    /// Every state lying on any minimum-cost path to the cheapest of the given goal states.
    ///
    /// When several goals tie for the minimum cost, paths to all of them are included.
    pub fn states_on_shortest_paths<'a>(
        &self,
        goals: impl IntoIterator<Item = &'a S>,
    ) -> HashSet<S>
    where
        S: 'a,
    {
        let goals: Vec<&S> = goals.into_iter().collect();
        let Some(min_cost) = self.min_cost_among(goals.iter().copied()) else {
            return HashSet::new();
        };

        let mut on_paths = HashSet::new();
        let mut stack: Vec<S> = goals
            .into_iter()
            .filter(|goal| self.cost(goal) == Some(min_cost))
            .cloned()
            .collect();
        while let Some(state) = stack.pop() {
            if let Some(previous) = self.predecessors.get(&state) {
                stack.extend(
                    previous
                        .iter()
                        .filter(|previous| !on_paths.contains(*previous))
                        .cloned(),
                );
            }
            on_paths.insert(state);
        }
        on_paths
    }
}

/// Find the minimum cost to every state reachable from the starts, keeping all predecessors that
/// tie for the minimum.
///
/// The search runs to completion; ties are only known to be minimal once every cheaper state has
/// been settled.
///
/// # Errors
///
/// [`CostOverflow`] if summing step costs overflows.
pub fn dijkstra_all<S, C, I, F>(
    starts: impl IntoIterator<Item = S>,
    mut successors: F,
) -> Result<ShortestPaths<S, C>, CostOverflow>
where
    S: Clone + Eq + Hash,
    C: Copy + Ord + Zero + CheckedAdd,
    I: IntoIterator<Item = (S, C)>,
    F: FnMut(&S) -> I,
{
    let mut best = BestCosts::new();
    let mut predecessors: HashMap<S, Vec<S>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    for state in starts {
        if best.improve(state.clone(), C::zero()) {
            queue.push(Queued {
                cost: C::zero(),
                state,
            });
        }
    }

    while let Some(Queued { cost, state }) = queue.pop() {
        if best.get(&state).is_some_and(|recorded| cost > recorded) {
            continue;
        }
        for (next, step_cost) in successors(&state) {
            let next_cost = cost.checked_add(&step_cost).ok_or(CostOverflow)?;
            match best.offer(next.clone(), next_cost) {
                CostUpdate::Improved => {
                    predecessors.insert(next.clone(), vec![state.clone()]);
                    queue.push(Queued {
                        cost: next_cost,
                        state: next,
                    });
                }
                CostUpdate::Tied => {
                    predecessors.entry(next).or_default().push(state.clone());
                }
                CostUpdate::Worse => {}
            }
        }
    }

    Ok(ShortestPaths {
        costs: best.into_map(),
        predecessors,
    })
}

/// A memoization table for recursive computations.
///
/// ```
/// # use aoc_framework::search::Memo;
/// fn fibonacci(memo: &mut Memo<u64, u64>, n: u64) -> u64 {
///     memo.get_or_insert_with(n, |memo| {
///         if n < 2 { n } else { fibonacci(memo, n - 1) + fibonacci(memo, n - 2) }
///     })
/// }
///
/// let mut memo = Memo::new();
/// assert_eq!(fibonacci(&mut memo, 80), 23_416_728_348_467_685);
/// ```
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    results: HashMap<K, V>,
    computed: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            results: HashMap::new(),
            computed: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `key`, or compute it with `compute` and cache it.
    ///
    /// `compute` receives the memo so it can recurse through it.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&mut Self) -> V) -> V {
        if let Some(result) = self.results.get(&key) {
            return result.clone();
        }
        self.computed += 1;
        let result = compute(self);
        self.results.insert(key, result.clone());
        result
    }

    /// The number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The number of times a result had to be computed rather than read from the cache.
    #[must_use]
    pub fn computed(&self) -> usize {
        self.computed
    }
}
