//! This module implements the priority-queue machinery shared by the solvers: a frontier entry
//! whose ordering reproduces the (f-score, cell) tie-break, index-linked predecessor maps and the
//! lazy-duplicate A* loop used by [AstarSolver](crate::solver::astar::AstarSolver) and
//! [WeightedSolver](crate::solver::weighted::WeightedSolver).

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::Cell;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index stored for roots, which have no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Predecessor and cost-so-far of a discovered cell.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Visit<C> {
    pub parent: usize,
    pub cost: C,
    pub closed: bool,
}

impl<C> Visit<C> {
    pub fn root(cost: C) -> Visit<C> {
        Visit {
            parent: NO_PARENT,
            cost,
            closed: false,
        }
    }
}

pub(crate) struct FrontierEntry<K> {
    pub estimated_cost: K,
    pub cost: K,
    pub cell: Cell,
    pub index: usize,
}

impl<K: PartialOrd> Eq for FrontierEntry<K> {}

impl<K: PartialOrd> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest estimate wins, then the smallest cell
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.cell.cmp(&self.cell),
            s => s,
        }
    }
}

/// Follows parent indices from `start` back to a root and returns the cells root first.
pub(crate) fn reverse_path<V, F>(
    parents: &FxIndexMap<Cell, V>,
    mut parent: F,
    start: usize,
) -> Vec<Cell>
where
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<Cell> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(cell, _)| *cell))
    .collect();
    path.reverse();
    path
}

/// A* where improved cells are pushed again and stale duplicates are skipped when popped. A cell
/// is finalized on its first expansion and never relaxed afterwards. With the consistent
/// heuristics used here this does not change the result for non-negative costs; with negative
/// entry costs it keeps an undirected edge from being relaxed back and forth forever.
pub(crate) fn astar_lazy<C, FN, IN, FH, FS>(
    start: &Cell,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<Cell>, C)>
where
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&Cell) -> IN,
    IN: IntoIterator<Item = (Cell, C)>,
    FH: FnMut(&Cell) -> C,
    FS: FnMut(&Cell) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(FrontierEntry {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        cell: *start,
        index: 0,
    });
    let mut parents: FxIndexMap<Cell, Visit<C>> = FxIndexMap::default();
    parents.insert(*start, Visit::root(Zero::zero()));
    let mut expanded = 0usize;
    while let Some(FrontierEntry { cost, cell, index, .. }) = to_see.pop() {
        if success(&cell) {
            debug!("Reached {} after expanding {} cells", cell, expanded);
            let path = reverse_path(&parents, |v| v.parent, index);
            return Some((path, cost));
        }
        {
            let visit = &mut parents[index];
            // A cell may sit in the heap several times if a cheaper way to it was found.
            // Only the first pop of a cell is expanded.
            if visit.closed {
                continue;
            }
            visit.closed = true;
        }
        expanded += 1;
        for (successor, move_cost) in successors(&cell) {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(Visit {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    if !e.get().closed && new_cost < e.get().cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(Visit {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(FrontierEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                cell: successor,
                index: n,
            });
        }
    }
    debug!("Frontier exhausted after expanding {} cells", expanded);
    None
}
