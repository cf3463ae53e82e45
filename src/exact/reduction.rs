//! Lower bounds from cost matrix reduction.
//!
//! Subtracting the minimum of every row and then of every column from a cost matrix keeps the
//! relative cost of all assignments intact; the amount subtracted is therefore a lower bound on
//! the cost of any assignment of open rows to open columns. Every completion of a partial tour is
//! such an assignment once the rows and columns consumed by the path are closed off.

use fixedbitset::FixedBitSet;

use crate::graph::*;

impl CostMatrix {
    /// Returns the total amount a full row-then-column reduction would subtract. Rows or columns
    /// without a finite cell contribute nothing. The matrix is not modified.
    pub fn reduction_cost(&self) -> Weight {
        let size = self.size() as Node;
        let row_minima: Vec<Option<Weight>> = (0..size).map(|i| self.row_minimum(i)).collect();

        let mut total: Weight = row_minima
            .iter()
            .flatten()
            .fold(0, |acc, &m| acc.saturating_add(m));

        for j in 0..size {
            let column_minimum = (0..size)
                .filter_map(|i| {
                    let c = self.get(i, j);
                    (c != INFINITE_WEIGHT).then(|| c - row_minima[i as usize].unwrap_or(0))
                })
                .min();

            if let Some(m) = column_minimum {
                total = total.saturating_add(m);
            }
        }

        total
    }

    /// Reduces the matrix in place (rows first, then columns) and returns the amount subtracted,
    /// which equals [`CostMatrix::reduction_cost`] of the matrix before the call.
    pub fn reduce(&mut self) -> Weight {
        let size = self.size() as Node;
        let mut total: Weight = 0;

        for i in 0..size {
            let Some(m) = self.row_minimum(i) else {
                continue;
            };
            for c in self.row_mut(i) {
                if *c != INFINITE_WEIGHT {
                    *c -= m;
                }
            }
            total = total.saturating_add(m);
        }

        for j in 0..size {
            let Some(m) = self.column(j).filter(|&c| c != INFINITE_WEIGHT).min() else {
                continue;
            };
            for i in 0..size {
                let c = self.get(i, j);
                if c != INFINITE_WEIGHT {
                    self.set(i, j, c - m);
                }
            }
            total = total.saturating_add(m);
        }

        total
    }

    /// Commits the edge `from -> to` of a partial tour starting at `start`; `visited` contains
    /// all nodes of the path including `to`.
    ///
    /// Closes row `from` and column `to` (each node is left and entered exactly once) as well as
    /// every cell between two visited nodes, since using any of them would close a cycle early.
    /// The only exception is `to -> start` once all nodes are visited, which is the final edge
    /// of the tour.
    pub fn close_step(&mut self, from: Node, to: Node, visited: &FixedBitSet, start: Node) {
        self.close_row(from);
        self.close_column(to);

        let all_visited = visited.count_ones(..) == self.size();
        for x in visited.ones() {
            for y in visited.ones() {
                if all_visited && x == to as usize && y == start as usize {
                    continue;
                }
                self.close_cell(x as Node, y as Node);
            }
        }
    }

    fn row_minimum(&self, i: Node) -> Option<Weight> {
        self.row(i)
            .iter()
            .copied()
            .filter(|&c| c != INFINITE_WEIGHT)
            .min()
    }
}

/// Admissible lower bound on every tour that starts with `path` (a sequence of nodes beginning
/// at `start`), given that traversing `path` already costs `cost_so_far`.
///
/// The input matrix is left untouched; the bound is computed on a copy with all committed edges
/// closed off.
pub fn lower_bound(matrix: &CostMatrix, path: &[Node], start: Node, cost_so_far: Weight) -> Weight {
    debug_assert!(path.first().is_none_or(|&s| s == start));

    let mut matrix = matrix.clone();
    let mut visited = FixedBitSet::with_capacity(matrix.size());
    if let Some(&first) = path.first() {
        visited.insert(first as usize);
    }

    for step in path.windows(2) {
        visited.insert(step[1] as usize);
        matrix.close_step(step[0], step[1], &visited, start);
    }

    cost_so_far.saturating_add(matrix.reduction_cost())
}
