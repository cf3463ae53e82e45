use std::fmt;

use super::*;

/// Dense square cost matrix in row-major order. Cell `(i, j)` holds the weight of the cheapest
/// edge FROM `i` TO `j` or [`INFINITE_WEIGHT`] if there is none; the diagonal is always infinite.
#[derive(Clone, PartialEq, Eq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<Weight>,
}

impl CostMatrix {
    /// Creates a `size x size` matrix with all cells closed
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![INFINITE_WEIGHT; size * size],
        }
    }

    /// Builds the matrix from the adjacency lists of `graph`; parallel edges collapse to the
    /// cheapest one and self-loops are ignored.
    pub fn from_graph<G: WeightedAdjacencyList>(graph: &G) -> Self {
        let mut matrix = Self::new(graph.len());
        for u in graph.vertices_range() {
            for &(v, w) in graph.neighbors_of(u) {
                if u != v && w < matrix.get(u, v) {
                    matrix.set(u, v, w);
                }
            }
        }
        matrix
    }

    /// Creates a matrix from explicit rows; cells equal to [`INFINITE_WEIGHT`] are closed.
    ///
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// ** Panics if i or j >= size **
    pub fn get(&self, i: Node, j: Node) -> Weight {
        self.cells[self.offset(i, j)]
    }

    /// ** Panics if i or j >= size **
    pub fn set(&mut self, i: Node, j: Node, weight: Weight) {
        let offset = self.offset(i, j);
        self.cells[offset] = weight;
    }

    pub fn is_finite(&self, i: Node, j: Node) -> bool {
        self.get(i, j) != INFINITE_WEIGHT
    }

    pub fn row(&self, i: Node) -> &[Weight] {
        let begin = i as usize * self.size;
        &self.cells[begin..begin + self.size]
    }

    pub(crate) fn row_mut(&mut self, i: Node) -> &mut [Weight] {
        let begin = i as usize * self.size;
        &mut self.cells[begin..begin + self.size]
    }

    pub fn column(&self, j: Node) -> impl Iterator<Item = Weight> + '_ {
        self.cells
            .iter()
            .skip(j as usize)
            .step_by(self.size.max(1))
            .copied()
    }

    pub fn close_cell(&mut self, i: Node, j: Node) {
        self.set(i, j, INFINITE_WEIGHT);
    }

    pub fn close_row(&mut self, i: Node) {
        self.row_mut(i).fill(INFINITE_WEIGHT);
    }

    pub fn close_column(&mut self, j: Node) {
        let size = self.size;
        self.cells
            .iter_mut()
            .skip(j as usize)
            .step_by(size.max(1))
            .for_each(|c| *c = INFINITE_WEIGHT);
    }

    /// Number of finite cells
    pub fn number_of_open_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != INFINITE_WEIGHT).count()
    }

    fn offset(&self, i: Node, j: Node) -> usize {
        debug_assert!((i as usize) < self.size && (j as usize) < self.size);
        i as usize * self.size + j as usize
    }
}

impl fmt::Debug for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size as Node {
            for (j, &c) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if c == INFINITE_WEIGHT {
                    write!(f, "{:>5}", "inf")?;
                } else {
                    write!(f, "{c:>5}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
