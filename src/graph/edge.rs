use serde::{Deserialize, Serialize};

use super::*;

/// Index-level edge FROM `.0` TO `.1` with weight `.2`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

/// Label-level edge as reported by [`WeightedGraph::edges`]
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct LabeledEdge<V> {
    pub from: V,
    pub to: V,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn weight(&self) -> Weight {
        self.2
    }
}
