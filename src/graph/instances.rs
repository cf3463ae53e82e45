//! Fixed instances used by the solver binary and the tests.

use super::*;

const CITIES: [&str; 20] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T",
];

const ROADS: [(&str, &str, Weight); 35] = [
    ("A", "B", 20),
    ("A", "C", 10),
    ("A", "E", 7),
    ("B", "D", 6),
    ("B", "E", 8),
    ("C", "D", 3),
    ("C", "E", 9),
    ("D", "E", 17),
    ("D", "F", 11),
    ("D", "G", 5),
    ("E", "G", 9),
    ("F", "H", 9),
    ("G", "F", 7),
    ("G", "H", 13),
    ("H", "I", 15),
    ("I", "J", 10),
    ("I", "K", 12),
    ("J", "L", 7),
    ("K", "L", 8),
    ("K", "M", 20),
    ("L", "N", 11),
    ("M", "O", 5),
    ("M", "P", 14),
    ("N", "O", 10),
    ("O", "Q", 13),
    ("P", "Q", 9),
    ("P", "R", 18),
    ("Q", "S", 6),
    ("R", "S", 12),
    ("R", "T", 22),
    ("S", "T", 10),
    ("L", "A", 25),
    ("P", "C", 19),
    ("S", "G", 17),
    ("T", "A", 30),
];

/// Cost of the cheapest tour through [`twenty_cities`]
pub const TWENTY_CITIES_OPTIMUM: Weight = 256;

/// Sparse undirected road network on the cities `A` to `T`; tours start at `A`.
pub fn twenty_cities() -> GraphResult<WeightedGraph<&'static str>, &'static str> {
    let mut graph = WeightedGraph::new_undirected();
    for city in CITIES {
        graph.add_vertex(city)?;
    }
    for (u, v, w) in ROADS {
        graph.add_edge(u, v, w)?;
    }
    Ok(graph)
}

/// Undirected diamond `A-B-C-D` with both diagonals; the cheapest tour costs 12.
pub fn diamond() -> GraphResult<WeightedGraph<&'static str>, &'static str> {
    WeightedGraph::try_from_edges(
        false,
        [
            ("A", "B", 1),
            ("A", "C", 4),
            ("A", "D", 3),
            ("B", "C", 2),
            ("B", "D", 5),
            ("C", "D", 6),
        ],
    )
}
