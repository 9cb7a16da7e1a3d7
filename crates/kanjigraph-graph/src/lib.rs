pub mod centrality;
pub mod dot;
pub mod edge;
pub mod graph;
pub mod lineage;
pub mod traversal;

pub use centrality::{degree_centrality, hub};
pub use dot::to_dot;
pub use edge::*;
pub use graph::KanjiGraph;
pub use lineage::{lineage, Lineage};
pub use traversal::{adaptive_subgraph, search, AdaptivePolicy, EgoNetwork};
