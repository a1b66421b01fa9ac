//! A corpus is a named directed weighted graph whose nodes are vocabulary tokens.
//!
//! Graphs are petgraph [Graph] with the token as node weight and the adjacency value as edge weight.
//! The collection of corpora is an [IndexMap] so that iteration follows the order in which corpora were given.

use indexmap::IndexMap;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;

pub mod builder;
pub mod prune;

pub use builder::*;
pub use prune::*;

/// node weight is the token, edge weight the adjacency value
pub type TokenGraph = Graph<String, f64, Directed>;

/// corpus name -> graph, in input order
pub type Corpora = IndexMap<String, CorpusGraph>;

/// A named graph with its token -> NodeIndex indexation
#[derive(Clone, Debug)]
pub struct CorpusGraph {
    name: String,
    graph: TokenGraph,
    /// given a token get its NodeIndex. Order is node index order.
    nodeindexation: IndexMap<String, NodeIndex>,
} // end of struct CorpusGraph

impl CorpusGraph {
    pub fn new(name: &str, graph: TokenGraph) -> Self {
        let nodeindexation = graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), idx))
            .collect::<IndexMap<String, NodeIndex>>();
        CorpusGraph {
            name: name.to_string(),
            graph,
            nodeindexation,
        }
    } // end of new

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_graph(&self) -> &TokenGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// tokens in node index order
    pub fn node_ids(&self) -> Vec<String> {
        self.nodeindexation.keys().cloned().collect()
    }

    pub fn contains_node(&self, token: &str) -> bool {
        self.nodeindexation.contains_key(token)
    }

    pub fn get_node_index(&self, token: &str) -> Option<NodeIndex> {
        self.nodeindexation.get(token).copied()
    }

    /// weight of edge from -> to if it exists
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let (from, to) = (self.get_node_index(from)?, self.get_node_index(to)?);
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge).copied()
    }
} // end of impl CorpusGraph
