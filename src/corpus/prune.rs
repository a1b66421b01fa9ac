//! Removal of isolated nodes.
//!
//! A node isolated in one corpus cannot be compared across corpora, so it is removed from every corpus.
//! After pruning all graphs have the same node set, in vocabulary order.
//!
//! Removing a node can leave one of its neighbours without any edge. By default pruning is iterated
//! until no graph has an isolated node, so pruning a pruned collection changes nothing.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{Corpora, CorpusGraph};
use crate::error::{SubgraphError, SubgraphResult};

/// Parameters of the pruning
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PruneParams {
    /// if true a self loop is enough for a node not to be isolated
    pub self_loops_connect: bool,
    /// iterate until no isolated node remains. If false only one pass is done.
    pub to_fixpoint: bool,
} // end of PruneParams

impl PruneParams {
    pub fn new(self_loops_connect: bool, to_fixpoint: bool) -> Self {
        PruneParams {
            self_loops_connect,
            to_fixpoint,
        }
    }

    pub fn get_self_loops_connect(&self) -> bool {
        self.self_loops_connect
    }

    pub fn get_to_fixpoint(&self) -> bool {
        self.to_fixpoint
    }
} // end of impl PruneParams

impl Default for PruneParams {
    fn default() -> Self {
        PruneParams {
            self_loops_connect: false,
            to_fixpoint: true,
        }
    }
}

/// Returns the isolated nodes of a corpus in node order.
/// A node is isolated if it has no in or out edge to another node (a self loop counts only if self_loops_connect is set).
pub fn isolated_nodes(corpus: &CorpusGraph, self_loops_connect: bool) -> Vec<String> {
    let graph = corpus.get_graph();
    graph
        .node_indices()
        .filter(|n| !graph.neighbors_undirected(*n).any(|m| self_loops_connect || m != *n))
        .map(|n| graph[n].clone())
        .collect()
} // end of isolated_nodes

// union of isolated nodes over all corpora
fn isolated_union(corpora: &Corpora, self_loops_connect: bool) -> IndexSet<String> {
    let mut isolated = IndexSet::<String>::new();
    for corpus in corpora.values() {
        let corpus_isolated = isolated_nodes(corpus, self_loops_connect);
        log::debug!("corpus {} : {} isolated nodes", corpus.get_name(), corpus_isolated.len());
        isolated.extend(corpus_isolated);
    }
    isolated
}

// nodes that are not present in every corpus
fn not_shared_nodes(corpora: &Corpora) -> IndexSet<String> {
    let mut all = IndexSet::<String>::new();
    for corpus in corpora.values() {
        let graph = corpus.get_graph();
        all.extend(graph.node_indices().map(|n| graph[n].clone()));
    }
    all.into_iter()
        .filter(|token| corpora.values().any(|c| !c.contains_node(token)))
        .collect()
}

/// returns a new graph without the nodes in removed. Edges between kept nodes are kept, relative node order is kept.
pub fn remove_nodes(corpus: &CorpusGraph, removed: &IndexSet<String>) -> CorpusGraph {
    let graph = corpus
        .get_graph()
        .filter_map(|_, token| if removed.contains(token) { None } else { Some(token.clone()) }, |_, w| Some(*w));
    CorpusGraph::new(corpus.get_name(), graph)
} // end of remove_nodes

/// Prunes the collection and returns the new corpora together with the removed tokens.
/// Input corpora are left untouched.
pub fn prune_with_removed(corpora: &Corpora, params: &PruneParams) -> SubgraphResult<(Corpora, IndexSet<String>)> {
    //
    if corpora.is_empty() {
        log::error!("prune : got no graph");
        return Err(SubgraphError::EmptyGraphSet);
    }
    //
    let mut removed = not_shared_nodes(corpora);
    if !removed.is_empty() {
        log::warn!("prune : {} nodes not present in all corpora are removed", removed.len());
    }
    let mut current: Corpora = corpora
        .iter()
        .map(|(name, corpus)| (name.clone(), remove_nodes(corpus, &removed)))
        .collect();
    //
    let mut nb_pass = 0;
    loop {
        let isolated = isolated_union(&current, params.self_loops_connect);
        if isolated.is_empty() {
            break;
        }
        nb_pass += 1;
        log::debug!("prune pass {} : removing {} isolated nodes", nb_pass, isolated.len());
        current = current
            .iter()
            .map(|(name, corpus)| (name.clone(), remove_nodes(corpus, &isolated)))
            .collect();
        removed.extend(isolated);
        if !params.to_fixpoint {
            break;
        }
    }
    //
    let nb_kept = current.values().next().map(|c| c.node_count()).unwrap_or(0);
    log::info!("prune : nb passes = {}, nb removed = {}, nb kept = {}", nb_pass, removed.len(), nb_kept);
    Ok((current, removed))
} // end of prune_with_removed

/// Removes from every corpus the union of nodes isolated in any corpus.
pub fn prune(corpora: &Corpora, params: &PruneParams) -> SubgraphResult<Corpora> {
    prune_with_removed(corpora, params).map(|(pruned, _)| pruned)
}

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::corpus::builder::build_corpora;
    use crate::io::vocabulary::Vocabulary;

    use indexmap::IndexMap;
    use ndarray::{array, Array2};

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn node_sets(corpora: &Corpora) -> Vec<Vec<String>> {
        corpora.values().map(|c| c.node_ids()).collect()
    }

    // a b c d e. In "first" d is isolated, in "second" e has only a self loop
    fn two_corpora() -> Corpora {
        let vocabulary = Vocabulary::parse("a b c d e").unwrap();
        let mut matrices = IndexMap::<String, Array2<f64>>::new();
        matrices.insert(
            String::from("first"),
            array![
                [0., 1., 0., 0., 0.],
                [0., 0., 2., 0., 0.],
                [1., 0., 0., 0., 1.],
                [0., 0., 0., 0., 0.],
                [0., 0., 0., 0., 0.],
            ],
        );
        matrices.insert(
            String::from("second"),
            array![
                [0., 0., 3., 0., 0.],
                [1., 0., 0., 1., 0.],
                [0., 1., 0., 0., 0.],
                [0., 0., 0., 0., 0.],
                [0., 0., 0., 0., 4.],
            ],
        );
        build_corpora(&matrices, &vocabulary).unwrap()
    } // end of two_corpora

    #[test]
    fn test_isolated_nodes() {
        log_init_test();
        //
        let corpora = two_corpora();
        assert_eq!(isolated_nodes(&corpora["first"], false), vec!["d"]);
        assert_eq!(isolated_nodes(&corpora["second"], false), vec!["e"]);
        assert!(isolated_nodes(&corpora["second"], true).is_empty());
    }

    #[test]
    fn test_prune_closure() {
        log_init_test();
        //
        let corpora = two_corpora();
        let (pruned, removed) = prune_with_removed(&corpora, &PruneParams::default()).unwrap();
        assert_eq!(removed.iter().cloned().collect::<Vec<String>>(), vec!["d", "e"]);
        for nodes in node_sets(&pruned) {
            assert_eq!(nodes, vec!["a", "b", "c"]);
        }
        // edges between survivors are kept
        assert_eq!(pruned["first"].edge_weight("b", "c"), Some(2.));
        assert_eq!(pruned["second"].edge_weight("a", "c"), Some(3.));
        assert_eq!(pruned["first"].edge_count(), 3);
        assert_eq!(pruned["second"].edge_count(), 3);
        // inputs untouched
        assert_eq!(corpora["first"].node_count(), 5);
    } // end of test_prune_closure

    #[test]
    fn test_self_loop_connects() {
        log_init_test();
        //
        let corpora = two_corpora();
        let pruned = prune(&corpora, &PruneParams::new(true, true)).unwrap();
        // e is saved in second by its self loop and in first by c -> e
        for nodes in node_sets(&pruned) {
            assert_eq!(nodes, vec!["a", "b", "c", "e"]);
        }
        assert_eq!(pruned["second"].edge_weight("e", "e"), Some(4.));
    }

    #[test]
    fn test_empty_graph_set() {
        log_init_test();
        //
        let res = prune(&Corpora::new(), &PruneParams::default());
        assert!(matches!(res, Err(SubgraphError::EmptyGraphSet)));
    }

    // a -> b in first only, b isolated in second: removing b isolates a in first
    fn cascade_corpora() -> Corpora {
        let vocabulary = Vocabulary::parse("a b c").unwrap();
        let mut matrices = IndexMap::<String, Array2<f64>>::new();
        matrices.insert(String::from("first"), array![[0., 1., 0.], [0., 0., 0.], [0., 0., 0.]]);
        matrices.insert(String::from("second"), array![[0., 0., 1.], [0., 0., 0.], [1., 0., 0.]]);
        build_corpora(&matrices, &vocabulary).unwrap()
    }

    #[test]
    fn test_prune_idempotent() {
        log_init_test();
        //
        let corpora = cascade_corpora();
        let params = PruneParams::default();
        let once = prune(&corpora, &params).unwrap();
        let twice = prune(&once, &params).unwrap();
        assert_eq!(node_sets(&once), node_sets(&twice));
        // c is isolated in first from the start, then b, then a
        for nodes in node_sets(&once) {
            assert!(nodes.is_empty());
        }
    } // end of test_prune_idempotent

    #[test]
    fn test_single_pass_not_idempotent() {
        log_init_test();
        //
        let corpora = cascade_corpora();
        let params = PruneParams::new(false, false);
        let once = prune(&corpora, &params).unwrap();
        // first pass removes b (second) and c (first), leaving a isolated everywhere
        for nodes in node_sets(&once) {
            assert_eq!(nodes, vec!["a"]);
        }
        let twice = prune(&once, &params).unwrap();
        for nodes in node_sets(&twice) {
            assert!(nodes.is_empty());
        }
    } // end of test_single_pass_not_idempotent

    #[test]
    fn test_unshared_nodes_removed() {
        log_init_test();
        //
        let corpora = two_corpora();
        let mut reduced = corpora.clone();
        let removed: IndexSet<String> = ["a"].iter().map(|s| s.to_string()).collect();
        let first = remove_nodes(&reduced["first"], &removed);
        reduced.insert(String::from("first"), first);
        let pruned = prune(&reduced, &PruneParams::default()).unwrap();
        let sets = node_sets(&pruned);
        assert_eq!(sets[0], sets[1]);
        assert!(!sets[0].contains(&String::from("a")));
    } // end of test_unshared_nodes_removed
} // end of mod tests
