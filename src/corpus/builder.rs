//! Build the graph of a corpus from its dense adjacency matrix.
//!
//! Row i and column i of the matrix correspond to the token of rank i in the vocabulary.
//! A non null cell (i,j) gives an edge i -> j weighted by the cell value. Self loops are kept.

use indexmap::IndexMap;
use ndarray::{Array2, ArrayView2};

use super::{Corpora, CorpusGraph, TokenGraph};
use crate::error::{SubgraphError, SubgraphResult};
use crate::io::vocabulary::Vocabulary;

/// Builds the graph of corpus name.
/// The shape of the matrix is checked against the vocabulary before any node is created.
/// Weights must be finite and non negative.
pub fn build_corpus_graph(name: &str, adjacency: &ArrayView2<f64>, vocabulary: &Vocabulary) -> SubgraphResult<CorpusGraph> {
    //
    let (nb_rows, nb_cols) = adjacency.dim();
    if nb_rows != nb_cols {
        log::error!("corpus {} : adjacency matrix not square ({}, {})", name, nb_rows, nb_cols);
        return Err(SubgraphError::shape(name, "square matrix", format!("({}, {})", nb_rows, nb_cols)));
    }
    if nb_rows != vocabulary.len() {
        log::error!("corpus {} : matrix dimension {} , vocabulary size {}", name, nb_rows, vocabulary.len());
        return Err(SubgraphError::shape(
            name,
            format!("({0}, {0})", vocabulary.len()),
            format!("({}, {})", nb_rows, nb_cols),
        ));
    }
    // check weights before construction
    for ((row, col), w) in adjacency.indexed_iter() {
        if !w.is_finite() || *w < 0. {
            log::error!("corpus {} : invalid weight {} at ({}, {})", name, w, row, col);
            return Err(SubgraphError::InvalidWeight {
                context: name.to_string(),
                row,
                col,
                value: *w,
            });
        }
    }
    //
    let nb_edges = adjacency.iter().filter(|w| **w != 0.).count();
    let mut graph = TokenGraph::with_capacity(nb_rows, nb_edges);
    // nodes are added in rank order so NodeIndex::index() is the vocabulary rank
    let nodes: Vec<_> = vocabulary.iter().map(|token| graph.add_node(token.clone())).collect();
    let mut nb_self_loops = 0;
    for ((row, col), w) in adjacency.indexed_iter() {
        if *w != 0. {
            graph.add_edge(nodes[row], nodes[col], *w);
            if row == col {
                nb_self_loops += 1;
            }
        }
    }
    log::info!(
        "corpus {} : nb nodes = {}, nb edges = {}, nb self loops = {}",
        name,
        graph.node_count(),
        graph.edge_count(),
        nb_self_loops
    );
    //
    Ok(CorpusGraph::new(name, graph))
} // end of build_corpus_graph

/// builds all corpora. All matrices are checked before the first graph is built.
pub fn build_corpora(matrices: &IndexMap<String, Array2<f64>>, vocabulary: &Vocabulary) -> SubgraphResult<Corpora> {
    for (name, matrix) in matrices {
        let dim = matrix.dim();
        if dim.0 != dim.1 || dim.0 != vocabulary.len() {
            log::error!("build_corpora : corpus {} has matrix of shape {:?}, vocabulary size : {}", name, dim, vocabulary.len());
            return Err(SubgraphError::shape(name, format!("({0}, {0})", vocabulary.len()), format!("{:?}", dim)));
        }
    }
    let mut corpora = Corpora::with_capacity(matrices.len());
    for (name, matrix) in matrices {
        let corpus = build_corpus_graph(name, &matrix.view(), vocabulary)?;
        corpora.insert(name.clone(), corpus);
    }
    Ok(corpora)
} // end of build_corpora

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_build_with_self_loop() {
        log_init_test();
        //
        let vocabulary = Vocabulary::parse("the of and").unwrap();
        let adjacency = array![[0.5, 2., 0.], [0., 0., 0.], [1., 0., 0.]];
        let corpus = build_corpus_graph("austen_2", &adjacency.view(), &vocabulary).unwrap();
        assert_eq!(corpus.get_name(), "austen_2");
        assert_eq!(corpus.node_count(), 3);
        assert_eq!(corpus.edge_count(), 3);
        assert_eq!(corpus.node_ids(), vec!["the", "of", "and"]);
        assert_eq!(corpus.edge_weight("the", "the"), Some(0.5));
        assert_eq!(corpus.edge_weight("the", "of"), Some(2.));
        assert_eq!(corpus.edge_weight("and", "the"), Some(1.));
        // directed
        assert_eq!(corpus.edge_weight("of", "the"), None);
    } // end of test_build_with_self_loop

    #[test]
    fn test_not_square() {
        log_init_test();
        //
        let vocabulary = Vocabulary::parse("the of").unwrap();
        let adjacency = array![[0., 1., 0.], [1., 0., 0.]];
        let res = build_corpus_graph("twain_1", &adjacency.view(), &vocabulary);
        assert!(matches!(res, Err(SubgraphError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_vocabulary_size_mismatch() {
        log_init_test();
        //
        let vocabulary = Vocabulary::parse("the of and").unwrap();
        let adjacency = array![[0., 1.], [1., 0.]];
        let res = build_corpus_graph("twain_1", &adjacency.view(), &vocabulary);
        assert!(matches!(res, Err(SubgraphError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_negative_weight() {
        log_init_test();
        //
        let vocabulary = Vocabulary::parse("the of").unwrap();
        let adjacency = array![[0., -1.], [1., 0.]];
        let res = build_corpus_graph("dickens_1", &adjacency.view(), &vocabulary);
        match res {
            Err(SubgraphError::InvalidWeight { row, col, .. }) => {
                assert_eq!((row, col), (0, 1));
            }
            _ => panic!("expected InvalidWeight, got {:?}", res),
        }
    } // end of test_negative_weight

    #[test]
    fn test_build_corpora_checks_all_first() {
        log_init_test();
        //
        let vocabulary = Vocabulary::parse("the of").unwrap();
        let mut matrices = IndexMap::<String, Array2<f64>>::new();
        matrices.insert(String::from("a"), array![[0., 1.], [1., 0.]]);
        matrices.insert(String::from("b"), array![[0., 1., 0.], [1., 0., 0.], [0., 0., 0.]]);
        let res = build_corpora(&matrices, &vocabulary);
        assert!(matches!(res, Err(SubgraphError::ShapeMismatch { .. })));
        //
        matrices.shift_remove("b");
        let corpora = build_corpora(&matrices, &vocabulary).unwrap();
        assert_eq!(corpora.len(), 1);
        assert_eq!(corpora["a"].edge_count(), 2);
    } // end of test_build_corpora_checks_all_first
} // end of mod tests
