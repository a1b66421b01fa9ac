//! The embedder trait: the seam with the (stochastic) algorithm computing node vectors of a graph.
//!
//! Walk based embedders (node2vec like) are driven by [EmbedParams]. This crate does not train
//! embeddings: [PrecomputedEmbedder] serves vectors computed elsewhere and reloaded with
//! [crate::io::wordvectors]. Tests plug deterministic embedders.
//!
//! An embedder returns its own node order for each corpus. No assumption is made that this order
//! is the same across corpora.

use std::time::SystemTime;

use cpu_time::ProcessTime;
use indexmap::{IndexMap, IndexSet};
use ndarray::Axis;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpora, CorpusGraph};
use crate::embedding::CorpusEmbedding;
use crate::error::SubgraphError;

/// Hyperparameters forwarded to a walk based embedder
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct EmbedParams {
    /// dimension of embedded vectors
    pub dimension: usize,
    /// number of nodes in each walk
    pub walk_length: usize,
    /// number of walks started from each node
    pub num_walks: usize,
    /// context window of the co-occurrence training
    pub window: usize,
    /// nodes occurring less than min_count times in walks are ignored by training
    pub min_count: usize,
    /// number of walks in a training batch
    pub batch_words: usize,
} // end of EmbedParams

impl EmbedParams {
    pub fn new(dimension: usize, walk_length: usize, num_walks: usize, window: usize, min_count: usize, batch_words: usize) -> Self {
        EmbedParams {
            dimension,
            walk_length,
            num_walks,
            window,
            min_count,
            batch_words,
        }
    }

    pub fn get_dimension(&self) -> usize {
        self.dimension
    }

    pub fn get_walk_length(&self) -> usize {
        self.walk_length
    }

    pub fn get_num_walks(&self) -> usize {
        self.num_walks
    }

    pub fn get_window(&self) -> usize {
        self.window
    }

    pub fn get_min_count(&self) -> usize {
        self.min_count
    }

    pub fn get_batch_words(&self) -> usize {
        self.batch_words
    }

    /// useful to set dimension received from command line
    pub fn set_dimension(&mut self, dimension: usize) {
        self.dimension = dimension
    }
} // end of impl EmbedParams

impl Default for EmbedParams {
    fn default() -> Self {
        EmbedParams {
            dimension: 20,
            walk_length: 16,
            num_walks: 100,
            window: 10,
            min_count: 1,
            batch_words: 4,
        }
    }
}

/// Something computing one vector per node of a corpus graph.
/// Sync is required as corpora can be embedded in parallel.
pub trait NodeEmbedder: Sync {
    /// The returned node ids and rows must correspond one to one.
    fn embed(&self, corpus: &CorpusGraph, params: &EmbedParams) -> anyhow::Result<CorpusEmbedding>;
} // end of trait NodeEmbedder

//=========================================================================================

/// Serves embeddings computed outside this crate, one by corpus name.
/// The embedding returned for a graph is restricted to the nodes of the graph, keeping the stored row order.
pub struct PrecomputedEmbedder {
    embeddings: IndexMap<String, CorpusEmbedding>,
} // end of struct PrecomputedEmbedder

impl PrecomputedEmbedder {
    pub fn new(embeddings: IndexMap<String, CorpusEmbedding>) -> Self {
        PrecomputedEmbedder { embeddings }
    }

    pub fn get_embeddings(&self) -> &IndexMap<String, CorpusEmbedding> {
        &self.embeddings
    }
} // end of impl PrecomputedEmbedder

impl NodeEmbedder for PrecomputedEmbedder {
    fn embed(&self, corpus: &CorpusGraph, params: &EmbedParams) -> anyhow::Result<CorpusEmbedding> {
        let name = corpus.get_name();
        let stored = match self.embeddings.get(name) {
            Some(stored) => stored,
            None => {
                log::error!("PrecomputedEmbedder : no embedding for corpus {}", name);
                return Err(SubgraphError::MissingCorpus(name.to_string()).into());
            }
        };
        if stored.get_dimension() != params.get_dimension() {
            log::error!("corpus {} : stored dimension {}, asked {}", name, stored.get_dimension(), params.get_dimension());
            return Err(SubgraphError::DimensionMismatch(format!(
                "corpus {} : stored dimension {}, asked {}",
                name,
                stored.get_dimension(),
                params.get_dimension()
            ))
            .into());
        }
        //
        let rows: Vec<usize> = (0..stored.get_nb_nodes())
            .filter(|rank| stored.get_node_id(*rank).map(|id| corpus.contains_node(id)).unwrap_or(false))
            .collect();
        if rows.len() != corpus.node_count() {
            let missing: Vec<String> = corpus
                .node_ids()
                .into_iter()
                .filter(|id| stored.get_node_rank(id).is_none())
                .collect();
            log::error!("corpus {} : {} graph nodes have no stored vector", name, missing.len());
            return Err(SubgraphError::alignment(name, format!("no stored vector for nodes {:?}", missing)).into());
        }
        let nodeindexation: IndexSet<String> = rows.iter().filter_map(|rank| stored.get_node_id(*rank).cloned()).collect();
        let embedded = stored.get_embedded().select(Axis(0), &rows);
        log::debug!("corpus {} : kept {} of {} stored vectors", name, rows.len(), stored.get_nb_nodes());
        Ok(CorpusEmbedding::new(name, nodeindexation, embedded)?)
    } // end of embed
} // end of impl NodeEmbedder for PrecomputedEmbedder

//=========================================================================================

// the embedder must return exactly the nodes of the graph
fn check_embedded_nodes(corpus: &CorpusGraph, embedding: &CorpusEmbedding) -> Result<(), SubgraphError> {
    let name = corpus.get_name();
    if embedding.get_nb_nodes() != corpus.node_count() {
        return Err(SubgraphError::alignment(
            name,
            format!("graph has {} nodes, embedder returned {} rows", corpus.node_count(), embedding.get_nb_nodes()),
        ));
    }
    if let Some(id) = embedding.get_node_indexation().iter().find(|id| !corpus.contains_node(id)) {
        return Err(SubgraphError::alignment(name, format!("embedder returned unknown node {}", id)));
    }
    Ok(())
} // end of check_embedded_nodes

/// Embeds each corpus, one job by corpus, in parallel if asked.
/// Results are keyed by corpus name in the order of corpora.
pub fn embed_corpora<E>(corpora: &Corpora, embedder: &E, params: &EmbedParams, parallel: bool) -> anyhow::Result<IndexMap<String, CorpusEmbedding>>
where
    E: NodeEmbedder + ?Sized,
{
    //
    log::info!("embedding {} corpora, parallel : {}", corpora.len(), parallel);
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let embed_one = |corpus: &CorpusGraph| -> anyhow::Result<CorpusEmbedding> {
        let embedding = embedder.embed(corpus, params)?;
        check_embedded_nodes(corpus, &embedding)?;
        log::debug!("corpus {} embedded, dimension {}", corpus.get_name(), embedding.get_dimension());
        Ok(embedding)
    };
    let jobs: Vec<&CorpusGraph> = corpora.values().collect();
    let results: Vec<anyhow::Result<CorpusEmbedding>> = if parallel {
        jobs.into_par_iter().map(embed_one).collect()
    } else {
        jobs.into_iter().map(embed_one).collect()
    };
    //
    let mut embeddings = IndexMap::<String, CorpusEmbedding>::with_capacity(corpora.len());
    for (name, res) in corpora.keys().zip(results) {
        match res {
            Ok(embedding) => {
                embeddings.insert(name.clone(), embedding);
            }
            Err(e) => {
                log::error!("embedding of corpus {} failed : {:?}", name, e);
                return Err(e.context(format!("embedding of corpus {} failed", name)));
            }
        }
    }
    log::info!(
        "embedding phase, sys time(s) {:?} cpu time(s) {:?}",
        sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
        cpu_start.elapsed().as_secs_f64()
    );
    Ok(embeddings)
} // end of embed_corpora

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::corpus::builder::build_corpora;
    use crate::io::vocabulary::Vocabulary;

    use ndarray::{array, Array2};

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn corpora() -> Corpora {
        let vocabulary = Vocabulary::parse("x y z").unwrap();
        let mut matrices = IndexMap::<String, Array2<f64>>::new();
        matrices.insert(String::from("a"), array![[0., 1., 0.], [0., 0., 1.], [1., 0., 0.]]);
        matrices.insert(String::from("b"), array![[0., 0., 1.], [1., 0., 0.], [0., 1., 0.]]);
        build_corpora(&matrices, &vocabulary).unwrap()
    }

    fn ids(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    // vectors of "a" stored in reverse order with an extra node
    fn stored() -> IndexMap<String, CorpusEmbedding> {
        let mut stored = IndexMap::new();
        stored.insert(
            String::from("a"),
            CorpusEmbedding::from_node_list("a", &ids(&["w", "z", "y", "x"]), array![[9., 9.], [3., 3.], [2., 2.], [1., 1.]]).unwrap(),
        );
        stored.insert(
            String::from("b"),
            CorpusEmbedding::from_node_list("b", &ids(&["x", "y", "z"]), array![[1., 0.], [2., 0.], [3., 0.]]).unwrap(),
        );
        stored
    }

    #[test]
    fn test_precomputed_restricts_and_keeps_order() {
        log_init_test();
        //
        let embedder = PrecomputedEmbedder::new(stored());
        let corpora = corpora();
        let params = EmbedParams::new(2, 16, 100, 10, 1, 4);
        let embedding = embedder.embed(&corpora["a"], &params).unwrap();
        assert_eq!(embedding.get_node_indexation().iter().cloned().collect::<Vec<String>>(), ids(&["z", "y", "x"]));
        assert_eq!(embedding.get_embedded(), &array![[3., 3.], [2., 2.], [1., 1.]]);
    } // end of test_precomputed_restricts_and_keeps_order

    #[test]
    fn test_precomputed_dimension_checked() {
        log_init_test();
        //
        let embedder = PrecomputedEmbedder::new(stored());
        let res = embedder.embed(&corpora()["a"], &EmbedParams::default());
        assert!(res.is_err());
        let err = res.err().unwrap();
        assert!(matches!(err.downcast_ref::<SubgraphError>(), Some(SubgraphError::DimensionMismatch(_))));
    }

    #[test]
    fn test_precomputed_missing_node() {
        log_init_test();
        //
        let mut stored = stored();
        stored.insert(
            String::from("b"),
            CorpusEmbedding::from_node_list("b", &ids(&["x", "y"]), array![[1., 0.], [2., 0.]]).unwrap(),
        );
        let embedder = PrecomputedEmbedder::new(stored);
        let res = embedder.embed(&corpora()["b"], &EmbedParams::new(2, 16, 100, 10, 1, 4));
        let err = res.err().unwrap();
        assert!(matches!(err.downcast_ref::<SubgraphError>(), Some(SubgraphError::AlignmentError { .. })));
    }

    #[test]
    fn test_embed_corpora_parallel_and_sequential() {
        log_init_test();
        //
        let embedder = PrecomputedEmbedder::new(stored());
        let params = EmbedParams::new(2, 16, 100, 10, 1, 4);
        let corpora = corpora();
        let par = embed_corpora(&corpora, &embedder, &params, true).unwrap();
        let seq = embed_corpora(&corpora, &embedder, &params, false).unwrap();
        assert_eq!(par.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        for (name, embedding) in &par {
            assert_eq!(embedding.get_embedded(), seq[name].get_embedded());
            assert_eq!(embedding.get_node_indexation(), seq[name].get_node_indexation());
        }
    } // end of test_embed_corpora_parallel_and_sequential

    // returns a node that is not in the graph
    struct BadEmbedder;

    impl NodeEmbedder for BadEmbedder {
        fn embed(&self, corpus: &CorpusGraph, _params: &EmbedParams) -> anyhow::Result<CorpusEmbedding> {
            let mut ids = corpus.node_ids();
            ids[0] = String::from("intruder");
            let embedded = Array2::<f64>::zeros((ids.len(), 2));
            Ok(CorpusEmbedding::from_node_list(corpus.get_name(), &ids, embedded)?)
        }
    }

    #[test]
    fn test_embed_corpora_checks_nodes() {
        log_init_test();
        //
        let res = embed_corpora(&corpora(), &BadEmbedder, &EmbedParams::default(), false);
        let err = res.err().unwrap();
        assert!(matches!(err.downcast_ref::<SubgraphError>(), Some(SubgraphError::AlignmentError { .. })));
        assert!(err.to_string().contains("corpus a"));
    }

    #[test]
    fn test_embed_corpora_keeps_error_kind() {
        log_init_test();
        //
        let mut stored = stored();
        stored.shift_remove("b");
        let embedder = PrecomputedEmbedder::new(stored);
        let params = EmbedParams::new(2, 16, 100, 10, 1, 4);
        let err = embed_corpora(&corpora(), &embedder, &params, true).err().unwrap();
        assert!(matches!(err.downcast_ref::<SubgraphError>(), Some(SubgraphError::MissingCorpus(name)) if name == "b"));
    }
} // end of mod tests
