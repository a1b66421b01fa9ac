//! Describes the embedded vectors of one corpus.
//!
//! Embedded vectors are stored in an Array2\<f64\>, each row corresponds to a node.
//! The node of a row is given by an IndexSet storing node identifiers:
//! given a node id we get its row using IndexSet::get_index_of,
//! given a row we get the node id by using IndexSet::get_index.
//!
//! The row order is the one chosen by the embedder that produced the vectors. It is **not**
//! assumed to be the same across corpora, see [crate::rank::align].

use indexmap::IndexSet;
use ndarray::{Array2, ArrayView1};

use crate::error::{SubgraphError, SubgraphResult};

/// The embedding of one corpus: node indexation and embedded vectors.
#[derive(Clone, Debug)]
pub struct CorpusEmbedding {
    /// corpus name, used in error messages
    corpus: String,
    /// association of node id to a row of embedded
    nodeindexation: IndexSet<String>,
    /// array (n,d) with n number of nodes, d dimension of embedding
    embedded: Array2<f64>,
} // end of CorpusEmbedding

impl CorpusEmbedding {
    /// checks that there is exactly one row by node
    pub fn new(corpus: &str, nodeindexation: IndexSet<String>, embedded: Array2<f64>) -> SubgraphResult<Self> {
        if nodeindexation.len() != embedded.nrows() {
            log::error!(
                "corpus {} : {} node ids for {} embedded rows",
                corpus,
                nodeindexation.len(),
                embedded.nrows()
            );
            return Err(SubgraphError::alignment(
                corpus,
                format!("{} node ids for {} embedded rows", nodeindexation.len(), embedded.nrows()),
            ));
        }
        Ok(CorpusEmbedding {
            corpus: corpus.to_string(),
            nodeindexation,
            embedded,
        })
    } // end of new

    /// same as new but node ids are given as a list. A repeated node id is an alignment error.
    pub fn from_node_list(corpus: &str, node_ids: &[String], embedded: Array2<f64>) -> SubgraphResult<Self> {
        let nodeindexation: IndexSet<String> = node_ids.iter().cloned().collect();
        if nodeindexation.len() != node_ids.len() {
            log::error!("corpus {} : node list has repeated ids", corpus);
            return Err(SubgraphError::alignment(corpus, "node list has repeated ids"));
        }
        CorpusEmbedding::new(corpus, nodeindexation, embedded)
    }

    pub fn get_corpus(&self) -> &str {
        &self.corpus
    }

    /// to retrieve the indexation
    pub fn get_node_indexation(&self) -> &IndexSet<String> {
        &self.nodeindexation
    }

    /// retrieves the embedded vectors
    pub fn get_embedded(&self) -> &Array2<f64> {
        &self.embedded
    }

    /// dimension of embedded vectors
    pub fn get_dimension(&self) -> usize {
        self.embedded.ncols()
    }

    pub fn get_nb_nodes(&self) -> usize {
        self.embedded.nrows()
    }

    /// get row of a node_id.
    pub fn get_node_rank(&self, node_id: &str) -> Option<usize> {
        self.nodeindexation.get_index_of(node_id)
    }

    /// get node_id given its row
    pub fn get_node_id(&self, rank: usize) -> Option<&String> {
        self.nodeindexation.get_index(rank)
    }

    /// embedded vector of a node
    pub fn get_embedded_node(&self, node_id: &str) -> Option<ArrayView1<f64>> {
        self.get_node_rank(node_id).map(|rank| self.embedded.row(rank))
    }

    pub fn into_parts(self) -> (IndexSet<String>, Array2<f64>) {
        (self.nodeindexation, self.embedded)
    }
} // end of impl CorpusEmbedding

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_rows_must_match_ids() {
        log_init_test();
        //
        let ids = vec![String::from("x"), String::from("y")];
        let res = CorpusEmbedding::from_node_list("austen_2", &ids, array![[1., 2.]]);
        assert!(matches!(res, Err(SubgraphError::AlignmentError { .. })));
        //
        let embedding = CorpusEmbedding::from_node_list("austen_2", &ids, array![[1., 2.], [3., 4.]]).unwrap();
        assert_eq!(embedding.get_dimension(), 2);
        assert_eq!(embedding.get_node_rank("y"), Some(1));
        assert_eq!(embedding.get_embedded_node("y").unwrap()[0], 3.);
        assert!(embedding.get_embedded_node("z").is_none());
    } // end of test_rows_must_match_ids

    #[test]
    fn test_repeated_ids() {
        log_init_test();
        //
        let ids = vec![String::from("x"), String::from("x")];
        let res = CorpusEmbedding::from_node_list("austen_2", &ids, array![[1.], [2.]]);
        assert!(matches!(res, Err(SubgraphError::AlignmentError { .. })));
    }
} // end of mod tests
