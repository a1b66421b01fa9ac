//! Alignment of embeddings on a common node order.
//!
//! Each embedder run returns its own node order. Before distances can be aggregated over corpora,
//! the rows of every corpus are reindexed so that row i is the node canonical\[i\] everywhere.
//! The node set of every corpus must be exactly the canonical set: nothing is dropped or padded.

use indexmap::IndexMap;
use ndarray::{Array2, Axis};

use crate::embedding::CorpusEmbedding;
use crate::error::{SubgraphError, SubgraphResult};

/// reindex the rows of one embedding on the canonical order
pub fn align_embedding(embedding: &CorpusEmbedding, canonical: &[String]) -> SubgraphResult<Array2<f64>> {
    let corpus = embedding.get_corpus();
    if embedding.get_nb_nodes() != canonical.len() {
        log::error!("corpus {} : {} embedded nodes, {} canonical nodes", corpus, embedding.get_nb_nodes(), canonical.len());
        return Err(SubgraphError::alignment(
            corpus,
            format!("{} embedded nodes, {} canonical nodes", embedding.get_nb_nodes(), canonical.len()),
        ));
    }
    let mut rows = Vec::<usize>::with_capacity(canonical.len());
    for node in canonical {
        match embedding.get_node_rank(node) {
            Some(rank) => rows.push(rank),
            None => {
                log::error!("corpus {} : node {} not embedded", corpus, node);
                return Err(SubgraphError::alignment(corpus, format!("node {} not embedded", node)));
            }
        }
    }
    if rows.iter().enumerate().any(|(i, r)| i != *r) {
        log::debug!("corpus {} : rows reordered", corpus);
    }
    Ok(embedding.get_embedded().select(Axis(0), &rows))
} // end of align_embedding

/// reindex all embeddings on the canonical order. Output keeps the corpus order of the input.
pub fn align_embeddings(embeddings: &IndexMap<String, CorpusEmbedding>, canonical: &[String]) -> SubgraphResult<IndexMap<String, Array2<f64>>> {
    let mut aligned = IndexMap::<String, Array2<f64>>::with_capacity(embeddings.len());
    for (name, embedding) in embeddings {
        aligned.insert(name.clone(), align_embedding(embedding, canonical)?);
    }
    log::debug!("aligned {} corpora on {} nodes", aligned.len(), canonical.len());
    Ok(aligned)
} // end of align_embeddings

//========================================================================================

// end of mod tests
