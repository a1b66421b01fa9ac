//! Selection of the most distinctive nodes.
//!
//! [select_subgraph] is the entry point when embeddings come with their own node lists:
//! node lists are checked against embedded rows, every corpus is aligned on the node order of the
//! first corpus and nodes are ranked by [distinct::rank].

use indexmap::IndexMap;
use ndarray::Array2;

pub mod align;
pub mod distinct;

pub use align::*;
pub use distinct::*;

use crate::embedding::CorpusEmbedding;
use crate::error::{SubgraphError, SubgraphResult};

/// checks node lists against embeddings and aligns everything on the first corpus node order
fn aligned_with_first(
    embeddings_by_corpus: &IndexMap<String, Array2<f64>>,
    node_ids_by_corpus: &IndexMap<String, Vec<String>>,
) -> SubgraphResult<(IndexMap<String, Array2<f64>>, Vec<String>)> {
    //
    if embeddings_by_corpus.is_empty() {
        log::error!("select_subgraph : no embedding given");
        return Err(SubgraphError::EmptyGraphSet);
    }
    if let Some(name) = node_ids_by_corpus.keys().find(|name| !embeddings_by_corpus.contains_key(*name)) {
        log::error!("select_subgraph : node list of corpus {} has no embedding", name);
        return Err(SubgraphError::MissingCorpus(name.clone()));
    }
    let mut embeddings = IndexMap::<String, CorpusEmbedding>::with_capacity(embeddings_by_corpus.len());
    for (name, embedded) in embeddings_by_corpus {
        let node_ids = match node_ids_by_corpus.get(name) {
            Some(node_ids) => node_ids,
            None => {
                log::error!("select_subgraph : no node list for corpus {}", name);
                return Err(SubgraphError::MissingCorpus(name.clone()));
            }
        };
        let embedding = CorpusEmbedding::from_node_list(name, node_ids, embedded.clone())?;
        embeddings.insert(name.clone(), embedding);
    }
    //
    let canonical: Vec<String> = match embeddings.values().next() {
        Some(first) => first.get_node_indexation().iter().cloned().collect(),
        None => Vec::new(),
    };
    let aligned = align_embeddings(&embeddings, &canonical)?;
    Ok((aligned, canonical))
} // end of aligned_with_first

/// Returns the min(size, nb nodes) most distinctive nodes with their scores.
pub fn select_subgraph_scored(
    size: usize,
    embeddings_by_corpus: &IndexMap<String, Array2<f64>>,
    node_ids_by_corpus: &IndexMap<String, Vec<String>>,
) -> SubgraphResult<Vec<ScoredNode>> {
    if size == 0 {
        log::error!("select_subgraph : asked for 0 nodes");
        return Err(SubgraphError::InvalidK(size));
    }
    let (aligned, canonical) = aligned_with_first(embeddings_by_corpus, node_ids_by_corpus)?;
    rank_scored(&aligned, &canonical, size)
} // end of select_subgraph_scored

/// Returns the min(size, nb nodes) most distinctive node ids.
/// node_ids_by_corpus\[c\]\[i\] is the node of row i in embeddings_by_corpus\[c\]. Equal scores keep the node order of the first corpus.
pub fn select_subgraph(
    size: usize,
    embeddings_by_corpus: &IndexMap<String, Array2<f64>>,
    node_ids_by_corpus: &IndexMap<String, Vec<String>>,
) -> SubgraphResult<Vec<String>> {
    let selected = select_subgraph_scored(size, embeddings_by_corpus, node_ids_by_corpus)?;
    Ok(selected.into_iter().map(|s| s.node).collect())
} // end of select_subgraph

//========================================================================================

// end of mod tests
