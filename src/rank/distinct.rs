//! Distinctiveness of nodes across corpora.
//!
//! For each node the centroid of its vectors over the corpora is computed (the mean is taken over corpora, not over nodes).
//! The score of a node is the sum over corpora of the L2 distance between the vector of the node in the corpus and its centroid.
//! Nodes are then sorted by decreasing score, equal scores keeping the input node order.
//!
//! All embedded matrices must already be aligned: row i is node i in every corpus (see [super::align]).

use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};
use ndarray::{Array1, Array2, ArrayView2, Zip};
use num_traits::Float;
use serde::Serialize;

use crate::error::{SubgraphError, SubgraphResult};

/// A selected node with its distinctiveness score. rank begins at 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredNode {
    pub rank: usize,
    pub node: String,
    pub score: f64,
} // end of ScoredNode

// checks all matrices have nb_nodes rows, the same number of columns and finite values.
// returns the dimension
fn check_shapes<F: Float>(embeddings: &[(&str, ArrayView2<F>)], nb_nodes: Option<usize>) -> SubgraphResult<usize> {
    let (first_name, first) = match embeddings.first() {
        Some(first) => first,
        None => {
            log::error!("distinctiveness : no embedding given");
            return Err(SubgraphError::EmptyGraphSet);
        }
    };
    let (nb_rows, dim) = first.dim();
    if let Some(nb_nodes) = nb_nodes {
        if nb_rows != nb_nodes {
            log::error!("corpus {} has {} rows, expected {} nodes", first_name, nb_rows, nb_nodes);
            return Err(SubgraphError::DimensionMismatch(format!(
                "corpus {} has {} rows, expected {} nodes",
                first_name, nb_rows, nb_nodes
            )));
        }
    }
    for (name, embedded) in embeddings {
        if embedded.dim() != (nb_rows, dim) {
            log::error!("corpus {} has shape {:?}, corpus {} has shape {:?}", name, embedded.dim(), first_name, (nb_rows, dim));
            return Err(SubgraphError::DimensionMismatch(format!(
                "corpus {} has shape {:?}, corpus {} has shape {:?}",
                name,
                embedded.dim(),
                first_name,
                (nb_rows, dim)
            )));
        }
        if let Some(((i, j), _)) = embedded.indexed_iter().find(|(_, v)| !v.is_finite()) {
            log::error!("corpus {} : non finite value at ({}, {})", name, i, j);
            return Err(SubgraphError::DimensionMismatch(format!("corpus {} : non finite value at ({}, {})", name, i, j)));
        }
    }
    Ok(dim)
} // end of check_shapes

/// per node and per dimension mean over corpora
pub fn centroid<F: Float>(embeddings: &[ArrayView2<F>]) -> SubgraphResult<Array2<f64>> {
    let named: Vec<(&str, ArrayView2<F>)> = embeddings.iter().map(|e| ("", e.view())).collect();
    check_shapes(&named, None)?;
    Ok(centroid_unchecked(&named))
}

fn centroid_unchecked<F: Float>(embeddings: &[(&str, ArrayView2<F>)]) -> Array2<f64> {
    let mut centroid = Array2::<f64>::zeros(embeddings[0].1.dim());
    for (_, embedded) in embeddings {
        Zip::from(&mut centroid).and(embedded).for_each(|c, v| *c += v.to_f64().unwrap_or(0.));
    }
    centroid /= embeddings.len() as f64;
    centroid
}

// sum over corpora of distances to centroid
fn scores_unchecked<F: Float>(embeddings: &[(&str, ArrayView2<F>)]) -> Array1<f64> {
    let centroid = centroid_unchecked(embeddings);
    let mut scores = Array1::<f64>::zeros(centroid.nrows());
    for (name, embedded) in embeddings {
        for (i, (row, center)) in embedded.outer_iter().zip(centroid.outer_iter()).enumerate() {
            let dist2 = row
                .iter()
                .zip(center.iter())
                .map(|(v, c)| {
                    let delta = v.to_f64().unwrap_or(0.) - c;
                    delta * delta
                })
                .sum::<f64>();
            scores[i] += dist2.sqrt();
        }
        log::trace!("corpus {} distances accumulated", name);
    }
    scores
} // end of scores_unchecked

/// Distinctiveness score of each row.
pub fn distinctiveness_scores<F: Float>(embeddings: &[ArrayView2<F>]) -> SubgraphResult<Array1<f64>> {
    let named: Vec<(&str, ArrayView2<F>)> = embeddings.iter().map(|e| ("", e.view())).collect();
    check_shapes(&named, None)?;
    Ok(scores_unchecked(&named))
}

/// Returns the min(k, nb nodes) most distinctive nodes with their scores, by decreasing score.
/// Row i of every embedded matrix must be node node_ids\[i\].
pub fn rank_scored<F: Float>(embeddings: &IndexMap<String, Array2<F>>, node_ids: &[String], k: usize) -> SubgraphResult<Vec<ScoredNode>> {
    //
    if k == 0 {
        log::error!("rank : asked for 0 nodes");
        return Err(SubgraphError::InvalidK(k));
    }
    let unique: IndexSet<&String> = node_ids.iter().collect();
    if unique.len() != node_ids.len() {
        log::error!("rank : node list has repeated ids");
        return Err(SubgraphError::alignment("node list", "repeated node ids"));
    }
    let named: Vec<(&str, ArrayView2<F>)> = embeddings.iter().map(|(name, e)| (name.as_str(), e.view())).collect();
    let dim = check_shapes(&named, Some(node_ids.len()))?;
    log::debug!("rank : {} corpora, {} nodes, dimension {}", named.len(), node_ids.len(), dim);
    //
    let scores = scores_unchecked(&named);
    let mut order: Vec<usize> = (0..node_ids.len()).collect();
    // stable sort so equal scores keep node order
    order.sort_by(|a, b| scores[*b].partial_cmp(&scores[*a]).unwrap_or(Ordering::Equal));
    //
    let nb_kept = if k > node_ids.len() {
        log::info!("rank : asked {} nodes, only {} available, returning all", k, node_ids.len());
        node_ids.len()
    } else {
        k
    };
    let selected: Vec<ScoredNode> = order
        .into_iter()
        .take(nb_kept)
        .enumerate()
        .map(|(rank, i)| ScoredNode {
            rank,
            node: node_ids[i].clone(),
            score: scores[i],
        })
        .collect();
    if let (Some(first), Some(last)) = (selected.first(), selected.last()) {
        log::info!("rank : selected {} nodes, scores from {:.3e} to {:.3e}", selected.len(), first.score, last.score);
    }
    Ok(selected)
} // end of rank_scored

/// Returns the min(k, nb nodes) most distinctive node ids, by decreasing score.
pub fn rank<F: Float>(embeddings: &IndexMap<String, Array2<F>>, node_ids: &[String], k: usize) -> SubgraphResult<Vec<String>> {
    Ok(rank_scored(embeddings, node_ids, k)?.into_iter().map(|s| s.node).collect())
}

//========================================================================================

// end of mod tests
