//! The whole selection process:
//! build corpus graphs -> prune isolated nodes -> embed each corpus -> align -> rank.
//!
//! Stages communicate by explicit collections keyed by corpus name. The canonical node order is
//! the order of the pruned graphs, which is the vocabulary order.

use anyhow::anyhow;
use indexmap::IndexMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::corpus::{build_corpora, prune_with_removed, PruneParams};
use crate::embedder::{embed_corpora, EmbedParams, NodeEmbedder};
use crate::error::SubgraphError;
use crate::io::vocabulary::Vocabulary;
use crate::rank::{align_embeddings, rank_scored, ScoredNode};

/// corpora used when none is given
pub const DEFAULT_CORPORA: [&str; 8] = [
    "austen_2",
    "austen_4",
    "dickens_1",
    "dickens_4",
    "shakespeare_1",
    "shakespeare_5",
    "twain_1",
    "twain_4",
];

/// Parameters of a selection run
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PipelineParams {
    pub embed: EmbedParams,
    pub prune: PruneParams,
    /// number of nodes to select
    pub subgraph_size: usize,
    /// embed corpora in parallel
    pub parallel: bool,
} // end of PipelineParams

impl PipelineParams {
    pub fn new(embed: EmbedParams, prune: PruneParams, subgraph_size: usize, parallel: bool) -> Self {
        PipelineParams {
            embed,
            prune,
            subgraph_size,
            parallel,
        }
    }

    pub fn get_embed_params(&self) -> &EmbedParams {
        &self.embed
    }

    pub fn get_prune_params(&self) -> &PruneParams {
        &self.prune
    }

    pub fn get_subgraph_size(&self) -> usize {
        self.subgraph_size
    }

    pub fn get_parallel(&self) -> bool {
        self.parallel
    }
} // end of impl PipelineParams

impl Default for PipelineParams {
    fn default() -> Self {
        PipelineParams {
            embed: EmbedParams::default(),
            prune: PruneParams::default(),
            subgraph_size: 20,
            parallel: true,
        }
    }
}

/// Result of a run
#[derive(Clone, Debug)]
pub struct Selection {
    /// selected nodes by decreasing score
    selected: Vec<ScoredNode>,
    /// nodes surviving pruning, in vocabulary order
    kept: Vec<String>,
    /// nodes removed by pruning
    removed: Vec<String>,
} // end of Selection

impl Selection {
    pub fn get_selected(&self) -> &[ScoredNode] {
        &self.selected
    }

    /// selected node ids by decreasing score
    pub fn get_selected_ids(&self) -> Vec<String> {
        self.selected.iter().map(|s| s.node.clone()).collect()
    }

    pub fn get_kept(&self) -> &[String] {
        &self.kept
    }

    pub fn get_removed(&self) -> &[String] {
        &self.removed
    }
} // end of impl Selection

/// runs the selection on the adjacency matrices (one by corpus, keyed by corpus name)
pub fn run_pipeline<E>(
    vocabulary: &Vocabulary,
    matrices: &IndexMap<String, Array2<f64>>,
    embedder: &E,
    params: &PipelineParams,
) -> anyhow::Result<Selection>
where
    E: NodeEmbedder + ?Sized,
{
    //
    if params.subgraph_size == 0 {
        log::error!("run_pipeline : subgraph size must be > 0");
        return Err(SubgraphError::InvalidK(0).into());
    }
    log::info!("run_pipeline : {} corpora, vocabulary size {}", matrices.len(), vocabulary.len());
    let corpora = build_corpora(matrices, vocabulary)?;
    let (pruned, removed) = prune_with_removed(&corpora, &params.prune)?;
    // all pruned graphs share this node order
    let kept = match pruned.values().next() {
        Some(corpus) => corpus.node_ids(),
        None => return Err(anyhow!("no corpus after pruning")),
    };
    if kept.is_empty() {
        log::warn!("run_pipeline : no node survived pruning");
        return Ok(Selection {
            selected: Vec::new(),
            kept,
            removed: removed.into_iter().collect(),
        });
    }
    //
    let embeddings = embed_corpora(&pruned, embedder, &params.embed, params.parallel)?;
    let aligned = align_embeddings(&embeddings, &kept)?;
    let selected = rank_scored(&aligned, &kept, params.subgraph_size)?;
    log::info!(
        "run_pipeline : selected {:?}",
        selected.iter().map(|s| s.node.as_str()).collect::<Vec<&str>>()
    );
    //
    Ok(Selection {
        selected,
        kept,
        removed: removed.into_iter().collect(),
    })
} // end of run_pipeline

//========================================================================================

// end of mod tests
