//! Loading of vocabulary, adjacency matrices and precomputed embeddings, dump of results.
//!
//! Corpus files are found in a directory by corpus name: `<dir>/<corpus>.txt` for adjacency
//! matrices, `<dir>/<corpus>.w2v` for embeddings.

use std::path::Path;

use indexmap::IndexMap;
use ndarray::Array2;

pub mod adjacency;
pub mod report;
pub mod vocabulary;
pub mod wordvectors;

use crate::embedding::CorpusEmbedding;
use crate::error::SubgraphResult;

pub const ADJACENCY_EXTENSION: &str = "txt";
pub const EMBEDDING_EXTENSION: &str = "w2v";

/// loads adjacency matrices of all corpora, dim is the vocabulary size
pub fn load_corpus_matrices(dir: &Path, corpora: &[String], dim: usize) -> SubgraphResult<IndexMap<String, Array2<f64>>> {
    let mut matrices = IndexMap::<String, Array2<f64>>::with_capacity(corpora.len());
    for corpus in corpora {
        let path = dir.join(format!("{}.{}", corpus, ADJACENCY_EXTENSION));
        let matrix = adjacency::adjacency_from_path(&path, dim)?;
        matrices.insert(corpus.clone(), matrix);
    }
    Ok(matrices)
} // end of load_corpus_matrices

/// reloads embeddings of all corpora
pub fn load_corpus_embeddings(dir: &Path, corpora: &[String]) -> SubgraphResult<IndexMap<String, CorpusEmbedding>> {
    let mut embeddings = IndexMap::<String, CorpusEmbedding>::with_capacity(corpora.len());
    for corpus in corpora {
        let path = dir.join(format!("{}.{}", corpus, EMBEDDING_EXTENSION));
        let embedding = wordvectors::wordvectors_from_path(&path, corpus)?;
        embeddings.insert(corpus.clone(), embedding);
    }
    Ok(embeddings)
} // end of load_corpus_embeddings
