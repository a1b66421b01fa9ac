//! To ease access to most frequently items
//!

pub use crate::error::*;

pub use crate::io::{adjacency::*, report::*, vocabulary::*, wordvectors::*};
pub use crate::io::{load_corpus_embeddings, load_corpus_matrices};

pub use crate::corpus::*;

pub use crate::embedder::*;
pub use crate::embedding::*;

pub use crate::rank::*;

pub use crate::pipeline::*;
