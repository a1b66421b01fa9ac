//! Selection of the most distinctive nodes across several weighted directed graphs sharing a vocabulary.
//!
//! Each corpus gives a graph over the vocabulary. Nodes isolated in any corpus are removed from all of them,
//! each pruned graph is embedded and nodes are ranked by the sum over corpora of the distance of their
//! vector to the mean of their vectors over corpora.
//!
//! The main entry points are [pipeline::run_pipeline] and [rank::select_subgraph].

use env_logger::Builder;

#[macro_use]
extern crate lazy_static;

lazy_static! {
    static ref LOG: u64 = {
        let res = init_log();
        res
    };
}

// install a logger facility
fn init_log() -> u64 {
    let _ = Builder::from_default_env().try_init();
    log::debug!("logger initialized");
    return 1;
}

/// installs the env_logger logger once. Level is given by RUST_LOG.
pub fn ensure_log() {
    lazy_static::initialize(&LOG);
}

pub mod error;

pub mod io;

pub mod corpus;

pub mod embedding;

pub mod embedder;

pub mod rank;

pub mod pipeline;

pub mod prelude;
