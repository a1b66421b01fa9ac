//! an executable selecting the most distinctive nodes of a set of corpora
//! example usage:
//! subgraph --vocab functionwords_list.txt --dir dataset --embeddings vectors --size 20
//! subgraph --vocab functionwords_list.txt --dir dataset --embeddings vectors --corpora austen_2,twain_1 --dim 64 --output selected.csv
//!
//!  adjacency matrices are read in dir/corpus.txt, node vectors (word2vec text format) in embeddings/corpus.w2v
//!  RUST_LOG gives the log level

use std::path::Path;

use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command};

use distinctsub::prelude::*;

fn parse_usize(matches: &ArgMatches, name: &str, default: usize) -> Result<usize, anyhow::Error> {
    match matches.value_of(name) {
        Some(str) => {
            let res = str.parse::<usize>();
            match res {
                Ok(val) => Ok(val),
                _ => Err(anyhow!("error parsing {}", name)),
            }
        }
        _ => Ok(default),
    }
} // end of parse_usize

fn parse_params(matches: &ArgMatches) -> Result<PipelineParams, anyhow::Error> {
    log::debug!("in parse_params");
    let mut params = PipelineParams::default();
    //
    params.subgraph_size = parse_usize(matches, "size", params.subgraph_size)?;
    if params.subgraph_size == 0 {
        return Err(anyhow!("size must be > 0"));
    }
    let dimension = parse_usize(matches, "dim", params.embed.get_dimension())?;
    params.embed.set_dimension(dimension);
    //
    params.prune = PruneParams::new(matches.is_present("selfloops"), !matches.is_present("singlepass"));
    params.parallel = !matches.is_present("sequential");
    //
    Ok(params)
} // end of parse_params

fn parse_corpora(matches: &ArgMatches) -> Vec<String> {
    match matches.value_of("corpora") {
        Some(list) => list
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        None => DEFAULT_CORPORA.iter().map(|s| s.to_string()).collect(),
    }
} // end of parse_corpora

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    //
    let params = parse_params(matches)?;
    let corpora = parse_corpora(matches);
    if corpora.is_empty() {
        return Err(anyhow!("no corpus given"));
    }
    log::info!("corpora : {:?}", corpora);
    log::info!("parameters : {:?}", params);
    //
    let vocab_file = matches.value_of("vocab").ok_or_else(|| anyhow!("vocabulary file required"))?;
    let dir = matches.value_of("dir").ok_or_else(|| anyhow!("adjacency directory required"))?;
    let emb_dir = matches.value_of("embeddings").ok_or_else(|| anyhow!("embedding directory required"))?;
    //
    let vocabulary = Vocabulary::from_path(Path::new(vocab_file))?;
    let matrices = load_corpus_matrices(Path::new(dir), &corpora, vocabulary.len())?;
    let embedder = PrecomputedEmbedder::new(load_corpus_embeddings(Path::new(emb_dir), &corpora)?);
    //
    let selection = run_pipeline(&vocabulary, &matrices, &embedder, &params)?;
    log::info!("nb nodes kept : {}, nb nodes removed : {}", selection.get_kept().len(), selection.get_removed().len());
    //
    match matches.value_of("output") {
        Some(output) => dump_selection(Path::new(output), selection.get_selected())?,
        None => write_selection(std::io::stdout(), selection.get_selected())?,
    }
    Ok(())
} // end of run

pub fn main() {
    //
    distinctsub::ensure_log();
    log::info!("logger initialized");
    //
    let matches = Command::new("subgraph")
        .arg_required_else_help(true)
        .arg(Arg::new("vocab")
            .long("vocab")
            .takes_value(true)
            .required(true)
            .help("file with blank separated vocabulary tokens"))
        .arg(Arg::new("dir")
            .long("dir")
            .takes_value(true)
            .required(true)
            .help("directory of adjacency matrices corpus.txt"))
        .arg(Arg::new("embeddings")
            .long("embeddings")
            .takes_value(true)
            .required(true)
            .help("directory of node vectors corpus.w2v"))
        .arg(Arg::new("corpora")
            .long("corpora")
            .takes_value(true)
            .required(false)
            .help("comma separated corpus names"))
        .arg(Arg::new("size")
            .long("size")
            .short('k')
            .takes_value(true)
            .help("number of nodes to select, default 20"))
        .arg(Arg::new("dim")
            .long("dim")
            .short('d')
            .takes_value(true)
            .help("dimension of node vectors, default 20"))
        .arg(Arg::new("output")
            .long("output")
            .short('o')
            .takes_value(true)
            .help("csv file for selected nodes, default stdout"))
        .arg(Arg::new("selfloops")
            .long("selfloops")
            .help("a self loop is enough for a node not to be isolated"))
        .arg(Arg::new("singlepass")
            .long("single-pass")
            .help("only one pruning pass"))
        .arg(Arg::new("sequential")
            .long("sequential")
            .help("embed corpora one after the other"))
    .get_matches();
    //
    if let Err(e) = run(&matches) {
        log::error!("subgraph failed : {:?}", e);
        eprintln!("subgraph failed : {}", e);
        std::process::exit(1);
    }
} // end of main
