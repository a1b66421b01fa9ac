//! Reload node embeddings dumped in the word2vec text format.
//!
//! This is the format written by word2vec like trainers (and node2vec implementations built on them):
//! an optional header line "nb_vectors dimension" followed by one line per node
//! "token v_1 ... v_d", fields separated by blanks.
//! A first line made of exactly two integers is taken as the header when the following line
//! carries that many values, otherwise it is the vector of a numeric token.

use std::fs::OpenOptions;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use indexmap::IndexSet;
use ndarray::Array2;

use crate::embedding::CorpusEmbedding;
use crate::error::{SubgraphError, SubgraphResult};

// A first line "nb dim" is a header only if the next line holds a token and dim values.
// A file of numeric tokens with 1 dimensional vectors starts with two integers too.
fn parse_header(first: &[String], next_len: Option<usize>) -> Option<(usize, usize)> {
    if first.len() != 2 {
        return None;
    }
    let nb = first[0].parse::<usize>().ok()?;
    let dim = first[1].parse::<usize>().ok()?;
    match next_len {
        Some(len) if len != dim + 1 => None,
        _ => Some((nb, dim)),
    }
} // end of parse_header

/// reads embedded vectors of corpus from a reader
pub fn wordvectors_from_reader<R: Read>(reader: R, corpus: &str) -> SubgraphResult<CorpusEmbedding> {
    //
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);
    // non blank lines as (line number, fields)
    let mut lines = Vec::<(usize, Vec<String>)>::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let fields: Vec<String> = record.iter().flat_map(|f| f.split_whitespace()).map(|f| f.to_string()).collect();
        if !fields.is_empty() {
            lines.push((line, fields));
        }
    }
    //
    let header = match lines.first() {
        Some((_, first)) => parse_header(first, lines.get(1).map(|(_, next)| next.len())),
        None => None,
    };
    let mut dimension: Option<usize> = None;
    if let Some((nb, dim)) = header {
        log::debug!("{} : header nb vectors = {}, dimension = {}", corpus, nb, dim);
        dimension = Some(dim);
    }
    let mut nodeindexation = IndexSet::<String>::new();
    let mut values = Vec::<f64>::new();
    //
    let skip = if header.is_some() { 1 } else { 0 };
    for (line, fields) in lines.iter().skip(skip) {
        let line = *line;
        let dim = fields.len() - 1;
        match dimension {
            None => dimension = Some(dim),
            Some(d) if d != dim => {
                log::error!("{} : line {} has dimension {}, expected {}", corpus, line, dim, d);
                return Err(SubgraphError::DimensionMismatch(format!(
                    "corpus {} line {} : vector of dimension {}, expected {}",
                    corpus, line, dim, d
                )));
            }
            _ => {}
        }
        for (i, field) in fields[1..].iter().enumerate() {
            match field.parse::<f64>() {
                Ok(v) => values.push(v),
                Err(e) => {
                    log::error!("{} : error decoding field {} of line {}", corpus, i + 2, line);
                    return Err(SubgraphError::Parse {
                        context: corpus.to_string(),
                        line,
                        field: i + 2,
                        message: e.to_string(),
                    });
                }
            }
        }
        if !nodeindexation.insert(fields[0].clone()) {
            log::error!("{} : node {} given twice", corpus, fields[0]);
            return Err(SubgraphError::alignment(corpus, format!("node {} given twice", fields[0])));
        }
    } // end of for on lines
    //
    let dimension = dimension.unwrap_or(0);
    let nb_nodes = nodeindexation.len();
    if let Some((nb, _)) = header {
        if nb != nb_nodes {
            log::error!("{} : header announces {} vectors, got {}", corpus, nb, nb_nodes);
            return Err(SubgraphError::shape(corpus, format!("{} vectors", nb), format!("{} vectors", nb_nodes)));
        }
    }
    let embedded = Array2::from_shape_vec((nb_nodes, dimension), values)
        .map_err(|e| SubgraphError::DimensionMismatch(format!("corpus {} : {}", corpus, e)))?;
    log::info!("{} : reloaded {} vectors of dimension {}", corpus, nb_nodes, dimension);
    CorpusEmbedding::new(corpus, nodeindexation, embedded)
} // end of wordvectors_from_reader

/// reloads embedded vectors of corpus stored in path
pub fn wordvectors_from_path(path: &Path, corpus: &str) -> SubgraphResult<CorpusEmbedding> {
    log::info!("reading embedding file : {:?}", path);
    let fileres = OpenOptions::new().read(true).open(path);
    let file = match fileres {
        Ok(file) => file,
        Err(e) => {
            log::error!("wordvectors_from_path could not open file {:?}", path.as_os_str());
            return Err(SubgraphError::Io(e));
        }
    };
    wordvectors_from_reader(BufReader::new(file), corpus)
} // end of wordvectors_from_path

//========================================================================================

// end of mod tests
