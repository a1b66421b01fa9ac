//! Vocabulary loading.
//!
//! The vocabulary is a blank separated list of tokens. The rank of a token in the list is the
//! row (and column) index of the token in every adjacency matrix.

use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;

use crate::error::{SubgraphError, SubgraphResult};

/// Ordered set of node identities. Given a rank we get the token with [Vocabulary::get_token],
/// given a token we get its rank with [Vocabulary::get_rank].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: IndexSet<String>,
} // end of struct Vocabulary

impl Vocabulary {
    /// builds a vocabulary from tokens in rank order. Tokens must be unique and non empty.
    pub fn new<I, S>(tokens: I) -> SubgraphResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::<String>::new();
        for token in tokens {
            let token: String = token.into();
            if token.is_empty() {
                log::error!("empty token at rank {}", set.len());
                return Err(SubgraphError::Parse {
                    context: String::from("vocabulary"),
                    line: 1,
                    field: set.len() + 1,
                    message: String::from("empty token"),
                });
            }
            let rank = set.len();
            let (first, inserted) = set.insert_full(token);
            if !inserted {
                let token = set.get_index(first).cloned().unwrap_or_default();
                log::error!("duplicate token {} at ranks {} and {}", token, first, rank);
                return Err(SubgraphError::DuplicateToken {
                    token,
                    first,
                    second: rank,
                });
            }
        }
        Ok(Vocabulary { tokens: set })
    } // end of new

    /// parse a text blob. Any run of blanks (space, tab, newline) separates tokens.
    pub fn parse(text: &str) -> SubgraphResult<Self> {
        let vocabulary = Vocabulary::new(text.split_whitespace())?;
        log::debug!("parsed vocabulary of {} tokens", vocabulary.len());
        Ok(vocabulary)
    }

    /// load the vocabulary stored in file path
    pub fn from_path(path: &Path) -> SubgraphResult<Self> {
        log::info!("reading vocabulary file : {:?}", path);
        let fileres = OpenOptions::new().read(true).open(path);
        let mut file = match fileres {
            Ok(file) => file,
            Err(e) => {
                log::error!("Vocabulary::from_path could not open file {:?}", path.as_os_str());
                return Err(SubgraphError::Io(e));
            }
        };
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        let vocabulary = Vocabulary::parse(&text)?;
        log::info!("vocabulary size : {}", vocabulary.len());
        Ok(vocabulary)
    } // end of from_path

    /// number of tokens, also dimension of adjacency matrices
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// token of rank rank
    pub fn get_token(&self, rank: usize) -> Option<&String> {
        self.tokens.get_index(rank)
    }

    /// rank of a token
    pub fn get_rank(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.tokens.iter()
    }

    pub fn get_tokens(&self) -> &IndexSet<String> {
        &self.tokens
    }
} // end of impl Vocabulary

//========================================================================================

// end of mod tests
