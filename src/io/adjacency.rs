//! Load a dense adjacency matrix stored as text.
//!
//! One row per line, values separated by blanks. Lines beginning with # are skipped.
//! The matrix must be square and sized to the vocabulary: extra or missing columns are
//! reported, never ignored.

use std::fs::OpenOptions;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array2;

use crate::error::{SubgraphError, SubgraphResult};

/// reads a dim x dim matrix from a reader. context is used in error messages (typically the corpus name).
pub fn adjacency_from_reader<R: Read>(reader: R, dim: usize, context: &str) -> SubgraphResult<Array2<f64>> {
    //
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(reader);
    //
    let mut values = Vec::<f64>::with_capacity(dim * dim);
    let mut nb_rows = 0;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(nb_rows + 1);
        // runs of blanks give empty fields, tabs can hide in a field
        let mut nb_fields = 0;
        for field in record.iter().flat_map(|f| f.split_whitespace()) {
            nb_fields += 1;
            match field.parse::<f64>() {
                Ok(v) => values.push(v),
                Err(e) => {
                    log::error!("{} : error decoding field {} of line {} : {:?}", context, nb_fields, line, field);
                    return Err(SubgraphError::Parse {
                        context: context.to_string(),
                        line,
                        field: nb_fields,
                        message: e.to_string(),
                    });
                }
            }
        }
        if nb_fields == 0 {
            // blank line
            continue;
        }
        if nb_fields != dim {
            log::error!("{} : line {} has {} values, expecting {}", context, line, nb_fields, dim);
            return Err(SubgraphError::shape(context, format!("{} columns", dim), format!("{} columns at line {}", nb_fields, line)));
        }
        nb_rows += 1;
    } // end of for on records
    //
    if nb_rows != dim {
        log::error!("{} : got {} rows, expecting {}", context, nb_rows, dim);
        return Err(SubgraphError::shape(context, format!("{} rows", dim), format!("{} rows", nb_rows)));
    }
    let matrix = Array2::from_shape_vec((dim, dim), values)
        .map_err(|e| SubgraphError::shape(context, format!("({}, {})", dim, dim), e.to_string()))?;
    log::debug!("{} : loaded adjacency matrix of dimension {}", context, dim);
    Ok(matrix)
} // end of adjacency_from_reader

/// loads the adjacency matrix stored in path, dim is the vocabulary size.
pub fn adjacency_from_path(path: &Path, dim: usize) -> SubgraphResult<Array2<f64>> {
    log::info!("reading adjacency file : {:?}", path);
    let fileres = OpenOptions::new().read(true).open(path);
    let file = match fileres {
        Ok(file) => file,
        Err(e) => {
            log::error!("adjacency_from_path could not open file {:?}", path.as_os_str());
            return Err(SubgraphError::Io(e));
        }
    };
    let context = path.display().to_string();
    adjacency_from_reader(BufReader::new(file), dim, &context)
} // end of adjacency_from_path

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_load_square() {
        log_init_test();
        //
        let text = "# austen\n0 1.5 0\n0  0 2\n\n1e-1\t0 0\n";
        let matrix = adjacency_from_reader(text.as_bytes(), 3, "austen").unwrap();
        assert_eq!(matrix.dim(), (3, 3));
        assert_eq!(matrix[[0, 1]], 1.5);
        assert_eq!(matrix[[1, 2]], 2.);
        assert_eq!(matrix[[2, 0]], 0.1);
    } // end of test_load_square

    #[test]
    fn test_extra_column_rejected() {
        log_init_test();
        //
        let text = "0 1 0\n0 0 1\n1 0 0 4\n";
        let res = adjacency_from_reader(text.as_bytes(), 3, "twain");
        assert!(matches!(res, Err(SubgraphError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_missing_row_rejected() {
        log_init_test();
        //
        let text = "0 1 0\n0 0 1\n";
        let res = adjacency_from_reader(text.as_bytes(), 3, "twain");
        assert!(matches!(res, Err(SubgraphError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_bad_number() {
        log_init_test();
        //
        let text = "0 1\nx 0\n";
        let res = adjacency_from_reader(text.as_bytes(), 2, "dickens");
        match res {
            Err(SubgraphError::Parse { line, field, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(field, 1);
            }
            _ => panic!("expected parse error, got {:?}", res),
        }
    } // end of test_bad_number
} // end of mod tests
