//! Dump of the selected nodes as a csv file with header rank,node,score

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::{SubgraphError, SubgraphResult};
use crate::rank::ScoredNode;

/// writes selected nodes to a writer
pub fn write_selection<W: Write>(writer: W, selected: &[ScoredNode]) -> SubgraphResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for scored in selected {
        wtr.serialize(scored)?;
    }
    wtr.flush()?;
    Ok(())
} // end of write_selection

/// writes selected nodes in file path (truncated if it exists)
pub fn dump_selection(path: &Path, selected: &[ScoredNode]) -> SubgraphResult<()> {
    log::info!("dumping {} selected nodes in {:?}", selected.len(), path);
    let fileres = OpenOptions::new().write(true).create(true).truncate(true).open(path);
    let file = match fileres {
        Ok(file) => file,
        Err(e) => {
            log::error!("dump_selection could not open file {:?}", path.as_os_str());
            return Err(SubgraphError::Io(e));
        }
    };
    write_selection(file, selected)
} // end of dump_selection

//========================================================================================

// end of mod tests
