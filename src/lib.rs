pub mod atom;
pub mod bond;
pub mod bounds;
pub mod connectivity;
pub mod error;
pub mod frame;
pub mod reader;
pub mod section;
pub mod state;
pub mod units;

use std::path::Path;

use connectivity::Connectivity;
use error::ReadError;
use frame::Frame;
use reader::{DataFileReader, ReadSummary};
use units::Units;

/// Read a data file, keeping its units, into a new frame and connectivity.
///
/// # Errors
///
/// Returns an error if the file can not be read or is malformed.
pub fn read_data_file(
    path: &Path,
    input_paths: &[&Path],
) -> Result<(Frame, Connectivity, ReadSummary), ReadError> {
    let mut frame = Frame::new();
    let mut connectivity = Connectivity::new();
    let summary = DataFileReader::new(&mut frame, Units::new(1.0, 1.0, 1.0)?)
        .with_bond_creator(&mut connectivity)
        .read(path, input_paths)?;
    Ok((frame, connectivity, summary))
}
