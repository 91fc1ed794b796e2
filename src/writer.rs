use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::error::CleanerError;

/// Writes `records` as a pretty-printed JSON array. The file handle is
/// released on every path; a failure part way may leave a truncated file.
pub fn write_json<T, P>(path: P, records: &[T], indent: usize) -> Result<(), CleanerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CleanerError::file_access(path, e))?;
    let mut out = BufWriter::new(file);

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut ser).map_err(|e| {
        if e.is_io() {
            CleanerError::file_access(path, io::Error::from(e))
        } else {
            CleanerError::from(e)
        }
    })?;

    out.flush().map_err(|e| CleanerError::file_access(path, e))
}
