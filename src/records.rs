use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::CleanerError;

/// Columns of the header-less input, in order: id, product, price, country.
pub const FIELD_COUNT: usize = 4;

/// One input row as read from disk. A field that is empty once unquoted
/// leading whitespace is skipped is `None`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RawRecord {
    #[serde(deserialize_with = "empty_as_missing")]
    pub id: Option<String>,
    #[serde(deserialize_with = "empty_as_missing")]
    pub product: Option<String>,
    #[serde(deserialize_with = "empty_as_missing")]
    pub price: Option<String>,
    #[serde(deserialize_with = "empty_as_missing")]
    pub country: Option<String>,
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, CleanerError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| CleanerError::file_access(path, e))?;
    let input = skip_initial_space(&bytes);
    // Flexible so a short or long row reaches the explicit field count check
    // below instead of failing against the width of the first row.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_slice());

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        if row.len() != FIELD_COUNT {
            return Err(CleanerError::FieldCount {
                line: row.position().map_or(0, |pos| pos.line()),
                found: row.len(),
            });
        }
        records.push(row.deserialize::<RawRecord>(None)?);
    }

    Ok(records)
}

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Drops spaces and tabs at the start of every field so that a quote after
/// `, ` still opens a quoted field. Whitespace inside quotes is untouched.
fn skip_initial_space(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut state = Scan::FieldStart;

    for &b in input {
        state = match (state, b) {
            (Scan::FieldStart, b' ' | b'\t') => continue,
            (Scan::FieldStart, b'"') => Scan::Quoted,
            (Scan::FieldStart | Scan::Unquoted | Scan::QuoteInQuoted, b',' | b'\n' | b'\r') => {
                Scan::FieldStart
            }
            (Scan::QuoteInQuoted, b'"') => Scan::Quoted,
            (Scan::FieldStart | Scan::QuoteInQuoted, _) => Scan::Unquoted,
            (Scan::Unquoted, _) => Scan::Unquoted,
            (Scan::Quoted, b'"') => Scan::QuoteInQuoted,
            (Scan::Quoted, _) => Scan::Quoted,
        };
        out.push(b);
    }

    out
}

fn empty_as_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    Ok((!s.is_empty()).then_some(s))
}
