//! Row sources: the tokenizer boundary.
//!
//! The decoder pulls rows, each an ordered sequence of text cells, from a
//! [`RowSource`]. Tokenizing is an external concern; this module provides
//! the trait plus two sources: an adapter over the `csv` crate and an
//! in-memory source for programmatic feeding.

use std::collections::VecDeque;
use std::io;

use crate::error::DecodeError;

/// A sequential supplier of rows.
///
/// `Ok(None)` signals end of stream. Errors are lower-level malformed
/// input conditions; the decoder propagates them unchanged and latches.
pub trait RowSource {
    fn next_row(&mut self) -> Result<Option<Vec<String>>, DecodeError>;
}

/// Adapter exposing a `csv::Reader` as a [`RowSource`].
///
/// The tokenizer is configured with flexible record lengths and without
/// header handling: the decoding session owns the header protocol, so the
/// first row of each table reaches it like any other row.
pub struct CsvRowSource<R: io::Read> {
    reader: csv::Reader<R>,
    // Reused between reads; rows handed out are freshly allocated.
    record: csv::StringRecord,
}

impl<R: io::Read> CsvRowSource<R> {
    pub fn new(input: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        Self::from_reader(reader)
    }

    /// Wrap a caller-configured `csv::Reader` (custom delimiter, quoting,
    /// comments). The reader must be built with `has_headers(false)`.
    pub fn from_reader(reader: csv::Reader<R>) -> Self {
        Self {
            reader,
            record: csv::StringRecord::new(),
        }
    }
}

impl<R: io::Read> RowSource for CsvRowSource<R> {
    fn next_row(&mut self) -> Result<Option<Vec<String>>, DecodeError> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Ok(Some(self.record.iter().map(str::to_string).collect())),
            Ok(false) => Ok(None),
            Err(e) => Err(DecodeError::Source(e.to_string())),
        }
    }
}

/// In-memory row source.
#[derive(Debug, Clone, Default)]
pub struct VecRowSource {
    rows: VecDeque<Vec<String>>,
}

impl VecRowSource {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows: rows.into() }
    }

    /// Build from string slices, for fixtures.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }
}

impl RowSource for VecRowSource {
    fn next_row(&mut self) -> Result<Option<Vec<String>>, DecodeError> {
        Ok(self.rows.pop_front())
    }
}
