//! Delimited-text documents as record sources.
//!
//! [`CsvDocument`] parses a whole document up front with the `csv` crate and
//! then serves any number of passes from memory. Rows may have differing
//! lengths.

use std::io;
use std::str::FromStr;

use crate::error::Result;
use crate::record::{Header, Record, RecordSource};

/// Options for reading a delimited-text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Treat the first row as column labels.
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            has_headers: false,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row holds column labels.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }
}

/// A parsed delimited-text document.
///
/// # Example
///
/// ```
/// use standout_statement::{CsvDocument, CsvOptions, Statement};
///
/// let doc = CsvDocument::parse_with(
///     "first,last\njohn,doe\njane,doe\n",
///     CsvOptions::default().has_headers(true),
/// )?;
///
/// let result = Statement::new().process_document(&doc);
/// assert_eq!(result.count(), 2);
/// assert_eq!(result.column_index("last"), Some(1));
/// # Ok::<(), standout_statement::StatementError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument {
    header: Header,
    records: Vec<Record>,
}

impl CsvDocument {
    /// Parses comma-separated text with no header row.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, CsvOptions::default())
    }

    /// Parses text with explicit options.
    pub fn parse_with(input: &str, options: CsvOptions) -> Result<Self> {
        Self::from_reader(input.as_bytes(), options)
    }

    /// Reads a document from any byte reader.
    pub fn from_reader<R: io::Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_headers)
            .flexible(true)
            .from_reader(reader);

        let header = if options.has_headers {
            Header::new(rdr.headers()?.iter())
        } else {
            Header::default()
        };

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            records.push(row.iter().map(String::from).collect());
        }

        tracing::debug!(
            records = records.len(),
            columns = header.len(),
            "parsed delimited document"
        );

        Ok(CsvDocument { header, records })
    }

    /// Column labels, empty when the document was read without headers.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The parsed rows, header excluded.
    pub fn rows(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows, header excluded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the document has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for CsvDocument {
    type Err = crate::StatementError;

    fn from_str(s: &str) -> Result<Self> {
        CsvDocument::parse(s)
    }
}

impl RecordSource for CsvDocument {
    fn records(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        Box::new(self.records.iter().cloned())
    }
}
