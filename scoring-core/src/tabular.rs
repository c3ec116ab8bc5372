//! Delimited-text tables as a bulk request/response format.
//!
//! A table's header names the fields; each data row becomes one
//! [`EvaluationRequest`]. The delimiter is sniffed from the header line and
//! reused when the responses are written back.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use indexmap::IndexSet;
use thiserror::Error;

use crate::request::{EvaluationRequest, EvaluationResponse};
use crate::value::{FieldMap, Value};

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table has no header row")]
    MissingHeader,
    #[error("Malformed table: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Failed to encode table: {0}")]
    Encoding(String),
}

pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    delimiter: u8,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableFormat {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Picks the first candidate delimiter that splits the header line into
    /// more than one column, falling back to comma.
    pub fn detect(text: &str) -> Self {
        let header = text.lines().next().unwrap_or_default();

        CANDIDATE_DELIMITERS
            .iter()
            .copied()
            .find(|&delimiter| {
                ReaderBuilder::new()
                    .delimiter(delimiter)
                    .has_headers(false)
                    .from_reader(header.as_bytes())
                    .records()
                    .next()
                    .and_then(Result::ok)
                    .is_some_and(|record| record.len() > 1)
            })
            .map(Self::new)
            .unwrap_or_default()
    }
}

/// Rows of a decoded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTable {
    pub requests: Vec<EvaluationRequest>,
    /// The requested id column, if the header actually carries it.
    pub id_column: Option<String>,
}

/// Reads one request per data row.
///
/// The `id_column`, when present in the header, supplies each request's id
/// and is left out of its arguments. Empty cells decode as `Null`, every
/// other cell as its raw text.
pub fn decode_table(
    text: &str,
    format: TableFormat,
    id_column: Option<&str>,
) -> TableResult<DecodedTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(TableError::MissingHeader);
    }
    let id_position = id_column.and_then(|name| header.iter().position(|column| column == name));

    let requests = reader
        .records()
        .map(|record| -> TableResult<EvaluationRequest> {
            Ok(decode_row(&header, id_position, &record?))
        })
        .collect::<TableResult<Vec<_>>>()?;

    Ok(DecodedTable {
        requests,
        id_column: id_column.filter(|_| id_position.is_some()).map(str::to_string),
    })
}

fn decode_row(
    header: &StringRecord,
    id_position: Option<usize>,
    record: &StringRecord,
) -> EvaluationRequest {
    let mut request = EvaluationRequest::new(None);
    for (position, (name, cell)) in header.iter().zip(record.iter()).enumerate() {
        if Some(position) == id_position {
            request.id = Some(cell.to_string());
            continue;
        }
        let value = if cell.is_empty() {
            Value::Null
        } else {
            Value::string(cell)
        };
        request.arguments.insert(name.to_string(), value);
    }
    request
}

/// Writes responses as a table.
///
/// Columns are the optional id column followed by the union of result
/// fields in first-seen order. Fields a response lacks are left empty.
pub fn encode_table(
    format: TableFormat,
    id_column: Option<&str>,
    responses: &[EvaluationResponse],
) -> TableResult<String> {
    let fields: IndexSet<&str> = responses
        .iter()
        .flat_map(|response| response.result.keys().map(String::as_str))
        .collect();

    let mut header: Vec<&str> = Vec::with_capacity(fields.len() + 1);
    header.extend(id_column);
    header.extend(fields.iter().copied());
    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(&header)
        .map_err(|e| TableError::Encoding(e.to_string()))?;

    for response in responses {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if id_column.is_some() {
            row.push(response.id.clone().unwrap_or_default());
        }
        row.extend(fields.iter().map(|field| cell(&response.result, field)));
        writer
            .write_record(&row)
            .map_err(|e| TableError::Encoding(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableError::Encoding(e.to_string()))
}

fn cell(result: &FieldMap, field: &str) -> String {
    result.get(field).map(Value::to_string).unwrap_or_default()
}
