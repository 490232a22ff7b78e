//! Delimited-table I/O.
//!
//! Input and cache tables are `;`-separated and Latin-1 encoded; the output
//! table is comma-separated UTF-8. Decoding goes through windows-1252 (the
//! WHATWG mapping for the latin1 label).

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use encoding_rs::WINDOWS_1252;

use crate::error::{EnrichError, EnrichResult};
use crate::types::{CacheRow, ContactRecord};

/// Field separator for input and cache tables.
const TABLE_DELIMITER: u8 = b';';

/// Separator joining multiple emails/phones inside one cell.
const LIST_SEPARATOR: char = ',';

/// Column order of the cache table.
const CACHE_COLUMNS: [&str; 6] = [
    "firstname",
    "lastname",
    "company",
    "domain",
    "emails",
    "phones",
];

/// An input table: original headers and cells, plus per-row resolution state.
#[derive(Debug, Clone)]
pub struct InputTable {
    /// Header row as read from the file.
    pub headers: StringRecord,

    /// Rows in input order.
    pub rows: Vec<InputRow>,
}

/// One input row.
#[derive(Debug, Clone)]
pub struct InputRow {
    /// Contact fields extracted from the required columns.
    pub contact: ContactRecord,

    /// The full original cells, preserved verbatim for the output table.
    pub cells: StringRecord,

    /// Resolved emails (`None` until resolved; stays `None` for unresolved
    /// rows).
    pub emails: Option<Vec<String>>,

    /// Resolved phones.
    pub phones: Option<Vec<String>>,
}

/// Read the input table.
///
/// Requires firstname/lastname/company/domain columns; extra columns are
/// kept and written back to the output unchanged. Empty cells become `None`.
/// A missing file or malformed structure is fatal.
pub fn read_input(path: &Path) -> EnrichResult<InputTable> {
    let text = read_latin1(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(TABLE_DELIMITER)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| table_error(path, &e))?
        .clone();

    let firstname_col = column_index(path, &headers, "firstname")?;
    let lastname_col = column_index(path, &headers, "lastname")?;
    let company_col = column_index(path, &headers, "company")?;
    let domain_col = column_index(path, &headers, "domain")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let cells = record.map_err(|e| table_error(path, &e))?;
        let contact = ContactRecord {
            firstname: cells.get(firstname_col).unwrap_or_default().to_string(),
            lastname: cells.get(lastname_col).unwrap_or_default().to_string(),
            company: opt_cell(&cells, company_col),
            domain: opt_cell(&cells, domain_col),
        };
        rows.push(InputRow {
            contact,
            cells,
            emails: None,
            phones: None,
        });
    }

    Ok(InputTable { headers, rows })
}

/// Write the output table: all input columns plus emails and phones,
/// one row per input row, in input order. Unresolved rows get empty cells.
pub fn write_output(path: &Path, table: &InputTable) -> EnrichResult<()> {
    let mut writer = Writer::from_path(path).map_err(|e| io_error(&e))?;

    let mut headers = table.headers.clone();
    headers.push_field("emails");
    headers.push_field("phones");
    writer.write_record(&headers).map_err(|e| io_error(&e))?;

    for row in &table.rows {
        let mut record = row.cells.clone();
        record.push_field(&render_list(row.emails.as_deref()));
        record.push_field(&render_list(row.phones.as_deref()));
        writer.write_record(&record).map_err(|e| io_error(&e))?;
    }

    writer.flush()?;
    Ok(())
}

/// Read cache rows from disk. The caller decides what an absent file means.
pub fn read_cache(path: &Path) -> EnrichResult<Vec<CacheRow>> {
    let text = read_latin1(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(TABLE_DELIMITER)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| table_error(path, &e))?
        .clone();

    let firstname_col = column_index(path, &headers, "firstname")?;
    let lastname_col = column_index(path, &headers, "lastname")?;
    let company_col = column_index(path, &headers, "company")?;
    let domain_col = column_index(path, &headers, "domain")?;
    let emails_col = column_index(path, &headers, "emails")?;
    let phones_col = column_index(path, &headers, "phones")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let cells = record.map_err(|e| table_error(path, &e))?;
        rows.push(CacheRow {
            contact: ContactRecord {
                firstname: cells.get(firstname_col).unwrap_or_default().to_string(),
                lastname: cells.get(lastname_col).unwrap_or_default().to_string(),
                company: opt_cell(&cells, company_col),
                domain: opt_cell(&cells, domain_col),
            },
            emails: split_list(cells.get(emails_col).unwrap_or_default()),
            phones: split_list(cells.get(phones_col).unwrap_or_default()),
        });
    }

    Ok(rows)
}

/// Write the full cache table, replacing any existing file.
pub fn write_cache(path: &Path, rows: &[CacheRow]) -> EnrichResult<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(TABLE_DELIMITER)
        .from_writer(Vec::new());

    writer
        .write_record(CACHE_COLUMNS)
        .map_err(|e| cache_error(&e))?;

    for row in rows {
        writer
            .write_record([
                row.contact.firstname.as_str(),
                row.contact.lastname.as_str(),
                row.contact.company.as_deref().unwrap_or_default(),
                row.contact.domain.as_deref().unwrap_or_default(),
                &join_list(&row.emails),
                &join_list(&row.phones),
            ])
            .map_err(|e| cache_error(&e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| cache_error(&e))?;
    let text = String::from_utf8(bytes).map_err(|e| cache_error(&e))?;
    let (encoded, _, _) = WINDOWS_1252.encode(&text);
    std::fs::write(path, encoded).map_err(|e| cache_error(&e))?;

    Ok(())
}

/// Split a list cell into its items. An empty cell is an empty list.
pub fn split_list(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        Vec::new()
    } else {
        cell.split(LIST_SEPARATOR).map(str::to_string).collect()
    }
}

/// Join list items into one cell.
pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

fn render_list(items: Option<&[String]>) -> String {
    items.map(join_list).unwrap_or_default()
}

/// An optional cell: empty or missing cells are absent, not empty strings.
fn opt_cell(cells: &StringRecord, index: usize) -> Option<String> {
    cells
        .get(index)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

fn read_latin1(path: &Path) -> EnrichResult<String> {
    let bytes = std::fs::read(path).map_err(|e| table_error(path, &e))?;
    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    Ok(text.into_owned())
}

fn column_index(path: &Path, headers: &StringRecord, name: &str) -> EnrichResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| table_error(path, &format!("missing required column '{}'", name)))
}

fn table_error(path: &Path, err: &dyn std::fmt::Display) -> EnrichError {
    EnrichError::Table {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn cache_error(err: &dyn std::fmt::Display) -> EnrichError {
    EnrichError::Cache {
        message: err.to_string(),
    }
}

fn io_error(err: &dyn std::fmt::Display) -> EnrichError {
    EnrichError::Io(std::io::Error::other(err.to_string()))
}
