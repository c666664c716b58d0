use crate::clusterer::{ClusterId, ProfileTable};
use crate::customer::{Customer, Gender};
use std::collections::HashMap;
use std::io::{self, Write};
use thiserror::Error;

pub const CSV_HEADER: &str = "ID,Customer ID,Gender,Age,Annual Income,Spending Score,Cluster";

/// Filename offered to clients downloading the raw dataset
pub const CSV_FILENAME: &str = "Mall_Customers.csv";

const COLUMNS: usize = 7;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("missing header row")]
    MissingHeader,

    #[error("unexpected header: {0}")]
    BadHeader(String),

    #[error("line {line}: expected 7 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field}: {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: duplicate id {id} (first seen on line {first})")]
    DuplicateId { line: usize, id: u32, first: usize },

    #[error("line {line}: unknown cluster {cluster}")]
    UnknownCluster { line: usize, cluster: ClusterId },
}

/// Write `customers` as CSV with a header row.
///
/// Floats use the shortest representation that parses back to the same
/// value; an absent cluster is an empty field.
pub fn write_csv<W: Write>(mut out: W, customers: &[Customer]) -> Result<(), CsvError> {
    writeln!(out, "{}", CSV_HEADER)?;
    for c in customers {
        let cluster = c.cluster.map(|id| id.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            c.id,
            c.customer_id,
            escape(c.gender.as_str()),
            c.age,
            c.annual_income,
            c.spending_score,
            cluster
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_csv_string(customers: &[Customer]) -> Result<String, CsvError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, customers)?;
    // Every byte written above comes from UTF-8 strings.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Records are one per line, so no written field may contain a newline.
pub(super) fn escape(field: &str) -> String {
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one record into fields, honoring double-quoted fields
pub(super) fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, CsvError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            (c, _) => current.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: line_no });
    }
    fields.push(current);
    Ok(fields)
}

fn field<T: std::str::FromStr>(
    raw: &str,
    line: usize,
    name: &'static str,
) -> Result<T, CsvError> {
    raw.trim().parse().map_err(|_| CsvError::InvalidField {
        line,
        field: name,
        value: raw.to_string(),
    })
}

/// Parse CSV produced by [`write_csv`] or any file with the same header.
///
/// Blank lines are skipped; `\r\n` endings are accepted. Ids must be
/// unique across the file.
pub fn parse_csv(input: &str) -> Result<Vec<Customer>, CsvError> {
    parse_records(input, None)
}

/// Like [`parse_csv`], but every present cluster id must be known to `profiles`
pub fn parse_csv_with(input: &str, profiles: &ProfileTable) -> Result<Vec<Customer>, CsvError> {
    parse_records(input, Some(profiles))
}

fn parse_records(input: &str, profiles: Option<&ProfileTable>) -> Result<Vec<Customer>, CsvError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(CsvError::MissingHeader)?;
    if header.trim_start_matches('\u{feff}') != CSV_HEADER {
        return Err(CsvError::BadHeader(header.to_string()));
    }

    let mut out = Vec::new();
    let mut seen: HashMap<u32, usize> = HashMap::new();
    for (line, raw) in lines {
        let fields = split_record(raw, line)?;
        if fields.len() != COLUMNS {
            return Err(CsvError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let gender: Gender = field(&fields[2], line, "gender")?;
        let cluster = match fields[6].trim() {
            "" => None,
            raw => Some(field(raw, line, "cluster")?),
        };
        if let (Some(cluster), Some(profiles)) = (cluster, profiles) {
            if !profiles.contains(cluster) {
                return Err(CsvError::UnknownCluster { line, cluster });
            }
        }

        let id: u32 = field(&fields[0], line, "id")?;
        if let Some(&first) = seen.get(&id) {
            return Err(CsvError::DuplicateId { line, id, first });
        }
        seen.insert(id, line);

        out.push(Customer {
            id,
            customer_id: field(&fields[1], line, "customer id")?,
            gender,
            age: field(&fields[3], line, "age")?,
            annual_income: field(&fields[4], line, "annual income")?,
            spending_score: field(&fields[5], line, "spending score")?,
            cluster,
        });
    }

    Ok(out)
}
