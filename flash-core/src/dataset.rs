//! Loader for the delimited flash table.
//!
//! The file is read once at startup. Column 0 holds the latitude and column 1
//! the longitude of each flash; any further columns are ignored. A row that
//! lacks either value, or whose value is not a finite number, aborts the load
//! with the offending line and column instead of being coerced to zero.
//!
//! Splitting is plain: each line is cut at every delimiter and one pair of
//! surrounding quotes is trimmed from a field. Quoted fields that contain the
//! delimiter, and `""` escapes, are not supported.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    error::DatasetError,
    geo::{GeoBounds, GeoPoint},
};

/// Parsing options for [`Dataset::load`] and [`Dataset::from_reader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetOptions {
    pub delimiter: char,
    /// Skip the first non-blank line.
    pub has_header: bool,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
        }
    }
}

/// Read-only table of flash locations, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<GeoPoint>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<GeoPoint>) -> Self {
        Self { rows }
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: &Path, opts: &DatasetOptions) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(BufReader::new(file), opts).map_err(|e| match e {
            DatasetError::Read(source) => DatasetError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), rows = dataset.len(), "loaded flash dataset");
        Ok(dataset)
    }

    /// Parses a delimited table from any buffered reader.
    ///
    /// Line numbers in errors are 1-based and count the header and blank
    /// lines; column numbers are 0-based.
    pub fn from_reader(reader: impl BufRead, opts: &DatasetOptions) -> Result<Self, DatasetError> {
        let mut rows = Vec::new();
        let mut header_pending = opts.has_header;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if header_pending {
                header_pending = false;
                debug!(header = %line.trim(), "skipping header row");
                continue;
            }
            rows.push(parse_row(&line, line_no, opts.delimiter)?);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[GeoPoint] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounding box of all rows, `None` if the table is empty.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::enclosing(&self.rows)
    }
}

fn parse_row(line: &str, line_no: usize, delimiter: char) -> Result<GeoPoint, DatasetError> {
    let mut fields = line.split(delimiter);
    let lat = parse_field(fields.next(), line_no, 0)?;
    let lon = parse_field(fields.next(), line_no, 1)?;
    Ok(GeoPoint::new(lat, lon))
}

fn parse_field(raw: Option<&str>, line: usize, column: usize) -> Result<f64, DatasetError> {
    let text = raw.map(unquote).unwrap_or_default();
    if text.is_empty() {
        return Err(DatasetError::MissingField { line, column });
    }
    let value: f64 = text.parse().map_err(|_| DatasetError::InvalidNumber {
        line,
        column,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(DatasetError::NonFinite { line, column });
    }
    Ok(value)
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(field)
}
