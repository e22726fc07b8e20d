//! # Sentinel-delimited CSV tables
//!
//! With `CSV_FORMAT=YES`, the data rows of a `VECTORS` or `ELEMENTS` response sit
//! between a `$$SOE` and a `$$EOE` line, one comma-separated row per epoch, each row
//! ending with a trailing comma:
//!
//! ```text
//! $$SOE
//! 2440400.500000000, A.D. 1969-Jun-28 00:00:00.0000,  1.2E-01, ...,
//! $$EOE
//! ```
//!
//! Only single-epoch lookups are made, so only the **first** row is read. Rows are
//! deserialized with `csv` + `serde` into a [`TableRow`] type that declares how many
//! leading columns it uses; any extra column (e.g. light-time and range in a
//! `VEC_TABLE=3` output) is ignored.
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;

use crate::{horizons_errors::HorizonsError, source::TableKind};

pub const START_OF_EPHEMERIS: &str = "$$SOE";
pub const END_OF_EPHEMERIS: &str = "$$EOE";

/// A row of a Horizons CSV table.
pub trait TableRow: DeserializeOwned {
    /// Number of leading columns deserialized into the row.
    const COLUMNS: usize;
}

/// Text of the first row between the `$$SOE` / `$$EOE` sentinels.
///
/// Return
/// ------
/// * [`HorizonsError::MissingSentinel`] if either sentinel is absent,
///   [`HorizonsError::EmptyTable`] if nothing sits between them.
pub fn first_row(text: &str, table: TableKind) -> Result<&str, HorizonsError> {
    let start = text
        .find(START_OF_EPHEMERIS)
        .ok_or(HorizonsError::MissingSentinel {
            sentinel: START_OF_EPHEMERIS,
            table,
        })?
        + START_OF_EPHEMERIS.len();

    let end = text[start..]
        .find(END_OF_EPHEMERIS)
        .ok_or(HorizonsError::MissingSentinel {
            sentinel: END_OF_EPHEMERIS,
            table,
        })?
        + start;

    text[start..end]
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(HorizonsError::EmptyTable(table))
}

/// Deserialize one CSV row into `T`.
pub fn parse_row<T: TableRow>(row: &str, table: TableKind) -> Result<T, HorizonsError> {
    let row = row.trim().trim_end_matches(',');
    let invalid_row = || HorizonsError::InvalidRow {
        table,
        row: row.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(row.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? || record.len() < T::COLUMNS {
        return Err(invalid_row());
    }

    let record: StringRecord = record.iter().take(T::COLUMNS).collect();
    record.deserialize(None).map_err(|_| invalid_row())
}

/// Deserialize the first data row of a Horizons CSV response.
pub fn read_first_row<T: TableRow>(text: &str, table: TableKind) -> Result<T, HorizonsError> {
    parse_row(first_row(text, table)?, table)
}
