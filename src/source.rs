//! # Retrieval collaborator
//!
//! The extraction engine never talks to the network itself. Everything it needs is
//! obtained through a [`HorizonsSource`], which answers a [`HorizonsQuery`] with the
//! raw text of a JPL Horizons response.
//!
//! A query carries the target body (`COMMAND`), the observing center (`CENTER`, e.g.
//! `500@10` for the Sun's body center), the epoch of the single-epoch lookup and the
//! kind of table requested. [`HorizonsQuery::api_params`] renders it as the parameter
//! list of the Horizons API so that a network client only has to send it.
//!
//! Two offline sources are provided:
//!
//! * [`InMemorySource`]: responses registered by hand, used by unit tests.
//! * [`DirectorySource`]: responses saved as `<dir>/<command>.<table>.txt`, used for
//!   golden-file tests against recorded Horizons output.
use std::collections::HashMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use itertools::Itertools;

use crate::horizons_errors::HorizonsError;

/// The three tables requested for each body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Observer table, only its physical-data header block is used.
    Ephemerides,
    /// Cartesian state vectors.
    Vectors,
    /// Osculating orbital elements.
    Elements,
}

impl TableKind {
    /// Value of the `EPHEM_TYPE` parameter of the Horizons API
    pub fn ephem_type(&self) -> &'static str {
        match self {
            TableKind::Ephemerides => "OBSERVER",
            TableKind::Vectors => "VECTORS",
            TableKind::Elements => "ELEMENTS",
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            TableKind::Ephemerides => "ephemerides",
            TableKind::Vectors => "vectors",
            TableKind::Elements => "elements",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// A single-epoch request for one table of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonsQuery {
    pub command: String,
    pub center: String,
    pub epoch: Epoch,
    pub table: TableKind,
}

impl HorizonsQuery {
    pub fn new(command: &str, center: &str, epoch: Epoch, table: TableKind) -> Self {
        HorizonsQuery {
            command: command.to_string(),
            center: center.to_string(),
            epoch,
            table,
        }
    }

    /// Parameters of the Horizons API request equivalent to this query.
    ///
    /// The physical-data block (`OBJ_DATA`) is only asked for the ephemerides table,
    /// the two others are requested as CSV so that their rows can be split on commas,
    /// in AU and days to share the length unit of the extracted radius.
    pub fn api_params(&self) -> Vec<(String, String)> {
        let obj_data = match self.table {
            TableKind::Ephemerides => "YES",
            _ => "NO",
        };
        let mut params = vec![
            ("format".into(), "text".into()),
            ("COMMAND".into(), format!("'{}'", self.command)),
            ("CENTER".into(), format!("'{}'", self.center)),
            ("OBJ_DATA".into(), obj_data.into()),
            ("MAKE_EPHEM".into(), "YES".into()),
            ("EPHEM_TYPE".into(), self.table.ephem_type().into()),
            ("TLIST_TYPE".into(), "JD".into()),
            ("TLIST".into(), format!("'{}'", self.epoch.to_jde_tdb_days())),
            ("CSV_FORMAT".into(), "YES".into()),
        ];
        if self.table != TableKind::Ephemerides {
            params.push(("OUT_UNITS".into(), "AU-D".into()));
        }
        params
    }

    /// The query string of the request, `key=value` pairs joined with `&`.
    pub fn query_string(&self) -> String {
        self.api_params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .join("&")
    }
}

/// Raw text returned for a query, plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonsResponse {
    pub text: String,
    /// Request URL or file the text was read from, when known.
    pub origin: Option<String>,
}

impl HorizonsResponse {
    pub fn new(text: impl Into<String>) -> Self {
        HorizonsResponse {
            text: text.into(),
            origin: None,
        }
    }
}

/// Provider of raw Horizons responses.
pub trait HorizonsSource {
    fn fetch(&self, query: &HorizonsQuery) -> Result<HorizonsResponse, HorizonsError>;
}

/// Responses registered in memory, keyed by body command and table.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    responses: HashMap<(String, TableKind), String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, command: &str, table: TableKind, text: impl Into<String>) {
        self.responses
            .insert((command.to_string(), table), text.into());
    }

    pub fn with_response(mut self, command: &str, table: TableKind, text: impl Into<String>) -> Self {
        self.insert(command, table, text);
        self
    }
}

impl HorizonsSource for InMemorySource {
    fn fetch(&self, query: &HorizonsQuery) -> Result<HorizonsResponse, HorizonsError> {
        self.responses
            .get(&(query.command.clone(), query.table))
            .map(|text| HorizonsResponse::new(text.as_str()))
            .ok_or_else(|| HorizonsError::Retrieval {
                command: query.command.clone(),
                table: query.table,
                reason: "no response registered".into(),
            })
    }
}

/// Responses previously saved to `<root>/<command>.<table>.txt`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: Utf8PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Utf8Path>) -> Self {
        DirectorySource {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Location of the saved response answering `query`.
    pub fn response_path(&self, query: &HorizonsQuery) -> Utf8PathBuf {
        self.root
            .join(format!("{}.{}.txt", query.command, query.table.file_stem()))
    }
}

impl HorizonsSource for DirectorySource {
    fn fetch(&self, query: &HorizonsQuery) -> Result<HorizonsResponse, HorizonsError> {
        let path = self.response_path(query);
        let text = std::fs::read_to_string(&path).map_err(|err| HorizonsError::Retrieval {
            command: query.command.clone(),
            table: query.table,
            reason: format!("{path}: {err}"),
        })?;
        Ok(HorizonsResponse {
            text,
            origin: Some(path.to_string()),
        })
    }
}
