//! # Dataset assembly
//!
//! [`DatasetBuilder`] walks a [`Catalog`] in declaration order. For each body it asks
//! the [`HorizonsSource`] for the three responses, runs the extraction pipeline, then
//! does the same for each declared satellite and attaches them to the body.
//!
//! ```text
//! ephemerides ─► identifier + field rules ─┐
//! vectors ─────► state vector ─────────────┼─► merge_record (+ imputed mass) ─► BodyRecord
//! elements ────► orbital elements ─────────┘
//! ```
//!
//! Each body is an isolated unit: a failure is recorded in the [`BuildReport`] and the
//! walk goes on with the next body. Retrieval failures are retried up to
//! [`Catalog::max_attempts`] times, parsing failures are not since the same text would
//! fail again. When a body fails its satellites are not extracted, they are reported
//! with [`HorizonsError::ParentFailed`]. Canonical ids are unique within a run: a body
//! resolving to an id already extracted fails with [`HorizonsError::DuplicateId`].
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    diagnostics::Diagnostic,
    geophysical::extract_geophysical,
    horizons_errors::HorizonsError,
    orbital_elements::extract_orbital_elements,
    record::{merge_record, BodyRecord},
    source::{HorizonsQuery, HorizonsSource, TableKind},
    state_vector::extract_state_vector,
};

/// The raw responses of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTexts {
    pub ephemerides: String,
    pub vectors: String,
    /// Not requested for the central body of the frame.
    pub elements: Option<String>,
}

/// Run the extraction pipeline on the responses of one body.
///
/// Arguments
/// ---------
/// * `command`: the Horizons command the texts answer, used in errors
/// * `texts`: the three raw responses
/// * `catalog`: id corrections, colors and the frame center
///
/// Return
/// ------
/// * the record (without satellites) and the diagnostics raised while building it
pub fn extract_body_record(
    command: &str,
    texts: &BodyTexts,
    catalog: &Catalog,
) -> Result<(BodyRecord, Vec<Diagnostic>), HorizonsError> {
    let block = extract_geophysical(&texts.ephemerides, &catalog.id_corrections);
    let state = extract_state_vector(&texts.vectors)?;
    let elements = if catalog.is_primary(command) {
        None
    } else {
        let text = texts
            .elements
            .as_deref()
            .ok_or_else(|| HorizonsError::MissingResponse {
                command: command.to_string(),
                table: TableKind::Elements,
            })?;
        extract_orbital_elements(text, false)?
    };

    let identity = block.identity.ok_or_else(|| {
        warn!(command, "no identifier line matched in the ephemerides response");
        HorizonsError::MissingIdentity(command.to_string())
    })?;
    let color = catalog.color_of(&identity.name);

    Ok(merge_record(
        identity,
        color,
        &block.properties,
        state,
        elements,
    ))
}

/// Ordered top-level records, serialized as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    bodies: Vec<BodyRecord>,
}

impl Dataset {
    pub fn bodies(&self) -> &[BodyRecord] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Find a body or a satellite by its canonical id.
    pub fn find(&self, id: u64) -> Option<&BodyRecord> {
        self.bodies.iter().find_map(|body| {
            if body.id() == id {
                Some(body)
            } else {
                body.satellites.iter().find(|sat| sat.id() == id)
            }
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, HorizonsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<BodyRecord>> for Dataset {
    fn from(bodies: Vec<BodyRecord>) -> Self {
        Dataset { bodies }
    }
}

/// A body of the catalog that could not be extracted.
#[derive(Debug, PartialEq)]
pub struct BodyFailure {
    /// Requested command
    pub id: String,
    /// Classification tag of the catalog group
    pub tag: String,
    /// Command of the body it orbits, for a satellite
    pub satellite_of: Option<String>,
    pub error: HorizonsError,
}

/// Outcome of a catalog walk: what was built, what was derived, what failed.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub dataset: Dataset,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<BodyFailure>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.id.as_str()).collect()
    }
}

/// Reject a built body whose canonical id was already produced in this run.
fn claim_id(
    seen: &mut HashSet<u64>,
    command: &str,
    built: (BodyRecord, Vec<Diagnostic>),
) -> Result<(BodyRecord, Vec<Diagnostic>), HorizonsError> {
    let id = built.0.id();
    if seen.insert(id) {
        Ok(built)
    } else {
        Err(HorizonsError::DuplicateId {
            command: command.to_string(),
            id,
        })
    }
}

pub struct DatasetBuilder<'a, S: HorizonsSource> {
    source: &'a S,
    catalog: &'a Catalog,
}

impl<'a, S: HorizonsSource> DatasetBuilder<'a, S> {
    pub fn new(source: &'a S, catalog: &'a Catalog) -> Self {
        DatasetBuilder { source, catalog }
    }

    fn fetch(&self, command: &str, table: TableKind) -> Result<String, HorizonsError> {
        let query = HorizonsQuery::new(
            command,
            &self.catalog.center,
            self.catalog.epoch(),
            table,
        );
        let response = self.source.fetch(&query)?;
        debug!(command, %table, origin = ?response.origin, "response received");
        Ok(response.text)
    }

    /// Get every response of a body before any parsing starts.
    pub fn fetch_texts(&self, command: &str) -> Result<BodyTexts, HorizonsError> {
        let ephemerides = self.fetch(command, TableKind::Ephemerides)?;
        let vectors = self.fetch(command, TableKind::Vectors)?;
        let elements = if self.catalog.is_primary(command) {
            None
        } else {
            Some(self.fetch(command, TableKind::Elements)?)
        };
        Ok(BodyTexts {
            ephemerides,
            vectors,
            elements,
        })
    }

    /// Fetch and extract one body, retrying while the source fails.
    pub fn build_body(&self, command: &str) -> Result<(BodyRecord, Vec<Diagnostic>), HorizonsError> {
        let mut attempt = 1;
        loop {
            let result = self
                .fetch_texts(command)
                .and_then(|texts| extract_body_record(command, &texts, self.catalog));
            match result {
                Err(err) if err.is_transient() && attempt < self.catalog.max_attempts => {
                    warn!(command, attempt, %err, "retrying body");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Walk the whole catalog.
    pub fn build(&self) -> BuildReport {
        let mut report = BuildReport::default();
        let mut bodies = Vec::new();
        let mut seen_ids = HashSet::new();

        for group in &self.catalog.groups {
            for entry in &group.bodies {
                let built = self
                    .build_body(&entry.id)
                    .and_then(|built| claim_id(&mut seen_ids, &entry.id, built));
                let (mut record, diagnostics) = match built {
                    Ok(built) => built,
                    Err(error) => {
                        warn!(tag = %group.tag, id = %entry.id, %error, "body skipped");
                        report.failures.push(BodyFailure {
                            id: entry.id.clone(),
                            tag: group.tag.clone(),
                            satellite_of: None,
                            error,
                        });
                        report
                            .failures
                            .extend(entry.satellites.iter().map(|satellite| BodyFailure {
                                id: satellite.clone(),
                                tag: group.tag.clone(),
                                satellite_of: Some(entry.id.clone()),
                                error: HorizonsError::ParentFailed(entry.id.clone()),
                            }));
                        continue;
                    }
                };
                report.diagnostics.extend(diagnostics);

                for satellite in &entry.satellites {
                    let built = self
                        .build_body(satellite)
                        .and_then(|built| claim_id(&mut seen_ids, satellite, built));
                    match built {
                        Ok((satellite_record, diagnostics)) => {
                            report.diagnostics.extend(diagnostics);
                            record.satellites.push(satellite_record);
                        }
                        Err(error) => {
                            warn!(id = %satellite, parent = %entry.id, %error, "satellite skipped");
                            report.failures.push(BodyFailure {
                                id: satellite.clone(),
                                tag: group.tag.clone(),
                                satellite_of: Some(entry.id.clone()),
                                error,
                            });
                        }
                    }
                }

                info!(
                    tag = %group.tag,
                    id = record.id(),
                    name = record.name(),
                    satellites = record.satellites.len(),
                    "body extracted"
                );
                bodies.push(record);
            }
        }

        report.dataset = bodies.into();
        report
    }
}
