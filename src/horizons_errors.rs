use thiserror::Error;

use crate::source::TableKind;

#[derive(Error, Debug)]
pub enum HorizonsError {
    #[error("Sentinel {sentinel} not found in the {table} response")]
    MissingSentinel {
        sentinel: &'static str,
        table: TableKind,
    },

    #[error("No data row between $$SOE and $$EOE in the {0} response")]
    EmptyTable(TableKind),

    #[error("Invalid {table} row: {row}")]
    InvalidRow { table: TableKind, row: String },

    #[error("CSV error while reading a Horizons row: {0}")]
    Csv(#[from] csv::Error),

    #[error("No identifier line matched in the ephemerides response of body {0}")]
    MissingIdentity(String),

    #[error("No {table} response given for body {command}")]
    MissingResponse { command: String, table: TableKind },

    #[error("Body {command} resolves to id {id}, already extracted")]
    DuplicateId { command: String, id: u64 },

    #[error("Satellite not extracted, its primary {0} failed")]
    ParentFailed(String),

    #[error("Retrieval of {table} for body {command} failed: {reason}")]
    Retrieval {
        command: String,
        table: TableKind,
        reason: String,
    },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HorizonsError {
    /// Failures coming from the retrieval collaborator may succeed on a later attempt,
    /// parsing failures are deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, HorizonsError::Retrieval { .. })
    }
}

impl PartialEq for HorizonsError {
    fn eq(&self, other: &Self) -> bool {
        use HorizonsError::*;
        match (self, other) {
            (
                MissingSentinel {
                    sentinel: s1,
                    table: t1,
                },
                MissingSentinel {
                    sentinel: s2,
                    table: t2,
                },
            ) => s1 == s2 && t1 == t2,
            (EmptyTable(a), EmptyTable(b)) => a == b,
            (InvalidRow { table: t1, row: r1 }, InvalidRow { table: t2, row: r2 }) => {
                t1 == t2 && r1 == r2
            }
            (MissingIdentity(a), MissingIdentity(b)) => a == b,
            (
                MissingResponse {
                    command: c1,
                    table: t1,
                },
                MissingResponse {
                    command: c2,
                    table: t2,
                },
            ) => c1 == c2 && t1 == t2,
            (DuplicateId { command: c1, id: i1 }, DuplicateId { command: c2, id: i2 }) => {
                c1 == c2 && i1 == i2
            }
            (ParentFailed(a), ParentFailed(b)) => a == b,
            (
                Retrieval {
                    command: c1,
                    table: t1,
                    reason: r1,
                },
                Retrieval {
                    command: c2,
                    table: t2,
                    reason: r2,
                },
            ) => c1 == c2 && t1 == t2 && r1 == r2,
            (InvalidCatalog(a), InvalidCatalog(b)) => a == b,

            // not comparable, same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,
            (Serialization(_), Serialization(_)) => true,

            _ => false,
        }
    }
}
