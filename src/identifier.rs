//! # Body identifier resolution
//!
//! The second line of the physical-data block of a Horizons response names the body.
//! Two layouts are observed:
//!
//! ```text
//!  Revised: July 31, 2013             Mercury                            199 / 1
//!  Revised: June 21, 2016             Pluto / (Pluto-Charon)             999 / 9
//!  JPL/HORIZONS                      1 Ceres (A801 AA)          2025-Jan-16 10:12:11
//! ```
//!
//! Major bodies end the line with their integer id (an alternate id after a slash is
//! ignored), small bodies put their catalog number in front of the name. The large-body
//! layout is tried first.
//!
//! The short-form number of a small body (e.g. `1` for Ceres) is not the id under which
//! it is requested, so every resolved name goes through a correction table afterwards.
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static LARGE_BODY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+([^\s/()]+)(?:\s*/\s*\([^)]+\))?\s+(\d+)(?:\s*/\s*\d+)?$")
        .expect("invalid large-body header regex")
});

static SMALL_BODY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(\d+)\s+([\w-]+)").expect("invalid small-body header regex")
});

/// Canonical id and name of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: u64,
    pub name: String,
}

/// Name → canonical id overrides.
pub type IdCorrections = HashMap<String, u64>;

/// Parse the header line without applying any correction.
///
/// Return
/// ------
/// * `None` when neither layout matches, callers skip the line and keep scanning.
pub fn parse_header(line: &str) -> Option<Identity> {
    let line = line.trim_end();

    if let Some(caps) = LARGE_BODY_HEADER.captures(line) {
        if let Ok(id) = caps[2].parse::<u64>() {
            return Some(Identity {
                id,
                name: caps[1].to_string(),
            });
        }
    }

    let caps = SMALL_BODY_HEADER.captures(line)?;
    let id = caps[1].parse::<u64>().ok()?;
    Some(Identity {
        id,
        name: caps[2].to_string(),
    })
}

/// Parse the header line and replace the id of names listed in `corrections`.
pub fn resolve_identity(line: &str, corrections: &IdCorrections) -> Option<Identity> {
    let mut identity = parse_header(line)?;
    if let Some(&corrected) = corrections.get(&identity.name) {
        identity.id = corrected;
    }
    Some(identity)
}

#[cfg(test)]
mod identifier_tests {
    use super::*;

    fn ceres_corrections() -> IdCorrections {
        HashMap::from([("Ceres".to_string(), 2000001)])
    }

    #[test]
    fn test_large_body_header() {
        let identity =
            parse_header(" Revised: July 31, 2013             Mercury                            199 / 1")
                .unwrap();
        assert_eq!(identity.id, 199);
        assert_eq!(identity.name, "Mercury");

        let identity =
            parse_header(" Revised: Sep 28, 2012             Moon / (Earth)                     301   ")
                .unwrap();
        assert_eq!(identity.id, 301);
        assert_eq!(identity.name, "Moon");

        let identity =
            parse_header(" Revised: June 21, 2016             Pluto / (Pluto-Charon)             999 / 9")
                .unwrap();
        assert_eq!(identity.id, 999);
        assert_eq!(identity.name, "Pluto");
    }

    #[test]
    fn test_small_body_header() {
        let identity = parse_header(
            " JPL/HORIZONS                      136199 Eris (2003 UB313)      2025-Jan-16 10:12:11",
        )
        .unwrap();
        assert_eq!(identity.id, 136199);
        assert_eq!(identity.name, "Eris");
    }

    #[test]
    fn test_unmatched_header() {
        assert_eq!(parse_header("*******************************************"), None);
        assert_eq!(parse_header(""), None);
        assert_eq!(parse_header(" Revised: Mercury"), None);
    }

    #[test]
    fn test_corrected_small_body_id() {
        let identity = resolve_identity(
            " JPL/HORIZONS                      1 Ceres (A801 AA)          2025-Jan-16 10:12:11",
            &ceres_corrections(),
        )
        .unwrap();
        assert_eq!(identity.id, 2000001);
        assert_eq!(identity.name, "Ceres");
    }

    #[test]
    fn test_corrected_large_layout_id() {
        let identity = resolve_identity(" 1 Ceres 2000001", &ceres_corrections()).unwrap();
        assert_eq!(
            identity,
            Identity {
                id: 2000001,
                name: "Ceres".into()
            }
        );

        // the correction wins over whatever id was matched
        let identity = resolve_identity(" Revised: 2021   Ceres   42", &ceres_corrections()).unwrap();
        assert_eq!(identity.id, 2000001);
    }

    #[test]
    fn test_uncorrected_name() {
        let identity = resolve_identity(
            " Revised: April 12, 2021       Mars                          499",
            &ceres_corrections(),
        )
        .unwrap();
        assert_eq!(identity.id, 499);
    }
}
