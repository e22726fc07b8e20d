//! # Catalog of bodies to extract
//!
//! The catalog is plain data: an ordered list of groups, each tagged with a
//! classification (`star`, `largebody`, `smallbody`, ...) and listing body ids with
//! their satellite ids. It also carries the settings shared by every request
//! (observing center, epoch), the id-correction table and the display colors.
//!
//! It is loaded once, from JSON or from [`Catalog::default`], and passed to the
//! [`DatasetBuilder`](crate::dataset::DatasetBuilder).
//!
//! ```json
//! {
//!   "center": "500@10",
//!   "epoch_jd": 2440400.5,
//!   "groups": [
//!     { "tag": "largebody", "bodies": [ { "id": "399", "satellites": ["301"] } ] }
//!   ],
//!   "id_corrections": { "Ceres": 2000001 },
//!   "colors": { "Earth": [0.0, 0.5, 1.0, 1.0] }
//! }
//! ```
//!
//! Omitted keys other than `groups` take their default value.
use std::collections::{HashMap, HashSet};

use camino::Utf8Path;
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::JD, horizons_errors::HorizonsError, identifier::IdCorrections, record::Rgba,
};

/// One body and the satellites extracted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Horizons command of the body (its id, names are ambiguous)
    pub id: String,
    #[serde(default)]
    pub satellites: Vec<String>,
}

impl CatalogEntry {
    pub fn new(id: &str, satellites: &[&str]) -> Self {
        CatalogEntry {
            id: id.to_string(),
            satellites: satellites.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Bodies sharing a classification tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub tag: String,
    pub bodies: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Horizons `CENTER`, `<site>@<body>`
    #[serde(default = "default_center")]
    pub center: String,
    /// Epoch of the lookup, Julian Date TDB
    #[serde(default = "default_epoch_jd")]
    pub epoch_jd: JD,
    pub groups: Vec<CatalogGroup>,
    #[serde(default = "default_id_corrections")]
    pub id_corrections: IdCorrections,
    #[serde(default = "default_colors")]
    pub colors: HashMap<String, Rgba>,
    /// Attempts per body when the source fails to answer
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_center() -> String {
    "500@10".to_string()
}

fn default_epoch_jd() -> JD {
    2440400.5
}

fn default_max_attempts() -> u32 {
    1
}

fn default_id_corrections() -> IdCorrections {
    // Horizons names Ceres by its small-body number 1, which is Mercury's barycenter id
    HashMap::from([("Ceres".to_string(), 2000001)])
}

fn default_colors() -> HashMap<String, Rgba> {
    [
        ("Mercury", [0.5, 0.5, 0.5, 1.0]),
        ("Venus", [0.9, 0.8, 0.6, 1.0]),
        ("Earth", [0.0, 0.5, 1.0, 1.0]),
        ("Mars", [0.8, 0.3, 0.2, 1.0]),
        ("Jupiter", [0.9, 0.6, 0.4, 1.0]),
        ("Saturn", [0.8, 0.7, 0.5, 1.0]),
        ("Uranus", [0.6, 0.9, 0.8, 1.0]),
        ("Neptune", [0.2, 0.3, 0.9, 1.0]),
        ("Pluto", [0.7, 0.5, 0.3, 1.0]),
        ("Eris", [0.8, 0.8, 0.8, 1.0]),
        ("Haumea", [1.0, 1.0, 1.0, 1.0]),
        ("Makemake", [0.6, 0.3, 0.2, 1.0]),
        ("Ceres", [0.5, 0.4, 0.3, 1.0]),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color))
    .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        let group = |tag: &str, bodies: Vec<CatalogEntry>| CatalogGroup {
            tag: tag.to_string(),
            bodies,
        };

        Catalog {
            center: default_center(),
            epoch_jd: default_epoch_jd(),
            groups: vec![
                group("star", vec![CatalogEntry::new("10", &[])]),
                group(
                    "largebody",
                    vec![
                        CatalogEntry::new("199", &[]),
                        CatalogEntry::new("299", &[]),
                        CatalogEntry::new("399", &["301"]),
                        CatalogEntry::new("499", &["401", "402"]),
                        CatalogEntry::new(
                            "599",
                            &["501", "502", "503", "504", "505", "514", "515", "516"],
                        ),
                        CatalogEntry::new("699", &[]),
                        CatalogEntry::new("799", &[]),
                        CatalogEntry::new("899", &[]),
                    ],
                ),
                group(
                    "smallbody",
                    vec![
                        CatalogEntry::new("999", &[]),
                        CatalogEntry::new("136199", &[]),
                        CatalogEntry::new("136472", &[]),
                        CatalogEntry::new("136108", &[]),
                        CatalogEntry::new("2000001", &[]),
                    ],
                ),
            ],
            id_corrections: default_id_corrections(),
            colors: default_colors(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Catalog {
    /// Parse and validate a JSON catalog.
    pub fn from_json_str(json: &str) -> Result<Self, HorizonsError> {
        let catalog: Catalog = serde_json::from_str(json)
            .map_err(|err| HorizonsError::InvalidCatalog(err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and validate a JSON catalog file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, HorizonsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the catalog can drive an extraction: at least one attempt per body,
    /// a non-empty center, and every body id declared once.
    pub fn validate(&self) -> Result<(), HorizonsError> {
        if self.max_attempts == 0 {
            return Err(HorizonsError::InvalidCatalog(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.center.trim().is_empty() {
            return Err(HorizonsError::InvalidCatalog("empty center".into()));
        }

        let mut seen = HashSet::new();
        let ids = self
            .groups
            .iter()
            .flat_map(|group| &group.bodies)
            .flat_map(|entry| std::iter::once(&entry.id).chain(&entry.satellites));
        for id in ids {
            if id.trim().is_empty() {
                return Err(HorizonsError::InvalidCatalog("empty body id".into()));
            }
            if !seen.insert(id.as_str()) {
                return Err(HorizonsError::InvalidCatalog(format!(
                    "body {id} is declared twice"
                )));
            }
        }
        Ok(())
    }

    pub fn epoch(&self) -> Epoch {
        Epoch::from_jde_tdb(self.epoch_jd)
    }

    /// Body at the center of the reference frame, the part of `center` after `@`.
    pub fn center_body(&self) -> &str {
        self.center
            .split_once('@')
            .map_or(self.center.as_str(), |(_, body)| body)
    }

    /// Whether `id` is the central body of the frame, which has no orbital elements.
    pub fn is_primary(&self, id: &str) -> bool {
        self.center_body() == id
    }

    pub fn color_of(&self, name: &str) -> Option<Rgba> {
        self.colors.get(name).copied()
    }

    /// Number of bodies, satellites included.
    pub fn len(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.bodies)
            .map(|entry| 1 + entry.satellites.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
